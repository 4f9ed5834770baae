use thiserror::Error;

use crate::frontmatter::FrontmatterError;

/// Source location information for error reporting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    /// Optional file path or include URL
    pub file: Option<String>,
    /// Line number (1-indexed)
    pub line: usize,
    /// Column number (1-indexed)
    pub column: usize,
}

impl SourceLocation {
    /// Create a new source location
    pub fn new(line: usize, column: usize) -> Self {
        Self {
            file: None,
            line,
            column,
        }
    }

    /// Attach a file (or include URL) to this location
    pub fn in_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }
}

impl Default for SourceLocation {
    fn default() -> Self {
        Self::new(1, 1)
    }
}

impl std::fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.file {
            Some(file) => write!(f, "{}:{}:{}", file, self.line, self.column),
            None => write!(f, "{}:{}", self.line, self.column),
        }
    }
}

/// Errors that can occur while parsing or rendering content.
#[derive(Debug, Error)]
pub enum DocflowError {
    /// markdown-rs parser error surfaced unmodified.
    #[error("Parse error at {location}: {message}")]
    Parse {
        /// Parser message
        message: String,
        /// Source location
        location: SourceLocation,
    },
    /// Frontmatter could not be read.
    #[error(transparent)]
    Frontmatter(#[from] FrontmatterError),
    /// A capitalized JSX tag with no registered component.
    #[error("Unknown component at {location}: {name}")]
    UnknownComponent {
        /// Tag name as written in the document
        name: String,
        /// Source location
        location: SourceLocation,
    },
    /// Shared content could not be loaded.
    #[error("Failed to include {url}: {message}")]
    Include {
        /// Include URL from the shared-content map
        url: String,
        /// Loader message
        message: String,
    },
    /// Shared content included itself (directly or not) too many times.
    #[error("Include depth limit ({limit}) exceeded at {url}")]
    IncludeDepth {
        /// Include URL that would exceed the limit
        url: String,
        /// Maximum nesting depth
        limit: usize,
    },
    /// Renderer input did not match the props contract.
    #[error("Invalid content props: {0}")]
    Props(String),
    /// IO error while reading content.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DocflowError {
    /// Create a parse error with location
    pub fn parse_error(message: impl Into<String>, location: SourceLocation) -> Self {
        Self::Parse {
            message: message.into(),
            location,
        }
    }

    /// Create an unknown component error with location
    pub fn unknown_component(name: impl Into<String>, location: SourceLocation) -> Self {
        Self::UnknownComponent {
            name: name.into(),
            location,
        }
    }

    /// Create an include error for a URL
    pub fn include(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Include {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Attach a file to the location of parse and component errors.
    ///
    /// Used when an error surfaces from included content so the message
    /// names the include URL rather than the outer document.
    pub fn in_file(self, file: &str) -> Self {
        match self {
            Self::Parse { message, location } if location.file.is_none() => Self::Parse {
                message,
                location: location.in_file(file),
            },
            Self::UnknownComponent { name, location } if location.file.is_none() => {
                Self::UnknownComponent {
                    name,
                    location: location.in_file(file),
                }
            }
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_display() {
        assert_eq!(SourceLocation::new(3, 7).to_string(), "3:7");
        assert_eq!(
            SourceLocation::new(3, 7).in_file("shared/intro").to_string(),
            "shared/intro:3:7"
        );
    }

    #[test]
    fn test_in_file_keeps_existing_file() {
        let err = DocflowError::unknown_component(
            "Widget",
            SourceLocation::new(2, 1).in_file("inner"),
        )
        .in_file("outer");
        assert_eq!(err.to_string(), "Unknown component at inner:2:1: Widget");
    }

    #[test]
    fn test_in_file_ignores_other_variants() {
        let err = DocflowError::include("a/b", "missing").in_file("outer");
        assert_eq!(err.to_string(), "Failed to include a/b: missing");
    }
}
