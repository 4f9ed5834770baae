//! Document sources accepted by the renderer.

use markdown::mdast::Node;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

use crate::{DocflowError, ParseOptions, frontmatter_from_tree, parse_mdast};

/// A document that has already been parsed, together with its frontmatter.
///
/// Parsing once and rendering with several flag sets (e.g. a page and its
/// preview) avoids re-reading the source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedDocument {
    /// MDAST root.
    pub tree: Node,
    /// Frontmatter as a JSON object (empty when absent).
    #[serde(default)]
    pub frontmatter: Map<String, JsonValue>,
}

/// Content handed to the renderer: raw markup or a pre-parsed document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DocumentSource {
    /// Markdown/MDX text.
    Raw(String),
    /// Output of [`parse_document`].
    Parsed(ParsedDocument),
}

impl DocumentSource {
    /// Parses a raw source, or clones the already parsed one.
    pub fn into_parsed(self, options: &ParseOptions) -> Result<ParsedDocument, DocflowError> {
        match self {
            Self::Raw(text) => parse_document(&text, options),
            Self::Parsed(doc) => Ok(doc),
        }
    }

    /// Borrowing variant of [`DocumentSource::into_parsed`].
    pub fn to_parsed(&self, options: &ParseOptions) -> Result<ParsedDocument, DocflowError> {
        match self {
            Self::Raw(text) => parse_document(text, options),
            Self::Parsed(doc) => Ok(doc.clone()),
        }
    }

    /// Returns the raw text when this source has not been parsed.
    pub fn as_raw(&self) -> Option<&str> {
        match self {
            Self::Raw(text) => Some(text),
            Self::Parsed(_) => None,
        }
    }
}

impl From<String> for DocumentSource {
    fn from(text: String) -> Self {
        Self::Raw(text)
    }
}

impl From<&str> for DocumentSource {
    fn from(text: &str) -> Self {
        Self::Raw(text.to_string())
    }
}

impl From<ParsedDocument> for DocumentSource {
    fn from(doc: ParsedDocument) -> Self {
        Self::Parsed(doc)
    }
}

/// Parses document text and reads its frontmatter.
pub fn parse_document(input: &str, options: &ParseOptions) -> Result<ParsedDocument, DocflowError> {
    let tree = parse_mdast(input, options)?;
    let frontmatter = frontmatter_from_tree(&tree)?;
    Ok(ParsedDocument { tree, frontmatter })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_source_parses_with_frontmatter() {
        let source = DocumentSource::from("---\ntitle: Intro\n---\n\nHello");
        let doc = source.to_parsed(&ParseOptions::docs()).unwrap();
        assert_eq!(
            doc.frontmatter.get("title").and_then(JsonValue::as_str),
            Some("Intro")
        );
        assert!(matches!(doc.tree, Node::Root(_)));
    }

    #[test]
    fn parsed_source_is_returned_as_is() {
        let doc = parse_document("Hello", &ParseOptions::docs()).unwrap();
        let source = DocumentSource::from(doc.clone());
        assert_eq!(source.as_raw(), None);
        assert_eq!(source.into_parsed(&ParseOptions::docs()).unwrap(), doc);
    }

    #[test]
    fn untagged_json_accepts_plain_string() {
        let source: DocumentSource = serde_json::from_str("\"# Title\"").unwrap();
        assert_eq!(source.as_raw(), Some("# Title"));
    }
}
