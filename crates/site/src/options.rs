//! Render flags and the renderer's input contract.

use docflow_core::{DocflowError, DocumentSource};
use serde::{Deserialize, Serialize};

const WRAPPER_CLASS: &str = "prose-doc prose dark:prose-invert xs:prose-code:break-words";
const POSTGRES_CLASS: &str = "leading-8";
const USE_CASE_CLASS: &str = "dark:prose-p:text-gray-new-70 dark:prose-strong:text-white dark:prose-li:text-gray-new-70 dark:prose-table:text-gray-new-70";

/// Flags that select alternate component substitutions for one render call.
///
/// Every combination is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContentOptions {
    /// Extra class for the wrapper container.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    /// Render `h2`-`h4` as plain headings (no anchor decoration).
    pub without_anchor_heading: bool,
    /// Release-note image sizing.
    pub is_release_note: bool,
    /// PostgreSQL tutorial mode: no image zoom, float hints, relaxed leading.
    pub is_postgres: bool,
    /// Use-case pages: `CTA` becomes `CtaBlock` and prose colors change.
    pub is_use_case: bool,
}

impl ContentOptions {
    /// Class list of the wrapper container, in clsx order.
    pub fn wrapper_class(&self) -> String {
        let mut classes = vec![WRAPPER_CLASS];
        if let Some(extra) = self.class_name.as_deref().filter(|c| !c.trim().is_empty()) {
            classes.push(extra.trim());
        }
        if self.is_postgres {
            classes.push(POSTGRES_CLASS);
        }
        if self.is_use_case {
            classes.push(USE_CASE_CLASS);
        }
        classes.join(" ")
    }
}

/// Renderer input: content, output mode and flags.
///
/// Deserializes from the camelCase props object used by page templates:
/// `{ "content": "...", "asHTML": false, "isPostgres": true }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentProps {
    /// Document source (required).
    pub content: DocumentSource,
    /// Inject `content` verbatim as trusted HTML, skipping parsing.
    #[serde(default, rename = "asHTML")]
    pub as_html: bool,
    /// Rendering flags.
    #[serde(flatten)]
    pub options: ContentOptions,
}

impl ContentProps {
    /// Props for `content` with default flags.
    pub fn new(content: impl Into<DocumentSource>) -> Self {
        Self {
            content: content.into(),
            as_html: false,
            options: ContentOptions::default(),
        }
    }

    /// Replaces the rendering flags.
    pub fn with_options(mut self, options: ContentOptions) -> Self {
        self.options = options;
        self
    }

    /// Parses props from JSON, reporting contract violations as
    /// [`DocflowError::Props`].
    pub fn from_json(json: &str) -> Result<Self, DocflowError> {
        serde_json::from_str(json).map_err(|err| DocflowError::Props(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrapper_class_default() {
        assert_eq!(ContentOptions::default().wrapper_class(), WRAPPER_CLASS);
    }

    #[test]
    fn test_wrapper_class_order() {
        let options = ContentOptions {
            class_name: Some("mt-8".to_string()),
            is_postgres: true,
            is_use_case: true,
            ..Default::default()
        };
        let class = options.wrapper_class();
        let extra = class.find("mt-8").unwrap();
        let leading = class.find("leading-8").unwrap();
        let dark = class.find("dark:prose-p:text-gray-new-70").unwrap();
        assert!(extra < leading && leading < dark, "{class}");
    }

    #[test]
    fn test_props_from_json() {
        let props = ContentProps::from_json(
            r#"{"content":"Hi","asHTML":true,"isReleaseNote":true,"withoutAnchorHeading":true}"#,
        )
        .unwrap();
        assert!(props.as_html);
        assert!(props.options.is_release_note);
        assert!(props.options.without_anchor_heading);
        assert!(!props.options.is_postgres);
        assert_eq!(props.content.as_raw(), Some("Hi"));
    }

    #[test]
    fn test_props_require_content() {
        let err = ContentProps::from_json(r#"{"isPostgres":true}"#).unwrap_err();
        assert!(matches!(err, DocflowError::Props(_)), "{err:?}");
        assert!(err.to_string().contains("content"));
    }

    #[test]
    fn test_props_reject_wrong_content_shape() {
        let err = ContentProps::from_json(r#"{"content":42}"#).unwrap_err();
        assert!(matches!(err, DocflowError::Props(_)), "{err:?}");
    }
}
