//! Type definitions for the content renderer.

use docflow_core::CodeProps;
use serde::Serialize;
use serde_json::{Map, Value as JsonValue};
use std::collections::BTreeMap;

use crate::registry::ComponentKind;

/// A component prop value - either a literal string or a JS expression.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PropValue {
    /// A literal string value (from key="value").
    Literal {
        /// The attribute text.
        value: String,
    },
    /// A JS expression (from key={expression}, or `true` for a bare attribute).
    Expression {
        /// Expression source without braces.
        value: String,
    },
}

impl PropValue {
    /// Creates a literal string prop value.
    pub fn literal(value: impl Into<String>) -> Self {
        PropValue::Literal {
            value: value.into(),
        }
    }

    /// Creates an expression prop value.
    pub fn expression(value: impl Into<String>) -> Self {
        PropValue::Expression {
            value: value.into(),
        }
    }

    /// Returns the raw value regardless of type.
    pub fn value(&self) -> &str {
        match self {
            PropValue::Literal { value } | PropValue::Expression { value } => value,
        }
    }

    /// Returns true if this is an expression.
    pub fn is_expression(&self) -> bool {
        matches!(self, PropValue::Expression { .. })
    }
}

/// Component props keyed by attribute name.
pub type Props = BTreeMap<String, PropValue>;

/// One node of rendered output.
#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum RenderBlock {
    /// Finished HTML.
    Html {
        /// The HTML content string.
        content: String,
    },

    /// A registered presentational component.
    Component {
        /// Which component the tag dispatched to.
        kind: ComponentKind,
        /// Props copied from the tag's attributes.
        props: Props,
        /// Rendered children (default slot).
        children: Vec<RenderBlock>,
    },

    /// A fenced code block for the code-block component.
    Code {
        /// The code content.
        code: String,
        /// Props from the fence language and meta.
        props: CodeProps,
    },

    /// Shared content inlined in place of its tag.
    Include {
        /// Tag name as written.
        name: String,
        /// URL the content was loaded from.
        url: String,
        /// Rendered included document.
        children: Vec<RenderBlock>,
    },
}

/// Heading metadata extracted during rendering.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct HeadingEntry {
    /// Heading depth (2-4 for anchored headings).
    pub depth: u8,
    /// Anchor id.
    pub slug: String,
    /// Visible heading text.
    pub text: String,
}

/// Body of a rendered document.
#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ContentBody {
    /// Parsed and dispatched content.
    Blocks {
        /// Rendered blocks in document order.
        blocks: Vec<RenderBlock>,
    },
    /// Caller-trusted markup injected without parsing.
    TrustedHtml {
        /// The markup, verbatim.
        html: String,
    },
}

/// Result of a render call.
#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RenderedContent {
    /// Class list of the wrapper container.
    pub wrapper_class: String,
    /// Rendered body.
    pub body: ContentBody,
    /// Anchored headings for a table of contents.
    pub headings: Vec<HeadingEntry>,
    /// Document frontmatter (empty for trusted HTML).
    pub frontmatter: Map<String, JsonValue>,
}

impl RenderedContent {
    /// Rendered blocks, or an empty slice for trusted HTML.
    pub fn blocks(&self) -> &[RenderBlock] {
        match &self.body {
            ContentBody::Blocks { blocks } => blocks,
            ContentBody::TrustedHtml { .. } => &[],
        }
    }

    /// Final markup including the wrapper container.
    pub fn to_html(&self) -> String {
        crate::html::render_content(self)
    }

    /// Serializes the result for a host that renders its own components.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Represents the type of scope currently being rendered.
#[derive(Debug, Clone, PartialEq)]
pub enum Scope {
    /// Document root - not inside any specific block element.
    Root,
    /// Inside a paragraph or heading (phrasing content only).
    Paragraph,
    /// Inside a list element (`<ul>` or `<ol>`).
    List {
        /// Loose list: items keep their `<p>` wrappers.
        spread: bool,
    },
    /// Inside a `<blockquote>`.
    Blockquote,
    /// Inside a table element (`<table>`).
    Table,
    /// Inside a table row element (`<tr>`).
    TableRow,
    /// Inside a table cell element (`<td>` or `<th>`).
    TableCell,
}
