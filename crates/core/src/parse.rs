//! Markdown parsing options and helpers.

use crate::{DocflowError, SourceLocation};
use markdown::mdast::Node;
use markdown::message::{Message, Place};
use serde::{Deserialize, Serialize};

/// Which markdown-rs constructs the parser enables.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParseOptions {
    /// Enable MDX: JSX tags (`<Admonition>`, `<>`), `{expressions}`, and
    /// `import`/`export` lines.
    pub jsx: bool,
    /// Enable GitHub Flavored Markdown constructs.
    pub gfm: bool,
    /// Enable YAML frontmatter parsing.
    pub frontmatter: bool,
    /// Enable indented code blocks.
    pub code_indented: bool,
    /// Parse raw HTML as HTML nodes instead of JSX.
    pub raw_html: bool,
}

impl ParseOptions {
    /// Docs content defaults: GFM plus MDX, no indented code.
    ///
    /// Component children are usually indented for readability, so indented
    /// code blocks stay off.
    pub const fn docs() -> Self {
        Self {
            jsx: true,
            gfm: true,
            frontmatter: true,
            code_indented: false,
            raw_html: false,
        }
    }

    /// Plain GFM markdown (no JSX, raw HTML kept as HTML nodes).
    pub const fn markdown() -> Self {
        Self {
            jsx: false,
            gfm: true,
            frontmatter: true,
            code_indented: true,
            raw_html: true,
        }
    }

    /// Convert to markdown-rs `ParseOptions`.
    pub fn to_markdown(self) -> markdown::ParseOptions {
        let mut constructs = markdown::Constructs {
            frontmatter: self.frontmatter,
            code_indented: self.code_indented,
            html_flow: self.raw_html,
            html_text: self.raw_html,
            ..Default::default()
        };

        if self.gfm {
            constructs.gfm_autolink_literal = true;
            constructs.gfm_footnote_definition = true;
            constructs.gfm_label_start_footnote = true;
            constructs.gfm_strikethrough = true;
            constructs.gfm_table = true;
            constructs.gfm_task_list_item = true;
        }

        if self.jsx {
            constructs.mdx_esm = true;
            constructs.mdx_expression_flow = true;
            constructs.mdx_expression_text = true;
            constructs.mdx_jsx_flow = true;
            constructs.mdx_jsx_text = true;
        }

        markdown::ParseOptions {
            constructs,
            ..markdown::ParseOptions::default()
        }
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self::docs()
    }
}

/// Parse markdown into an MDAST tree.
///
/// Parser failures are surfaced as [`DocflowError::Parse`] with the
/// parser's own message and position.
pub fn parse_mdast(input: &str, options: &ParseOptions) -> Result<Node, DocflowError> {
    markdown::to_mdast(input, &options.to_markdown())
        .map_err(|err| DocflowError::parse_error(err.to_string(), message_location(&err)))
}

/// Start position of a node, or `1:1` when the node carries none.
pub fn node_location(node: &Node) -> SourceLocation {
    node.position()
        .map(|position| SourceLocation::new(position.start.line, position.start.column))
        .unwrap_or_default()
}

fn message_location(message: &Message) -> SourceLocation {
    match &message.place {
        Some(place) => match place.as_ref() {
            Place::Point(point) => SourceLocation::new(point.line, point.column),
            Place::Position(position) => {
                SourceLocation::new(position.start.line, position.start.column)
            }
        },
        None => SourceLocation::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_docs_options_parse_jsx() {
        let tree = parse_mdast("<Admonition type=\"note\">\nHi\n</Admonition>", &ParseOptions::docs())
            .unwrap();
        let Node::Root(root) = tree else {
            panic!("expected root");
        };
        assert!(matches!(root.children[0], Node::MdxJsxFlowElement(_)));
    }

    #[test]
    fn test_docs_options_parse_esm_and_expressions() {
        let tree = parse_mdast(
            "import Note from './note'\n\n{/* draft */}\n\n## Setup {#setup}",
            &ParseOptions::docs(),
        )
        .unwrap();
        let Node::Root(root) = tree else {
            panic!("expected root");
        };
        assert!(matches!(root.children[0], Node::MdxjsEsm(_)));
        assert!(matches!(root.children[1], Node::MdxFlowExpression(_)));
        let Node::Heading(heading) = &root.children[2] else {
            panic!("expected heading");
        };
        assert!(matches!(
            heading.children.last(),
            Some(Node::MdxTextExpression(expr)) if expr.value == "#setup"
        ));
    }

    #[test]
    fn test_docs_options_disable_indented_code() {
        let tree = parse_mdast("    indented text", &ParseOptions::docs()).unwrap();
        let Node::Root(root) = tree else {
            panic!("expected root");
        };
        assert!(matches!(root.children[0], Node::Paragraph(_)));
    }

    #[test]
    fn test_unclosed_jsx_is_parse_error() {
        let err = parse_mdast("<Tabs>\n\ntext", &ParseOptions::docs()).unwrap_err();
        assert!(matches!(err, DocflowError::Parse { .. }), "{err:?}");
    }

    #[test]
    fn test_markdown_options_keep_html() {
        let tree = parse_mdast("<div>raw</div>", &ParseOptions::markdown()).unwrap();
        let Node::Root(root) = tree else {
            panic!("expected root");
        };
        assert!(matches!(root.children[0], Node::Html(_)));
    }
}
