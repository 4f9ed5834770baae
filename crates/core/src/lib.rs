#![deny(missing_docs)]
//! docflow core: markdown parsing, document sources, frontmatter, slugs, and code props.

/// Code fence meta parsing (`title="x" showLineNumbers {1,3-5}`).
pub mod code_props;
/// Core error types.
pub mod error;
/// YAML frontmatter extraction from parsed trees.
pub mod frontmatter;
/// Markdown parsing options and helpers.
pub mod parse;
/// Slug generation utilities.
pub mod slug;
/// Raw and pre-parsed document sources.
pub mod source;

pub use code_props::{CodeProps, parse_code_meta};
pub use error::{DocflowError, SourceLocation};
pub use frontmatter::{FrontmatterError, frontmatter_from_tree};
pub use parse::{ParseOptions, node_location, parse_mdast};
pub use slug::{Slugger, custom_id_from_expression, extract_custom_id, slugify};
pub use source::{DocumentSource, ParsedDocument, parse_document};
