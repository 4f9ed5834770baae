//! MDAST-based content renderer.
//!
//! Document source is parsed with markdown-rs (GFM + MDX), then walked
//! once. Element rules (anchor headings, table wrappers, `#id` anchors,
//! image zoom/float) apply as nodes are visited; JSX tags are looked up in a
//! [`DispatchTable`] built for the call from the flags and the shared-content
//! map.
//!
//! # Module Structure
//!
//! - `types` - Output types (RenderBlock, PropValue, HeadingEntry, ...)
//! - `context` - Rendering context for tracking state during traversal
//! - `render` - AST node rendering functions
//! - `image` - Image attribute resolution

mod context;
pub mod image;
mod render;
mod types;

pub use types::{ContentBody, HeadingEntry, PropValue, Props, RenderBlock, RenderedContent, Scope};

use context::{Context, RenderSession};
use docflow_core::{DocflowError, DocumentSource, ParseOptions, ParsedDocument, parse_document};
use std::borrow::Cow;
use std::sync::Arc;

use crate::options::{ContentOptions, ContentProps};
use crate::registry::{DispatchTable, IncludeSource, NoIncludes, SharedContent};
use render::render_node;

/// Maximum nesting of shared-content includes.
pub const MAX_INCLUDE_DEPTH: usize = 8;

/// Renders document content with the site's component set.
///
/// The renderer holds only configuration; every call builds its own
/// dispatch table and state, so one renderer can serve many threads.
#[derive(Clone)]
pub struct ContentRenderer {
    shared: SharedContent,
    includes: Arc<dyn IncludeSource>,
    parse_options: ParseOptions,
}

impl std::fmt::Debug for ContentRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentRenderer")
            .field("shared", &self.shared)
            .field("parse_options", &self.parse_options)
            .finish_non_exhaustive()
    }
}

impl Default for ContentRenderer {
    fn default() -> Self {
        Self::new(SharedContent::default(), Arc::new(NoIncludes))
    }
}

impl ContentRenderer {
    /// Creates a renderer with a shared-content map and its loader.
    pub fn new(shared: SharedContent, includes: Arc<dyn IncludeSource>) -> Self {
        Self {
            shared,
            includes,
            parse_options: ParseOptions::docs(),
        }
    }

    /// Overrides the parser configuration.
    pub fn with_parse_options(mut self, parse_options: ParseOptions) -> Self {
        self.parse_options = parse_options;
        self
    }

    /// Shared-content map registered on every call.
    pub fn shared(&self) -> &SharedContent {
        &self.shared
    }

    /// Parses text with this renderer's parser configuration.
    pub fn parse(&self, input: &str) -> Result<ParsedDocument, DocflowError> {
        parse_document(input, &self.parse_options)
    }

    /// Renders props, honouring `as_html`.
    ///
    /// With `as_html` the content must be a raw string; it is injected
    /// through [`ContentRenderer::render_trusted_html`].
    pub fn render_props(&self, props: &ContentProps) -> Result<RenderedContent, DocflowError> {
        if props.as_html {
            let html = props.content.as_raw().ok_or_else(|| {
                DocflowError::Props("asHTML requires string content".to_string())
            })?;
            return Ok(self.render_trusted_html(html, &props.options));
        }
        self.render(&props.content, &props.options)
    }

    /// Parses (if needed) and renders a document.
    pub fn render(
        &self,
        source: &DocumentSource,
        options: &ContentOptions,
    ) -> Result<RenderedContent, DocflowError> {
        let doc = match source {
            DocumentSource::Raw(text) => Cow::Owned(self.parse(text)?),
            DocumentSource::Parsed(doc) => Cow::Borrowed(doc),
        };

        let table = DispatchTable::build(options, &self.shared);
        let session = RenderSession {
            options,
            table: &table,
            includes: self.includes.as_ref(),
            parse_options: &self.parse_options,
        };

        let mut ctx = Context::new(&session);
        ctx.collect_definitions(&doc.tree);
        render_node(&doc.tree, &mut ctx)?;
        let (blocks, headings) = ctx.finish();

        log::debug!(
            "Rendered {} blocks, {} headings ({} tags registered)",
            blocks.len(),
            headings.len(),
            table.len()
        );

        Ok(RenderedContent {
            wrapper_class: options.wrapper_class(),
            body: ContentBody::Blocks { blocks },
            headings,
            frontmatter: doc.frontmatter.clone(),
        })
    }

    /// Wraps caller-trusted markup without parsing or validating it.
    ///
    /// Trust boundary: the markup is emitted verbatim, so it must already be
    /// sanitized. Nothing in it is dispatched to components.
    pub fn render_trusted_html(&self, html: &str, options: &ContentOptions) -> RenderedContent {
        RenderedContent {
            wrapper_class: options.wrapper_class(),
            body: ContentBody::TrustedHtml {
                html: html.to_string(),
            },
            headings: Vec::new(),
            frontmatter: Default::default(),
        }
    }
}
