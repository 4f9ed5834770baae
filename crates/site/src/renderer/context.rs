//! Rendering context for the content renderer.

use docflow_core::{ParseOptions, Slugger};
use html_escape::{encode_double_quoted_attribute, encode_text};
use markdown::mdast::Node;
use std::collections::HashMap;

use super::types::{HeadingEntry, Props, RenderBlock, Scope};
use crate::html;
use crate::options::ContentOptions;
use crate::registry::{ComponentKind, DispatchTable, IncludeSource};

/// Everything fixed for one render call.
pub struct RenderSession<'a> {
    /// Flags for this call.
    pub options: &'a ContentOptions,
    /// Tag dispatch built from the flags and shared content.
    pub table: &'a DispatchTable,
    /// Loader for shared content.
    pub includes: &'a dyn IncludeSource,
    /// Parse options for included documents.
    pub parse_options: &'a ParseOptions,
}

/// Link reference definition (`[label]: url "title"`).
#[derive(Debug, Clone)]
pub struct LinkDefinition {
    /// Destination URL.
    pub url: String,
    /// Optional title.
    pub title: Option<String>,
}

/// State shared by a document and every child context rendered for it.
#[derive(Debug, Default)]
struct DocumentState {
    slugger: Slugger,
    headings: Vec<HeadingEntry>,
    definitions: HashMap<String, LinkDefinition>,
    footnote_ordinals: HashMap<String, usize>,
    footnotes: Vec<(String, String)>,
}

/// Tracks rendering state while the tree is traversed.
///
/// Completed output accumulates in `blocks`; HTML not yet finalized into a
/// block sits in `current_html`.
pub struct Context<'a> {
    /// Completed rendering blocks.
    pub blocks: Vec<RenderBlock>,
    /// Current HTML buffer (not yet finalized into a block).
    pub current_html: String,
    session: &'a RenderSession<'a>,
    stack: Vec<Scope>,
    include_depth: usize,
    state: DocumentState,
}

impl<'a> Context<'a> {
    /// Creates a root context for a document.
    pub fn new(session: &'a RenderSession<'a>) -> Self {
        Self::child(session, 0, DocumentState::default())
    }

    fn child(session: &'a RenderSession<'a>, include_depth: usize, state: DocumentState) -> Self {
        Self {
            blocks: Vec::new(),
            current_html: String::with_capacity(1024),
            session,
            stack: vec![Scope::Root],
            include_depth,
            state,
        }
    }

    /// Per-call settings.
    pub fn session(&self) -> &'a RenderSession<'a> {
        self.session
    }

    /// Flags for this call.
    pub fn options(&self) -> &'a ContentOptions {
        self.session.options
    }

    /// Number of shared-content includes enclosing this context.
    pub fn include_depth(&self) -> usize {
        self.include_depth
    }

    /// Writes a raw string to the current HTML buffer without escaping.
    pub fn push_raw(&mut self, s: &str) {
        self.current_html.push_str(s);
    }

    /// Writes HTML-escaped text.
    pub fn push_text(&mut self, s: &str) {
        self.current_html.push_str(&encode_text(s));
    }

    /// Returns true if any scope in the stack is a List.
    pub fn is_in_list(&self) -> bool {
        self.stack
            .iter()
            .any(|scope| matches!(scope, Scope::List { .. }))
    }

    /// Returns true if the innermost list is tight (no `<p>` around items).
    ///
    /// A blockquote between the list and the paragraph restores `<p>`.
    pub fn is_in_tight_list(&self) -> bool {
        self.stack
            .iter()
            .rev()
            .find(|scope| matches!(scope, Scope::List { .. } | Scope::Blockquote))
            .is_some_and(|scope| matches!(scope, Scope::List { spread: false }))
    }

    /// Returns true if any scope in the stack is within a table structure.
    pub fn is_in_table(&self) -> bool {
        self.stack
            .iter()
            .any(|scope| matches!(scope, Scope::Table | Scope::TableRow | Scope::TableCell))
    }

    /// Returns true if currently in phrasing content.
    pub fn is_in_paragraph(&self) -> bool {
        self.stack
            .iter()
            .any(|scope| matches!(scope, Scope::Paragraph))
    }

    /// Components here must render inline to keep the enclosing HTML whole.
    pub fn must_inline(&self) -> bool {
        self.is_in_list() || self.is_in_table() || self.is_in_paragraph()
    }

    /// Enters a new scope by pushing it onto the stack.
    pub fn enter(&mut self, scope: Scope) {
        self.stack.push(scope);
    }

    /// Exits the current scope by popping from the stack.
    pub fn exit(&mut self) -> Option<Scope> {
        self.stack.pop()
    }

    /// Finalizes the current HTML buffer into an HTML block.
    pub fn flush_html(&mut self) {
        if !self.current_html.is_empty() {
            let content = std::mem::take(&mut self.current_html);
            self.blocks.push(RenderBlock::Html { content });
        }
    }

    /// Emits a block, writing it inline when the enclosing structure is
    /// phrasing, list, or table content.
    pub fn push_block(&mut self, block: RenderBlock) {
        if self.must_inline() {
            html::render_blocks_into(&mut self.current_html, std::slice::from_ref(&block));
        } else {
            self.flush_html();
            self.blocks.push(block);
        }
    }

    /// Emits a component block.
    pub fn push_component(&mut self, kind: ComponentKind, props: Props, children: Vec<RenderBlock>) {
        self.push_block(RenderBlock::Component {
            kind,
            props,
            children,
        });
    }

    /// Renders nodes in a fresh scope stack and returns their blocks.
    ///
    /// Slugs, headings, and footnotes are shared with this context so the
    /// table of contents and anchors stay unique across component slots.
    pub fn render_children_to_blocks(
        &mut self,
        children: &[Node],
    ) -> Result<Vec<RenderBlock>, docflow_core::DocflowError> {
        let depth = self.include_depth;
        self.render_in_child(depth, |child| {
            for node in children {
                super::render::render_node(node, child)?;
            }
            Ok(())
        })
    }

    /// Renders nodes straight to an HTML string.
    pub fn render_children_to_html(
        &mut self,
        children: &[Node],
    ) -> Result<String, docflow_core::DocflowError> {
        let blocks = self.render_children_to_blocks(children)?;
        Ok(html::render_blocks(&blocks))
    }

    /// Runs `f` in a child context at `include_depth` and returns its blocks.
    pub fn render_in_child<F>(
        &mut self,
        include_depth: usize,
        f: F,
    ) -> Result<Vec<RenderBlock>, docflow_core::DocflowError>
    where
        F: FnOnce(&mut Context<'a>) -> Result<(), docflow_core::DocflowError>,
    {
        let state = std::mem::take(&mut self.state);
        let mut child = Context::child(self.session, include_depth, state);
        let result = f(&mut child);
        child.flush_html();
        self.state = std::mem::take(&mut child.state);
        result.map(|()| child.blocks)
    }

    /// Records link reference definitions found anywhere under `node`.
    pub fn collect_definitions(&mut self, node: &Node) {
        if let Node::Definition(def) = node {
            self.state
                .definitions
                .entry(def.identifier.clone())
                .or_insert_with(|| LinkDefinition {
                    url: def.url.clone(),
                    title: def.title.clone(),
                });
        }
        if let Some(children) = node.children() {
            for child in children {
                self.collect_definitions(child);
            }
        }
    }

    /// Looks up a link reference definition by normalized identifier.
    pub fn definition(&self, identifier: &str) -> Option<LinkDefinition> {
        self.state.definitions.get(identifier).cloned()
    }

    /// Generates a unique slug for a heading.
    pub fn generate_slug(&mut self, text: &str) -> String {
        self.state.slugger.next_slug(text)
    }

    /// Claims a custom heading id, suffixing it if the page already uses it.
    pub fn claim_slug(&mut self, id: &str) -> String {
        self.state.slugger.claim(id)
    }

    /// Adds a heading entry to the table of contents.
    pub fn add_heading(&mut self, entry: HeadingEntry) {
        self.state.headings.push(entry);
    }

    /// Ordinal of a footnote, assigned on first reference.
    pub fn footnote_ordinal(&mut self, identifier: &str) -> usize {
        let next = self.state.footnote_ordinals.len() + 1;
        *self
            .state
            .footnote_ordinals
            .entry(identifier.to_string())
            .or_insert(next)
    }

    /// Stores a rendered footnote definition for the trailing section.
    pub fn push_footnote(&mut self, identifier: String, content_html: String) {
        self.state.footnotes.push((identifier, content_html));
    }

    /// Consumes the context and returns blocks and headings.
    pub fn finish(mut self) -> (Vec<RenderBlock>, Vec<HeadingEntry>) {
        self.flush_html();

        // Unreferenced definitions are dropped, as GFM does.
        let ordinals = &self.state.footnote_ordinals;
        let mut footnotes: Vec<(usize, String, String)> = std::mem::take(&mut self.state.footnotes)
            .into_iter()
            .filter_map(|(id, content)| Some((*ordinals.get(&id)?, id, content)))
            .collect();
        if !footnotes.is_empty() {
            footnotes.sort_by_key(|(ordinal, _, _)| *ordinal);

            let mut section = String::from(
                "<section data-footnotes class=\"footnotes\"><h2 class=\"sr-only\" id=\"footnote-label\">Footnotes</h2><ol>",
            );
            for (_, id, content) in &footnotes {
                let id = encode_double_quoted_attribute(id);
                section.push_str(&format!("<li id=\"user-content-fn-{}\">", id));
                section.push_str(content);
                section.push_str(&format!(
                    "<a href=\"#user-content-fnref-{}\" data-footnote-backref aria-label=\"Back to reference\">↩</a></li>",
                    id
                ));
            }
            section.push_str("</ol></section>");
            self.blocks.push(RenderBlock::Html { content: section });
        }

        (self.blocks, self.state.headings)
    }
}
