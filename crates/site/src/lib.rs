#![deny(missing_docs)]
//! docflow site: content rendering with the docs component set, and static page sections.

/// Parallel batch rendering.
pub mod batch;
/// Default HTML markup for rendered blocks.
pub mod html;
/// Render flags and component props.
pub mod options;
/// Tag dispatch table and shared-content includes.
pub mod registry;
/// Rendering layer (MDAST-based block renderer).
pub mod renderer;
/// Static marketing page sections.
pub mod sections;

pub use batch::{BatchInput, BatchOptions, BatchOutcome, BatchOutput, BatchStats, render_batch};
pub use docflow_core::{DocflowError, DocumentSource, ParseOptions, ParsedDocument};
pub use options::{ContentOptions, ContentProps};
pub use registry::{
    ComponentKind, DispatchTable, FsIncludeSource, IncludeSource, NoIncludes, SharedContent,
    TagTarget,
};
pub use renderer::{
    ContentBody, ContentRenderer, HeadingEntry, MAX_INCLUDE_DEPTH, PropValue, Props, RenderBlock,
    RenderedContent,
};
pub use sections::features_section;
