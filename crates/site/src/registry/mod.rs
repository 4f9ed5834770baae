//! Component registry: the typed tag dispatch table and shared-content includes.

/// Built-in presentational components and the per-render dispatch table.
pub mod components;
/// Shared-content map and include sources.
pub mod shared;

pub use components::{ComponentKind, DispatchTable, TagTarget};
pub use shared::{FsIncludeSource, IncludeSource, NoIncludes, SharedContent};
