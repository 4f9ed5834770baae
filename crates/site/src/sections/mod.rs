//! Static page sections.

pub mod pricing_features;
pub mod row;

pub use pricing_features::features_section;
pub use row::{ContentItem, ImagePosition, Row, RowProps};
