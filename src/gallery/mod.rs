//! Image gallery grouping.
//!
//! Walks the same top-level block list as ad placement and wraps runs of
//! image-only blocks into a single gallery container.

mod grouper;
mod options;

pub use grouper::{group_document, group_galleries, group_galleries_with, GalleryResult};
pub use options::GalleryOptions;
