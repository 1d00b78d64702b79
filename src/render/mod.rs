//! Rendering module for turning placements into output formats.

mod html;
mod json;
mod options;
mod result;
pub mod visitor;

pub use html::{to_html, to_html_with_stats, to_html_with_visitor, HtmlRenderer};
pub use json::{to_json, JsonFormat};
pub use options::RenderOptions;
pub use result::{PlacementStats, RenderResult};
pub use visitor::{CompositeVisitor, DefaultVisitor, SegmentVisitor, VisitorAction};
