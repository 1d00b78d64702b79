//! Document model types for block markup.
//!
//! This module defines the intermediate representation shared by ad
//! placement and gallery grouping: a source string plus an immutable list
//! of top-level block nodes addressing it by byte range.

mod document;
mod node;

pub use document::Document;
pub use node::{count_words, Node, NodeKind};
