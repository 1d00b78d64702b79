//! Block-level node types.

use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Kind of a top-level block node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NodeKind {
    /// `h1` through `h6`
    Heading {
        /// Heading level (1-6)
        level: u8,
    },

    /// A horizontal rule (`hr`)
    Divider,

    /// A bare `img` element
    Image,

    /// A paragraph (`p`)
    Paragraph,

    /// An ordered or unordered list (`ul`, `ol`, `dl`)
    List,

    /// A table
    Table,

    /// Non-whitespace text sitting directly at the top level
    Text,

    /// Any other element, identified by its lowercase tag name
    Element {
        /// Tag name
        tag: String,
    },

    /// Markup the scanner could not split; the whole input as one block
    Raw,
}

impl NodeKind {
    /// Classify a lowercase tag name.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => NodeKind::Heading {
                level: tag.as_bytes()[1] - b'0',
            },
            "hr" => NodeKind::Divider,
            "img" => NodeKind::Image,
            "p" => NodeKind::Paragraph,
            "ul" | "ol" | "dl" => NodeKind::List,
            "table" => NodeKind::Table,
            other => NodeKind::Element {
                tag: other.to_string(),
            },
        }
    }

    /// Tag name for display, `#text` for top-level text.
    pub fn tag(&self) -> &str {
        match self {
            NodeKind::Heading { level } => match level {
                1 => "h1",
                2 => "h2",
                3 => "h3",
                4 => "h4",
                5 => "h5",
                _ => "h6",
            },
            NodeKind::Divider => "hr",
            NodeKind::Image => "img",
            NodeKind::Paragraph => "p",
            NodeKind::List => "list",
            NodeKind::Table => "table",
            NodeKind::Text => "#text",
            NodeKind::Raw => "#raw",
            NodeKind::Element { tag } => tag,
        }
    }
}

/// A top-level block node.
///
/// Nodes never own markup. They address the source string held by the
/// owning [`Document`](super::Document) through byte ranges.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    /// Node classification
    pub kind: NodeKind,

    /// Byte range of the node including its trivia
    pub span: Range<usize>,

    /// Byte range of the element alone
    pub element: Range<usize>,

    /// Whitespace-separated word count of the rendered text
    pub word_count: usize,

    /// Number of `img` elements in the node (the node itself included)
    pub image_count: usize,

    /// Rendered text content
    pub text: String,
}

impl Node {
    /// Create a node for an element span; `span` starts equal to `element`.
    pub fn new(kind: NodeKind, element: Range<usize>, text: String, image_count: usize) -> Self {
        let word_count = count_words(&text);
        Self {
            kind,
            span: element.clone(),
            element,
            word_count,
            image_count,
            text,
        }
    }

    /// Headings and dividers: no ad may directly follow these.
    pub fn is_heading_or_divider(&self) -> bool {
        matches!(self.kind, NodeKind::Heading { .. } | NodeKind::Divider)
    }

    /// Check if an ad slot may be placed right after this node.
    pub fn allows_ad_after(&self) -> bool {
        !self.is_heading_or_divider()
    }

    /// Check if this is a heading.
    pub fn is_heading(&self) -> bool {
        matches!(self.kind, NodeKind::Heading { .. })
    }

    /// Check if the rendered text is empty after trimming.
    pub fn has_text(&self) -> bool {
        !self.text.trim().is_empty()
    }

    /// A bare image, or a non-table wrapper with no text around exactly one image.
    pub fn is_image_only(&self) -> bool {
        match self.kind {
            NodeKind::Image => true,
            NodeKind::Table | NodeKind::Text | NodeKind::Raw => false,
            _ => !self.has_text() && self.image_count == 1,
        }
    }

    /// Length of the trivia following the element.
    pub fn trailing_len(&self) -> usize {
        self.span.end - self.element.end
    }
}

/// Count whitespace-separated words.
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}
