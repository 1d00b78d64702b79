//! Placement output: content blocks interleaved with ad markers.

use serde::{Deserialize, Serialize};

/// One element of a placement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Segment {
    /// A run of original markup, copied verbatim
    Content {
        /// Concatenated markup of the run
        markup: String,
    },

    /// Render one ad slot here
    Ad {
        /// Zero-based position among the placement's ads
        index: usize,
    },
}

impl Segment {
    /// Check if this is an ad marker.
    pub fn is_ad(&self) -> bool {
        matches!(self, Segment::Ad { .. })
    }

    /// Markup of a content block, `None` for ads.
    pub fn markup(&self) -> Option<&str> {
        match self {
            Segment::Content { markup } => Some(markup),
            Segment::Ad { .. } => None,
        }
    }
}

/// Ordered output of ad placement.
///
/// Always begins and ends with a content block. Concatenating the content
/// blocks yields the input markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    /// Segments in render order
    pub segments: Vec<Segment>,

    /// Word count the placement was computed from
    pub total_words: usize,

    /// Ads the placement aimed for (0 when the document was too short)
    pub desired_ads: usize,
}

impl Placement {
    /// Create a placement from already-ordered segments.
    pub fn new(segments: Vec<Segment>, total_words: usize, desired_ads: usize) -> Self {
        Self {
            segments,
            total_words,
            desired_ads,
        }
    }

    /// The whole markup as one content block, no ads.
    pub fn unsplit(markup: impl Into<String>, total_words: usize) -> Self {
        Self::new(
            vec![Segment::Content {
                markup: markup.into(),
            }],
            total_words,
            0,
        )
    }

    /// Iterate over segments.
    pub fn iter(&self) -> std::slice::Iter<'_, Segment> {
        self.segments.iter()
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Check if there are no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Number of ad markers.
    pub fn ad_count(&self) -> usize {
        self.segments.iter().filter(|s| s.is_ad()).count()
    }

    /// Number of content blocks.
    pub fn content_count(&self) -> usize {
        self.segments.len() - self.ad_count()
    }

    /// Content blocks in order.
    pub fn content_blocks(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(Segment::markup)
    }

    /// Concatenated content, ads removed.
    pub fn content_markup(&self) -> String {
        self.content_blocks().collect()
    }
}

impl<'a> IntoIterator for &'a Placement {
    type Item = &'a Segment;
    type IntoIter = std::slice::Iter<'a, Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}
