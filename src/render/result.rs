//! Rendering result with statistics.

use serde::{Deserialize, Serialize};

use crate::model::{Document, NodeKind};
use crate::placement::Placement;

/// Result of rendering a placement, including content and statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderResult {
    /// The rendered HTML
    pub content: String,

    /// Placement statistics
    pub stats: PlacementStats,
}

impl RenderResult {
    /// Create a new render result.
    pub fn new(content: String, stats: PlacementStats) -> Self {
        Self { content, stats }
    }

    /// Create a simple result with just content.
    pub fn content_only(content: String) -> Self {
        Self {
            content,
            stats: PlacementStats::default(),
        }
    }

    /// Get the content length in bytes.
    pub fn content_len(&self) -> usize {
        self.content.len()
    }
}

/// Statistics about a document and the ads placed in it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementStats {
    /// Number of documents folded into these stats
    pub document_count: u32,

    /// Top-level blocks
    pub block_count: u32,

    /// Heading blocks
    pub heading_count: u32,

    /// Divider blocks
    pub divider_count: u32,

    /// Image-only blocks
    pub image_block_count: u32,

    /// Words across all blocks
    pub word_count: u32,

    /// Content blocks in the placement
    pub content_block_count: u32,

    /// Ad markers placed
    pub ad_count: u32,

    /// Ads the placement aimed for
    pub desired_ads: u32,
}

impl PlacementStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect block-level counts from a document.
    pub fn from_document(doc: &Document) -> Self {
        let mut stats = Self {
            document_count: 1,
            ..Self::default()
        };
        for node in doc.nodes() {
            stats.block_count = stats.block_count.saturating_add(1);
            stats.word_count = stats.word_count.saturating_add(clamp_u32(node.word_count));
            match node.kind {
                NodeKind::Heading { .. } => {
                    stats.heading_count = stats.heading_count.saturating_add(1)
                }
                NodeKind::Divider => stats.divider_count = stats.divider_count.saturating_add(1),
                _ => {}
            }
            if node.is_image_only() {
                stats.image_block_count = stats.image_block_count.saturating_add(1);
            }
        }
        stats
    }

    /// Record the outcome of a placement.
    pub fn record_placement(&mut self, placement: &Placement) {
        self.content_block_count = self
            .content_block_count
            .saturating_add(clamp_u32(placement.content_count()));
        self.ad_count = self.ad_count.saturating_add(clamp_u32(placement.ad_count()));
        self.desired_ads = self
            .desired_ads
            .saturating_add(clamp_u32(placement.desired_ads));
    }

    /// Merge another stats instance into this one.
    pub fn merge(&mut self, other: &PlacementStats) {
        self.document_count = self.document_count.saturating_add(other.document_count);
        self.block_count = self.block_count.saturating_add(other.block_count);
        self.heading_count = self.heading_count.saturating_add(other.heading_count);
        self.divider_count = self.divider_count.saturating_add(other.divider_count);
        self.image_block_count = self
            .image_block_count
            .saturating_add(other.image_block_count);
        self.word_count = self.word_count.saturating_add(other.word_count);
        self.content_block_count = self
            .content_block_count
            .saturating_add(other.content_block_count);
        self.ad_count = self.ad_count.saturating_add(other.ad_count);
        self.desired_ads = self.desired_ads.saturating_add(other.desired_ads);
    }

    /// Average words between ads, `None` when no ad was placed.
    pub fn words_per_ad(&self) -> Option<f64> {
        (self.ad_count > 0).then(|| self.word_count as f64 / self.ad_count as f64)
    }
}

/// Counts past `u32::MAX` stick at the maximum.
fn clamp_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}
