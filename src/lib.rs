//! # adweave
//!
//! In-content ad placement and image gallery grouping for article HTML.
//!
//! This library takes block-level markup (typically the output of a
//! markdown-to-HTML step), splits it into content blocks separated by ad
//! markers spaced by word count, and can collapse runs of images into
//! gallery wrappers.
//!
//! ## Quick Start
//!
//! ```
//! use adweave::{insert_ads, render, PlacementOptions};
//!
//! let html = "<h2>Codes</h2><p>Redeem these before they expire.</p>";
//! let placement = insert_ads(html, &PlacementOptions::default());
//!
//! // Short articles stay in one piece
//! assert_eq!(placement.ad_count(), 0);
//!
//! let page = render::to_html(&placement, &render::RenderOptions::default());
//! assert_eq!(page, html);
//! ```
//!
//! ## Features
//!
//! - **Exact preservation**: content blocks concatenate back to the input byte for byte
//! - **Heading-aware**: ads never follow a heading or a divider
//! - **Galleries**: runs of 2-4 image-only blocks become one gallery wrapper
//! - **Parallel batches**: uses Rayon for independent documents

pub mod error;
pub mod gallery;
pub mod model;
pub mod parser;
pub mod placement;
pub mod ratelimit;
pub mod render;

use std::fs;
use std::path::Path;

// Re-export commonly used types
pub use error::{Error, Result};
pub use gallery::{
    group_document, group_galleries, group_galleries_with, GalleryOptions, GalleryResult,
};
pub use model::{count_words, Document, Node, NodeKind};
pub use parser::{ErrorMode, HtmlParser, ParseOptions};
pub use placement::{
    insert_ads, place_batch, place_document, Placement, PlacementOptions, Segment,
};
pub use ratelimit::{RateLimitConfig, RateLimitStatus, RateLimiter};
pub use render::{JsonFormat, PlacementStats, RenderOptions, RenderResult};

/// Parse markup into a block document.
///
/// Never fails: markup the scanner cannot handle becomes a single raw block.
///
/// # Example
///
/// ```
/// let doc = adweave::parse("<h2>Title</h2><p>Body text</p>");
/// assert_eq!(doc.len(), 2);
/// assert_eq!(doc.word_count(), 3);
/// ```
pub fn parse(markup: &str) -> Document {
    Document::parse(markup)
}

/// Parse markup strictly, reporting scanner errors.
///
/// # Example
///
/// ```
/// let err = adweave::try_parse("<p>open").unwrap_err();
/// assert!(matches!(err, adweave::Error::Parse { .. }));
/// ```
pub fn try_parse(markup: &str) -> Result<Document> {
    Document::try_parse(markup)
}

/// Place ads with default options and render the result as HTML.
///
/// # Example
///
/// ```
/// let body: String = (0..6)
///     .map(|_| format!("<p>{}</p>", vec!["word"; 100].join(" ")))
///     .collect();
/// let html = adweave::place_and_render(&body);
/// assert_eq!(html.matches("ad-slot-").count(), 2);
/// ```
pub fn place_and_render(markup: &str) -> String {
    let placement = insert_ads(markup, &PlacementOptions::default());
    render::to_html(&placement, &RenderOptions::default())
}

/// Builder for running gallery grouping and ad placement together.
///
/// # Example
///
/// ```
/// use adweave::Adweave;
///
/// let result = Adweave::new()
///     .with_words_per_ad(300)
///     .with_max_ads(3)
///     .with_galleries(true)
///     .process("<p>Short post</p><img src=\"a.png\"><img src=\"b.png\">");
///
/// assert_eq!(result.placement().ad_count(), 0);
/// assert!(result.to_html().contains("class=\"gallery\""));
/// ```
pub struct Adweave {
    placement_options: PlacementOptions,
    gallery_options: Option<GalleryOptions>,
    render_options: RenderOptions,
}

impl Adweave {
    /// Create a new builder with default options and galleries off.
    pub fn new() -> Self {
        Self {
            placement_options: PlacementOptions::default(),
            gallery_options: None,
            render_options: RenderOptions::default(),
        }
    }

    /// Set the target words between ads.
    pub fn with_words_per_ad(mut self, words: usize) -> Self {
        self.placement_options = self.placement_options.with_words_per_ad(words);
        self
    }

    /// Set the minimum document length.
    pub fn with_min_words(mut self, words: usize) -> Self {
        self.placement_options = self.placement_options.with_min_words(words);
        self
    }

    /// Set the floor on the ad count.
    pub fn with_min_ads(mut self, ads: usize) -> Self {
        self.placement_options = self.placement_options.with_min_ads(ads);
        self
    }

    /// Set the ceiling on the ad count.
    pub fn with_max_ads(mut self, ads: usize) -> Self {
        self.placement_options = self.placement_options.with_max_ads(ads);
        self
    }

    /// Replace all placement options.
    pub fn with_placement_options(mut self, options: PlacementOptions) -> Self {
        self.placement_options = options;
        self
    }

    /// Enable gallery grouping with default options.
    pub fn with_galleries(mut self, enabled: bool) -> Self {
        self.gallery_options = enabled.then(GalleryOptions::default);
        self
    }

    /// Enable gallery grouping with custom options.
    pub fn with_gallery_options(mut self, options: GalleryOptions) -> Self {
        self.gallery_options = Some(options);
        self
    }

    /// Set render options.
    pub fn with_render_options(mut self, options: RenderOptions) -> Self {
        self.render_options = options;
        self
    }

    /// Check the configured options for mistakes.
    pub fn validate(&self) -> Result<()> {
        self.placement_options.validate()?;
        if let Some(ref gallery) = self.gallery_options {
            gallery.validate()?;
        }
        Ok(())
    }

    /// Run grouping (when enabled) and placement over `markup`.
    pub fn process(&self, markup: &str) -> AdweaveResult {
        let mut document = Document::parse(markup);
        let mut gallery_count = 0;

        if let Some(ref options) = self.gallery_options {
            let grouped = group_document(&document, options);
            gallery_count = grouped.gallery_count();
            if gallery_count > 0 {
                log::debug!("Grouped {} image galleries", gallery_count);
                document = Document::parse(&grouped.markup);
            }
        }

        let placement = place_document(&document, &self.placement_options);
        AdweaveResult {
            document,
            placement,
            gallery_count,
            render_options: self.render_options.clone(),
        }
    }
}

impl Adweave {
    /// Read an HTML file and process it.
    ///
    /// ```no_run
    /// use adweave::Adweave;
    ///
    /// let result = Adweave::new().process_file("post.html").unwrap();
    /// println!("{}", result.to_html());
    /// ```
    pub fn process_file<P: AsRef<Path>>(&self, path: P) -> Result<AdweaveResult> {
        let markup = fs::read_to_string(path)?;
        Ok(self.process(&markup))
    }
}

impl Default for Adweave {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of processing a document.
pub struct AdweaveResult {
    /// The document ads were placed in (after gallery grouping)
    pub document: Document,
    /// The placement
    placement: Placement,
    gallery_count: usize,
    render_options: RenderOptions,
}

impl AdweaveResult {
    /// Get the placement.
    pub fn placement(&self) -> &Placement {
        &self.placement
    }

    /// Number of galleries created before placement.
    pub fn gallery_count(&self) -> usize {
        self.gallery_count
    }

    /// Render to HTML.
    pub fn to_html(&self) -> String {
        render::to_html(&self.placement, &self.render_options)
    }

    /// Render to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.placement, format)
    }

    /// Collect statistics for the document and its placement.
    pub fn stats(&self) -> PlacementStats {
        let mut stats = PlacementStats::from_document(&self.document);
        stats.record_placement(&self.placement);
        stats
    }

    /// Render to HTML together with statistics.
    pub fn render(&self) -> RenderResult {
        RenderResult::new(self.to_html(), self.stats())
    }
}
