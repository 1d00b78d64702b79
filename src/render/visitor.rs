//! Visitor pattern for customizing placement rendering.
//!
//! The HTML renderer emits content blocks verbatim and a stock ad unit for
//! each marker. A visitor can replace or drop either without touching the
//! renderer itself.
//!
//! # Example
//!
//! ```
//! use adweave::render::visitor::{SegmentVisitor, VisitorAction};
//!
//! struct AdsenseVisitor;
//!
//! impl SegmentVisitor for AdsenseVisitor {
//!     fn visit_ad(&mut self, index: usize) -> VisitorAction {
//!         VisitorAction::Replace(format!("<ins class=\"adsbygoogle\" data-slot=\"{index}\"></ins>"))
//!     }
//! }
//! ```

/// Action returned by visitor methods to control rendering behavior.
#[derive(Debug, Clone, Default)]
pub enum VisitorAction {
    /// Continue with default rendering.
    #[default]
    Continue,

    /// Replace the segment with custom output.
    Replace(String),

    /// Skip this segment entirely (produce no output).
    Skip,
}

impl VisitorAction {
    /// Check if this action indicates the segment should be skipped.
    pub fn should_skip(&self) -> bool {
        matches!(self, VisitorAction::Skip)
    }

    /// Check if this action provides replacement content.
    pub fn is_replace(&self) -> bool {
        matches!(self, VisitorAction::Replace(_))
    }

    /// Get replacement content if available.
    pub fn replacement(&self) -> Option<&str> {
        match self {
            VisitorAction::Replace(s) => Some(s),
            _ => None,
        }
    }
}

/// Trait for visiting placement segments during rendering.
///
/// All methods return `VisitorAction::Continue` by default.
pub trait SegmentVisitor: Send + Sync {
    /// Called before emitting a content block.
    ///
    /// # Arguments
    /// * `markup` - The block's original markup
    /// * `index` - Zero-based position among content blocks
    fn visit_content(&mut self, markup: &str, index: usize) -> VisitorAction {
        let _ = (markup, index);
        VisitorAction::Continue
    }

    /// Called before emitting an ad slot.
    ///
    /// # Arguments
    /// * `index` - Zero-based position among ad slots
    fn visit_ad(&mut self, index: usize) -> VisitorAction {
        let _ = index;
        VisitorAction::Continue
    }

    /// Called once before the first segment.
    fn on_start(&mut self, ad_count: usize) {
        let _ = ad_count;
    }

    /// Called once after the last segment.
    fn on_end(&mut self) {}
}

/// Default visitor that performs no customization.
#[derive(Debug, Clone, Default)]
pub struct DefaultVisitor;

impl DefaultVisitor {
    /// Create a new default visitor.
    pub fn new() -> Self {
        Self
    }
}

impl SegmentVisitor for DefaultVisitor {}

/// Visitor that drops every ad slot, e.g. for feeds and ad-free tiers.
#[derive(Debug, Clone, Default)]
pub struct SkipAdsVisitor;

impl SegmentVisitor for SkipAdsVisitor {
    fn visit_ad(&mut self, _index: usize) -> VisitorAction {
        VisitorAction::Skip
    }
}

/// Visitor that renders slots as HTML comments for a later substitution pass.
#[derive(Debug, Clone)]
pub struct CommentSlotVisitor {
    tag: String,
}

impl CommentSlotVisitor {
    /// Create a visitor emitting `<!-- {tag}:{index} -->`.
    pub fn new(tag: impl Into<String>) -> Self {
        Self { tag: tag.into() }
    }
}

impl Default for CommentSlotVisitor {
    fn default() -> Self {
        Self::new("ad-slot")
    }
}

impl SegmentVisitor for CommentSlotVisitor {
    fn visit_ad(&mut self, index: usize) -> VisitorAction {
        VisitorAction::Replace(format!("<!-- {}:{} -->", self.tag, index))
    }
}

/// Visitor that keeps only the first `max` ad slots.
#[derive(Debug, Clone)]
pub struct MaxAdsVisitor {
    max: usize,
}

impl MaxAdsVisitor {
    /// Create a visitor that drops slots past `max`.
    pub fn new(max: usize) -> Self {
        Self { max }
    }
}

impl SegmentVisitor for MaxAdsVisitor {
    fn visit_ad(&mut self, index: usize) -> VisitorAction {
        if index >= self.max {
            VisitorAction::Skip
        } else {
            VisitorAction::Continue
        }
    }
}

/// Composite visitor that chains multiple visitors.
///
/// Visitors are called in order. The first visitor that returns
/// a non-Continue action determines the result.
pub struct CompositeVisitor {
    visitors: Vec<Box<dyn SegmentVisitor>>,
}

impl CompositeVisitor {
    /// Create a new composite visitor.
    pub fn new() -> Self {
        Self {
            visitors: Vec::new(),
        }
    }

    /// Add a visitor to the chain.
    pub fn with_visitor<V: SegmentVisitor + 'static>(mut self, visitor: V) -> Self {
        self.visitors.push(Box::new(visitor));
        self
    }
}

impl Default for CompositeVisitor {
    fn default() -> Self {
        Self::new()
    }
}

impl SegmentVisitor for CompositeVisitor {
    fn visit_content(&mut self, markup: &str, index: usize) -> VisitorAction {
        for visitor in &mut self.visitors {
            let action = visitor.visit_content(markup, index);
            if !matches!(action, VisitorAction::Continue) {
                return action;
            }
        }
        VisitorAction::Continue
    }

    fn visit_ad(&mut self, index: usize) -> VisitorAction {
        for visitor in &mut self.visitors {
            let action = visitor.visit_ad(index);
            if !matches!(action, VisitorAction::Continue) {
                return action;
            }
        }
        VisitorAction::Continue
    }

    fn on_start(&mut self, ad_count: usize) {
        for visitor in &mut self.visitors {
            visitor.on_start(ad_count);
        }
    }

    fn on_end(&mut self) {
        for visitor in &mut self.visitors {
            visitor.on_end();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visitor_action_default() {
        let action = VisitorAction::default();
        assert!(matches!(action, VisitorAction::Continue));
    }

    #[test]
    fn test_visitor_action_replacement() {
        assert!(VisitorAction::Continue.replacement().is_none());
        assert!(VisitorAction::Skip.replacement().is_none());
        assert_eq!(
            VisitorAction::Replace("hello".into()).replacement(),
            Some("hello")
        );
    }

    #[test]
    fn test_comment_slot_visitor() {
        let mut visitor = CommentSlotVisitor::default();
        let action = visitor.visit_ad(2);
        assert_eq!(action.replacement(), Some("<!-- ad-slot:2 -->"));
    }

    #[test]
    fn test_max_ads_visitor() {
        let mut visitor = MaxAdsVisitor::new(1);
        assert!(!visitor.visit_ad(0).should_skip());
        assert!(visitor.visit_ad(1).should_skip());
    }

    #[test]
    fn test_composite_visitor() {
        let mut composite = CompositeVisitor::new()
            .with_visitor(MaxAdsVisitor::new(1))
            .with_visitor(CommentSlotVisitor::default());

        assert!(composite.visit_ad(0).is_replace());
        assert!(composite.visit_ad(3).should_skip());
        assert!(matches!(
            composite.visit_content("<p>x</p>", 0),
            VisitorAction::Continue
        ));
    }
}
