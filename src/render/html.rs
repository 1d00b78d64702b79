//! HTML rendering for placements.

use quick_xml::escape::escape;

use crate::model::Document;
use crate::placement::{Placement, Segment};

use super::visitor::{DefaultVisitor, SegmentVisitor, VisitorAction};
use super::{PlacementStats, RenderOptions, RenderResult};

/// Render a placement as HTML with stock ad slots.
pub fn to_html(placement: &Placement, options: &RenderOptions) -> String {
    HtmlRenderer::new(options.clone()).render(placement)
}

/// Render a placement as HTML, letting a visitor adjust each segment.
pub fn to_html_with_visitor(
    placement: &Placement,
    options: &RenderOptions,
    visitor: &mut dyn SegmentVisitor,
) -> String {
    HtmlRenderer::new(options.clone()).render_with_visitor(placement, visitor)
}

/// Render a placement as HTML and collect statistics against its document.
pub fn to_html_with_stats(
    doc: &Document,
    placement: &Placement,
    options: &RenderOptions,
) -> RenderResult {
    let mut options = options.clone();
    options.collect_stats = true;
    HtmlRenderer::new(options).render_with_stats(doc, placement)
}

/// HTML renderer.
pub struct HtmlRenderer {
    options: RenderOptions,
}

impl HtmlRenderer {
    /// Create a new HTML renderer.
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Render a placement.
    pub fn render(&self, placement: &Placement) -> String {
        self.render_with_visitor(placement, &mut DefaultVisitor)
    }

    /// Render a placement with document statistics.
    pub fn render_with_stats(&self, doc: &Document, placement: &Placement) -> RenderResult {
        let content = self.render(placement);
        if !self.options.collect_stats {
            return RenderResult::content_only(content);
        }

        let mut stats = PlacementStats::from_document(doc);
        stats.record_placement(placement);
        RenderResult::new(content, stats)
    }

    /// Render a placement, consulting `visitor` for every segment.
    pub fn render_with_visitor(
        &self,
        placement: &Placement,
        visitor: &mut dyn SegmentVisitor,
    ) -> String {
        let mut output = String::with_capacity(
            placement.content_blocks().map(str::len).sum::<usize>() + placement.ad_count() * 160,
        );
        let mut content_index = 0;

        visitor.on_start(placement.ad_count());
        for segment in placement {
            match segment {
                Segment::Content { markup } => {
                    match visitor.visit_content(markup, content_index) {
                        VisitorAction::Continue => output.push_str(markup),
                        VisitorAction::Replace(replacement) => output.push_str(&replacement),
                        VisitorAction::Skip => {}
                    }
                    content_index += 1;
                }
                Segment::Ad { index } => match visitor.visit_ad(*index) {
                    VisitorAction::Continue => self.render_slot(&mut output, *index),
                    VisitorAction::Replace(replacement) => {
                        self.push_slot_markup(&mut output, &replacement)
                    }
                    VisitorAction::Skip => {}
                },
            }
        }
        visitor.on_end();

        output
    }

    /// Stock ad unit: a fixed-size, empty container for the ad network to fill.
    pub fn slot_markup(&self, index: usize) -> String {
        let o = &self.options;
        let mut slot = format!(
            "<div class=\"{}\" id=\"{}{}\" data-ad-index=\"{}\" style=\"min-width:{}px;min-height:{}px\">",
            escape(o.slot_class.as_str()),
            escape(o.slot_id_prefix.as_str()),
            index,
            index,
            o.slot_width,
            o.slot_height
        );
        if let Some(ref label) = o.label {
            slot.push_str("<span class=\"ad-label\">");
            slot.push_str(&escape(label.as_str()));
            slot.push_str("</span>");
        }
        slot.push_str("</div>");
        slot
    }

    fn render_slot(&self, output: &mut String, index: usize) {
        let slot = self.slot_markup(index);
        self.push_slot_markup(output, &slot);
    }

    fn push_slot_markup(&self, output: &mut String, slot: &str) {
        if self.options.newline_around_slots {
            if !output.is_empty() && !output.ends_with('\n') {
                output.push('\n');
            }
            output.push_str(slot);
            output.push('\n');
        } else {
            output.push_str(slot);
        }
    }
}
