//! Collapse runs of image-only blocks into gallery wrappers.

use std::ops::Range;

use quick_xml::escape::escape;
use serde::{Deserialize, Serialize};

use crate::model::Document;

use super::GalleryOptions;

/// Result of gallery grouping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryResult {
    /// Rewritten markup
    pub markup: String,

    /// Node index ranges that were wrapped, in document order
    pub galleries: Vec<Range<usize>>,
}

impl GalleryResult {
    /// Number of galleries created.
    pub fn gallery_count(&self) -> usize {
        self.galleries.len()
    }
}

/// Group consecutive images using the default 2–4 run bounds.
pub fn group_galleries(markup: &str) -> String {
    group_galleries_with(markup, &GalleryOptions::default())
}

/// Group consecutive images with custom options.
pub fn group_galleries_with(markup: &str, options: &GalleryOptions) -> String {
    let doc = Document::parse(markup);
    group_document(&doc, options).markup
}

/// Group consecutive images in an already-parsed document.
pub fn group_document(doc: &Document, options: &GalleryOptions) -> GalleryResult {
    let nodes = doc.nodes();
    let mut markup = String::with_capacity(doc.source().len() + 128);
    let mut galleries = Vec::new();

    if nodes.is_empty() {
        markup.push_str(doc.source());
        return GalleryResult { markup, galleries };
    }

    let mut i = 0;
    while i < nodes.len() {
        let run_end = nodes[i..]
            .iter()
            .position(|n| !n.is_image_only())
            .map_or(nodes.len(), |offset| i + offset);

        if run_end > i && options.accepts_run(run_end - i) {
            write_gallery(doc, i..run_end, options, &mut markup);
            galleries.push(i..run_end);
            i = run_end;
        } else if run_end > i {
            for node in &nodes[i..run_end] {
                markup.push_str(doc.markup(node));
            }
            i = run_end;
        } else {
            markup.push_str(doc.markup(&nodes[i]));
            i += 1;
        }
    }

    log::debug!("Grouped {} image runs into galleries", galleries.len());
    GalleryResult { markup, galleries }
}

fn write_gallery(doc: &Document, run: Range<usize>, options: &GalleryOptions, out: &mut String) {
    let nodes = &doc.nodes()[run.clone()];

    if run.start == 0 {
        out.push_str(doc.leading_markup());
    }

    out.push_str(&format!(
        "<div class=\"{}\" data-count=\"{}\">",
        escape(options.wrapper_class.as_str()),
        nodes.len()
    ));

    let item_open = format!("<div class=\"{}\">", escape(options.item_class.as_str()));
    for (k, node) in nodes.iter().enumerate() {
        out.push_str(&item_open);
        out.push_str(doc.element_markup(node));
        out.push_str("</div>");
        if k + 1 < nodes.len() {
            out.push_str(doc.trailing_markup(node));
        }
    }

    out.push_str("</div>");
    if let Some(last) = nodes.last() {
        out.push_str(doc.trailing_markup(last));
    }
}
