//! Integration tests for rendering, visitors, and option loading.

use std::fs;
use std::io::Write;

use adweave::render::visitor::{
    CommentSlotVisitor, CompositeVisitor, MaxAdsVisitor, SegmentVisitor, SkipAdsVisitor,
    VisitorAction,
};
use adweave::render::{self, HtmlRenderer};
use adweave::{
    insert_ads, place_batch, Adweave, Document, Error, JsonFormat, Placement, PlacementOptions,
    PlacementStats, RenderOptions,
};

fn article(paragraphs: usize) -> String {
    (0..paragraphs)
        .map(|i| format!("<p>{} {}</p>\n", i, vec!["word"; 99].join(" ")))
        .collect()
}

/// Visitor that swaps slots for ad network tags and counts calls.
struct NetworkTagVisitor {
    started_with: Option<usize>,
    ads_seen: usize,
    ended: bool,
}

impl NetworkTagVisitor {
    fn new() -> Self {
        Self {
            started_with: None,
            ads_seen: 0,
            ended: false,
        }
    }
}

impl SegmentVisitor for NetworkTagVisitor {
    fn visit_ad(&mut self, index: usize) -> VisitorAction {
        self.ads_seen += 1;
        VisitorAction::Replace(format!("<ins data-slot=\"{}\"></ins>", index))
    }

    fn on_start(&mut self, ad_count: usize) {
        self.started_with = Some(ad_count);
    }

    fn on_end(&mut self) {
        self.ended = true;
    }
}

#[test]
fn test_default_html_has_one_slot_per_marker() {
    let placement = insert_ads(&article(6), &PlacementOptions::default());
    let html = render::to_html(&placement, &RenderOptions::default());

    assert_eq!(html.matches("data-ad-index=").count(), 2);
    assert!(html.contains("id=\"ad-slot-0\""));
    assert!(html.contains("id=\"ad-slot-1\""));
    assert_eq!(html.matches("Advertisement").count(), 2);
}

#[test]
fn test_slot_options() {
    let options = RenderOptions::new()
        .with_slot_class("promo")
        .with_slot_id_prefix("promo-")
        .with_slot_size(728, 90)
        .without_label();
    let slot = HtmlRenderer::new(options).slot_markup(0);

    assert_eq!(
        slot,
        "<div class=\"promo\" id=\"promo-0\" data-ad-index=\"0\" \
         style=\"min-width:728px;min-height:90px\"></div>"
    );
}

#[test]
fn test_custom_visitor_lifecycle() {
    let placement = insert_ads(&article(6), &PlacementOptions::default());
    let mut visitor = NetworkTagVisitor::new();
    let html = render::to_html_with_visitor(&placement, &RenderOptions::default(), &mut visitor);

    assert_eq!(visitor.started_with, Some(2));
    assert_eq!(visitor.ads_seen, 2);
    assert!(visitor.ended);
    assert!(html.contains("<ins data-slot=\"1\"></ins>"));
    assert!(!html.contains("ad-slot"));
}

#[test]
fn test_skip_ads_renders_original() {
    let markup = article(10);
    let placement = insert_ads(&markup, &PlacementOptions::default());
    let html =
        render::to_html_with_visitor(&placement, &RenderOptions::default(), &mut SkipAdsVisitor);
    assert_eq!(html, markup);
}

#[test]
fn test_composite_caps_and_comments() {
    let markup = article(30);
    let placement = insert_ads(&markup, &PlacementOptions::default());
    assert_eq!(placement.ad_count(), 5);

    let mut visitor = CompositeVisitor::new()
        .with_visitor(MaxAdsVisitor::new(2))
        .with_visitor(CommentSlotVisitor::new("slot"));
    let html = render::to_html_with_visitor(
        &placement,
        &RenderOptions::new().with_newlines(false),
        &mut visitor,
    );

    assert!(html.contains("<!-- slot:0 -->"));
    assert!(html.contains("<!-- slot:1 -->"));
    assert!(!html.contains("<!-- slot:2 -->"));
}

#[test]
fn test_json_output() {
    let placement = insert_ads(&article(6), &PlacementOptions::default());
    let json = render::to_json(&placement, JsonFormat::Pretty).unwrap();

    let parsed: Placement = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, placement);

    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["segments"][1]["type"], "ad");
    assert_eq!(value["segments"][1]["index"], 0);
    assert_eq!(value["desired_ads"], 2);
}

#[test]
fn test_stats_across_batch() {
    let docs = vec![article(2), article(6), article(12)];
    let options = PlacementOptions::default();
    let placements = place_batch(&docs, &options);

    let mut totals = PlacementStats::new();
    for (markup, placement) in docs.iter().zip(&placements) {
        let mut stats = PlacementStats::from_document(&Document::parse(markup));
        stats.record_placement(placement);
        totals.merge(&stats);
    }

    assert_eq!(totals.document_count, 3);
    assert_eq!(totals.block_count, 20);
    assert_eq!(totals.word_count, 2000);
    // 200 words: none; 600: two; 1200: three
    assert_eq!(totals.ad_count, 5);
}

#[test]
fn test_render_with_stats() {
    let result = Adweave::new().process(&article(6)).render();
    assert_eq!(result.stats.ad_count, 2);
    assert_eq!(result.stats.content_block_count, 3);
    assert!(result.content.contains("ad-slot-1"));
}

#[test]
fn test_options_from_config_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{"words_per_ad": 200, "max_ads": 2}}"#).unwrap();

    let options = PlacementOptions::from_file(file.path()).unwrap();
    assert_eq!(options.words_per_ad, 200);
    assert_eq!(options.max_ads, 2);
    assert_eq!(options.min_words, adweave::placement::DEFAULT_MIN_WORDS);
    assert!(options.validate().is_ok());

    let placement = insert_ads(&article(10), &options);
    assert_eq!(placement.ad_count(), 2);
}

#[test]
fn test_missing_files_report_io_errors() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.json");

    let err = PlacementOptions::from_file(&missing).unwrap_err();
    assert!(matches!(err, Error::Io(_)));

    let err = Adweave::new().process_file(&missing).err().unwrap();
    assert!(matches!(err, Error::Io(_)));
}

#[test]
fn test_bad_config_file_reports_json_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{"max_ads": "three"}}"#).unwrap();

    let err = PlacementOptions::from_file(file.path()).unwrap_err();
    assert!(matches!(err, Error::Json(_)));
}

#[test]
fn test_process_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("post.html");
    fs::write(&path, article(6)).unwrap();

    let result = Adweave::new().process_file(&path).unwrap();
    assert_eq!(result.placement().ad_count(), 2);
    assert_eq!(result.placement().content_markup(), article(6));
}

#[test]
fn test_render_output_written_to_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("post.html");

    let html = Adweave::new().process(&article(6)).to_html();
    fs::write(&path, &html).unwrap();

    let back = fs::read_to_string(&path).unwrap();
    assert_eq!(back.matches("class=\"ad-slot\"").count(), 2);
}
