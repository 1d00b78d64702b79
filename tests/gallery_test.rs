//! Integration tests for gallery grouping.

use adweave::{
    group_document, group_galleries, group_galleries_with, insert_ads, Adweave, Document,
    GalleryOptions, PlacementOptions,
};

fn image(n: usize) -> String {
    format!("<p><img src=\"/images/code-{}.png\" alt=\"\"></p>\n", n)
}

fn images(range: std::ops::Range<usize>) -> String {
    range.map(image).collect()
}

#[test]
fn test_three_images_become_one_gallery() {
    let markup = format!("<p>Screenshots:</p>\n{}<p>Done.</p>\n", images(0..3));
    let doc = Document::parse(&markup);
    let result = group_document(&doc, &GalleryOptions::default());

    assert_eq!(result.galleries, vec![1..4]);
    assert_eq!(result.markup.matches("class=\"gallery-item\"").count(), 3);
    assert!(result.markup.starts_with("<p>Screenshots:</p>\n<div class=\"gallery\""));
    assert!(result.markup.ends_with("</div>\n<p>Done.</p>\n"));
}

#[test]
fn test_five_images_left_alone() {
    let markup = format!("<p>Gallery</p>\n{}", images(0..5));
    assert_eq!(group_galleries(&markup), markup);
}

#[test]
fn test_run_bounds() {
    for n in 1..=6 {
        let markup = images(0..n);
        let grouped = group_galleries(&markup);
        let wrapped = (2..=4).contains(&n);
        assert_eq!(
            grouped.contains("class=\"gallery\""),
            wrapped,
            "run of {} images",
            n
        );
        if wrapped {
            assert!(grouped.contains(&format!("data-count=\"{}\"", n)));
        }
    }
}

#[test]
fn test_custom_run_bounds() {
    let options = GalleryOptions::new().with_run_bounds(3, 6);
    assert_eq!(group_galleries_with(&images(0..2), &options), images(0..2));
    assert!(group_galleries_with(&images(0..5), &options).contains("data-count=\"5\""));
}

#[test]
fn test_items_keep_original_markup_in_order() {
    let markup = images(0..4);
    let grouped = group_galleries(&markup);

    let mut cursor = 0;
    for n in 0..4 {
        let img = format!("<img src=\"/images/code-{}.png\" alt=\"\">", n);
        let found = grouped[cursor..].find(&img).expect("image kept");
        cursor += found + img.len();
    }
    assert_eq!(grouped.matches("<img").count(), 4);
}

#[test]
fn test_captioned_figure_is_not_image_only() {
    let markup = format!(
        "{}<figure><img src=\"x.png\"><figcaption>Caption</figcaption></figure>\n{}",
        image(0),
        image(1)
    );
    assert_eq!(group_galleries(&markup), markup);
}

#[test]
fn test_grouping_is_idempotent() {
    let markup = format!(
        "<h2>Rewards</h2>\n{}<p>text</p>\n{}<p>more</p>\n{}",
        images(0..2),
        images(2..7),
        images(7..8)
    );
    let once = group_galleries(&markup);
    let twice = group_galleries(&once);
    assert_eq!(once, twice);
    assert_eq!(once.matches("class=\"gallery\"").count(), 1);
}

#[test]
fn test_gallery_counts_as_one_block_for_placement() {
    let text: String = (0..4)
        .map(|_| format!("<p>{}</p>\n", vec!["word"; 100].join(" ")))
        .collect();
    let markup = format!("{}{}{}", text, images(0..3), text);

    let grouped = group_galleries(&markup);
    let doc = Document::parse(&grouped);
    assert_eq!(doc.len(), 9);

    let placement = insert_ads(&grouped, &PlacementOptions::default());
    assert_eq!(placement.content_markup(), grouped);
    assert_eq!(placement.ad_count(), 2);
}

#[test]
fn test_builder_reports_gallery_count() {
    let markup = format!("{}<p>between</p>\n{}", images(0..2), images(2..4));
    let result = Adweave::new().with_galleries(true).process(&markup);
    assert_eq!(result.gallery_count(), 2);

    let untouched = Adweave::new().process(&markup);
    assert_eq!(untouched.gallery_count(), 0);
    assert_eq!(untouched.placement().content_markup(), markup);
}
