//! Word-count driven ad placement.

use crate::model::Document;

use super::{Placement, PlacementOptions, Segment};

/// Split markup into content blocks with ad markers between them.
///
/// Never fails: markup the parser cannot split is returned as one block.
pub fn insert_ads(markup: &str, options: &PlacementOptions) -> Placement {
    let doc = Document::parse(markup);
    place_document(&doc, options)
}

/// Place ads in an already-parsed document.
///
/// Ads divide the document into `desired + 1` roughly equal word buckets.
/// An ad never follows the last node, a heading, or a divider; a bucket
/// boundary that falls on a heading or divider is deferred to the next
/// allowed node.
pub fn place_document(doc: &Document, options: &PlacementOptions) -> Placement {
    let total_words = options.total_words.unwrap_or_else(|| doc.word_count());

    if doc.is_empty() || total_words < options.min_words {
        log::debug!(
            "Skipping ad placement: {} blocks, {} words (min {})",
            doc.len(),
            total_words,
            options.min_words
        );
        return Placement::unsplit(doc.source(), total_words);
    }

    let desired = options.desired_ads(total_words);
    let words_per_chunk = total_words as f64 / (desired as f64 + 1.0);
    log::debug!(
        "Placing up to {} ads over {} words ({:.1} words per chunk)",
        desired,
        total_words,
        words_per_chunk
    );

    let last = doc.len() - 1;
    let mut state = ChunkState::default();

    for (i, node) in doc.nodes().iter().enumerate() {
        state.buffer.push_str(doc.markup(node));
        state.words_since_ad += node.word_count;

        if i == last {
            break;
        }

        let target_reached =
            state.ads_inserted < desired && state.words_since_ad as f64 >= words_per_chunk;

        if !node.allows_ad_after() {
            if target_reached {
                log::trace!("Deferring ad past <{}> at block {}", node.kind.tag(), i);
                state.pending_ad = true;
            }
            continue;
        }

        let deferred_due = state.pending_ad && state.words_since_ad > 0;
        if deferred_due || target_reached {
            state.flush_with_ad();
        }
    }

    let placement = state.finish(total_words, desired);
    if placement.is_empty() {
        return Placement::unsplit(doc.source(), total_words);
    }
    placement
}

/// Loop state of the placement walk.
#[derive(Debug, Default)]
struct ChunkState {
    segments: Vec<Segment>,
    buffer: String,
    words_since_ad: usize,
    ads_inserted: usize,
    pending_ad: bool,
}

impl ChunkState {
    fn flush_with_ad(&mut self) {
        self.segments.push(Segment::Content {
            markup: std::mem::take(&mut self.buffer),
        });
        self.segments.push(Segment::Ad {
            index: self.ads_inserted,
        });
        self.ads_inserted += 1;
        self.words_since_ad = 0;
        self.pending_ad = false;
    }

    fn finish(mut self, total_words: usize, desired: usize) -> Placement {
        let ends_with_ad = matches!(self.segments.last(), Some(Segment::Ad { .. }));
        if !self.buffer.is_empty() || ends_with_ad {
            self.segments.push(Segment::Content {
                markup: self.buffer,
            });
        }
        Placement::new(self.segments, total_words, desired)
    }
}
