//! Ad placement over block markup.

mod chunker;
mod options;
mod segment;

pub use chunker::{insert_ads, place_document};
pub use options::{
    PlacementOptions, DEFAULT_MAX_ADS, DEFAULT_MIN_ADS, DEFAULT_MIN_WORDS, DEFAULT_WORDS_PER_AD,
};
pub use segment::{Placement, Segment};

/// Place ads in several independent documents.
///
/// Each document is handled by its own call; with the `parallel` feature the
/// calls run on the rayon thread pool.
pub fn place_batch<S>(markups: &[S], options: &PlacementOptions) -> Vec<Placement>
where
    S: AsRef<str> + Sync,
{
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        markups
            .par_iter()
            .map(|m| insert_ads(m.as_ref(), options))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        markups
            .iter()
            .map(|m| insert_ads(m.as_ref(), options))
            .collect()
    }
}
