//! Ad placement options.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default target word count between two ads.
pub const DEFAULT_WORDS_PER_AD: usize = 500;

/// Default minimum document length, in words, before any ad is placed.
pub const DEFAULT_MIN_WORDS: usize = 250;

/// Default floor on the ad count.
pub const DEFAULT_MIN_ADS: usize = 1;

/// Default ceiling on the ad count.
pub const DEFAULT_MAX_ADS: usize = 5;

/// Tunables for ad placement.
///
/// Every field has a default, so a partial JSON object deserializes into a
/// complete set of options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementOptions {
    /// Target word count between ads
    pub words_per_ad: usize,

    /// Documents shorter than this get no ads at all
    pub min_words: usize,

    /// Floor on the number of ads
    pub min_ads: usize,

    /// Ceiling on the number of ads
    pub max_ads: usize,

    /// Total word count supplied by the caller instead of counting the markup
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_words: Option<usize>,
}

impl PlacementOptions {
    /// Create new placement options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the target words between ads.
    pub fn with_words_per_ad(mut self, words: usize) -> Self {
        self.words_per_ad = words;
        self
    }

    /// Set the minimum document length.
    pub fn with_min_words(mut self, words: usize) -> Self {
        self.min_words = words;
        self
    }

    /// Set the floor on the ad count.
    pub fn with_min_ads(mut self, ads: usize) -> Self {
        self.min_ads = ads;
        self
    }

    /// Set the ceiling on the ad count.
    pub fn with_max_ads(mut self, ads: usize) -> Self {
        self.max_ads = ads;
        self
    }

    /// Use a caller-supplied total word count.
    pub fn with_total_words(mut self, words: usize) -> Self {
        self.total_words = Some(words);
        self
    }

    /// Number of ads to aim for in a document of `total_words` words.
    ///
    /// `ceil(total_words / words_per_ad)` raised to `min_ads`, then capped at
    /// `max_ads`. The cap wins when the bounds cross, and a zero
    /// `words_per_ad` asks for the cap.
    pub fn desired_ads(&self, total_words: usize) -> usize {
        let wanted = if self.words_per_ad == 0 {
            usize::MAX
        } else {
            total_words.div_ceil(self.words_per_ad)
        };
        wanted.max(self.min_ads).min(self.max_ads)
    }

    /// Load options from a JSON object; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load options from a JSON file.
    ///
    /// ```no_run
    /// use adweave::PlacementOptions;
    ///
    /// let options = PlacementOptions::from_file("placement.json").unwrap();
    /// options.validate().unwrap();
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Reject option sets that cannot be honored as written.
    ///
    /// Placement itself accepts any values; this is for configuration
    /// surfaces that should report mistakes.
    pub fn validate(&self) -> Result<()> {
        if self.words_per_ad == 0 {
            return Err(Error::InvalidOptions(
                "words_per_ad must be greater than zero".into(),
            ));
        }
        if self.min_ads > self.max_ads {
            return Err(Error::InvalidOptions(format!(
                "min_ads ({}) exceeds max_ads ({})",
                self.min_ads, self.max_ads
            )));
        }
        Ok(())
    }
}

impl Default for PlacementOptions {
    fn default() -> Self {
        Self {
            words_per_ad: DEFAULT_WORDS_PER_AD,
            min_words: DEFAULT_MIN_WORDS,
            min_ads: DEFAULT_MIN_ADS,
            max_ads: DEFAULT_MAX_ADS,
            total_words: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placement_options_builder() {
        let options = PlacementOptions::new()
            .with_words_per_ad(300)
            .with_min_words(100)
            .with_min_ads(2)
            .with_max_ads(3)
            .with_total_words(900);

        assert_eq!(options.words_per_ad, 300);
        assert_eq!(options.min_words, 100);
        assert_eq!(options.min_ads, 2);
        assert_eq!(options.max_ads, 3);
        assert_eq!(options.total_words, Some(900));
    }

    #[test]
    fn test_desired_ads_clamping() {
        let options = PlacementOptions::default();
        assert_eq!(options.desired_ads(600), 2);
        assert_eq!(options.desired_ads(500), 1);
        assert_eq!(options.desired_ads(0), 1);
        assert_eq!(options.desired_ads(100_000), 5);
    }

    #[test]
    fn test_desired_ads_degenerate_bounds() {
        let crossed = PlacementOptions::new().with_min_ads(4).with_max_ads(2);
        assert_eq!(crossed.desired_ads(10), 2);

        let zero = PlacementOptions::new().with_words_per_ad(0);
        assert_eq!(zero.desired_ads(10), 5);
    }

    #[test]
    fn test_validate() {
        assert!(PlacementOptions::default().validate().is_ok());
        assert!(PlacementOptions::new()
            .with_words_per_ad(0)
            .validate()
            .is_err());
        assert!(matches!(
            PlacementOptions::new().with_min_ads(6).validate(),
            Err(Error::InvalidOptions(_))
        ));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let options = PlacementOptions::from_json(r#"{"max_ads": 3}"#).unwrap();
        assert_eq!(options.max_ads, 3);
        assert_eq!(options.words_per_ad, DEFAULT_WORDS_PER_AD);
        assert_eq!(options.total_words, None);
    }

    #[test]
    fn test_from_json_rejects_bad_types() {
        let err = PlacementOptions::from_json(r#"{"max_ads": "many"}"#).unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }
}
