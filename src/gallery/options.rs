//! Gallery grouping options.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Options for grouping consecutive images into galleries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GalleryOptions {
    /// Shortest run that becomes a gallery
    pub min_run: usize,

    /// Longest run that becomes a gallery; longer runs are left alone
    pub max_run: usize,

    /// Class of the wrapping element
    pub wrapper_class: String,

    /// Class of each item element
    pub item_class: String,
}

impl GalleryOptions {
    /// Create new gallery options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the accepted run length bounds.
    pub fn with_run_bounds(mut self, min_run: usize, max_run: usize) -> Self {
        self.min_run = min_run;
        self.max_run = max_run;
        self
    }

    /// Set the wrapper class.
    pub fn with_wrapper_class(mut self, class: impl Into<String>) -> Self {
        self.wrapper_class = class.into();
        self
    }

    /// Set the item class.
    pub fn with_item_class(mut self, class: impl Into<String>) -> Self {
        self.item_class = class.into();
        self
    }

    /// Check if a run of `len` image blocks should be wrapped.
    pub fn accepts_run(&self, len: usize) -> bool {
        len >= self.min_run.max(2) && len <= self.max_run
    }

    /// Reject bounds that can never match.
    pub fn validate(&self) -> Result<()> {
        if self.min_run > self.max_run {
            return Err(Error::InvalidOptions(format!(
                "gallery min_run ({}) exceeds max_run ({})",
                self.min_run, self.max_run
            )));
        }
        Ok(())
    }
}

impl Default for GalleryOptions {
    fn default() -> Self {
        Self {
            min_run: 2,
            max_run: 4,
            wrapper_class: "gallery".to_string(),
            item_class: "gallery-item".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_run_bounds() {
        let options = GalleryOptions::default();
        assert!(!options.accepts_run(1));
        assert!(options.accepts_run(2));
        assert!(options.accepts_run(4));
        assert!(!options.accepts_run(5));
    }

    #[test]
    fn test_single_image_never_wrapped() {
        let options = GalleryOptions::new().with_run_bounds(1, 6);
        assert!(!options.accepts_run(1));
        assert!(options.accepts_run(6));
    }

    #[test]
    fn test_validate() {
        assert!(GalleryOptions::default().validate().is_ok());
        assert!(GalleryOptions::new().with_run_bounds(5, 3).validate().is_err());
    }
}
