//! Error types for adweave library.

use std::io;
use std::time::Duration;
use thiserror::Error;

/// Result type alias for adweave operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur at the fallible edges of the library.
///
/// Placement and gallery grouping themselves never fail; these errors come
/// from file input, strict parsing, option validation, serialization, and
/// rate limiting.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The markup could not be scanned into block nodes.
    #[error("Markup parsing error at byte {position}: {message}")]
    Parse {
        /// Byte offset where the scanner gave up
        position: usize,
        /// Scanner message
        message: String,
    },

    /// Placement or gallery options are inconsistent.
    #[error("Invalid options: {0}")]
    InvalidOptions(String),

    /// JSON encoding or decoding failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error during rendering.
    #[error("Rendering error: {0}")]
    Render(String),

    /// A rate-limited key has used up its window.
    #[error("Rate limit exceeded for '{key}' (retry in {retry_after:?})")]
    RateLimited {
        /// Bucket key
        key: String,
        /// Time until the bucket resets
        retry_after: Duration,
    },
}
