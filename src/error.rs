//! Error types for region capture and page reconstruction
//!
//! Every failure leaves the working point list and the region collection
//! exactly as they were before the failed call.

use thiserror::Error;

/// Errors raised by extraction, reconstruction and the session façade
#[derive(Error, Debug)]
pub enum ClipError {
    /// A commit was attempted with fewer than three points
    #[error("a clip needs at least 3 points, got {count}")]
    InsufficientPoints { count: usize },

    /// Encoded raster bytes could not be decoded
    #[error("source raster unavailable: {0}")]
    SourceUnavailable(String),

    /// A drawing surface of the requested size could not be allocated
    #[error("cannot allocate a {width}x{height} drawing surface")]
    ContextUnavailable { width: u32, height: u32 },

    /// A composed raster could not be encoded
    #[error("failed to encode raster: {0}")]
    Encode(String),

    /// The session has no page at this index
    #[error("page {index} is out of range ({count} pages loaded)")]
    PageOutOfRange { index: usize, count: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<png::EncodingError> for ClipError {
    fn from(err: png::EncodingError) -> Self {
        ClipError::Encode(err.to_string())
    }
}

/// Result type alias for region capture operations
pub type ClipResult<T> = Result<T, ClipError>;
