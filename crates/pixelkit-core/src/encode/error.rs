//! Encoding errors.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while encoding or writing output.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 4), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero, or too large for the format
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    /// Nothing to encode
    #[error("Cannot encode an animation with no frames")]
    NoFrames,

    /// The underlying encoder failed
    #[error("Encoding failed: {0}")]
    EncodingFailed(String),

    /// Output could not be written
    #[error("Cannot write {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
