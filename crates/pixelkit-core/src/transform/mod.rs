//! Frame geometry: transparent-border trimming and cropping.
//!
//! Trimming an animation is a two-pass operation:
//! 1. [`reduce_bounds`] folds the alpha bounding box of every frame into one
//!    rectangle and applies padding.
//! 2. [`crop_frames`] cuts that rectangle out of every frame, keeping frame
//!    metadata.
//!
//! Using one rectangle for all frames keeps the animation registered: content
//! that moves between frames stays where it was relative to the others.
//!
//! # Coordinate System
//!
//! - Rectangles use pixel coordinates with exclusive right/bottom edges
//! - Origin is top-left corner

mod bounds;
mod crop;

use thiserror::Error;

use crate::decode::DecodeError;
use crate::grid::{PixelGrid, Rect};

pub use bounds::{alpha_bounds, reduce_bounds, union_bounds, BoundsOutcome, TrimOptions};
pub use crop::{crop_frames, crop_grid, paste};

/// Errors from geometry, keying and composition parameters.
#[derive(Debug, Error)]
pub enum TransformError {
    /// A numeric option is outside its valid domain.
    #[error("Invalid {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    /// A crop rectangle does not fit inside a frame.
    #[error("Crop region ({rect}) exceeds frame bounds {width}x{height}")]
    OutOfBounds { rect: Rect, width: u32, height: u32 },

    /// A grid's pixel buffer does not match its dimensions.
    #[error("Pixel buffer holds {actual} bytes, expected {expected}")]
    InvalidBuffer { expected: usize, actual: usize },

    /// Resampling a frame failed.
    #[error("Resize failed")]
    Resize(#[from] DecodeError),
}

impl TransformError {
    /// Reject grids whose buffer length disagrees with their dimensions.
    pub(crate) fn check_buffer(grid: &PixelGrid) -> Result<(), TransformError> {
        if grid.has_valid_buffer() {
            return Ok(());
        }
        Err(TransformError::InvalidBuffer {
            expected: grid.expected_len(),
            actual: grid.pixels.len(),
        })
    }

    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        TransformError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}
