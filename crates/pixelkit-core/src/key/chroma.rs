//! Threshold keying of near-black pixels.

use crate::grid::{PixelGrid, CHANNELS};
use crate::transform::TransformError;

/// Options for [`chroma_key`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChromaKeyOptions {
    /// Inclusive per-channel darkness threshold (0 keys only pure black).
    pub threshold: u8,
}

impl ChromaKeyOptions {
    /// Validate a raw threshold value.
    ///
    /// # Errors
    ///
    /// Returns `TransformError::InvalidParameter` if `threshold` is outside 0-255.
    pub fn new(threshold: i64) -> Result<Self, TransformError> {
        let threshold = u8::try_from(threshold)
            .map_err(|_| TransformError::invalid("threshold", "must be between 0 and 255"))?;
        Ok(Self { threshold })
    }
}

/// Make near-black pixels fully transparent.
///
/// A pixel is keyed when its alpha is non-zero and each of R, G and B is at
/// most `threshold`. Only alpha changes; colour channels are kept. Already
/// transparent pixels are skipped, which makes the transform idempotent.
///
/// # Returns
///
/// The number of pixels whose alpha was cleared.
///
/// # Example
///
/// ```ignore
/// let mut grid = PixelGrid::new(2, 1, vec![0, 0, 0, 255, 9, 9, 9, 255]);
/// assert_eq!(chroma_key(&mut grid, 0), 1);
/// ```
pub fn chroma_key(grid: &mut PixelGrid, threshold: u8) -> usize {
    let mut changed = 0;

    for px in grid.pixels.chunks_exact_mut(CHANNELS) {
        if px[3] == 0 {
            continue;
        }
        if px[0] <= threshold && px[1] <= threshold && px[2] <= threshold {
            px[3] = 0;
            changed += 1;
        }
    }

    tracing::debug!(threshold, changed, "chroma key applied");
    changed
}
