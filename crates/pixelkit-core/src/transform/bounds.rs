//! Bounding box of visible pixels across animation frames.

use serde::Serialize;

use crate::grid::{FrameSequence, PixelGrid, Rect, CHANNELS};

use super::TransformError;

/// Options for trimming.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrimOptions {
    /// Margin kept around the visible content, in pixels.
    pub padding: u32,
}

impl TrimOptions {
    /// Validate a raw padding value.
    ///
    /// # Errors
    ///
    /// Returns `TransformError::InvalidParameter` if `padding` is negative.
    pub fn new(padding: i64) -> Result<Self, TransformError> {
        let padding = u32::try_from(padding)
            .map_err(|_| TransformError::invalid("padding", "must be >= 0"))?;
        Ok(Self { padding })
    }
}

/// Result of reducing a sequence to one crop rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BoundsOutcome {
    /// Every frame is fully transparent; there is nothing to keep.
    Empty,
    /// The padded bounds cover the whole frame; cropping would be a no-op.
    FullFrame,
    /// Crop every frame to this rectangle.
    Crop(Rect),
}

/// Bounding box of the pixels with non-zero alpha, or `None` if the grid is
/// fully transparent.
///
/// The right and bottom edges are exclusive (last visible column/row + 1).
/// Rows missing from a short pixel buffer count as transparent; cropping
/// such a grid is rejected later by [`crop_grid`](super::crop_grid).
pub fn alpha_bounds(grid: &PixelGrid) -> Option<Rect> {
    let mut bounds: Option<Rect> = None;

    for (y, row) in (0u32..).zip(grid.rows()) {
        let first = row.chunks_exact(CHANNELS).position(|px| px[3] != 0);
        let Some(first) = first else {
            continue;
        };
        // A visible pixel exists, so rposition always finds one
        let last = row
            .chunks_exact(CHANNELS)
            .rposition(|px| px[3] != 0)
            .unwrap_or(first);

        let row_bounds = Rect::new(first as u32, y, last as u32 + 1, y + 1);
        bounds = Some(match bounds {
            Some(b) => b.union(row_bounds),
            None => row_bounds,
        });
    }

    bounds
}

/// Union of the alpha bounding boxes of all grids.
///
/// Fully transparent grids contribute nothing; `None` means every grid was
/// transparent.
pub fn union_bounds<'a, I>(grids: I) -> Option<Rect>
where
    I: IntoIterator<Item = &'a PixelGrid>,
{
    grids
        .into_iter()
        .filter_map(alpha_bounds)
        .reduce(Rect::union)
}

/// Compute the crop rectangle shared by every frame of a sequence.
///
/// The union of all per-frame bounding boxes is grown by `padding` on each
/// side and clamped to the first frame's dimensions.
///
/// # Returns
///
/// - `BoundsOutcome::Empty` if no frame has a visible pixel
/// - `BoundsOutcome::FullFrame` if the padded box is the whole frame
/// - `BoundsOutcome::Crop(rect)` otherwise
pub fn reduce_bounds(sequence: &FrameSequence, padding: u32) -> BoundsOutcome {
    let Some((width, height)) = sequence.dimensions() else {
        return BoundsOutcome::Empty;
    };
    let Some(content) = union_bounds(sequence.grids()) else {
        return BoundsOutcome::Empty;
    };

    let padded = content.expand(padding, width, height);
    tracing::debug!(%content, %padded, padding, "reduced frame bounds");

    if padded == Rect::full(width, height) {
        BoundsOutcome::FullFrame
    } else {
        BoundsOutcome::Crop(padded)
    }
}
