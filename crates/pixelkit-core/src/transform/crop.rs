//! Rectangle cropping and canvas pasting.
//!
//! Both functions copy pixel data row by row. Cropping is strict (the
//! rectangle must fit the grid); pasting clips against the canvas.

use crate::grid::{FrameSequence, PixelGrid, Rect, CHANNELS};

use super::TransformError;

/// Cut `rect` out of a grid.
///
/// # Errors
///
/// Returns `TransformError::InvalidBuffer` if the pixel buffer does not match
/// the dimensions, and `TransformError::OutOfBounds` if the rectangle extends
/// past the grid.
///
/// # Example
///
/// ```ignore
/// let grid = PixelGrid::transparent(100, 100);
/// let cropped = crop_grid(&grid, Rect::new(25, 25, 75, 75))?;
/// assert_eq!((cropped.width, cropped.height), (50, 50));
/// ```
pub fn crop_grid(grid: &PixelGrid, rect: Rect) -> Result<PixelGrid, TransformError> {
    TransformError::check_buffer(grid)?;
    if !rect.fits_within(grid.width, grid.height) {
        return Err(TransformError::OutOfBounds {
            rect,
            width: grid.width,
            height: grid.height,
        });
    }

    // Fast path: full crop returns a clone
    if rect == grid.rect() {
        return Ok(grid.clone());
    }

    let out_width = rect.width();
    let out_height = rect.height();
    let row_bytes = out_width as usize * CHANNELS;
    let mut output = Vec::with_capacity(row_bytes * out_height as usize);

    // Copy pixel data row by row
    let start = rect.left as usize * CHANNELS;
    for row in grid.rows().skip(rect.top as usize).take(out_height as usize) {
        output.extend_from_slice(&row[start..start + row_bytes]);
    }

    Ok(PixelGrid::new(out_width, out_height, output))
}

/// Crop every frame of a sequence to the same rectangle.
///
/// Frame delays and the loop count are carried over unchanged.
///
/// # Errors
///
/// Returns `TransformError::OutOfBounds` if the rectangle does not fit any
/// one of the frames, and `TransformError::InvalidBuffer` for a frame whose
/// buffer does not match its dimensions.
pub fn crop_frames(sequence: &FrameSequence, rect: Rect) -> Result<FrameSequence, TransformError> {
    let cropped = sequence.try_map_grids(|grid| crop_grid(grid, rect))?;
    tracing::debug!(frames = cropped.len(), %rect, "cropped frames");
    Ok(cropped)
}

/// Copy `src` onto `canvas` with its top-left corner at (x, y).
///
/// Pixels are copied verbatim (no alpha blending). Anything falling outside
/// the canvas is clipped.
///
/// # Errors
///
/// Returns `TransformError::InvalidBuffer` if either grid's buffer does not
/// match its dimensions.
pub fn paste(canvas: &mut PixelGrid, src: &PixelGrid, x: u32, y: u32) -> Result<(), TransformError> {
    TransformError::check_buffer(canvas)?;
    TransformError::check_buffer(src)?;
    if x >= canvas.width || y >= canvas.height {
        return Ok(());
    }

    let copy_width = src.width.min(canvas.width - x) as usize;
    let copy_height = src.height.min(canvas.height - y);
    let row_bytes = copy_width * CHANNELS;
    let canvas_stride = canvas.width as usize * CHANNELS;

    for (row, src_row) in src.rows().take(copy_height as usize).enumerate() {
        let dst_start = (y as usize + row) * canvas_stride + x as usize * CHANNELS;
        canvas.pixels[dst_start..dst_start + row_bytes].copy_from_slice(&src_row[..row_bytes]);
    }
    Ok(())
}


// ============================================================================
// Property-Based Tests
// ============================================================================
