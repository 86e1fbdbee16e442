//! PNG encoding for keyed images and sprite sheets.

use std::io::Cursor;

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};

use super::EncodeError;
use crate::grid::{PixelGrid, CHANNELS};

/// Encode an RGBA grid to PNG bytes.
///
/// # Errors
///
/// Returns an error if the grid has a zero dimension, its buffer does not
/// match its dimensions, or the PNG encoder fails.
pub fn encode_png(grid: &PixelGrid) -> Result<Vec<u8>, EncodeError> {
    validate(grid)?;

    let mut buffer = Cursor::new(Vec::new());
    PngEncoder::new(&mut buffer)
        .write_image(&grid.pixels, grid.width, grid.height, ExtendedColorType::Rgba8)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer.into_inner())
}

/// Check dimensions and buffer length before handing pixels to an encoder.
pub(super) fn validate(grid: &PixelGrid) -> Result<(), EncodeError> {
    if grid.width == 0 || grid.height == 0 {
        return Err(EncodeError::InvalidDimensions {
            width: grid.width,
            height: grid.height,
        });
    }

    let expected = grid.width as usize * grid.height as usize * CHANNELS;
    if grid.pixels.len() != expected {
        return Err(EncodeError::InvalidPixelData {
            expected,
            actual: grid.pixels.len(),
        });
    }
    Ok(())
}
