//! Still image decoding.

use std::io::Cursor;
use std::path::Path;

use image::ImageReader;

use super::DecodeError;
use crate::grid::PixelGrid;

/// Read an input file into memory.
///
/// # Errors
///
/// Returns `DecodeError::Unreadable` if the file is missing or unreadable.
pub fn read_file(path: &Path) -> Result<Vec<u8>, DecodeError> {
    std::fs::read(path).map_err(|source| DecodeError::Unreadable {
        path: path.to_path_buf(),
        source,
    })
}

/// Decode any supported still image to an RGBA grid.
///
/// The format is guessed from the content, not the file name. For animated
/// formats only the first frame is returned.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if the bytes are not a supported image.
pub fn decode_image(bytes: &[u8]) -> Result<PixelGrid, DecodeError> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::InvalidFormat(e.to_string()))?;

    let img = reader
        .decode()
        .map_err(|e| DecodeError::InvalidFormat(e.to_string()))?;

    let grid = PixelGrid::from_rgba_image(img.into_rgba8());
    tracing::debug!(width = grid.width, height = grid.height, "decoded image");
    Ok(grid)
}
