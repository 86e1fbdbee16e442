//! Image encoding pipeline for pixelkit.
//!
//! This module provides functionality for:
//! - Encoding RGBA grids to PNG
//! - Encoding frame sequences to (animated) GIF with per-frame delays and
//!   the loop count
//! - Writing finished output to disk
//!
//! Encoders produce complete byte buffers in memory, so a file is only
//! written once every frame has been processed and encoded.
//!
//! # Examples
//!
//! ```ignore
//! use pixelkit_core::encode::{encode_png, write_output};
//!
//! let png = encode_png(&sheet)?;
//! write_output(Path::new("out/sheet.png"), &png)?;
//! ```

mod animation;
mod error;
mod still;

use std::path::Path;

pub use animation::encode_gif;
pub use error::EncodeError;
pub use still::encode_png;

/// Write encoded bytes to `path`, creating missing parent directories.
///
/// # Errors
///
/// Returns `EncodeError::Io` if a directory or the file cannot be written.
pub fn write_output(path: &Path, bytes: &[u8]) -> Result<(), EncodeError> {
    let io_error = |source| EncodeError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(io_error)?;
    }
    std::fs::write(path, bytes).map_err(io_error)?;

    tracing::debug!(path = %path.display(), bytes = bytes.len(), "wrote output");
    Ok(())
}
