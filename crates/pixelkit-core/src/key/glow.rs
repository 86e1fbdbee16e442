//! Glow extraction from black-background images.
//!
//! Each pixel is rescaled so its brightest channel becomes 255, and the
//! original brightest value becomes its alpha:
//!
//! ```text
//! m     = max(r, g, b)
//! rgb'  = floor(rgb * 255 / m)
//! alpha = m
//! ```
//!
//! A dim edge pixel `(20, 30, 15)` becomes `(170, 255, 127)` at alpha 30, a
//! bright core pixel keeps its hue at high alpha, and pure black becomes
//! fully transparent.
//!
//! ## Rounding
//!
//! Both the rescale and the feather ramp floor the exact rational result
//! (integer arithmetic), so the brightest channel always lands on 255.
//!
//! ## Feathering
//!
//! With a feather width `F > 0`, pixels whose distance to the nearest image
//! edge `d` is less than `F` get `alpha = floor(alpha * d / F)`: zero on the
//! border, ramping linearly to full alpha `F` pixels in.

use crate::grid::{PixelGrid, CHANNELS};
use crate::transform::TransformError;

/// Options for [`extract_glow`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GlowOptions {
    /// Edge feather width in pixels (0 disables feathering).
    pub feather: u32,
}

impl GlowOptions {
    /// Validate a raw feather width.
    ///
    /// # Errors
    ///
    /// Returns `TransformError::InvalidParameter` if `feather` is negative.
    pub fn new(feather: i64) -> Result<Self, TransformError> {
        let feather = u32::try_from(feather)
            .map_err(|_| TransformError::invalid("feather", "must be >= 0"))?;
        Ok(Self { feather })
    }
}

/// Convert a black-background glow into a transparent-background glow.
///
/// # Arguments
///
/// * `grid` - Image to transform in place (input alpha is ignored)
/// * `feather` - Edge feather width in pixels, 0 to disable
///
/// # Returns
///
/// The number of processed pixels (every pixel in the grid).
pub fn extract_glow(grid: &mut PixelGrid, feather: u32) -> usize {
    let width = grid.width;
    let height = grid.height;
    if width == 0 {
        return 0;
    }

    let mut processed = 0;

    for (idx, px) in grid.pixels.chunks_exact_mut(CHANNELS).enumerate() {
        let x = (idx % width as usize) as u32;
        let y = (idx / width as usize) as u32;

        let mut out = lift_pixel(px[0], px[1], px[2]);
        if feather > 0 && out[3] > 0 {
            out[3] = feather_alpha(out[3], edge_distance(x, y, width, height), feather);
        }

        px.copy_from_slice(&out);
        processed += 1;
    }

    tracing::debug!(feather, processed, "glow extracted");
    processed
}

/// Brighten one pixel to full value, moving its brightness into alpha.
///
/// # Example
///
/// ```ignore
/// assert_eq!(lift_pixel(20, 30, 15), [170, 255, 127, 30]);
/// assert_eq!(lift_pixel(0, 0, 0), [0, 0, 0, 0]);
/// ```
#[inline]
pub fn lift_pixel(r: u8, g: u8, b: u8) -> [u8; 4] {
    let max = r.max(g).max(b);
    if max == 0 {
        return [0, 0, 0, 0];
    }

    let lift = |c: u8| (u32::from(c) * 255 / u32::from(max)).min(255) as u8;
    [lift(r), lift(g), lift(b), max]
}

/// Distance in whole pixels from (x, y) to the nearest edge of a `width x height` grid.
#[inline]
pub fn edge_distance(x: u32, y: u32, width: u32, height: u32) -> u32 {
    let right = width.saturating_sub(1).saturating_sub(x);
    let bottom = height.saturating_sub(1).saturating_sub(y);
    x.min(y).min(right).min(bottom)
}

/// Scale `alpha` by `distance / feather` when inside the feather band.
#[inline]
pub fn feather_alpha(alpha: u8, distance: u32, feather: u32) -> u8 {
    if feather == 0 || distance >= feather {
        return alpha;
    }
    (u64::from(alpha) * u64::from(distance) / u64::from(feather)) as u8
}
