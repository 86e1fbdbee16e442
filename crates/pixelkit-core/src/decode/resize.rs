//! Image resizing for sprite normalization and GIF scaling.
//!
//! Provides resize operations using the `image` crate's algorithms.
//! All functions return new grids without modifying the input.

use super::{DecodeError, FilterType};
use crate::grid::{FrameSequence, PixelGrid};
use crate::transform::TransformError;

/// Resize a grid to exact dimensions.
///
/// # Arguments
///
/// * `grid` - The source grid to resize
/// * `width` - Target width in pixels
/// * `height` - Target height in pixels
/// * `filter` - Interpolation filter to use
///
/// # Errors
///
/// Returns `DecodeError::InvalidDimensions` if either target dimension is
/// zero, and `DecodeError::InvalidFormat` if the source buffer does not match
/// its dimensions.
pub fn resize(
    grid: &PixelGrid,
    width: u32,
    height: u32,
    filter: FilterType,
) -> Result<PixelGrid, DecodeError> {
    if width == 0 || height == 0 {
        return Err(DecodeError::InvalidDimensions { width, height });
    }

    // Fast path: if dimensions match, just clone
    if grid.width == width && grid.height == height {
        return Ok(grid.clone());
    }

    let rgba_image = grid.to_rgba_image().ok_or_else(|| {
        DecodeError::InvalidFormat("pixel buffer does not match dimensions".to_string())
    })?;

    let resized = image::imageops::resize(&rgba_image, width, height, filter.to_image_filter());

    Ok(PixelGrid::from_rgba_image(resized))
}

/// Resize every frame of a sequence, keeping frame delays and loop count.
pub fn resize_frames(
    sequence: &FrameSequence,
    width: u32,
    height: u32,
    filter: FilterType,
) -> Result<FrameSequence, DecodeError> {
    sequence.try_map_grids(|grid| resize(grid, width, height, filter))
}

/// Requested output size for aspect-preserving scaling.
///
/// Precedence: width and height together pick the smaller of the two scale
/// factors (so the result fits both), then width alone, then height alone,
/// then the explicit scale factor.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ResizeTarget {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub scale: Option<f64>,
}

impl ResizeTarget {
    /// Validate raw option values.
    ///
    /// # Errors
    ///
    /// Returns `TransformError::InvalidParameter` if nothing is specified,
    /// if a dimension is not positive, or if the scale is not a positive
    /// finite number.
    pub fn new(
        width: Option<i64>,
        height: Option<i64>,
        scale: Option<f64>,
    ) -> Result<Self, TransformError> {
        if width.is_none() && height.is_none() && scale.is_none() {
            return Err(TransformError::invalid(
                "size",
                "one of width, height or scale is required",
            ));
        }

        let positive = |name: &'static str, value: Option<i64>| {
            value
                .map(|v| {
                    u32::try_from(v)
                        .ok()
                        .filter(|&v| v > 0)
                        .ok_or_else(|| TransformError::invalid(name, "must be greater than 0"))
                })
                .transpose()
        };

        let width = positive("width", width)?;
        let height = positive("height", height)?;

        if let Some(s) = scale {
            if !s.is_finite() || s <= 0.0 {
                return Err(TransformError::invalid("scale", "must be greater than 0"));
            }
        }

        Ok(Self {
            width,
            height,
            scale,
        })
    }

    /// Scale factor to apply to a `orig_width x orig_height` source.
    pub fn scale_factor(&self, orig_width: u32, orig_height: u32) -> Result<f64, TransformError> {
        if orig_width == 0 || orig_height == 0 {
            return Err(TransformError::invalid("source", "image has zero size"));
        }

        let scale_w = self.width.map(|w| w as f64 / orig_width as f64);
        let scale_h = self.height.map(|h| h as f64 / orig_height as f64);

        let factor = match (scale_w, scale_h, self.scale) {
            (Some(w), Some(h), _) => w.min(h),
            (Some(w), None, _) => w,
            (None, Some(h), _) => h,
            (None, None, Some(s)) => s,
            (None, None, None) => {
                return Err(TransformError::invalid(
                    "size",
                    "one of width, height or scale is required",
                ))
            }
        };

        if factor <= 0.0 || !factor.is_finite() {
            return Err(TransformError::invalid("scale", "must be greater than 0"));
        }
        Ok(factor)
    }

    /// Output dimensions: each edge scaled and truncated, at least 1 pixel.
    pub fn target_dimensions(
        &self,
        orig_width: u32,
        orig_height: u32,
    ) -> Result<(u32, u32), TransformError> {
        let factor = self.scale_factor(orig_width, orig_height)?;
        let scale_edge = |edge: u32| ((edge as f64 * factor) as u32).max(1);
        Ok((scale_edge(orig_width), scale_edge(orig_height)))
    }
}
