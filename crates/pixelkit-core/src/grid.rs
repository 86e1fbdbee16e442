//! Pixel buffers, rectangles and frame sequences.
//!
//! Every grid is stored as straight (non-premultiplied) RGBA, 4 bytes per
//! pixel in row-major order. Coordinates have their origin at the top-left
//! corner.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of bytes per pixel (RGBA).
pub const CHANNELS: usize = 4;

/// Display duration used when a frame carries no delay of its own.
pub const DEFAULT_DELAY_MS: u32 = 100;

/// An RGBA image held in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    /// Grid width in pixels.
    pub width: u32,
    /// Grid height in pixels.
    pub height: u32,
    /// RGBA pixel data in row-major order (4 bytes per pixel).
    /// Length should be width * height * 4.
    pub pixels: Vec<u8>,
}

impl PixelGrid {
    /// Create a new PixelGrid with the given dimensions and pixel data.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(
            pixels.len(),
            width as usize * height as usize * CHANNELS,
            "Pixel buffer size mismatch"
        );
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Create a fully transparent grid.
    pub fn transparent(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0u8; width as usize * height as usize * CHANNELS],
        }
    }

    /// Create a PixelGrid from an image::RgbaImage.
    pub fn from_rgba_image(img: image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            pixels: img.into_raw(),
        }
    }

    /// Convert to an image::RgbaImage for codec and resampling work.
    ///
    /// Returns `None` when the pixel buffer does not match the dimensions.
    pub fn to_rgba_image(&self) -> Option<image::RgbaImage> {
        image::RgbaImage::from_raw(self.width, self.height, self.pixels.clone())
    }

    #[inline]
    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * CHANNELS
    }

    /// Read the pixel at (x, y), or `None` outside the grid.
    pub fn get(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = self.offset(x, y);
        let px = self.pixels.get(i..i + CHANNELS)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Write the pixel at (x, y). Writes outside the grid are ignored.
    pub fn put(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        if x >= self.width || y >= self.height {
            return;
        }
        let i = self.offset(x, y);
        if let Some(px) = self.pixels.get_mut(i..i + CHANNELS) {
            px.copy_from_slice(&rgba);
        }
    }

    /// Buffer length implied by the dimensions.
    pub fn expected_len(&self) -> usize {
        self.width as usize * self.height as usize * CHANNELS
    }

    /// Whether the pixel buffer matches the dimensions exactly.
    pub fn has_valid_buffer(&self) -> bool {
        self.pixels.len() == self.expected_len()
    }

    /// Complete rows present in the buffer, top to bottom.
    pub(crate) fn rows(&self) -> impl Iterator<Item = &[u8]> {
        let stride = (self.width as usize * CHANNELS).max(1);
        self.pixels.chunks_exact(stride).take(self.height as usize)
    }

    /// Get the total number of pixels.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Check if this is an empty/invalid grid.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.pixels.is_empty()
    }

    /// Rectangle covering the whole grid.
    pub fn rect(&self) -> Rect {
        Rect::full(self.width, self.height)
    }

    /// Whether both grids have the same dimensions.
    pub fn same_size(&self, other: &PixelGrid) -> bool {
        self.width == other.width && self.height == other.height
    }
}

/// An axis-aligned pixel rectangle with exclusive right and bottom edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl Rect {
    pub fn new(left: u32, top: u32, right: u32, bottom: u32) -> Self {
        debug_assert!(left <= right && top <= bottom, "Inverted rectangle");
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// The rectangle `(0, 0, width, height)`.
    pub fn full(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }

    pub fn width(&self) -> u32 {
        self.right - self.left
    }

    pub fn height(&self) -> u32 {
        self.bottom - self.top
    }

    /// Smallest rectangle containing both.
    pub fn union(self, other: Rect) -> Rect {
        Rect {
            left: self.left.min(other.left),
            top: self.top.min(other.top),
            right: self.right.max(other.right),
            bottom: self.bottom.max(other.bottom),
        }
    }

    /// Grow by `padding` on every side, clamped to `[0, width] x [0, height]`.
    pub fn expand(self, padding: u32, width: u32, height: u32) -> Rect {
        Rect {
            left: self.left.saturating_sub(padding),
            top: self.top.saturating_sub(padding),
            right: self.right.saturating_add(padding).min(width),
            bottom: self.bottom.saturating_add(padding).min(height),
        }
    }

    /// Whether the rectangle lies inside a `width x height` grid.
    pub fn fits_within(&self, width: u32, height: u32) -> bool {
        self.left <= self.right
            && self.top <= self.bottom
            && self.right <= width
            && self.bottom <= height
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "left={}, top={}, right={}, bottom={}",
            self.left, self.top, self.right, self.bottom
        )
    }
}

/// Per-frame metadata carried through every transform untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameMeta {
    /// Display duration in milliseconds.
    pub delay_ms: u32,
}

impl Default for FrameMeta {
    fn default() -> Self {
        Self {
            delay_ms: DEFAULT_DELAY_MS,
        }
    }
}

/// A single animation frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub grid: PixelGrid,
    pub meta: FrameMeta,
}

impl Frame {
    pub fn new(grid: PixelGrid, meta: FrameMeta) -> Self {
        Self { grid, meta }
    }
}

/// How many times an animation repeats after the first play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoopCount {
    #[default]
    Infinite,
    Finite(u16),
}

/// Animation-level metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AnimationMeta {
    pub loop_count: LoopCount,
}

/// Ordered frames of one animation.
///
/// Frames are expected to share the first frame's dimensions; the cropper
/// checks this, the resizer normalizes it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FrameSequence {
    pub frames: Vec<Frame>,
    pub meta: AnimationMeta,
}

impl FrameSequence {
    pub fn new(frames: Vec<Frame>, meta: AnimationMeta) -> Self {
        Self { frames, meta }
    }

    /// Build a sequence from bare grids, each shown for `delay_ms`.
    pub fn from_grids(grids: Vec<PixelGrid>, delay_ms: u32) -> Self {
        let frames = grids
            .into_iter()
            .map(|grid| Frame::new(grid, FrameMeta { delay_ms }))
            .collect();
        Self::new(frames, AnimationMeta::default())
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// More than one frame.
    pub fn is_animated(&self) -> bool {
        self.frames.len() > 1
    }

    /// Dimensions of the first frame.
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        self.frames
            .first()
            .map(|frame| (frame.grid.width, frame.grid.height))
    }

    pub fn grids(&self) -> impl Iterator<Item = &PixelGrid> {
        self.frames.iter().map(|frame| &frame.grid)
    }

    /// Replace every grid through `f`, keeping frame and animation metadata.
    pub fn try_map_grids<F, E>(&self, mut f: F) -> Result<FrameSequence, E>
    where
        F: FnMut(&PixelGrid) -> Result<PixelGrid, E>,
    {
        let frames = self
            .frames
            .iter()
            .map(|frame| Ok(Frame::new(f(&frame.grid)?, frame.meta)))
            .collect::<Result<Vec<_>, E>>()?;
        Ok(FrameSequence::new(frames, self.meta))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_creation() {
        let grid = PixelGrid::new(100, 50, vec![0u8; 100 * 50 * 4]);

        assert_eq!(grid.width, 100);
        assert_eq!(grid.height, 50);
        assert_eq!(grid.pixel_count(), 5000);
        assert!(!grid.is_empty());
    }

    #[test]
    fn test_grid_empty() {
        let grid = PixelGrid::new(0, 0, vec![]);
        assert!(grid.is_empty());
    }

    #[test]
    fn test_get_put() {
        let mut grid = PixelGrid::transparent(3, 2);
        grid.put(2, 1, [1, 2, 3, 4]);

        assert_eq!(grid.get(2, 1), Some([1, 2, 3, 4]));
        assert_eq!(grid.get(0, 0), Some([0, 0, 0, 0]));
        assert_eq!(grid.pixels[(3 + 2) * 4], 1);
    }

    #[test]
    fn test_get_out_of_bounds() {
        let mut grid = PixelGrid::transparent(3, 2);
        assert_eq!(grid.get(3, 0), None);
        assert_eq!(grid.get(0, 2), None);

        // Ignored rather than panicking
        grid.put(5, 5, [9, 9, 9, 9]);
        assert!(grid.pixels.iter().all(|&b| b == 0));
    }

    #[test]
    fn test_rgba_image_conversion() {
        let mut grid = PixelGrid::transparent(4, 3);
        grid.put(1, 2, [10, 20, 30, 40]);

        let img = grid.to_rgba_image().unwrap();
        assert_eq!(img.get_pixel(1, 2).0, [10, 20, 30, 40]);
        assert_eq!(PixelGrid::from_rgba_image(img), grid);
    }

    #[test]
    fn test_to_rgba_image_rejects_bad_buffer() {
        let grid = PixelGrid {
            width: 4,
            height: 4,
            pixels: vec![0u8; 10],
        };
        assert!(grid.to_rgba_image().is_none());
    }

    #[test]
    fn test_short_buffer_rows() {
        // Room for one full row of a 3x2 grid plus a partial second row
        let grid = PixelGrid {
            width: 3,
            height: 2,
            pixels: vec![0u8; 3 * 4 + 5],
        };

        assert!(!grid.has_valid_buffer());
        assert_eq!(grid.expected_len(), 24);
        let rows: Vec<&[u8]> = grid.rows().collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].len(), 12);
    }

    #[test]
    fn test_rect_union() {
        let a = Rect::new(1, 1, 3, 3);
        let b = Rect::new(5, 0, 8, 2);
        assert_eq!(a.union(b), Rect::new(1, 0, 8, 3));
    }

    #[test]
    fn test_rect_expand_clamps() {
        let r = Rect::new(2, 3, 8, 9);
        assert_eq!(r.expand(1, 10, 10), Rect::new(1, 2, 9, 10));
        assert_eq!(r.expand(5, 10, 10), Rect::new(0, 0, 10, 10));
        assert_eq!(r.expand(0, 10, 10), r);
    }

    #[test]
    fn test_rect_fits_within() {
        assert!(Rect::new(0, 0, 10, 10).fits_within(10, 10));
        assert!(!Rect::new(0, 0, 11, 10).fits_within(10, 10));
        assert!(!Rect::new(0, 0, 10, 11).fits_within(10, 10));
    }

    #[test]
    fn test_rect_display() {
        let r = Rect::new(1, 2, 3, 4);
        assert_eq!(r.to_string(), "left=1, top=2, right=3, bottom=4");
        assert_eq!(r.width(), 2);
        assert_eq!(r.height(), 2);
    }

    #[test]
    fn test_sequence_map_keeps_metadata() {
        let mut seq = FrameSequence::from_grids(
            vec![PixelGrid::transparent(2, 2), PixelGrid::transparent(2, 2)],
            70,
        );
        seq.meta.loop_count = LoopCount::Finite(3);

        let mapped: FrameSequence = seq
            .try_map_grids(|_| Ok::<_, ()>(PixelGrid::transparent(1, 1)))
            .unwrap();

        assert_eq!(mapped.len(), 2);
        assert_eq!(mapped.dimensions(), Some((1, 1)));
        assert!(mapped.frames.iter().all(|f| f.meta.delay_ms == 70));
        assert_eq!(mapped.meta.loop_count, LoopCount::Finite(3));
    }

    #[test]
    fn test_sequence_animated() {
        let single = FrameSequence::from_grids(vec![PixelGrid::transparent(1, 1)], 100);
        assert!(!single.is_animated());
        assert!(FrameSequence::default().dimensions().is_none());
    }
}
