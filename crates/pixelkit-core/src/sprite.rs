//! Sprite sheet composition.
//!
//! Frames are laid out left-to-right, top-to-bottom in fixed-size cells on a
//! transparent canvas. The first frame sets the cell size; any frame of a
//! different size is resampled to it.

use serde::Serialize;

use crate::decode::{resize, FilterType};
use crate::grid::{FrameSequence, PixelGrid};
use crate::transform::{paste, TransformError};

/// Frames taken from an animation when no limit is given.
pub const DEFAULT_MAX_FRAMES: usize = 40;

/// Number of images in a horizontal strip.
pub const STRIP_LEN: usize = 3;

/// Grid arrangement of a sprite sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SheetLayout {
    pub columns: u32,
    pub rows: u32,
}

impl SheetLayout {
    /// Layout for `frame_count` frames.
    ///
    /// With no explicit `frames_per_row`, picks `ceil(sqrt(n))` columns so
    /// the sheet is as close to square as possible.
    ///
    /// # Errors
    ///
    /// Returns `TransformError::InvalidParameter` for zero frames or zero
    /// columns.
    pub fn new(frame_count: usize, frames_per_row: Option<u32>) -> Result<Self, TransformError> {
        if frame_count == 0 {
            return Err(TransformError::invalid("frames", "at least one frame is required"));
        }
        let count = u32::try_from(frame_count)
            .map_err(|_| TransformError::invalid("frames", "too many frames"))?;

        let columns = match frames_per_row {
            Some(0) => {
                return Err(TransformError::invalid(
                    "frames_per_row",
                    "must be greater than 0",
                ))
            }
            Some(columns) => columns,
            None => ceil_sqrt(count),
        };

        Ok(Self {
            columns,
            rows: count.div_ceil(columns),
        })
    }

    /// Number of cells in the sheet.
    pub fn capacity(&self) -> u64 {
        u64::from(self.columns) * u64::from(self.rows)
    }

    /// (column, row) of the cell holding frame `index`.
    pub fn cell(&self, index: u32) -> (u32, u32) {
        (index % self.columns, index / self.columns)
    }
}

fn ceil_sqrt(n: u32) -> u32 {
    let mut root = f64::from(n).sqrt() as u32;
    while root * root < n {
        root += 1;
    }
    root.max(1)
}

/// Frame window options for sheets cut from an animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpriteSheetOptions {
    /// Index of the first frame to use.
    pub start: usize,
    /// Maximum number of frames to place on the sheet.
    pub max_frames: usize,
    /// Fixed number of columns, or `None` for a near-square layout.
    pub frames_per_row: Option<u32>,
}

impl Default for SpriteSheetOptions {
    fn default() -> Self {
        Self {
            start: 0,
            max_frames: DEFAULT_MAX_FRAMES,
            frames_per_row: None,
        }
    }
}

impl SpriteSheetOptions {
    /// Validate raw option values.
    ///
    /// # Errors
    ///
    /// Returns `TransformError::InvalidParameter` for a negative start, a
    /// non-positive frame limit or a non-positive column count.
    pub fn new(
        start: i64,
        max_frames: i64,
        frames_per_row: Option<i64>,
    ) -> Result<Self, TransformError> {
        let start = usize::try_from(start)
            .map_err(|_| TransformError::invalid("start", "must be >= 0"))?;
        let max_frames = usize::try_from(max_frames)
            .ok()
            .filter(|&n| n > 0)
            .ok_or_else(|| TransformError::invalid("max_frames", "must be greater than 0"))?;
        let frames_per_row = frames_per_row
            .map(|n| {
                u32::try_from(n)
                    .ok()
                    .filter(|&n| n > 0)
                    .ok_or_else(|| TransformError::invalid("frames_per_row", "must be greater than 0"))
            })
            .transpose()?;

        Ok(Self {
            start,
            max_frames,
            frames_per_row,
        })
    }
}

/// A composed sheet and how it was laid out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpriteSheet {
    pub image: PixelGrid,
    pub layout: SheetLayout,
    pub cell_width: u32,
    pub cell_height: u32,
    /// Frames that had to be resampled to the cell size.
    pub resized_frames: usize,
}

/// Take up to `max_frames` frames starting at `start`.
///
/// # Errors
///
/// Returns `TransformError::InvalidParameter` if `start` is past the last frame.
pub fn select_frames(
    sequence: &FrameSequence,
    start: usize,
    max_frames: usize,
) -> Result<Vec<PixelGrid>, TransformError> {
    if start >= sequence.len() {
        return Err(TransformError::invalid(
            "start",
            format!("animation has only {} frame(s)", sequence.len()),
        ));
    }

    Ok(sequence
        .grids()
        .skip(start)
        .take(max_frames)
        .cloned()
        .collect())
}

/// Lay `grids` out on a sheet.
///
/// # Errors
///
/// Returns `TransformError::InvalidParameter` if there are no grids, the
/// first grid is empty, the layout has too few cells or the sheet would be
/// too large, `TransformError::InvalidBuffer` for a grid whose buffer does
/// not match its dimensions, and `TransformError::Resize` if resampling a
/// frame fails.
pub fn compose_sheet(
    grids: &[PixelGrid],
    layout: SheetLayout,
    filter: FilterType,
) -> Result<SpriteSheet, TransformError> {
    let first = grids
        .first()
        .ok_or_else(|| TransformError::invalid("frames", "at least one frame is required"))?;
    if first.is_empty() {
        return Err(TransformError::invalid("frames", "first frame is empty"));
    }
    if layout.capacity() < grids.len() as u64 {
        return Err(TransformError::invalid(
            "layout",
            format!(
                "{}x{} cells cannot hold {} frames",
                layout.columns,
                layout.rows,
                grids.len()
            ),
        ));
    }

    let (cell_width, cell_height) = (first.width, first.height);
    let sheet_width = cell_width.checked_mul(layout.columns);
    let sheet_height = cell_height.checked_mul(layout.rows);
    let (Some(sheet_width), Some(sheet_height)) = (sheet_width, sheet_height) else {
        return Err(TransformError::invalid("layout", "sprite sheet is too large"));
    };

    let mut sheet = PixelGrid::transparent(sheet_width, sheet_height);
    let mut resized_frames = 0;

    for (index, grid) in grids.iter().enumerate() {
        let (column, row) = layout.cell(index as u32);
        let (x, y) = (column * cell_width, row * cell_height);

        if grid.same_size(first) {
            paste(&mut sheet, grid, x, y)?;
        } else {
            tracing::warn!(
                frame = index + 1,
                width = grid.width,
                height = grid.height,
                "frame size differs, resizing to {cell_width}x{cell_height}"
            );
            let cell = resize(grid, cell_width, cell_height, filter)?;
            paste(&mut sheet, &cell, x, y)?;
            resized_frames += 1;
        }
    }

    tracing::debug!(
        frames = grids.len(),
        columns = layout.columns,
        rows = layout.rows,
        "composed sprite sheet"
    );

    Ok(SpriteSheet {
        image: sheet,
        layout,
        cell_width,
        cell_height,
        resized_frames,
    })
}

/// Place exactly three images side by side.
///
/// # Errors
///
/// Returns `TransformError::InvalidParameter` unless exactly three images
/// are given.
pub fn compose_strip(grids: &[PixelGrid], filter: FilterType) -> Result<SpriteSheet, TransformError> {
    if grids.len() != STRIP_LEN {
        return Err(TransformError::invalid(
            "images",
            format!("exactly {STRIP_LEN} images are required, got {}", grids.len()),
        ));
    }
    let layout = SheetLayout {
        columns: STRIP_LEN as u32,
        rows: 1,
    };
    compose_sheet(grids, layout, filter)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(width: u32, height: u32, rgba: [u8; 4]) -> PixelGrid {
        let pixels = rgba
            .iter()
            .copied()
            .cycle()
            .take(width as usize * height as usize * 4)
            .collect();
        PixelGrid::new(width, height, pixels)
    }

    fn numbered_frames(count: usize) -> Vec<PixelGrid> {
        (0..count)
            .map(|i| solid(4, 3, [i as u8, 0, 0, 255]))
            .collect()
    }

    #[test]
    fn test_layout_auto_square() {
        assert_eq!(SheetLayout::new(1, None).unwrap(), SheetLayout { columns: 1, rows: 1 });
        assert_eq!(SheetLayout::new(4, None).unwrap(), SheetLayout { columns: 2, rows: 2 });
        assert_eq!(SheetLayout::new(5, None).unwrap(), SheetLayout { columns: 3, rows: 2 });
        assert_eq!(SheetLayout::new(40, None).unwrap(), SheetLayout { columns: 7, rows: 6 });
    }

    #[test]
    fn test_layout_fixed_columns() {
        assert_eq!(
            SheetLayout::new(40, Some(10)).unwrap(),
            SheetLayout { columns: 10, rows: 4 }
        );
        assert_eq!(
            SheetLayout::new(3, Some(5)).unwrap(),
            SheetLayout { columns: 5, rows: 1 }
        );
    }

    #[test]
    fn test_layout_invalid() {
        assert!(SheetLayout::new(0, None).is_err());
        assert!(SheetLayout::new(5, Some(0)).is_err());
    }

    #[test]
    fn test_layout_cell() {
        let layout = SheetLayout { columns: 3, rows: 2 };
        assert_eq!(layout.cell(0), (0, 0));
        assert_eq!(layout.cell(2), (2, 0));
        assert_eq!(layout.cell(4), (1, 1));
    }

    #[test]
    fn test_ceil_sqrt() {
        assert_eq!(ceil_sqrt(1), 1);
        assert_eq!(ceil_sqrt(9), 3);
        assert_eq!(ceil_sqrt(10), 4);
        assert_eq!(ceil_sqrt(16), 4);
        assert_eq!(ceil_sqrt(17), 5);
    }

    #[test]
    fn test_select_frames_window() {
        let seq = FrameSequence::from_grids(numbered_frames(10), 100);

        let picked = select_frames(&seq, 2, 3).unwrap();
        assert_eq!(picked.len(), 3);
        assert_eq!(picked[0].get(0, 0).unwrap()[0], 2);
        assert_eq!(picked[2].get(0, 0).unwrap()[0], 4);

        // Limit past the end takes what is left
        assert_eq!(select_frames(&seq, 8, 40).unwrap().len(), 2);
    }

    #[test]
    fn test_select_frames_start_out_of_range() {
        let seq = FrameSequence::from_grids(numbered_frames(3), 100);
        assert!(matches!(
            select_frames(&seq, 3, 10),
            Err(TransformError::InvalidParameter { name: "start", .. })
        ));
    }

    #[test]
    fn test_compose_sheet_positions() {
        let frames = numbered_frames(5);
        let layout = SheetLayout::new(frames.len(), None).unwrap();
        let sheet = compose_sheet(&frames, layout, FilterType::Lanczos3).unwrap();

        assert_eq!((sheet.image.width, sheet.image.height), (12, 6));
        assert_eq!((sheet.cell_width, sheet.cell_height), (4, 3));
        assert_eq!(sheet.resized_frames, 0);

        // Frame 4 lands in column 1, row 1
        assert_eq!(sheet.image.get(4, 3), Some([4, 0, 0, 255]));
        assert_eq!(sheet.image.get(7, 5), Some([4, 0, 0, 255]));
        // Unused last cell stays transparent
        assert_eq!(sheet.image.get(8, 3), Some([0, 0, 0, 0]));
    }

    #[test]
    fn test_compose_sheet_resizes_odd_frames() {
        let frames = vec![
            solid(4, 4, [255, 0, 0, 255]),
            solid(8, 8, [0, 255, 0, 255]),
        ];
        let layout = SheetLayout::new(2, Some(2)).unwrap();
        let sheet = compose_sheet(&frames, layout, FilterType::Nearest).unwrap();

        assert_eq!((sheet.image.width, sheet.image.height), (8, 4));
        assert_eq!(sheet.resized_frames, 1);
        assert_eq!(sheet.image.get(5, 2), Some([0, 255, 0, 255]));
    }

    #[test]
    fn test_compose_sheet_too_few_cells() {
        let frames = numbered_frames(5);
        let layout = SheetLayout { columns: 2, rows: 2 };
        assert!(compose_sheet(&frames, layout, FilterType::Lanczos3).is_err());
    }

    #[test]
    fn test_compose_sheet_rejects_short_buffer() {
        let mut frames = numbered_frames(2);
        frames[1].pixels.truncate(10);
        let layout = SheetLayout::new(2, None).unwrap();

        assert!(matches!(
            compose_sheet(&frames, layout, FilterType::Lanczos3),
            Err(TransformError::InvalidBuffer { expected: 48, actual: 10 })
        ));
    }

    #[test]
    fn test_compose_strip() {
        let images = vec![
            solid(2, 2, [1, 0, 0, 255]),
            solid(2, 2, [2, 0, 0, 255]),
            solid(2, 2, [3, 0, 0, 128]),
        ];
        let strip = compose_strip(&images, FilterType::Lanczos3).unwrap();

        assert_eq!((strip.image.width, strip.image.height), (6, 2));
        assert_eq!(strip.image.get(0, 0), Some([1, 0, 0, 255]));
        assert_eq!(strip.image.get(3, 1), Some([2, 0, 0, 255]));
        // Straight copy, no blending with the canvas
        assert_eq!(strip.image.get(5, 0), Some([3, 0, 0, 128]));
    }

    #[test]
    fn test_compose_strip_requires_three() {
        let images = numbered_frames(2);
        assert!(matches!(
            compose_strip(&images, FilterType::Lanczos3),
            Err(TransformError::InvalidParameter { name: "images", .. })
        ));
    }

    #[test]
    fn test_options_validation() {
        let opts = SpriteSheetOptions::new(0, 40, None).unwrap();
        assert_eq!(opts, SpriteSheetOptions::default());

        assert!(SpriteSheetOptions::new(-1, 40, None).is_err());
        assert!(SpriteSheetOptions::new(0, 0, None).is_err());
        assert!(SpriteSheetOptions::new(0, 10, Some(0)).is_err());
        assert_eq!(
            SpriteSheetOptions::new(2, 10, Some(5)).unwrap().frames_per_row,
            Some(5)
        );
    }
}
