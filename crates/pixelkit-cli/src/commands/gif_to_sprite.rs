use std::path::PathBuf;

use anyhow::{Context, Result};
use pixelkit_core::decode::FilterType;
use pixelkit_core::encode::{encode_png, write_output};
use pixelkit_core::sprite::DEFAULT_MAX_FRAMES;
use pixelkit_core::{compose_sheet, select_frames, SheetLayout, SpriteSheetOptions};

use super::load_gif;
use crate::paths::clean_path;
use crate::report::{Dimensions, Report, SheetReport};

#[derive(clap::Args, Debug)]
pub struct Args {
    /// Input GIF path.
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output PNG path.
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Index of the first frame to extract.
    #[arg(long, default_value_t = 0, value_name = "INT", allow_negative_numbers = true)]
    start: i64,

    /// Maximum number of frames to extract.
    #[arg(short = 'n', long, default_value_t = DEFAULT_MAX_FRAMES as i64, value_name = "INT", allow_negative_numbers = true)]
    max_frames: i64,

    /// Frames per row. Defaults to a near-square grid.
    #[arg(short = 'c', long, value_name = "INT", allow_negative_numbers = true)]
    frames_per_row: Option<i64>,
}

pub fn run(args: &Args) -> Result<Report> {
    let options = SpriteSheetOptions::new(args.start, args.max_frames, args.frames_per_row)?;

    let input = clean_path(&args.input);
    let output = clean_path(&args.output);

    let animation = load_gif(&input)?;
    if !animation.is_animated() {
        tracing::warn!("{} is not animated, using its only frame", input.display());
    }

    let frames = select_frames(&animation, options.start, options.max_frames)?;
    tracing::info!(
        total = animation.len(),
        extracting = frames.len(),
        start = options.start,
        "extracting frames"
    );

    let layout = SheetLayout::new(frames.len(), options.frames_per_row)?;
    let sheet = compose_sheet(&frames, layout, FilterType::Lanczos3)?;

    let png = encode_png(&sheet.image).context("Failed to encode sprite sheet")?;
    write_output(&output, &png)?;

    Ok(Report::GifToSprite(SheetReport {
        input,
        output,
        source_frames: animation.len(),
        frames: frames.len(),
        layout: sheet.layout,
        cell: Dimensions::new(sheet.cell_width, sheet.cell_height),
        size: Dimensions::new(sheet.image.width, sheet.image.height),
        resized_frames: sheet.resized_frames,
    }))
}
