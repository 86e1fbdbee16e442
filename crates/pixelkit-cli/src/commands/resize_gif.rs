use std::path::PathBuf;

use anyhow::{Context, Result};
use pixelkit_core::decode::{resize_frames, FilterType, ResizeTarget};
use pixelkit_core::encode::{encode_gif, write_output};

use super::{file_size, load_gif};
use crate::paths::{clean_path, output_or};
use crate::report::{Dimensions, FileSizes, Outcome, Report, ResizeReport};

#[derive(clap::Args, Debug)]
pub struct Args {
    /// Input GIF path.
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output GIF path. Defaults to overwriting the input.
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Target width in pixels; height follows the aspect ratio.
    #[arg(short = 'W', long, value_name = "PX", allow_negative_numbers = true)]
    width: Option<i64>,

    /// Target height in pixels; width follows the aspect ratio.
    #[arg(short = 'H', long, value_name = "PX", allow_negative_numbers = true)]
    height: Option<i64>,

    /// Scale factor, e.g. 0.5 for half size. Ignored when a width or height is given.
    #[arg(short, long, value_name = "FLOAT", allow_negative_numbers = true)]
    scale: Option<f64>,
}

pub fn run(args: &Args) -> Result<Report> {
    let target = ResizeTarget::new(args.width, args.height, args.scale)?;

    let input = clean_path(&args.input);
    let output = output_or(args.output.as_deref(), || input.clone());

    let animation = load_gif(&input)?;
    let (width, height) = animation
        .dimensions()
        .context("Animation has no frames")?;

    let factor = target.scale_factor(width, height)?;
    let (new_width, new_height) = target.target_dimensions(width, height)?;

    let mut report = ResizeReport {
        input,
        output,
        frames: animation.len(),
        original: Dimensions::new(width, height),
        resized: Dimensions::new(new_width, new_height),
        factor,
        sizes: None,
        outcome: Outcome::Written,
    };

    if (new_width, new_height) == (width, height) {
        tracing::info!("already at target size, nothing to do");
        report.outcome = Outcome::skipped("already at target size");
        return Ok(Report::ResizeGif(report));
    }

    let resized = resize_frames(&animation, new_width, new_height, FilterType::Lanczos3)
        .context("Failed to resize frames")?;

    let before = file_size(&report.input)?;
    let gif = encode_gif(&resized).context("Failed to encode GIF")?;
    write_output(&report.output, &gif)?;

    report.sizes = Some(FileSizes {
        before,
        after: gif.len() as u64,
    });
    Ok(Report::ResizeGif(report))
}
