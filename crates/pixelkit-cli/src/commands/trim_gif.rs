use std::path::PathBuf;

use anyhow::{Context, Result};
use pixelkit_core::encode::{encode_gif, write_output};
use pixelkit_core::{crop_frames, reduce_bounds, BoundsOutcome, TrimOptions};

use super::{file_size, load_gif};
use crate::paths::{clean_path, output_or};
use crate::report::{Dimensions, FileSizes, Outcome, Report, TrimReport};

#[derive(clap::Args, Debug)]
pub struct Args {
    /// Input GIF path.
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output GIF path. Defaults to overwriting the input.
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Margin to keep around the visible content, in pixels.
    #[arg(short, long, default_value_t = 0, value_name = "PX", allow_negative_numbers = true)]
    padding: i64,
}

pub fn run(args: &Args) -> Result<Report> {
    let options = TrimOptions::new(args.padding)?;

    let input = clean_path(&args.input);
    let output = output_or(args.output.as_deref(), || input.clone());

    let animation = load_gif(&input)?;
    let (width, height) = animation
        .dimensions()
        .context("Animation has no frames")?;

    let bounds = reduce_bounds(&animation, options.padding);
    let mut report = TrimReport {
        input,
        output,
        frames: animation.len(),
        original: Dimensions::new(width, height),
        bounds,
        trimmed: None,
        sizes: None,
        outcome: Outcome::Written,
    };

    let rect = match bounds {
        BoundsOutcome::Empty => {
            tracing::warn!("every frame is fully transparent, nothing to trim");
            report.outcome = Outcome::skipped("all frames are fully transparent");
            return Ok(Report::TrimGif(report));
        }
        BoundsOutcome::FullFrame => {
            tracing::info!("already at minimal size, nothing to trim");
            report.outcome = Outcome::skipped("already at minimal size");
            return Ok(Report::TrimGif(report));
        }
        BoundsOutcome::Crop(rect) => rect,
    };
    tracing::debug!(%rect, "trimming frames");

    let cropped = crop_frames(&animation, rect).context("Failed to crop frames")?;
    report.trimmed = Some(Dimensions::new(rect.width(), rect.height()));

    let before = file_size(&report.input)?;
    let gif = encode_gif(&cropped).context("Failed to encode GIF")?;
    write_output(&report.output, &gif)?;

    report.sizes = Some(FileSizes {
        before,
        after: gif.len() as u64,
    });
    Ok(Report::TrimGif(report))
}
