use std::path::PathBuf;

use anyhow::{Context, Result};
use pixelkit_core::compose_strip;
use pixelkit_core::decode::FilterType;
use pixelkit_core::encode::{encode_png, write_output};

use super::load_image;
use crate::paths::clean_path;
use crate::report::{Dimensions, Report, StripReport};

#[derive(clap::Args, Debug)]
pub struct Args {
    /// Output PNG path.
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// The three images, left to right. The first one sets the frame size.
    #[arg(value_name = "IMAGE", num_args = 3, required = true)]
    images: Vec<PathBuf>,
}

pub fn run(args: &Args) -> Result<Report> {
    let output = clean_path(&args.output);
    let inputs: Vec<PathBuf> = args.images.iter().map(|p| clean_path(p)).collect();

    let grids = inputs
        .iter()
        .map(|path| load_image(path))
        .collect::<Result<Vec<_>>>()?;

    let strip = compose_strip(&grids, FilterType::Lanczos3)?;

    let png = encode_png(&strip.image).context("Failed to encode sprite")?;
    write_output(&output, &png)?;

    Ok(Report::MakeSprite(StripReport {
        inputs,
        output,
        cell: Dimensions::new(strip.cell_width, strip.cell_height),
        size: Dimensions::new(strip.image.width, strip.image.height),
        resized_frames: strip.resized_frames,
    }))
}
