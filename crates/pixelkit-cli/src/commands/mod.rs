//! One module per subcommand. Each validates its options before touching
//! the input, then decodes, transforms, encodes and writes in that order.

mod black_to_transparent;
mod gif_to_sprite;
mod make_sprite;
mod resize_gif;
mod trim_gif;

use std::path::Path;

use anyhow::{Context, Result};
use clap::Subcommand;
use pixelkit_core::decode::{decode_gif, decode_image, read_file};
use pixelkit_core::{FrameSequence, PixelGrid};

use crate::report::Report;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Make black (or near-black) pixels transparent, or extract a glow
    /// from a black background.
    BlackToTransparent(black_to_transparent::Args),

    /// Lay out the frames of an animated GIF on a PNG sprite sheet.
    GifToSprite(gif_to_sprite::Args),

    /// Place three images side by side on one PNG.
    MakeSprite(make_sprite::Args),

    /// Scale every frame of a GIF, keeping its aspect ratio.
    ResizeGif(resize_gif::Args),

    /// Crop the transparent border shared by every frame of a GIF.
    TrimGif(trim_gif::Args),
}

impl Command {
    pub fn run(&self) -> Result<Report> {
        match self {
            Self::BlackToTransparent(args) => black_to_transparent::run(args),
            Self::GifToSprite(args) => gif_to_sprite::run(args),
            Self::MakeSprite(args) => make_sprite::run(args),
            Self::ResizeGif(args) => resize_gif::run(args),
            Self::TrimGif(args) => trim_gif::run(args),
        }
    }
}

fn load_image(path: &Path) -> Result<PixelGrid> {
    let bytes = read_file(path)?;
    decode_image(&bytes).with_context(|| format!("Failed to decode image {}", path.display()))
}

fn load_gif(path: &Path) -> Result<FrameSequence> {
    let bytes = read_file(path)?;
    decode_gif(&bytes).with_context(|| format!("Failed to decode GIF {}", path.display()))
}

fn file_size(path: &Path) -> Result<u64> {
    let meta = std::fs::metadata(path)
        .with_context(|| format!("Cannot read metadata of {}", path.display()))?;
    Ok(meta.len())
}
