use std::path::PathBuf;

use anyhow::{Context, Result};
use pixelkit_core::encode::{encode_png, write_output};
use pixelkit_core::{chroma_key, extract_glow, ChromaKeyOptions, GlowOptions};

use super::load_image;
use crate::paths::{clean_path, output_or, with_suffix};
use crate::report::{Dimensions, KeyMode, KeyReport, Report};

#[derive(clap::Args, Debug)]
pub struct Args {
    /// Input image path.
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output PNG path. Defaults to `<stem>_transparent` (or `<stem>_glow`)
    /// next to the input.
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Near-black threshold (0-255). 0 keys pure black only.
    #[arg(short, long, default_value_t = 0, value_name = "INT", allow_negative_numbers = true)]
    threshold: i64,

    /// Glow mode: brightness becomes alpha and colours are lifted to full
    /// intensity, so the glow blends over any background.
    #[arg(short, long)]
    glow: bool,

    /// Fade alpha to zero over this many pixels at the image edge (glow mode).
    #[arg(short, long, default_value_t = 0, value_name = "PX", allow_negative_numbers = true)]
    feather: i64,
}

pub fn run(args: &Args) -> Result<Report> {
    let chroma = ChromaKeyOptions::new(args.threshold)?;
    let glow = GlowOptions::new(args.feather)?;

    let (mode, suffix) = if args.glow {
        (KeyMode::Glow { feather: glow.feather }, "glow")
    } else {
        if glow.feather > 0 {
            tracing::warn!("--feather only applies with --glow, ignoring it");
        }
        (KeyMode::Chroma { threshold: chroma.threshold }, "transparent")
    };

    let input = clean_path(&args.input);
    let output = output_or(args.output.as_deref(), || with_suffix(&input, suffix));

    let mut grid = load_image(&input)?;
    let changed = match mode {
        KeyMode::Chroma { threshold } => chroma_key(&mut grid, threshold),
        KeyMode::Glow { feather } => extract_glow(&mut grid, feather),
    };

    let png = encode_png(&grid).context("Failed to encode PNG")?;
    write_output(&output, &png)?;

    Ok(Report::BlackToTransparent(KeyReport {
        input,
        output,
        mode,
        size: Dimensions::new(grid.width, grid.height),
        changed,
        total: grid.pixel_count(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixelkit_core::decode::decode_image;
    use pixelkit_core::PixelGrid;

    fn args(input: PathBuf) -> Args {
        Args {
            input,
            output: None,
            threshold: 0,
            glow: false,
            feather: 0,
        }
    }

    fn write_png(path: &std::path::Path, grid: &PixelGrid) {
        std::fs::write(path, encode_png(grid).unwrap()).unwrap();
    }

    #[test]
    fn test_chroma_default_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("flare.png");
        let mut grid = PixelGrid::transparent(2, 1);
        grid.put(0, 0, [0, 0, 0, 255]);
        grid.put(1, 0, [9, 9, 9, 255]);
        write_png(&input, &grid);

        let mut args = args(input);
        args.threshold = 5;
        let Report::BlackToTransparent(report) = run(&args).unwrap() else {
            panic!("wrong report");
        };

        assert_eq!(report.output, dir.path().join("flare_transparent.png"));
        assert_eq!(report.changed, 1);

        let written = decode_image(&std::fs::read(&report.output).unwrap()).unwrap();
        assert_eq!(written.get(0, 0), Some([0, 0, 0, 0]));
        assert_eq!(written.get(1, 0), Some([9, 9, 9, 255]));
    }

    #[test]
    fn test_glow_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("glow.png");
        let mut grid = PixelGrid::transparent(1, 1);
        grid.put(0, 0, [20, 30, 15, 255]);
        write_png(&input, &grid);

        let mut args = args(input);
        args.glow = true;
        let Report::BlackToTransparent(report) = run(&args).unwrap() else {
            panic!("wrong report");
        };

        assert_eq!(report.output, dir.path().join("glow_glow.png"));
        let written = decode_image(&std::fs::read(&report.output).unwrap()).unwrap();
        assert_eq!(written.get(0, 0), Some([170, 255, 127, 30]));
    }

    #[test]
    fn test_invalid_threshold_rejected_before_reading() {
        let mut args = args(PathBuf::from("does-not-exist.png"));
        args.threshold = 300;
        let err = run(&args).unwrap_err();
        assert!(err.to_string().contains("threshold"));
    }
}
