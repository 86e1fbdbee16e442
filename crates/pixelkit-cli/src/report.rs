//! Per-command results, printed as text or JSON.

use std::fmt;
use std::path::PathBuf;

use pixelkit_core::sprite::SheetLayout;
use pixelkit_core::BoundsOutcome;
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(tag = "command", rename_all = "kebab-case")]
pub enum Report {
    BlackToTransparent(KeyReport),
    GifToSprite(SheetReport),
    MakeSprite(StripReport),
    ResizeGif(ResizeReport),
    TrimGif(TrimReport),
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BlackToTransparent(r) => fmt::Display::fmt(r, f),
            Self::GifToSprite(r) => fmt::Display::fmt(r, f),
            Self::MakeSprite(r) => fmt::Display::fmt(r, f),
            Self::ResizeGif(r) => fmt::Display::fmt(r, f),
            Self::TrimGif(r) => fmt::Display::fmt(r, f),
        }
    }
}

/// Whether a command produced a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    Written,
    Skipped { reason: String },
}

impl Outcome {
    pub fn skipped(reason: impl Into<String>) -> Self {
        Self::Skipped {
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// File size before and after an in-place rewrite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FileSizes {
    pub before: u64,
    pub after: u64,
}

impl FileSizes {
    /// Bytes saved; negative when the file grew.
    pub fn saved(&self) -> i64 {
        self.before as i64 - self.after as i64
    }

    pub fn saved_percent(&self) -> f64 {
        if self.before == 0 {
            return 0.0;
        }
        self.saved() as f64 / self.before as f64 * 100.0
    }
}

impl fmt::Display for FileSizes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  file size: {} bytes -> {} bytes", self.before, self.after)?;
        let saved = self.saved();
        if saved >= 0 {
            write!(f, "  saved: {saved} bytes ({:.1}%)", self.saved_percent())
        } else {
            write!(
                f,
                "  grew: {} bytes ({:.1}%)",
                saved.unsigned_abs(),
                self.saved_percent().abs()
            )
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum KeyMode {
    Chroma { threshold: u8 },
    Glow { feather: u32 },
}

#[derive(Debug, Serialize)]
pub struct KeyReport {
    pub input: PathBuf,
    pub output: PathBuf,
    pub mode: KeyMode,
    pub size: Dimensions,
    pub changed: usize,
    pub total: usize,
}

impl KeyReport {
    fn ratio(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.changed as f64 / self.total as f64 * 100.0
    }
}

impl fmt::Display for KeyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "input: {}", self.input.display())?;
        writeln!(f, "output: {}", self.output.display())?;
        match self.mode {
            KeyMode::Chroma { threshold } => {
                writeln!(f, "threshold: {threshold}")?;
                write!(f, "made transparent: ")?;
            }
            KeyMode::Glow { feather } => {
                writeln!(f, "mode: glow extraction")?;
                if feather > 0 {
                    writeln!(f, "edge feather: {feather}px")?;
                }
                write!(f, "processed: ")?;
            }
        }
        write!(f, "{} / {} pixels ({:.2}%)", self.changed, self.total, self.ratio())
    }
}

#[derive(Debug, Serialize)]
pub struct SheetReport {
    pub input: PathBuf,
    pub output: PathBuf,
    pub source_frames: usize,
    pub frames: usize,
    pub layout: SheetLayout,
    pub cell: Dimensions,
    pub size: Dimensions,
    pub resized_frames: usize,
}

impl fmt::Display for SheetReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "sprite sheet saved to: {}", self.output.display())?;
        writeln!(f, "  frame size: {}", self.cell)?;
        writeln!(f, "  frames: {} of {}", self.frames, self.source_frames)?;
        writeln!(
            f,
            "  layout: {} per row x {} rows",
            self.layout.columns, self.layout.rows
        )?;
        write!(f, "  sheet size: {}", self.size)
    }
}

#[derive(Debug, Serialize)]
pub struct StripReport {
    pub inputs: Vec<PathBuf>,
    pub output: PathBuf,
    pub cell: Dimensions,
    pub size: Dimensions,
    pub resized_frames: usize,
}

impl fmt::Display for StripReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "sprite saved to: {}", self.output.display())?;
        write!(f, "single frame size: {}, total size: {}", self.cell, self.size)
    }
}

#[derive(Debug, Serialize)]
pub struct ResizeReport {
    pub input: PathBuf,
    pub output: PathBuf,
    pub frames: usize,
    pub original: Dimensions,
    pub resized: Dimensions,
    pub factor: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sizes: Option<FileSizes>,
    pub outcome: Outcome,
}

impl fmt::Display for ResizeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "input: {}", self.input.display())?;
        writeln!(f, "frames: {}", self.frames)?;
        writeln!(f, "scale factor: {:.2}%", self.factor * 100.0)?;
        write!(f, "size: {} -> {}", self.original, self.resized)?;
        write_outcome(f, &self.outcome, &self.output, self.sizes.as_ref())
    }
}

#[derive(Debug, Serialize)]
pub struct TrimReport {
    pub input: PathBuf,
    pub output: PathBuf,
    pub frames: usize,
    pub original: Dimensions,
    pub bounds: BoundsOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trimmed: Option<Dimensions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sizes: Option<FileSizes>,
    pub outcome: Outcome,
}

impl fmt::Display for TrimReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "input: {}", self.input.display())?;
        writeln!(f, "original size: {}", self.original)?;
        write!(f, "frames: {}", self.frames)?;
        if let BoundsOutcome::Crop(rect) = self.bounds {
            write!(f, "\ncrop region: {rect}")?;
        }
        if let Some(trimmed) = self.trimmed {
            write!(f, "\nsize: {} -> {}", self.original, trimmed)?;
        }
        write_outcome(f, &self.outcome, &self.output, self.sizes.as_ref())
    }
}

fn write_outcome(
    f: &mut fmt::Formatter<'_>,
    outcome: &Outcome,
    output: &std::path::Path,
    sizes: Option<&FileSizes>,
) -> fmt::Result {
    match outcome {
        Outcome::Skipped { reason } => write!(f, "\nskipped: {reason}"),
        Outcome::Written => {
            write!(f, "\nsaved to: {}", output.display())?;
            if let Some(sizes) = sizes {
                write!(f, "\n{sizes}")?;
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_sizes_saved() {
        let sizes = FileSizes {
            before: 2000,
            after: 500,
        };
        assert_eq!(sizes.saved(), 1500);
        assert!((sizes.saved_percent() - 75.0).abs() < 1e-9);

        let grew = FileSizes {
            before: 100,
            after: 150,
        };
        assert_eq!(grew.saved(), -50);
        assert!(grew.to_string().contains("grew: 50 bytes (50.0%)"));
    }

    #[test]
    fn test_file_sizes_empty_source() {
        let sizes = FileSizes { before: 0, after: 10 };
        assert_eq!(sizes.saved_percent(), 0.0);
    }

    #[test]
    fn test_trim_report_json_shape() {
        let report = Report::TrimGif(TrimReport {
            input: PathBuf::from("a.gif"),
            output: PathBuf::from("a.gif"),
            frames: 2,
            original: Dimensions::new(10, 10),
            bounds: BoundsOutcome::Empty,
            trimmed: None,
            sizes: None,
            outcome: Outcome::skipped("all frames are fully transparent"),
        });

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["command"], "trim-gif");
        assert_eq!(json["bounds"]["kind"], "empty");
        assert_eq!(json["outcome"]["status"], "skipped");
        assert!(json.get("sizes").is_none());
    }

    #[test]
    fn test_key_report_text() {
        let report = KeyReport {
            input: PathBuf::from("in.png"),
            output: PathBuf::from("in_transparent.png"),
            mode: KeyMode::Chroma { threshold: 10 },
            size: Dimensions::new(2, 2),
            changed: 1,
            total: 4,
        };
        let text = report.to_string();
        assert!(text.contains("threshold: 10"));
        assert!(text.contains("1 / 4 pixels (25.00%)"));
    }
}
