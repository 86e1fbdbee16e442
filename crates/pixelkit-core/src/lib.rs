//! Pixelkit Core - Sprite and animation editing library
//!
//! This crate provides the pixel-level functionality behind the `pixelkit`
//! tools: black-to-transparent keying, glow extraction, transparent border
//! trimming for animations, sprite sheet composition, resizing, and the
//! decode/encode layer around the `image` crate.
//!
//! All operations are synchronous and deterministic: for a fixed input the
//! output is bit-identical.

pub mod decode;
pub mod encode;
pub mod grid;
pub mod key;
pub mod sprite;
pub mod transform;

pub use grid::{AnimationMeta, Frame, FrameMeta, FrameSequence, LoopCount, PixelGrid, Rect};
pub use key::{chroma_key, extract_glow, ChromaKeyOptions, GlowOptions};
pub use sprite::{compose_sheet, compose_strip, select_frames, SheetLayout, SpriteSheet, SpriteSheetOptions};
pub use transform::{
    alpha_bounds, crop_frames, crop_grid, paste, reduce_bounds, BoundsOutcome, TransformError,
    TrimOptions,
};
