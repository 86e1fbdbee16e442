//! Image decoding and resampling for pixelkit.
//!
//! This module provides functionality for:
//! - Reading input files
//! - Decoding still images (PNG, JPEG, GIF first frame) to RGBA grids
//! - Decoding animated GIFs into frame sequences with delays and loop count
//! - Resizing grids and whole sequences
//!
//! Every decoder normalizes to straight RGBA8 so the transforms only ever
//! see one pixel layout.
//!
//! # Examples
//!
//! ```ignore
//! use pixelkit_core::decode::{decode_gif, read_file};
//!
//! let bytes = read_file(Path::new("walk.gif"))?;
//! let animation = decode_gif(&bytes)?;
//! println!("Decoded {} frames", animation.len());
//! ```

mod animation;
mod resize;
mod still;
mod types;

pub use animation::{decode_gif, read_loop_count};
pub use still::{decode_image, read_file};
pub use resize::{resize, resize_frames, ResizeTarget};
pub use types::{DecodeError, FilterType};
