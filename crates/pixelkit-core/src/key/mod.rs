//! Black background removal.
//!
//! Two per-pixel transforms for images drawn on black:
//!
//! - **Chroma key**: pixels at or below a darkness threshold become fully
//!   transparent, everything else is left alone. Suited to art with hard
//!   edges.
//! - **Glow extraction**: every pixel is brightened to full value and its
//!   original brightness moves into the alpha channel, so a glow drawn on
//!   black composites onto any background without a dark fringe. Optional
//!   feathering fades alpha out towards the image border.
//!
//! Both transforms work in place and return the number of pixels they
//! touched, for reporting.

mod chroma;
mod glow;

pub use chroma::{chroma_key, ChromaKeyOptions};
pub use glow::{edge_distance, extract_glow, feather_alpha, lift_pixel, GlowOptions};
