//! Animated GIF encoding.
//!
//! Frames are written through the `gif` crate directly so each frame can be
//! disposed to background: a transparent pixel in frame N must not show
//! frame N-1 underneath.

use gif::{DisposalMethod, Encoder, Frame, Repeat};

use super::still::validate;
use super::EncodeError;
use crate::grid::{FrameSequence, LoopCount};

/// NeuQuant sampling speed (1 = best quality, 30 = fastest).
const QUANTIZE_SPEED: i32 = 10;

/// Encode a frame sequence as GIF bytes.
///
/// One-frame sequences are written as a still GIF (no loop extension).
/// Longer sequences carry per-frame delays (rounded down to the GIF's 10 ms
/// resolution) and the sequence's loop count.
///
/// Every frame must match the first frame's dimensions.
///
/// # Errors
///
/// Returns an error for empty sequences, frames larger than 65535 pixels on
/// an edge, mismatched frame sizes, or encoder failures.
pub fn encode_gif(sequence: &FrameSequence) -> Result<Vec<u8>, EncodeError> {
    let (width, height) = sequence.dimensions().ok_or(EncodeError::NoFrames)?;
    let (gif_width, gif_height) = match (u16::try_from(width), u16::try_from(height)) {
        (Ok(w), Ok(h)) => (w, h),
        _ => return Err(EncodeError::InvalidDimensions { width, height }),
    };

    let failed = |e: gif::EncodingError| EncodeError::EncodingFailed(e.to_string());

    let mut encoder = Encoder::new(Vec::new(), gif_width, gif_height, &[]).map_err(failed)?;
    if sequence.is_animated() {
        encoder
            .set_repeat(to_repeat(sequence.meta.loop_count))
            .map_err(failed)?;
    }

    for frame in &sequence.frames {
        validate(&frame.grid)?;
        if frame.grid.width != width || frame.grid.height != height {
            return Err(EncodeError::InvalidDimensions {
                width: frame.grid.width,
                height: frame.grid.height,
            });
        }

        let mut rgba = frame.grid.pixels.clone();
        let mut gif_frame =
            Frame::from_rgba_speed(gif_width, gif_height, &mut rgba, QUANTIZE_SPEED);
        gif_frame.delay = u16::try_from(frame.meta.delay_ms / 10).unwrap_or(u16::MAX);
        gif_frame.dispose = DisposalMethod::Background;

        encoder.write_frame(&gif_frame).map_err(failed)?;
    }

    let bytes = encoder
        .into_inner()
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    tracing::debug!(frames = sequence.len(), bytes = bytes.len(), "encoded GIF");
    Ok(bytes)
}

fn to_repeat(loop_count: LoopCount) -> Repeat {
    match loop_count {
        LoopCount::Infinite => Repeat::Infinite,
        LoopCount::Finite(n) => Repeat::Finite(n),
    }
}
