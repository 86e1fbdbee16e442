//! Animated GIF decoding.
//!
//! Frames come out of the `image` GIF decoder already composed onto the full
//! logical screen (disposal handled), so every frame in the returned sequence
//! has the same dimensions.

use std::io::Cursor;

use gif::Repeat;
use image::codecs::gif::GifDecoder;
use image::{AnimationDecoder, Delay};

use super::DecodeError;
use crate::grid::{
    AnimationMeta, Frame, FrameMeta, FrameSequence, LoopCount, PixelGrid, DEFAULT_DELAY_MS,
};

/// Decode every frame of a GIF.
///
/// Single-image GIFs decode to a one-frame sequence.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if the bytes are not a valid GIF and
/// `DecodeError::NoFrames` if it contains no image data.
pub fn decode_gif(bytes: &[u8]) -> Result<FrameSequence, DecodeError> {
    let decoder =
        GifDecoder::new(Cursor::new(bytes)).map_err(|e| DecodeError::InvalidFormat(e.to_string()))?;

    let decoded = decoder
        .into_frames()
        .collect_frames()
        .map_err(|e| DecodeError::InvalidFormat(e.to_string()))?;

    if decoded.is_empty() {
        return Err(DecodeError::NoFrames);
    }

    let frames: Vec<Frame> = decoded
        .into_iter()
        .map(|frame| {
            let meta = FrameMeta {
                delay_ms: delay_to_ms(frame.delay()),
            };
            Frame::new(PixelGrid::from_rgba_image(frame.into_buffer()), meta)
        })
        .collect();

    let meta = AnimationMeta {
        loop_count: read_loop_count(bytes)?,
    };

    tracing::debug!(frames = frames.len(), loop_count = ?meta.loop_count, "decoded GIF");
    Ok(FrameSequence::new(frames, meta))
}

/// Read the loop count from a GIF's application extension.
///
/// The `gif` decoder only reports the repeat setting once it has walked the
/// block structure, so every frame is skipped over first. A stored count of 0
/// means loop forever; GIFs without the extension are also reported as
/// `LoopCount::Infinite`, which is how they are re-encoded.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if the block structure is malformed.
pub fn read_loop_count(bytes: &[u8]) -> Result<LoopCount, DecodeError> {
    let invalid = |e: gif::DecodingError| DecodeError::InvalidFormat(e.to_string());

    let mut decoder = gif::DecodeOptions::new()
        .read_info(Cursor::new(bytes))
        .map_err(invalid)?;
    while decoder.next_frame_info().map_err(invalid)?.is_some() {}

    Ok(match decoder.repeat() {
        Repeat::Infinite | Repeat::Finite(0) => LoopCount::Infinite,
        Repeat::Finite(n) => LoopCount::Finite(n),
    })
}

fn delay_to_ms(delay: Delay) -> u32 {
    let (numer, denom) = delay.numer_denom_ms();
    if denom == 0 {
        return DEFAULT_DELAY_MS;
    }
    numer / denom
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode::encode_gif;

    fn block_frame(width: u32, height: u32, x: u32, y: u32) -> PixelGrid {
        let mut grid = PixelGrid::transparent(width, height);
        grid.put(x, y, [255, 255, 255, 255]);
        grid
    }

    #[test]
    fn test_decode_animated_round_trip() {
        let mut seq = FrameSequence::from_grids(
            vec![block_frame(8, 6, 1, 1), block_frame(8, 6, 6, 4)],
            80,
        );
        seq.frames[1].meta.delay_ms = 150;
        seq.meta.loop_count = LoopCount::Finite(3);

        let bytes = encode_gif(&seq).unwrap();
        let decoded = decode_gif(&bytes).unwrap();

        assert_eq!(decoded.len(), 2);
        assert_eq!(decoded.dimensions(), Some((8, 6)));
        assert_eq!(decoded.frames[0].meta.delay_ms, 80);
        assert_eq!(decoded.frames[1].meta.delay_ms, 150);
        assert_eq!(decoded.meta.loop_count, LoopCount::Finite(3));

        // Transparency survives the palette round trip
        let second = &decoded.frames[1].grid;
        assert_eq!(second.get(6, 4).unwrap()[3], 255);
        assert_eq!(second.get(1, 1).unwrap()[3], 0);
    }

    #[test]
    fn test_decode_infinite_loop() {
        let seq = FrameSequence::from_grids(
            vec![block_frame(4, 4, 0, 0), block_frame(4, 4, 3, 3)],
            100,
        );
        let bytes = encode_gif(&seq).unwrap();

        assert_eq!(read_loop_count(&bytes).unwrap(), LoopCount::Infinite);
    }

    #[test]
    fn test_decode_still_gif() {
        let seq = FrameSequence::from_grids(vec![block_frame(5, 5, 2, 2)], 100);
        let bytes = encode_gif(&seq).unwrap();
        let decoded = decode_gif(&bytes).unwrap();

        assert_eq!(decoded.len(), 1);
        assert!(!decoded.is_animated());
    }

    #[test]
    fn test_decode_garbage_fails() {
        assert!(decode_gif(b"GIF89a but not really").is_err());
        assert!(matches!(
            decode_gif(b"\x89PNG"),
            Err(DecodeError::InvalidFormat(_))
        ));
    }

    /// Insert a comment extension right before the loop extension.
    fn with_comment_before_loop(gif: &[u8], comment: &[u8]) -> Vec<u8> {
        let at = gif
            .windows(11)
            .position(|w| w == b"NETSCAPE2.0")
            .map(|i| i - 3)
            .unwrap();

        let mut block = vec![0x21, 0xFE, comment.len() as u8];
        block.extend_from_slice(comment);
        block.push(0x00);

        let mut out = gif[..at].to_vec();
        out.extend_from_slice(&block);
        out.extend_from_slice(&gif[at..]);
        out
    }

    #[test]
    fn test_loop_count_ignores_lookalike_comment() {
        let mut seq = FrameSequence::from_grids(
            vec![block_frame(4, 4, 0, 0), block_frame(4, 4, 3, 3)],
            100,
        );
        seq.meta.loop_count = LoopCount::Finite(3);
        let bytes = encode_gif(&seq).unwrap();

        let mut fake = vec![0x21, 0xFF, 0x0B];
        fake.extend_from_slice(b"NETSCAPE2.0");
        fake.extend_from_slice(&[0x03, 0x01, 0x05, 0x00]);
        let bytes = with_comment_before_loop(&bytes, &fake);

        assert_eq!(read_loop_count(&bytes).unwrap(), LoopCount::Finite(3));
        let decoded = decode_gif(&bytes).unwrap();
        assert_eq!(decoded.len(), 2);
        assert_eq!(decoded.meta.loop_count, LoopCount::Finite(3));
    }

    #[test]
    fn test_loop_count_missing_extension() {
        // Single-frame GIFs are written without a loop extension
        let seq = FrameSequence::from_grids(vec![block_frame(4, 4, 1, 1)], 100);
        let bytes = encode_gif(&seq).unwrap();

        assert_eq!(read_loop_count(&bytes).unwrap(), LoopCount::Infinite);
    }

    #[test]
    fn test_loop_count_invalid_input() {
        assert!(matches!(
            read_loop_count(b"not a gif"),
            Err(DecodeError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_delay_conversion() {
        assert_eq!(delay_to_ms(Delay::from_numer_denom_ms(70, 1)), 70);
        assert_eq!(delay_to_ms(Delay::from_numer_denom_ms(100, 3)), 33);
    }
}
