//! Looping GIF output.

use std::io::Write;

use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, Frame, RgbaImage};

use crate::error::{AnimError, AnimResult};

/// Quantizer speed passed to the GIF encoder (1 = best, 30 = fastest).
const ENCODER_SPEED: i32 = 10;

/// Streams frames into an infinitely looping GIF.
///
/// The GIF trailer is written when the writer is finished or dropped.
pub struct GifWriter<W: Write> {
    encoder: GifEncoder<W>,
    delay: Delay,
    frames: usize,
}

impl<W: Write> GifWriter<W> {
    /// Start a GIF that plays at `fps` frames per second.
    pub fn new(writer: W, fps: u32) -> AnimResult<Self> {
        let mut encoder = GifEncoder::new_with_speed(writer, ENCODER_SPEED);
        encoder
            .set_repeat(Repeat::Infinite)
            .map_err(|e| AnimError::Encoding(e.to_string()))?;
        Ok(Self {
            encoder,
            delay: Delay::from_numer_denom_ms(1000, fps.max(1)),
            frames: 0,
        })
    }

    /// Append one frame.
    pub fn push(&mut self, image: RgbaImage) -> AnimResult<()> {
        self.encoder
            .encode_frame(Frame::from_parts(image, 0, 0, self.delay))
            .map_err(|e| AnimError::Encoding(e.to_string()))?;
        self.frames += 1;
        Ok(())
    }

    /// Finish the GIF and return the number of frames written.
    pub fn finish(self) -> usize {
        self.frames
    }
}
