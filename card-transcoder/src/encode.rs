// ABOUTME: Lossy WebP encoding for still and animated frame sets
// ABOUTME: Defines the FrameEncoder seam and the libwebp-backed implementation

use crate::constants::encoding::ANIMATION_LOOP_COUNT;
use crate::error::{Result, TranscodeError};
use crate::frames::FrameSet;
use webp::{AnimEncoder, AnimFrame, Encoder, WebPConfig};

pub trait FrameEncoder: Send + Sync {
    /// Encode every frame of `frames` at the given lossy quality (0-100)
    fn encode(&self, frames: &FrameSet, quality: f32) -> Result<Vec<u8>>;

    /// MIME type of the produced bytes
    fn mime_type(&self) -> &'static str;
}

/// libwebp encoder. One frame becomes a still image, more become an
/// animation that loops forever.
#[derive(Debug, Default, Clone, Copy)]
pub struct WebpEncoder;

impl WebpEncoder {
    pub fn new() -> Self {
        Self
    }

    fn encode_still(&self, frames: &FrameSet, quality: f32) -> Result<Vec<u8>> {
        let frame = frames
            .frames()
            .first()
            .ok_or_else(|| TranscodeError::Encode("no frames to encode".to_string()))?;

        let memory = Encoder::from_rgba(frame.image.as_raw(), frames.width(), frames.height())
            .encode_simple(false, quality)
            .map_err(|e| TranscodeError::Encode(format!("{:?}", e)))?;

        Ok(memory.to_vec())
    }

    fn encode_animated(&self, frames: &FrameSet, quality: f32) -> Result<Vec<u8>> {
        let mut config = WebPConfig::new()
            .map_err(|_| TranscodeError::Encode("failed to initialise WebP config".to_string()))?;
        config.lossless = 0;
        config.quality = quality;

        let mut encoder = AnimEncoder::new(frames.width(), frames.height(), &config);
        encoder.set_loop_count(ANIMATION_LOOP_COUNT);

        let mut timestamp_ms: i32 = 0;
        for frame in frames.frames() {
            encoder.add_frame(AnimFrame::from_rgba(
                frame.image.as_raw(),
                frames.width(),
                frames.height(),
                timestamp_ms,
            ));
            timestamp_ms = advance_timestamp(timestamp_ms, frame.delay_ms);
        }

        let memory = encoder
            .try_encode()
            .map_err(|e| TranscodeError::Encode(format!("{:?}", e)))?;

        Ok(memory.to_vec())
    }
}

/// Next frame timestamp. Saturates instead of wrapping on absurd delays.
fn advance_timestamp(timestamp_ms: i32, delay_ms: u32) -> i32 {
    timestamp_ms.saturating_add(i32::try_from(delay_ms).unwrap_or(i32::MAX))
}

impl FrameEncoder for WebpEncoder {
    fn encode(&self, frames: &FrameSet, quality: f32) -> Result<Vec<u8>> {
        if frames.is_animated() {
            self.encode_animated(frames, quality)
        } else {
            self.encode_still(frames, quality)
        }
    }

    fn mime_type(&self) -> &'static str {
        "image/webp"
    }
}
