// ABOUTME: Multi-frame image decoding and resizing
// ABOUTME: Keeps every frame of GIF, animated WebP, and APNG sources

use crate::constants::encoding::DEFAULT_FRAME_DELAY_MS;
use crate::error::{Result, TranscodeError};
use crate::size::TargetSize;
use image::codecs::gif::GifDecoder;
use image::codecs::png::PngDecoder;
use image::codecs::webp::WebPDecoder;
use image::imageops::{self, FilterType};
use image::{AnimationDecoder, Frame, ImageDecoder, ImageFormat, ImageReader, Limits, RgbaImage};
use std::io::Cursor;

/// One composited frame of a decoded image.
#[derive(Debug, Clone)]
pub struct DecodedFrame {
    pub image: RgbaImage,
    pub delay_ms: u32,
}

/// Every frame of a decoded image, all sharing one canvas size.
#[derive(Debug, Clone)]
pub struct FrameSet {
    width: u32,
    height: u32,
    frames: Vec<DecodedFrame>,
}

impl FrameSet {
    pub fn single(image: RgbaImage) -> Self {
        Self {
            width: image.width(),
            height: image.height(),
            frames: vec![DecodedFrame { image, delay_ms: 0 }],
        }
    }

    /// Decode `data`, keeping animation when the container carries any.
    pub fn decode(data: &[u8]) -> Result<Self> {
        Self::decode_with_limits(data, Limits::default())
    }

    /// Decode under `limits`. Animated and still sources get the same caps.
    pub fn decode_with_limits(data: &[u8], limits: Limits) -> Result<Self> {
        let format = image::guess_format(data)?;

        let frames = match format {
            ImageFormat::Gif => {
                let mut decoder = GifDecoder::new(Cursor::new(data))?;
                decoder.set_limits(limits.clone())?;
                Some(decoder.into_frames().collect_frames()?)
            }
            ImageFormat::WebP => {
                let mut decoder = WebPDecoder::new(Cursor::new(data))?;
                decoder.set_limits(limits.clone())?;
                if decoder.has_animation() {
                    Some(decoder.into_frames().collect_frames()?)
                } else {
                    None
                }
            }
            ImageFormat::Png => {
                let mut decoder = PngDecoder::new(Cursor::new(data))?;
                decoder.set_limits(limits.clone())?;
                if decoder.is_apng()? {
                    Some(decoder.apng()?.into_frames().collect_frames()?)
                } else {
                    None
                }
            }
            _ => None,
        };

        let frame_set = match frames {
            Some(frames) => Self::from_frames(frames)?,
            None => {
                let mut reader = ImageReader::with_format(Cursor::new(data), format);
                reader.limits(limits);
                Self::single(reader.decode()?.to_rgba8())
            }
        };

        log::debug!(
            "Decoded {:?} image: {}x{}, {} frame(s)",
            format,
            frame_set.width,
            frame_set.height,
            frame_set.len()
        );

        Ok(frame_set)
    }

    fn from_frames(frames: Vec<Frame>) -> Result<Self> {
        let first = frames
            .first()
            .ok_or_else(|| TranscodeError::Decode("animation contains no frames".to_string()))?;
        let (width, height) = first.buffer().dimensions();

        let frames = frames
            .into_iter()
            .map(|frame| {
                let (numer, denom) = frame.delay().numer_denom_ms();
                let delay_ms = if denom == 0 { 0 } else { numer / denom };
                let delay_ms = if delay_ms == 0 {
                    DEFAULT_FRAME_DELAY_MS
                } else {
                    delay_ms
                };
                DecodedFrame {
                    image: frame.into_buffer(),
                    delay_ms,
                }
            })
            .collect();

        Ok(Self {
            width,
            height,
            frames,
        })
    }

    /// Scale every frame to fit inside `target`.
    pub fn resize(self, target: TargetSize) -> Self {
        let (width, height) = target.fit(self.width, self.height);
        if (width, height) == (self.width, self.height) {
            return self;
        }

        log::debug!(
            "Resizing {}x{} to {}x{} ({} frame(s))",
            self.width,
            self.height,
            width,
            height,
            self.frames.len()
        );

        let frames = self
            .frames
            .into_iter()
            .map(|frame| DecodedFrame {
                image: imageops::resize(&frame.image, width, height, FilterType::Lanczos3),
                delay_ms: frame.delay_ms,
            })
            .collect();

        Self {
            width,
            height,
            frames,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn frames(&self) -> &[DecodedFrame] {
        &self.frames
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn is_animated(&self) -> bool {
        self.frames.len() > 1
    }
}
