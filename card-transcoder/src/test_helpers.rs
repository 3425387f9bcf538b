// ABOUTME: Test helper utilities for building image fixtures and fake encoders
// ABOUTME: Provides in-memory PNG/GIF sources, a recording FrameEncoder, and log capture

use crate::encode::FrameEncoder;
use crate::error::{Result, TranscodeError};
use crate::frames::FrameSet;
use image::codecs::gif::{GifEncoder, Repeat};
use image::codecs::webp::WebPDecoder;
use image::{AnimationDecoder, Delay, DynamicImage, Frame, ImageFormat, Rgba, RgbaImage};
use std::io::Cursor;
use std::sync::{Mutex, Once};

pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = RgbaImage::from_fn(width, height, |x, y| {
        Rgba([(x * 7) as u8, (y * 11) as u8, 128, 255])
    });
    let mut buffer = Vec::new();
    DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
        .unwrap();
    buffer
}

/// Animated GIF whose frames are distinct solid colours, 120ms apart.
pub fn animated_gif(width: u32, height: u32, frame_count: u8) -> Vec<u8> {
    let palette = [
        Rgba([255, 0, 0, 255]),
        Rgba([0, 255, 0, 255]),
        Rgba([0, 0, 255, 255]),
        Rgba([255, 255, 0, 255]),
    ];

    let frames = (0..frame_count).map(|i| {
        let colour = palette[i as usize % palette.len()];
        Frame::from_parts(
            RgbaImage::from_pixel(width, height, colour),
            0,
            0,
            Delay::from_numer_denom_ms(120, 1),
        )
    });

    let mut buffer = Vec::new();
    {
        let mut encoder = GifEncoder::new(&mut buffer);
        encoder.set_repeat(Repeat::Infinite).unwrap();
        encoder.encode_frames(frames).unwrap();
    }
    buffer
}

pub fn decode_webp_frames(bytes: &[u8]) -> Vec<Frame> {
    WebPDecoder::new(Cursor::new(bytes))
        .unwrap()
        .into_frames()
        .collect_frames()
        .unwrap()
}

/// Encoder that records what it was asked to do instead of encoding.
#[derive(Default)]
pub struct RecordingEncoder {
    pub calls: Mutex<Vec<RecordedCall>>,
    pub fail: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub quality: f32,
    pub width: u32,
    pub height: u32,
    pub frame_count: usize,
}

impl RecordingEncoder {
    pub fn failing() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

impl FrameEncoder for RecordingEncoder {
    fn encode(&self, frames: &FrameSet, quality: f32) -> Result<Vec<u8>> {
        self.calls.lock().unwrap().push(RecordedCall {
            quality,
            width: frames.width(),
            height: frames.height(),
            frame_count: frames.len(),
        });

        if self.fail {
            return Err(TranscodeError::Encode("recording encoder told to fail".to_string()));
        }
        Ok(b"encoded".to_vec())
    }

    fn mime_type(&self) -> &'static str {
        "application/octet-stream"
    }
}

/// Process-wide logger that keeps every record so tests can count them.
pub struct CaptureLogger {
    records: Mutex<Vec<(log::Level, String)>>,
}

static CAPTURE_LOGGER: CaptureLogger = CaptureLogger {
    records: Mutex::new(Vec::new()),
};
static INSTALL_LOGGER: Once = Once::new();

impl CaptureLogger {
    /// Number of records at `level` whose message contains `needle`.
    /// Tests run in parallel, so filter on something unique to the test.
    pub fn count(&self, level: log::Level, needle: &str) -> usize {
        self.records
            .lock()
            .unwrap()
            .iter()
            .filter(|(l, message)| *l == level && message.contains(needle))
            .count()
    }
}

impl log::Log for CaptureLogger {
    fn enabled(&self, _metadata: &log::Metadata) -> bool {
        true
    }

    fn log(&self, record: &log::Record) {
        self.records
            .lock()
            .unwrap()
            .push((record.level(), record.args().to_string()));
    }

    fn flush(&self) {}
}

pub fn capture_logs() -> &'static CaptureLogger {
    INSTALL_LOGGER.call_once(|| {
        log::set_logger(&CAPTURE_LOGGER).unwrap();
        log::set_max_level(log::LevelFilter::Trace);
    });
    &CAPTURE_LOGGER
}
