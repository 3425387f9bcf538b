// ABOUTME: Card transcoder library that turns a remote image into base64 WebP
// ABOUTME: Fetches, decodes every frame, resizes, and re-encodes at a fixed quality

pub mod builder;
pub mod constants;
pub mod encode;
pub mod error;
pub mod fetch;
pub mod frames;
pub mod size;

#[cfg(test)]
mod test_helpers;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use std::sync::Arc;

pub use builder::TranscoderConfig;
pub use constants::encoding::WEBP_QUALITY;
pub use encode::{FrameEncoder, WebpEncoder};
pub use error::{ErrorKind, Result, TranscodeError};
pub use fetch::ImageFetcher;
pub use frames::{DecodedFrame, FrameSet};
pub use size::TargetSize;

/// A finished transcode: encoded bytes plus what they describe.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedImage {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub frame_count: usize,
    pub mime_type: &'static str,
}

impl EncodedImage {
    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.data)
    }

    pub fn to_data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.to_base64())
    }

    pub fn is_animated(&self) -> bool {
        self.frame_count > 1
    }
}

pub struct ImageTranscoder {
    fetcher: ImageFetcher,
    encoder: Arc<dyn FrameEncoder>,
}

impl ImageTranscoder {
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    pub(crate) fn from_config(config: TranscoderConfig) -> Result<Self> {
        let fetcher = ImageFetcher::new(
            config.timeout,
            &config.user_agent,
            config.max_body_bytes,
        )?;

        Ok(Self {
            fetcher,
            encoder: config.encoder,
        })
    }

    /// Fetch `source_url` and return it as base64 lossy WebP bounded by
    /// `target_size`. Any failure is logged and yields an empty string, so an
    /// empty result always means the transcode failed.
    pub async fn transcode(&self, source_url: &str, target_size: i64) -> String {
        match self.try_transcode(source_url, target_size).await {
            Ok(image) => image.to_base64(),
            Err(e) => {
                log::warn!("Failed to transcode {}: {}", source_url, e);
                String::new()
            }
        }
    }

    pub async fn try_transcode(&self, source_url: &str, target_size: i64) -> Result<EncodedImage> {
        let target = TargetSize::try_from(target_size)?;
        let bytes = self.fetcher.fetch(source_url).await?;

        let encoder = Arc::clone(&self.encoder);
        tokio::task::spawn_blocking(move || encode_frames(&bytes, target, encoder.as_ref()))
            .await
            .map_err(|e| TranscodeError::Encode(format!("encode task failed: {}", e)))?
    }

    /// Same pipeline as [`try_transcode`](Self::try_transcode) for bytes
    /// already in memory. Runs on the calling thread.
    pub fn transcode_bytes(&self, bytes: &[u8], target_size: i64) -> Result<EncodedImage> {
        let target = TargetSize::try_from(target_size)?;
        encode_frames(bytes, target, self.encoder.as_ref())
    }
}

fn encode_frames(
    bytes: &[u8],
    target: TargetSize,
    encoder: &dyn FrameEncoder,
) -> Result<EncodedImage> {
    let frames = FrameSet::decode(bytes)?.resize(target);
    let data = encoder.encode(&frames, WEBP_QUALITY)?;

    log::debug!(
        "Encoded {}x{} ({} frame(s)) into {} bytes",
        frames.width(),
        frames.height(),
        frames.len(),
        data.len()
    );

    Ok(EncodedImage {
        data,
        width: frames.width(),
        height: frames.height(),
        frame_count: frames.len(),
        mime_type: encoder.mime_type(),
    })
}

/// One-shot helper using a default [`ImageTranscoder`]. Returns an empty
/// string on any failure.
pub async fn transcode(source_url: &str, target_size: i64) -> String {
    match ImageTranscoder::new() {
        Ok(transcoder) => transcoder.transcode(source_url, target_size).await,
        Err(e) => {
            log::warn!("Failed to create transcoder: {}", e);
            String::new()
        }
    }
}
