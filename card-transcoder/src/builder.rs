// ABOUTME: Builder pattern implementation for ImageTranscoder configuration
// ABOUTME: Provides typed configuration for timeouts, limits, and the encoder

use crate::constants::http;
use crate::encode::{FrameEncoder, WebpEncoder};
use crate::error::TranscodeError;
use crate::ImageTranscoder;
use std::sync::Arc;
use std::time::Duration;
use typed_builder::TypedBuilder;

#[derive(TypedBuilder)]
#[builder(build_method(into = Result<ImageTranscoder, TranscodeError>))]
pub struct TranscoderConfig {
    /// Whole-request timeout for the fetch. `None` waits forever.
    #[builder(default = None)]
    pub timeout: Option<Duration>,

    #[builder(default = http::USER_AGENT.to_string(), setter(into))]
    pub user_agent: String,

    /// Reject source bodies larger than this. `None` accepts any size.
    #[builder(default = None)]
    pub max_body_bytes: Option<u64>,

    #[builder(default = Arc::new(WebpEncoder::new()) as Arc<dyn FrameEncoder>)]
    pub encoder: Arc<dyn FrameEncoder>,
}

impl From<TranscoderConfig> for Result<ImageTranscoder, TranscodeError> {
    fn from(config: TranscoderConfig) -> Self {
        ImageTranscoder::from_config(config)
    }
}

impl ImageTranscoder {
    pub fn builder() -> TranscoderConfigBuilder<((), (), (), ())> {
        TranscoderConfig::builder()
    }
}
