// ABOUTME: Command handlers that connect parsed CLI arguments to the library
// ABOUTME: Resolves flag/config precedence and runs embed or transcode

use crate::config::{parse_size, Config};
use crate::constants::defaults;
use crate::embed::{EmbedFormat, EmbedRequest};
use anyhow::{anyhow, Context, Result};
use card_transcoder::constants::http;
use card_transcoder::{EncodedImage, ImageTranscoder};
use std::path::Path;
use std::time::Duration;

/// Build the embed text. Flags win over config values.
pub fn embed(
    user_id: &str,
    format: Option<EmbedFormat>,
    base_url: Option<&str>,
    config: &Config,
) -> Result<String> {
    let base_url = base_url.or(config.base_url.as_deref());
    let format = format.or(config.default_format).unwrap_or_default();

    let request = EmbedRequest::new(user_id, base_url)?;
    log::debug!("Rendering {} embed for {}", format, request.user_id());
    Ok(request.render(format))
}

#[derive(Debug, Clone, Default)]
pub struct TranscodeArgs {
    pub url: String,
    pub size: Option<i64>,
    pub timeout_secs: Option<u64>,
    pub max_size: Option<String>,
}

pub fn build_transcoder(args: &TranscodeArgs, config: &Config) -> Result<ImageTranscoder> {
    let timeout = args
        .timeout_secs
        .map(Duration::from_secs)
        .or_else(|| config.timeout_duration());

    let max_body_bytes = match args.max_size.as_deref() {
        Some(raw) => Some(parse_size(raw).ok_or_else(|| anyhow!("Invalid size '{}'", raw))?),
        None => config.max_image_bytes(),
    };

    let user_agent = config
        .user_agent
        .clone()
        .unwrap_or_else(|| http::USER_AGENT.to_string());

    let transcoder = ImageTranscoder::builder()
        .timeout(timeout)
        .max_body_bytes(max_body_bytes)
        .user_agent(user_agent)
        .build();

    transcoder.context("Failed to set up the image transcoder")
}

/// Run the transcode through the rich API so errors keep their detail.
pub async fn transcode(args: &TranscodeArgs, config: &Config) -> Result<EncodedImage> {
    let size = args
        .size
        .or(config.default_size)
        .unwrap_or(defaults::TRANSCODE_SIZE);

    let transcoder = build_transcoder(args, config)?;
    let image = transcoder.try_transcode(&args.url, size).await?;

    log::info!(
        "Transcoded {} to {}x{} ({} frame(s), {} bytes)",
        args.url,
        image.width,
        image.height,
        image.frame_count,
        image.data.len()
    );

    Ok(image)
}

pub fn write_output(image: &EncodedImage, path: &Path) -> Result<()> {
    std::fs::write(path, &image.data)
        .with_context(|| format!("Failed to write {}", path.display()))
}
