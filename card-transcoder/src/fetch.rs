// ABOUTME: HTTP client for pulling source images into memory
// ABOUTME: Always asks for a fresh copy and optionally caps the body size

use crate::constants::http;
use crate::error::{Result, TranscodeError};
use futures_util::StreamExt;
use reqwest::header::{CACHE_CONTROL, PRAGMA};
use reqwest::Client;
use std::time::Duration;
use url::Url;

pub struct ImageFetcher {
    client: Client,
    max_body_bytes: Option<u64>,
}

impl ImageFetcher {
    pub fn new(
        timeout: Option<Duration>,
        user_agent: &str,
        max_body_bytes: Option<u64>,
    ) -> Result<Self> {
        let mut builder = Client::builder()
            .user_agent(user_agent)
            .redirect(reqwest::redirect::Policy::limited(http::MAX_REDIRECTS));

        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder.build().map_err(|e| {
            TranscodeError::Configuration(format!("Failed to create HTTP client: {}", e))
        })?;

        Ok(Self {
            client,
            max_body_bytes,
        })
    }

    /// Fetch the full body of `url`. Every call goes to the network.
    pub async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let parsed = Url::parse(url).map_err(|e| TranscodeError::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        let response = self
            .client
            .get(parsed)
            .header(CACHE_CONTROL, http::NO_CACHE)
            .header(PRAGMA, http::NO_CACHE)
            .send()
            .await
            .map_err(|e| TranscodeError::from_reqwest(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TranscodeError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        if let (Some(limit), Some(length)) = (self.max_body_bytes, response.content_length()) {
            if length > limit {
                return Err(TranscodeError::BodyTooLarge {
                    url: url.to_string(),
                    limit,
                });
            }
        }

        let bytes = self.read_body(response, url).await?;
        log::debug!("Fetched {} ({} bytes)", url, bytes.len());
        Ok(bytes)
    }

    async fn read_body(&self, response: reqwest::Response, url: &str) -> Result<Vec<u8>> {
        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();

        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| TranscodeError::from_reqwest(url, e))?;
            bytes.extend_from_slice(&chunk);

            // Content-Length can be missing or wrong, so re-check while streaming
            if let Some(limit) = self.max_body_bytes {
                if bytes.len() as u64 > limit {
                    return Err(TranscodeError::BodyTooLarge {
                        url: url.to_string(),
                        limit,
                    });
                }
            }
        }

        Ok(bytes)
    }
}
