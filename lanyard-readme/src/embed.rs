// ABOUTME: README embed generation for Discord presence cards
// ABOUTME: Validates user IDs and renders markdown, HTML, or bare URL snippets

use crate::constants::{snowflake, urls};
use anyhow::{anyhow, Result};
use clap::ValueEnum;
use serde::Deserialize;
use std::fmt;
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmbedFormat {
    /// Markdown image wrapped in a profile link
    #[default]
    Markdown,
    /// HTML anchor around an img tag
    Html,
    /// Just the card image URL
    Url,
}

impl fmt::Display for EmbedFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EmbedFormat::Markdown => "markdown",
            EmbedFormat::Html => "html",
            EmbedFormat::Url => "url",
        };
        f.write_str(name)
    }
}

/// Discord IDs are 64-bit snowflakes written as 17-20 decimal digits.
pub fn is_snowflake(id: &str) -> bool {
    (snowflake::MIN_DIGITS..=snowflake::MAX_DIGITS).contains(&id.len())
        && id.bytes().all(|b| b.is_ascii_digit())
        && id.parse::<u64>().is_ok()
}

#[derive(Debug, Clone, PartialEq)]
pub struct EmbedRequest {
    user_id: String,
    base_url: String,
}

impl EmbedRequest {
    pub fn new(user_id: &str, base_url: Option<&str>) -> Result<Self> {
        let user_id = user_id.trim();
        if user_id.is_empty() {
            return Err(anyhow!("Please enter a Discord ID"));
        }
        if !is_snowflake(user_id) {
            return Err(anyhow!("Invalid Discord ID: {}", user_id));
        }

        let base_url = normalize_base_url(base_url.unwrap_or(urls::DEFAULT_BASE_URL))?;

        Ok(Self {
            user_id: user_id.to_string(),
            base_url,
        })
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn card_url(&self) -> String {
        format!("{}/api/{}", self.base_url, self.user_id)
    }

    pub fn profile_url(&self) -> String {
        format!("{}/{}", urls::DISCORD_USERS, self.user_id)
    }

    pub fn render(&self, format: EmbedFormat) -> String {
        match format {
            EmbedFormat::Url => self.card_url(),
            EmbedFormat::Html => format!(
                r#"<a href="{}"><img src="{}" /></a>"#,
                self.profile_url(),
                self.card_url()
            ),
            EmbedFormat::Markdown => format!(
                "[![Discord Presence]({})]({})",
                self.card_url(),
                self.profile_url()
            ),
        }
    }
}

fn normalize_base_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    let parsed = Url::parse(trimmed).map_err(|e| anyhow!("Invalid base URL '{}': {}", raw, e))?;

    match parsed.scheme() {
        "http" | "https" => Ok(trimmed.to_string()),
        scheme => Err(anyhow!("Unsupported URL scheme '{}': {}", scheme, raw)),
    }
}
