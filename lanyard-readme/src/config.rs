// ABOUTME: Configuration file loading, validation, and hierarchical merging
// ABOUTME: Supports TOML config files in XDG, home, and project locations

use crate::constants::config_files;
use crate::embed::EmbedFormat;
use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Deserializer};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub default_format: Option<EmbedFormat>,
    #[serde(default)]
    pub default_size: Option<i64>,
    #[serde(default, deserialize_with = "validate_duration")]
    pub timeout: Option<String>,
    #[serde(default)]
    pub user_agent: Option<String>,
    #[serde(default, deserialize_with = "validate_size")]
    pub max_image_size: Option<String>,
}

impl Config {
    /// Load configuration from standard XDG-compliant locations
    pub fn load() -> Result<Self> {
        let paths = Self::get_config_paths();
        Self::load_from_paths(&paths.iter().map(|p| p.as_str()).collect::<Vec<_>>())
    }

    /// Load configuration from file paths, lowest precedence first
    pub fn load_from_paths(paths: &[&str]) -> Result<Self> {
        let mut config = Config::default();

        for path in paths {
            if !Path::new(path).exists() {
                continue;
            }
            // A broken file is an error, a missing one is not
            let file_config = Self::load_from_file(path)?;
            config = config.merge(file_config);
        }

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a single file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Config = toml::from_str(&content).with_context(|| {
            format!(
                "Failed to parse TOML config file: {}",
                path.as_ref().display()
            )
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Standard config file paths, lowest precedence first
    pub fn get_config_paths() -> Vec<String> {
        let mut paths = Vec::new();

        // 1. User config directory fallback
        if let Some(home_dir) = dirs::home_dir() {
            let path = home_dir
                .join(".config")
                .join(config_files::APP_DIR)
                .join(config_files::USER_FILE);
            paths.push(path.to_string_lossy().to_string());
        }

        // 2. XDG config home
        if let Some(config_home) = std::env::var_os("XDG_CONFIG_HOME") {
            let path = PathBuf::from(config_home)
                .join(config_files::APP_DIR)
                .join(config_files::USER_FILE);
            paths.push(path.to_string_lossy().to_string());
        }

        // 3. Project-specific config (highest precedence)
        if let Ok(current_dir) = std::env::current_dir() {
            paths.push(
                current_dir
                    .join(config_files::PROJECT_FILE)
                    .to_string_lossy()
                    .to_string(),
            );
        }

        paths.dedup();
        paths
    }

    /// Merge this config with another, giving precedence to the other config
    pub fn merge(self, other: Config) -> Config {
        Config {
            base_url: other.base_url.or(self.base_url),
            default_format: other.default_format.or(self.default_format),
            default_size: other.default_size.or(self.default_size),
            timeout: other.timeout.or(self.timeout),
            user_agent: other.user_agent.or(self.user_agent),
            max_image_size: other.max_image_size.or(self.max_image_size),
        }
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        if let Some(size) = self.default_size {
            if size < 1 {
                return Err(anyhow!("default_size must be positive, got {}", size));
            }
        }

        if let Some(ref base_url) = self.base_url {
            url::Url::parse(base_url)
                .with_context(|| format!("Invalid base_url '{}'", base_url))?;
        }

        Ok(())
    }

    pub fn timeout_duration(&self) -> Option<Duration> {
        self.timeout.as_deref().and_then(parse_duration)
    }

    pub fn max_image_bytes(&self) -> Option<u64> {
        self.max_image_size.as_deref().and_then(parse_size)
    }
}

/// Parse `30s`, `5m`, `1h` or `2d` into a duration.
pub fn parse_duration(value: &str) -> Option<Duration> {
    let value = value.trim();
    let unit = value.chars().last()?;
    let multiplier = match unit {
        's' => 1,
        'm' => 60,
        'h' => 60 * 60,
        'd' => 24 * 60 * 60,
        _ => return None,
    };

    let numeric_part = &value[..value.len() - 1];
    numeric_part
        .parse::<u64>()
        .ok()
        .and_then(|n| n.checked_mul(multiplier))
        .map(Duration::from_secs)
}

/// Parse `10MB`, `512KB`, `1GB` or a plain byte count.
pub fn parse_size(value: &str) -> Option<u64> {
    let size_str = value.trim().to_uppercase();

    let (number_part, unit) = if size_str.ends_with("MB") {
        (size_str.trim_end_matches("MB"), 1024 * 1024)
    } else if size_str.ends_with("KB") {
        (size_str.trim_end_matches("KB"), 1024)
    } else if size_str.ends_with("GB") {
        (size_str.trim_end_matches("GB"), 1024 * 1024 * 1024)
    } else {
        (size_str.as_str(), 1)
    };

    number_part
        .trim()
        .parse::<u64>()
        .ok()
        .and_then(|n| n.checked_mul(unit))
}

// Custom deserializer for duration validation
fn validate_duration<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    let value: Option<String> = Option::deserialize(deserializer)?;

    match value {
        Some(ref duration) if parse_duration(duration).is_none() => Err(D::Error::custom(format!(
            "Invalid duration format '{}'. Expected format like '30s', '5m', '1h'",
            duration
        ))),
        _ => Ok(value),
    }
}

// Custom deserializer for byte size validation
fn validate_size<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    let value: Option<String> = Option::deserialize(deserializer)?;

    match value {
        Some(ref size) if parse_size(size).is_none() => Err(D::Error::custom(format!(
            "Invalid size '{}'. Expected format like '10MB', '512KB', or a byte count",
            size
        ))),
        _ => Ok(value),
    }
}
