// ABOUTME: Centralized constants for the lanyard-readme CLI
// ABOUTME: Contains default URLs, sizes, config file names, and UI timings

/// Public URLs used when building embeds
pub mod urls {
    /// Host that renders presence cards under `/api/{user_id}`
    pub const DEFAULT_BASE_URL: &str = "https://lanyard.cnrad.dev";

    /// Discord profile link prefix
    pub const DISCORD_USERS: &str = "https://discord.com/users";
}

/// Defaults applied when neither flags nor config set a value
pub mod defaults {
    /// Bounding edge for transcoded images, in pixels
    pub const TRANSCODE_SIZE: i64 = 128;
}

/// Config file locations
pub mod config_files {
    /// Project-local config file name
    pub const PROJECT_FILE: &str = "lanyard-readme.toml";

    /// Directory under the user's config home
    pub const APP_DIR: &str = "lanyard-readme";

    /// File name inside `APP_DIR`
    pub const USER_FILE: &str = "config.toml";
}

/// Timing for terminal feedback
pub mod timeouts {
    /// Spinner tick interval for smooth animation
    pub const PROGRESS_BAR_TICK_MS: u64 = 80;
}

/// Discord snowflake bounds
pub mod snowflake {
    pub const MIN_DIGITS: usize = 17;
    pub const MAX_DIGITS: usize = 20;
}
