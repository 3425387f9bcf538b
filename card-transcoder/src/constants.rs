// ABOUTME: Centralized constants for the card transcoder
// ABOUTME: Contains encoder tuning, size limits, and HTTP client defaults

/// Encoder tuning
pub mod encoding {
    /// Lossy WebP quality used for every encode (0-100 scale)
    pub const WEBP_QUALITY: f32 = 50.0;

    /// Loop count written into animated output, 0 loops forever
    pub const ANIMATION_LOOP_COUNT: i32 = 0;

    /// Frame delay used when the source reports none
    pub const DEFAULT_FRAME_DELAY_MS: u32 = 100;
}

/// Dimension limits
pub mod limits {
    /// Largest width or height a WebP bitstream can describe
    pub const MAX_WEBP_DIMENSION: u32 = 16383;
}

/// HTTP client defaults
pub mod http {
    /// User agent sent with every fetch
    pub const USER_AGENT: &str = concat!("card-transcoder/", env!("CARGO_PKG_VERSION"));

    /// Redirects followed before giving up
    pub const MAX_REDIRECTS: usize = 5;

    /// Header value that asks intermediaries for a fresh copy
    pub const NO_CACHE: &str = "no-cache";
}
