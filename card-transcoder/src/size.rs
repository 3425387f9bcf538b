// ABOUTME: Target size validation and aspect-preserving dimension math
// ABOUTME: Computes the bounding-box fit shared by every frame of an image

use crate::constants::limits::MAX_WEBP_DIMENSION;
use crate::error::TranscodeError;

/// Bounding edge, in pixels, for both width and height of the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetSize(u32);

impl TargetSize {
    pub fn get(self) -> u32 {
        self.0
    }

    /// Largest dimensions that fit inside `size x size` while keeping the
    /// aspect ratio. Images are scaled up as well as down. Neither side drops
    /// below one pixel.
    pub fn fit(self, width: u32, height: u32) -> (u32, u32) {
        if width == 0 || height == 0 {
            return (self.0, self.0);
        }

        let bound = self.0 as f64;
        let width_ratio = bound / width as f64;
        let height_ratio = bound / height as f64;
        let scale_ratio = width_ratio.min(height_ratio);

        let target_width = ((width as f64 * scale_ratio).round() as u32).clamp(1, self.0);
        let target_height = ((height as f64 * scale_ratio).round() as u32).clamp(1, self.0);

        (target_width, target_height)
    }
}

impl TryFrom<i64> for TargetSize {
    type Error = TranscodeError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if value < 1 || value > MAX_WEBP_DIMENSION as i64 {
            return Err(TranscodeError::InvalidSize(value));
        }
        Ok(TargetSize(value as u32))
    }
}

impl std::fmt::Display for TargetSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}px", self.0)
    }
}
