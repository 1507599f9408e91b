//! Shared types for the instafilter pipeline.

use serde::{Deserialize, Serialize};

use crate::filter::FilterKind;

/// Re-export `RgbaImage` so downstream crates can hold source and output
/// images without depending on `image` directly.
pub use image::RgbaImage;

/// Image dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Dimensions {
    /// Dimensions of the given image.
    #[must_use]
    pub fn of(image: &RgbaImage) -> Self {
        Self {
            width: image.width(),
            height: image.height(),
        }
    }

    /// Returns `true` if either axis is zero.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Initial settings for a [`Pipeline`](crate::Pipeline).
///
/// The presentation layer builds one of these from its own defaults (CLI
/// flags, a JSON blob) and hands it to
/// [`Pipeline::with_config`](crate::Pipeline::with_config).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Filter selected before the user opens the filter menu.
    pub filter: FilterKind,

    /// Normalized strength in `[0, 1]` driving every mapped parameter.
    pub intensity: f32,
}

impl PipelineConfig {
    /// Default filter: sepia tone.
    pub const DEFAULT_FILTER: FilterKind = FilterKind::SepiaTone;

    /// Default slider position.
    pub const DEFAULT_INTENSITY: f32 = 0.5;

    /// Check that the configuration describes a usable pipeline.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::InvalidConfig`] if `intensity` is not a
    /// finite value in `[0, 1]`.
    pub fn validate(&self) -> Result<(), PipelineError> {
        if !self.intensity.is_finite() || !(0.0..=1.0).contains(&self.intensity) {
            return Err(PipelineError::InvalidConfig(format!(
                "intensity must be within [0, 1], got {}",
                self.intensity
            )));
        }
        Ok(())
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            filter: Self::DEFAULT_FILTER,
            intensity: Self::DEFAULT_INTENSITY,
        }
    }
}

/// Errors that can occur while decoding, filtering, or encoding images.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Failed to decode the input image.
    #[error("failed to decode image: {0}")]
    ImageDecode(#[from] image::ImageError),

    /// The input image bytes were empty.
    #[error("input image data is empty")]
    EmptyInput,

    /// Failed to encode the output image.
    #[error("failed to encode image: {0}")]
    Encode(String),

    /// The filter transform yielded no image.
    #[error("filter {0} produced no output")]
    FilterProducedNoOutput(FilterKind),

    /// Pipeline configuration is invalid.
    #[error("invalid pipeline configuration: {0}")]
    InvalidConfig(String),

    /// A filter name did not match any built-in filter.
    #[error("unknown filter: {0}")]
    UnknownFilter(String),
}
