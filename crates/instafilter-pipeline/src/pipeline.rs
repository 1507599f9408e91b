//! Stateful pipeline: keep the filtered output in sync with its inputs.
//!
//! [`Pipeline`] owns the source image, the selected filter, and the
//! intensity. Every mutation goes through one of the operations below and
//! synchronously recomputes the output before returning, so a caller never
//! observes an output that is stale relative to the last committed inputs:
//!
//! ```rust
//! # use instafilter_pipeline::{FilterKind, Pipeline, Recompute, RgbaImage};
//! let mut pipeline = Pipeline::new();
//! assert!(pipeline.current_output().is_none());
//!
//! let photo = RgbaImage::from_pixel(4, 4, image::Rgba([200, 120, 40, 255]));
//! assert_eq!(pipeline.set_source_image(Some(photo)), Recompute::Updated);
//! assert_eq!(pipeline.set_filter(FilterKind::Pixellate), Recompute::Updated);
//! assert_eq!(pipeline.set_intensity(0.8), Recompute::Updated);
//! assert!(pipeline.current_output().is_some());
//! ```
//!
//! # Failed filter applications
//!
//! When the selected filter yields no output, the previous output is kept
//! and the operation returns [`Recompute::Retained`]. Nothing is raised to
//! the caller; a warning is logged. Callers that want to surface the stale
//! preview inspect the returned [`Recompute`].

use crate::filter::{Filter, FilterKind};
use crate::params::{Parameters, compute_parameters};
use crate::types::{PipelineConfig, PipelineError, RgbaImage};

/// What a mutating operation did to the output image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use = "the outcome reports whether the preview changed"]
pub enum Recompute {
    /// The operation was a no-op; nothing changed.
    Unchanged,
    /// There is no source image, so there is no output.
    NoSource,
    /// The output was recomputed from the current inputs.
    Updated,
    /// The filter produced nothing; the previous output was kept.
    Retained,
}

/// Whether the pipeline has a source image yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    /// No image has been picked.
    Empty,
    /// A source image is present. The output may still be absent if
    /// every filter application so far has failed.
    Ready,
}

/// The image pipeline.
///
/// Generic over the [`Filter`] descriptor so callers can plug in their own
/// filters; [`FilterKind`] is the built-in catalogue.
#[derive(Debug, Clone, PartialEq)]
pub struct Pipeline<F = FilterKind> {
    source: Option<RgbaImage>,
    filter: F,
    intensity: f32,
    output: Option<RgbaImage>,
}

impl Pipeline<FilterKind> {
    /// An empty pipeline with the default filter and intensity.
    #[must_use]
    pub const fn new() -> Self {
        Self::with_filter(PipelineConfig::DEFAULT_FILTER)
    }

    /// An empty pipeline starting from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::InvalidConfig`] if the config's intensity
    /// is out of range.
    pub fn with_config(config: &PipelineConfig) -> Result<Self, PipelineError> {
        config.validate()?;
        let mut pipeline = Self::with_filter(config.filter);
        pipeline.intensity = config.intensity;
        Ok(pipeline)
    }

    /// Snapshot of the current filter and intensity.
    #[must_use]
    pub const fn config(&self) -> PipelineConfig {
        PipelineConfig {
            filter: self.filter,
            intensity: self.intensity,
        }
    }
}

impl Default for Pipeline<FilterKind> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Filter> Pipeline<F> {
    /// An empty pipeline using `filter` and the default intensity.
    #[must_use]
    pub const fn with_filter(filter: F) -> Self {
        Self {
            source: None,
            filter,
            intensity: PipelineConfig::DEFAULT_INTENSITY,
            output: None,
        }
    }

    /// Replace the source image and recompute.
    ///
    /// `None` means no image was picked; the pipeline is left untouched
    /// and [`Recompute::Unchanged`] is returned.
    pub fn set_source_image(&mut self, image: Option<RgbaImage>) -> Recompute {
        let Some(image) = image else {
            log::debug!("no image picked; pipeline unchanged");
            return Recompute::Unchanged;
        };
        log::debug!("source image set ({}x{})", image.width(), image.height());
        self.source = Some(image);
        self.recompute()
    }

    /// Replace the selected filter and recompute on the existing source.
    pub fn set_filter(&mut self, filter: F) -> Recompute {
        log::debug!("filter set to {}", filter.name());
        self.filter = filter;
        self.recompute()
    }

    /// Replace the intensity and recompute.
    ///
    /// Values are clamped to `[0, 1]`; NaN resets to the default
    /// intensity.
    pub fn set_intensity(&mut self, value: f32) -> Recompute {
        self.intensity = clamp_intensity(value);
        self.recompute()
    }

    /// Recompute the output from the current inputs.
    fn recompute(&mut self) -> Recompute {
        let Some(source) = &self.source else {
            self.output = None;
            return Recompute::NoSource;
        };

        let params = self.parameters();
        if let Some(output) = self.filter.apply(source, &params) {
            self.output = Some(output);
            Recompute::Updated
        } else {
            log::warn!(
                "filter {} produced no output; keeping previous preview",
                self.filter.name()
            );
            Recompute::Retained
        }
    }

    /// Parameters the current filter receives at the current intensity.
    #[must_use]
    pub fn parameters(&self) -> Parameters {
        compute_parameters(self.filter.recognized_keys(), self.intensity)
    }

    /// The most recently computed output, if any.
    #[must_use]
    pub const fn current_output(&self) -> Option<&RgbaImage> {
        self.output.as_ref()
    }

    /// The current source image, if one was picked.
    #[must_use]
    pub const fn source(&self) -> Option<&RgbaImage> {
        self.source.as_ref()
    }

    /// The selected filter.
    #[must_use]
    pub const fn filter(&self) -> &F {
        &self.filter
    }

    /// The current intensity in `[0, 1]`.
    #[must_use]
    pub const fn intensity(&self) -> f32 {
        self.intensity
    }

    /// [`PipelineState::Ready`] once a source image has been set.
    #[must_use]
    pub const fn state(&self) -> PipelineState {
        if self.source.is_some() {
            PipelineState::Ready
        } else {
            PipelineState::Empty
        }
    }
}

const fn clamp_intensity(value: f32) -> f32 {
    if value.is_nan() {
        PipelineConfig::DEFAULT_INTENSITY
    } else {
        value.clamp(0.0, 1.0)
    }
}
