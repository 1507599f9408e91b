//! Filter descriptors: identity, recognized parameter keys, and transform.
//!
//! This module defines the [`Filter`] trait the [`Pipeline`](crate::Pipeline)
//! drives and the [`FilterKind`] enum listing the built-in filters offered by
//! the filter menu.
//!
//! # Strategy pattern
//!
//! Each built-in filter lives in its own module as a pure function over an
//! [`RgbaImage`]. [`FilterKind`] dispatches to them, filling any parameter
//! the intensity mapping does not provide with the filter's own default.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::params::{ParamKey, Parameters};
use crate::types::{Dimensions, PipelineError, RgbaImage};

/// A filter the pipeline can apply.
pub trait Filter {
    /// Stable identifier of the filter.
    fn name(&self) -> &str;

    /// Parameter keys this filter accepts from the intensity mapping.
    fn recognized_keys(&self) -> &[ParamKey];

    /// Apply the filter to `source`.
    ///
    /// Returns `None` when the transform cannot produce an image (for
    /// example a zero-area source).
    fn apply(&self, source: &RgbaImage, params: &Parameters) -> Option<RgbaImage>;
}

/// The built-in filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FilterKind {
    /// Voronoi cells, each filled with the colour under its seed.
    Crystallize,
    /// Sobel edge magnitude.
    Edges,
    /// Gaussian blur.
    GaussianBlur,
    /// Square block averaging.
    Pixellate,
    /// Warm brown monochrome.
    #[default]
    SepiaTone,
    /// Unsharp mask sharpening.
    UnsharpMask,
    /// Radial darkening towards the corners.
    Vignette,
    /// Six-fold mirror symmetry around the image centre.
    Kaleidoscope,
    /// 3x3 Laplacian sharpening.
    Sharpen,
}

impl FilterKind {
    /// Every built-in filter, in menu order.
    pub const ALL: [Self; 9] = [
        Self::Crystallize,
        Self::Edges,
        Self::GaussianBlur,
        Self::Pixellate,
        Self::SepiaTone,
        Self::UnsharpMask,
        Self::Vignette,
        Self::Kaleidoscope,
        Self::Sharpen,
    ];

    /// Kebab-case identifier used by the CLI and serialized configs.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Crystallize => "crystallize",
            Self::Edges => "edges",
            Self::GaussianBlur => "gaussian-blur",
            Self::Pixellate => "pixellate",
            Self::SepiaTone => "sepia-tone",
            Self::UnsharpMask => "unsharp-mask",
            Self::Vignette => "vignette",
            Self::Kaleidoscope => "kaleidoscope",
            Self::Sharpen => "sharpen",
        }
    }

    /// Human-readable menu label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Crystallize => "Crystallize",
            Self::Edges => "Edges",
            Self::GaussianBlur => "Gaussian Blur",
            Self::Pixellate => "Pixellate",
            Self::SepiaTone => "Sepia Tone",
            Self::UnsharpMask => "Unsharp Mask",
            Self::Vignette => "Vignette",
            Self::Kaleidoscope => "Kaleidoscope",
            Self::Sharpen => "Sharpen",
        }
    }

    /// Value used for `key` when the parameter set does not provide one.
    #[must_use]
    pub const fn default_value(self, key: ParamKey) -> f32 {
        match (self, key) {
            (Self::Crystallize, ParamKey::Radius) => 20.0,
            (Self::GaussianBlur, ParamKey::Radius) => 10.0,
            (Self::Pixellate, ParamKey::Scale) => 8.0,
            (Self::UnsharpMask, ParamKey::Radius) => 2.5,
            (Self::UnsharpMask, ParamKey::Intensity) => 0.5,
            (Self::Vignette, ParamKey::Intensity) => 0.0,
            _ => 1.0,
        }
    }

    fn param(self, params: &Parameters, key: ParamKey) -> f32 {
        params
            .get(key)
            .unwrap_or_else(|| self.default_value(key))
    }

    /// Apply the filter, treating a missing output as an error.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::FilterProducedNoOutput`] when
    /// [`Filter::apply`] yields `None`.
    pub fn try_apply(
        self,
        source: &RgbaImage,
        params: &Parameters,
    ) -> Result<RgbaImage, PipelineError> {
        self.apply(source, params)
            .ok_or(PipelineError::FilterProducedNoOutput(self))
    }
}

impl Filter for FilterKind {
    fn name(&self) -> &str {
        self.id()
    }

    fn recognized_keys(&self) -> &[ParamKey] {
        match *self {
            Self::Crystallize | Self::GaussianBlur => &[ParamKey::Radius],
            Self::Edges | Self::SepiaTone | Self::Sharpen => &[ParamKey::Intensity],
            Self::Pixellate => &[ParamKey::Scale],
            Self::UnsharpMask | Self::Vignette => &[ParamKey::Radius, ParamKey::Intensity],
            Self::Kaleidoscope => &[],
        }
    }

    fn apply(&self, source: &RgbaImage, params: &Parameters) -> Option<RgbaImage> {
        if Dimensions::of(source).is_empty() {
            return None;
        }
        let kind = *self;
        let intensity = || kind.param(params, ParamKey::Intensity);
        let radius = || kind.param(params, ParamKey::Radius);

        let output = match kind {
            Self::Crystallize => crate::crystallize::crystallize(source, radius()),
            Self::Edges => crate::edge::edges(source, intensity()),
            Self::GaussianBlur => crate::blur::gaussian_blur_radius(source, radius()),
            Self::Pixellate => {
                crate::pixellate::pixellate(source, kind.param(params, ParamKey::Scale))
            }
            Self::SepiaTone => crate::sepia::sepia_tone(source, intensity()),
            Self::UnsharpMask => crate::sharpen::unsharp_mask(source, radius(), intensity()),
            Self::Vignette => crate::vignette::vignette(source, intensity(), radius()),
            Self::Kaleidoscope => crate::kaleidoscope::kaleidoscope(
                source,
                crate::kaleidoscope::DEFAULT_COUNT,
                crate::kaleidoscope::DEFAULT_ANGLE,
            ),
            Self::Sharpen => crate::sharpen::sharpen(source, intensity()),
        };
        Some(output)
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for FilterKind {
    type Err = PipelineError;

    /// Parse a filter identifier. Case-insensitive; `_` and spaces are
    /// accepted in place of `-`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['_', ' '], "-");
        Self::ALL
            .into_iter()
            .find(|kind| kind.id() == normalized)
            .ok_or_else(|| PipelineError::UnknownFilter(s.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::params::compute_parameters;

    #[allow(clippy::cast_possible_truncation)]
    fn gradient(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_fn(width, height, |x, y| {
            image::Rgba([
                ((x * 255) / width.max(1)) as u8,
                ((y * 255) / height.max(1)) as u8,
                128,
                255,
            ])
        })
    }

    #[test]
    fn default_is_sepia_tone() {
        assert_eq!(FilterKind::default(), FilterKind::SepiaTone);
    }

    #[test]
    fn recognized_keys_match_catalogue() {
        assert_eq!(
            FilterKind::GaussianBlur.recognized_keys(),
            &[ParamKey::Radius]
        );
        assert_eq!(FilterKind::Pixellate.recognized_keys(), &[ParamKey::Scale]);
        assert_eq!(
            FilterKind::SepiaTone.recognized_keys(),
            &[ParamKey::Intensity]
        );
        assert_eq!(
            FilterKind::Vignette.recognized_keys(),
            &[ParamKey::Radius, ParamKey::Intensity]
        );
        assert!(FilterKind::Kaleidoscope.recognized_keys().is_empty());
    }

    #[test]
    fn every_filter_preserves_dimensions() {
        let img = gradient(23, 17);
        for kind in FilterKind::ALL {
            let params = compute_parameters(kind.recognized_keys(), 0.05);
            let out = kind.apply(&img, &params).unwrap();
            assert_eq!(out.dimensions(), (23, 17), "{kind} changed dimensions");
        }
    }

    #[test]
    fn every_filter_rejects_empty_image() {
        let empty = RgbaImage::new(0, 0);
        for kind in FilterKind::ALL {
            let params = compute_parameters(kind.recognized_keys(), 0.5);
            assert!(kind.apply(&empty, &params).is_none(), "{kind}");
        }
    }

    #[test]
    fn try_apply_reports_no_output() {
        let empty = RgbaImage::new(4, 0);
        let result = FilterKind::Edges.try_apply(&empty, &Parameters::new());
        assert!(matches!(
            result,
            Err(PipelineError::FilterProducedNoOutput(FilterKind::Edges))
        ));
    }

    #[test]
    fn every_filter_is_deterministic() {
        let img = gradient(16, 16);
        for kind in FilterKind::ALL {
            let params = compute_parameters(kind.recognized_keys(), 0.1);
            let a = kind.apply(&img, &params).unwrap();
            let b = kind.apply(&img, &params).unwrap();
            assert_eq!(a, b, "{kind} is not deterministic");
        }
    }

    #[test]
    fn missing_parameters_fall_back_to_defaults() {
        let img = gradient(12, 12);
        let explicit: Parameters = [(ParamKey::Scale, 8.0)].into_iter().collect();
        let with_default = FilterKind::Pixellate
            .apply(&img, &Parameters::new())
            .unwrap();
        let with_explicit = FilterKind::Pixellate.apply(&img, &explicit).unwrap();
        assert_eq!(with_default, with_explicit);
    }

    #[test]
    fn display_and_from_str_agree() {
        for kind in FilterKind::ALL {
            assert_eq!(kind.to_string().parse::<FilterKind>().unwrap(), kind);
        }
    }

    #[test]
    fn from_str_is_lenient() {
        assert_eq!(
            "Gaussian_Blur".parse::<FilterKind>().unwrap(),
            FilterKind::GaussianBlur
        );
        assert_eq!(
            " unsharp mask ".parse::<FilterKind>().unwrap(),
            FilterKind::UnsharpMask
        );
    }

    #[test]
    fn from_str_unknown() {
        let err = "posterize".parse::<FilterKind>().unwrap_err();
        assert!(matches!(
            err,
            PipelineError::UnknownFilter(ref s) if s == "posterize"
        ));
    }

    #[test]
    fn serde_uses_kebab_case_ids() {
        for kind in FilterKind::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.id()));
        }
    }

    #[test]
    fn labels_are_distinct() {
        let mut labels: Vec<&str> = FilterKind::ALL.iter().map(|k| k.label()).collect();
        labels.sort_unstable();
        labels.dedup();
        assert_eq!(labels.len(), FilterKind::ALL.len());
    }
}
