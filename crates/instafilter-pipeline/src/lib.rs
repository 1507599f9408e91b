//! instafilter-pipeline: pure photo filter pipeline (sans-IO).
//!
//! Maps a single intensity slider onto the parameters each filter
//! recognizes and keeps a filtered output image in sync with the source
//! image, the selected filter, and the intensity.
//!
//! This crate has **no I/O dependencies** -- it operates on in-memory
//! byte slices and pixel buffers. Picking and saving images lives in
//! `instafilter-io`.

pub mod blur;
pub mod codec;
pub mod crystallize;
pub mod edge;
pub mod filter;
pub mod kaleidoscope;
pub mod params;
pub mod pipeline;
pub mod pixellate;
pub mod sepia;
pub mod sharpen;
pub mod types;
pub mod vignette;

pub use codec::{decode, encode_png};
pub use filter::{Filter, FilterKind};
pub use params::{ParamKey, Parameters, compute_parameters};
pub use pipeline::{Pipeline, PipelineState, Recompute};
pub use types::{Dimensions, PipelineConfig, PipelineError, RgbaImage};

/// Decode an image and apply one filter in a single call.
///
/// Equivalent to picking `image_bytes` into a fresh [`Pipeline`] built
/// from `config`, except that a filter producing no output is reported as
/// an error instead of being silently absorbed.
///
/// # Errors
///
/// Returns [`PipelineError::InvalidConfig`] for an out-of-range intensity,
/// [`PipelineError::EmptyInput`] or [`PipelineError::ImageDecode`] when
/// the bytes cannot be decoded, and
/// [`PipelineError::FilterProducedNoOutput`] when the filter yields
/// nothing.
pub fn process(image_bytes: &[u8], config: &PipelineConfig) -> Result<RgbaImage, PipelineError> {
    let mut pipeline = Pipeline::with_config(config)?;
    let source = decode(image_bytes)?;

    match pipeline.set_source_image(Some(source)) {
        Recompute::Updated => pipeline
            .current_output()
            .cloned()
            .ok_or(PipelineError::FilterProducedNoOutput(config.filter)),
        Recompute::Unchanged | Recompute::NoSource | Recompute::Retained => {
            Err(PipelineError::FilterProducedNoOutput(config.filter))
        }
    }
}
