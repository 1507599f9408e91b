//! The controller a presentation layer drives.
//!
//! A [`Session`] owns the [`Pipeline`] and turns user intents into
//! pipeline operations and collaborator calls. Saving is asynchronous;
//! only one save may be in flight at a time.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

use instafilter_pipeline::{
    FilterKind, Pipeline, PipelineConfig, PipelineError, Recompute, RgbaImage,
};

use crate::picker::ImagePicker;
use crate::saver::{ImageSaver, SaveError, SavedImage};

/// A user-visible outcome of a save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    /// The image was written.
    Saved(SavedImage),
    /// The saver reported an error; carries a human-readable reason.
    SaveFailed(String),
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Saved(saved) => write!(f, "Saved to {}", saved.path.display()),
            Self::SaveFailed(reason) => write!(f, "Save failed: {reason}"),
        }
    }
}

/// Owns the pipeline and mediates between it and the collaborators.
#[derive(Debug)]
pub struct Session {
    pipeline: Pipeline,
    saving: AtomicBool,
}

impl Session {
    /// A session with no image, starting from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::InvalidConfig`] if the configured intensity
    /// is out of range.
    pub fn new(config: &PipelineConfig) -> Result<Self, PipelineError> {
        Ok(Self {
            pipeline: Pipeline::with_config(config)?,
            saving: AtomicBool::new(false),
        })
    }

    /// Run the picker and feed its result to the pipeline.
    ///
    /// A dismissed or failed pick leaves the session unchanged.
    pub async fn pick_image<P: ImagePicker + Sync>(&mut self, picker: &P) -> Recompute {
        let picked = picker.pick().await;
        let outcome = self.pipeline.set_source_image(picked);
        log::info!("pick: {outcome:?}");
        outcome
    }

    /// Select a different filter.
    pub fn choose_filter(&mut self, filter: FilterKind) -> Recompute {
        let outcome = self.pipeline.set_filter(filter);
        log::info!("filter {filter}: {outcome:?}");
        outcome
    }

    /// Move the intensity slider.
    pub fn set_intensity(&mut self, value: f32) -> Recompute {
        self.pipeline.set_intensity(value)
    }

    /// The image the presentation layer should display.
    #[must_use]
    pub const fn preview(&self) -> Option<&RgbaImage> {
        self.pipeline.current_output()
    }

    /// Read access to the underlying pipeline.
    #[must_use]
    pub const fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    /// Hand the current output to `saver`.
    ///
    /// A saver failure is not an error of this call: it comes back as
    /// [`Notification::SaveFailed`] so it can be shown to the user.
    ///
    /// # Errors
    ///
    /// Returns [`SaveError::NoSourceImage`] if there is nothing to save
    /// and [`SaveError::InFlight`] if another save has not finished.
    pub async fn save<S: ImageSaver + Sync>(
        &self,
        saver: &S,
    ) -> Result<Notification, SaveError> {
        let Some(output) = self.pipeline.current_output() else {
            log::debug!("save requested with no output; ignoring");
            return Err(SaveError::NoSourceImage);
        };

        if self
            .saving
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            log::warn!("save requested while another save is in flight");
            return Err(SaveError::InFlight);
        }
        let _guard = InFlight(&self.saving);

        match saver.save(output).await {
            Ok(saved) => {
                log::info!("saved {} ({} bytes)", saved.path.display(), saved.bytes);
                Ok(Notification::Saved(saved))
            }
            Err(e) => {
                log::warn!("save failed: {e}");
                Ok(Notification::SaveFailed(e.to_string()))
            }
        }
    }

    /// Whether a save is currently running.
    #[must_use]
    pub fn is_saving(&self) -> bool {
        self.saving.load(Ordering::Acquire)
    }
}

/// Clears the in-flight flag when the save completes or is cancelled.
struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}
