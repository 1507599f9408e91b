//! Image selection.
//!
//! The picker runs its own selection flow and eventually yields either a
//! decoded image or nothing. "Nothing" covers both a dismissed picker and
//! a selection that could not be loaded as an image; in either case the
//! pipeline is left untouched.

use std::future::Future;
use std::path::{Path, PathBuf};

use instafilter_pipeline::RgbaImage;

/// A source of user-chosen images.
pub trait ImagePicker {
    /// Run the selection flow.
    ///
    /// Resolves to `None` if the user dismissed the picker or the chosen
    /// item is not a loadable image.
    fn pick(&self) -> impl Future<Output = Option<RgbaImage>> + Send;
}

/// Picks an image from the filesystem.
///
/// A picker without a path behaves like a dismissed picker.
#[derive(Debug, Clone, Default)]
pub struct FilePicker {
    path: Option<PathBuf>,
}

impl FilePicker {
    /// A picker that selects `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    /// A picker the user dismisses without choosing anything.
    #[must_use]
    pub const fn dismissed() -> Self {
        Self { path: None }
    }

    /// The selected path, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

impl ImagePicker for FilePicker {
    async fn pick(&self) -> Option<RgbaImage> {
        let path = self.path.as_ref()?;

        let bytes = match tokio::fs::read(path).await {
            Ok(bytes) => bytes,
            Err(e) => {
                log::warn!("could not read {}: {e}", path.display());
                return None;
            }
        };

        let decoded =
            tokio::task::spawn_blocking(move || instafilter_pipeline::decode(&bytes)).await;
        match decoded {
            Ok(Ok(image)) => {
                log::debug!(
                    "picked {} ({}x{})",
                    path.display(),
                    image.width(),
                    image.height()
                );
                Some(image)
            }
            Ok(Err(e)) => {
                log::warn!("{} is not a loadable image: {e}", path.display());
                None
            }
            Err(e) => {
                log::warn!("decoding {} was interrupted: {e}", path.display());
                None
            }
        }
    }
}
