//! Saving filtered images to a photo album.

use std::future::Future;
use std::path::{Path, PathBuf};

use instafilter_pipeline::{PipelineError, RgbaImage};

/// Errors that can occur while saving the current output.
#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    /// There is no filtered output to save yet.
    #[error("no image has been picked")]
    NoSourceImage,

    /// Another save is still running.
    #[error("a save is already in progress")]
    InFlight,

    /// Writing to the album failed.
    #[error("album write failed: {0}")]
    Io(#[from] std::io::Error),

    /// The image could not be encoded.
    #[error(transparent)]
    Encode(#[from] PipelineError),

    /// The background encoding task did not complete.
    #[error("encoding task failed: {0}")]
    Join(String),
}

/// Where a saved image ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedImage {
    /// Path of the written file.
    pub path: PathBuf,
    /// Size of the written file in bytes.
    pub bytes: usize,
}

/// A destination for finished images.
pub trait ImageSaver {
    /// Persist `image`, resolving once it has been written.
    fn save(
        &self,
        image: &RgbaImage,
    ) -> impl Future<Output = Result<SavedImage, SaveError>> + Send;
}

/// Writes PNG files with unique names into a directory.
#[derive(Debug, Clone)]
pub struct AlbumSaver {
    dir: PathBuf,
}

impl AlbumSaver {
    /// An album rooted at `dir`. The directory is created on first save.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The album directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl ImageSaver for AlbumSaver {
    async fn save(&self, image: &RgbaImage) -> Result<SavedImage, SaveError> {
        let image = image.clone();
        let png = tokio::task::spawn_blocking(move || instafilter_pipeline::encode_png(&image))
            .await
            .map_err(|e| SaveError::Join(e.to_string()))??;

        tokio::fs::create_dir_all(&self.dir).await?;
        let path = self.dir.join(format!("{}.png", uuid::Uuid::new_v4()));
        tokio::fs::write(&path, &png).await?;

        log::debug!("wrote {} bytes to {}", png.len(), path.display());
        Ok(SavedImage {
            path,
            bytes: png.len(),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn creates_album_directory() {
        let root = tempfile::tempdir().unwrap();
        let album = AlbumSaver::new(root.path().join("nested").join("album"));
        let img = RgbaImage::from_pixel(3, 3, image::Rgba([1, 2, 3, 255]));

        let saved = album.save(&img).await.unwrap();
        assert!(saved.path.starts_with(album.dir()));
        assert_eq!(saved.path.extension().unwrap(), "png");
        let written = std::fs::metadata(&saved.path).unwrap().len();
        assert_eq!(usize::try_from(written).unwrap(), saved.bytes);
    }

    #[tokio::test]
    async fn names_are_unique() {
        let root = tempfile::tempdir().unwrap();
        let album = AlbumSaver::new(root.path());
        let img = RgbaImage::from_pixel(2, 2, image::Rgba([9, 9, 9, 255]));

        let a = album.save(&img).await.unwrap();
        let b = album.save(&img).await.unwrap();
        assert_ne!(a.path, b.path);
    }

    #[tokio::test]
    async fn empty_image_is_an_encode_error() {
        let root = tempfile::tempdir().unwrap();
        let album = AlbumSaver::new(root.path());
        let result = album.save(&RgbaImage::new(0, 0)).await;
        assert!(matches!(result, Err(SaveError::Encode(_))));
    }

    #[tokio::test]
    async fn unwritable_album_is_an_io_error() {
        let root = tempfile::tempdir().unwrap();
        let blocker = root.path().join("file");
        std::fs::write(&blocker, b"x").unwrap();
        let album = AlbumSaver::new(blocker.join("album"));
        let img = RgbaImage::from_pixel(2, 2, image::Rgba([0, 0, 0, 255]));

        let result = album.save(&img).await;
        assert!(matches!(result, Err(SaveError::Io(_))));
    }
}
