//! Gaussian blur.
//!
//! Wraps [`imageproc::filter::gaussian_blur_f32`]. The blur runs on an
//! `f32` copy of the image and rounds back to 8 bits once, so flat regions
//! (including opaque alpha) come out exactly as they went in.
//!
//! The unsharp mask and the Gaussian blur filter share this module.

use image::{GrayImage, Rgba32FImage};

use crate::types::RgbaImage;

/// Ratio between a filter's pixel radius and the Gaussian sigma.
pub const RADIUS_PER_SIGMA: f32 = 2.0;

/// Blur `image` with a radius expressed in pixels.
///
/// The radius is converted to `sigma = radius / 2`. A radius of zero
/// returns the image unchanged.
#[must_use = "returns the blurred RGBA image"]
pub fn gaussian_blur_radius(image: &RgbaImage, radius: f32) -> RgbaImage {
    gaussian_blur_rgba(image, radius / RADIUS_PER_SIGMA)
}

/// Apply Gaussian blur to all four channels of an RGBA image.
///
/// A uniform image maps exactly to itself. Non-positive (and non-finite)
/// sigma values return the image unchanged, since `imageproc` panics on
/// `sigma <= 0.0`.
#[must_use = "returns the blurred RGBA image"]
pub fn gaussian_blur_rgba(image: &RgbaImage, sigma: f32) -> RgbaImage {
    if !sigma.is_finite() || sigma <= 0.0 {
        return image.clone();
    }

    let blurred = imageproc::filter::gaussian_blur_f32(&to_f32(image), sigma);
    from_f32(&blurred)
}

fn to_f32(image: &RgbaImage) -> Rgba32FImage {
    let (w, h) = image.dimensions();
    Rgba32FImage::from_fn(w, h, |x, y| {
        image::Rgba(image.get_pixel(x, y).0.map(f32::from))
    })
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn from_f32(image: &Rgba32FImage) -> RgbaImage {
    let (w, h) = image.dimensions();
    RgbaImage::from_fn(w, h, |x, y| {
        let channels = image.get_pixel(x, y).0;
        image::Rgba(channels.map(|v| v.round().clamp(0.0, 255.0) as u8))
    })
}

/// Split an RGBA image into four single-channel images.
pub(crate) fn split_channels(image: &RgbaImage) -> [GrayImage; 4] {
    let (w, h) = image.dimensions();
    std::array::from_fn(|c| {
        GrayImage::from_fn(w, h, |x, y| image::Luma([image.get_pixel(x, y).0[c]]))
    })
}
