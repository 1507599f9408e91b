//! Edge detection.
//!
//! Runs [`imageproc::gradients::sobel_gradients`] on each colour channel,
//! normalizes the magnitude back into the 0-255 range, and scales it by
//! `intensity * 10`, so faint edges brighten as the slider moves up.
//! Alpha is preserved.

use image::GrayImage;

use crate::types::RgbaImage;

/// Multiplier turning the intensity into the edge gain.
///
/// At intensity `1.0` an edge with a normalized gradient of 25.5 already
/// saturates to white.
pub const EDGE_GAIN: f32 = 10.0;

/// Sum of absolute Sobel kernel weights; normalizes the raw magnitude
/// back into the input's 0-255 range.
const SOBEL_NORM: f32 = 8.0;

/// Highlight edges in each colour channel.
///
/// Non-positive intensity produces an image whose colour channels are all
/// zero.
#[must_use = "returns the edge image"]
pub fn edges(image: &RgbaImage, intensity: f32) -> RgbaImage {
    let (width, height) = image.dimensions();
    let gain = (intensity * EDGE_GAIN).max(0.0);

    let [red, green, blue, _] = crate::blur::split_channels(image);
    let magnitudes = [red, green, blue].map(|chan| scaled_magnitude(&chan, gain));

    RgbaImage::from_fn(width, height, |x, y| {
        image::Rgba([
            magnitudes[0].get_pixel(x, y).0[0],
            magnitudes[1].get_pixel(x, y).0[0],
            magnitudes[2].get_pixel(x, y).0[0],
            image.get_pixel(x, y).0[3],
        ])
    })
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn scaled_magnitude(channel: &GrayImage, gain: f32) -> GrayImage {
    let gradients = imageproc::gradients::sobel_gradients(channel);
    GrayImage::from_fn(channel.width(), channel.height(), |x, y| {
        let magnitude = f32::from(gradients.get_pixel(x, y).0[0]) / SOBEL_NORM;
        image::Luma([(magnitude * gain).round().clamp(0.0, 255.0) as u8])
    })
}
