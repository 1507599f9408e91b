//! Vignette: darken towards the corners.
//!
//! Brightness falls off with the squared distance from the image centre.
//! `radius` (pixels) widens the reach of the falloff beyond the half
//! diagonal, softening it; `intensity` sets how dark the corners get.

use crate::types::RgbaImage;

/// Darken `image` radially.
///
/// Each colour channel is multiplied by
/// `1 - intensity * (d / (half_diagonal + radius))^2`, clamped to
/// `[0, 1]`, where `d` is the distance from the centre. Alpha is preserved.
#[must_use = "returns the vignetted image"]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn vignette(image: &RgbaImage, intensity: f32, radius: f32) -> RgbaImage {
    let (w, h) = image.dimensions();
    let cx = (w as f32 - 1.0) / 2.0;
    let cy = (h as f32 - 1.0) / 2.0;
    let half_diagonal = cx.hypot(cy);
    let extra = if radius.is_finite() { radius.max(0.0) } else { 0.0 };
    let reach = (half_diagonal + extra).max(f32::EPSILON);
    let strength = if intensity.is_finite() { intensity } else { 0.0 };

    let mut out = image.clone();
    for (x, y, pixel) in out.enumerate_pixels_mut() {
        let d = (x as f32 - cx).hypot(y as f32 - cy) / reach;
        let factor = strength.mul_add(-(d * d), 1.0).clamp(0.0, 1.0);
        for channel in pixel.0.iter_mut().take(3) {
            *channel = (f32::from(*channel) * factor).round().clamp(0.0, 255.0) as u8;
        }
    }
    out
}
