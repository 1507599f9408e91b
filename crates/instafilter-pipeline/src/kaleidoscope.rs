//! Kaleidoscope: mirror one wedge of the image around the centre.
//!
//! The plane around the image centre is divided into `2 * count` wedges.
//! Every output pixel is folded into the first wedge (reflecting
//! alternate wedges) and sampled from the source there, producing
//! `count`-fold mirror symmetry. The intensity slider has no parameter to
//! drive here, so the filter always runs with its defaults.

use std::f32::consts::TAU;

use crate::types::RgbaImage;

/// Number of mirrored segments.
pub const DEFAULT_COUNT: u32 = 6;

/// Rotation of the sampled wedge, in radians.
pub const DEFAULT_ANGLE: f32 = 0.0;

/// Apply `count`-fold mirror symmetry around the image centre.
///
/// `count` values below one are treated as one (a single mirror about the
/// `angle` axis). Samples that fall outside the source are clamped to the
/// nearest edge pixel.
#[must_use = "returns the mirrored image"]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn kaleidoscope(image: &RgbaImage, count: u32, angle: f32) -> RgbaImage {
    let (w, h) = image.dimensions();
    let cx = (w as f32 - 1.0) / 2.0;
    let cy = (h as f32 - 1.0) / 2.0;
    let segment = TAU / count.max(1) as f32;
    let half = segment / 2.0;
    let max_x = w.saturating_sub(1) as f32;
    let max_y = h.saturating_sub(1) as f32;

    RgbaImage::from_fn(w, h, |x, y| {
        let dx = x as f32 - cx;
        let dy = y as f32 - cy;
        let r = dx.hypot(dy);

        let mut theta = dy.atan2(dx).rem_euclid(segment);
        if theta > half {
            theta = segment - theta;
        }
        let theta = theta + angle;

        let sx = r.mul_add(theta.cos(), cx).round().clamp(0.0, max_x);
        let sy = r.mul_add(theta.sin(), cy).round().clamp(0.0, max_y);
        *image.get_pixel(sx as u32, sy as u32)
    })
}
