//! Sharpening: unsharp mask and 3x3 Laplacian sharpen.

use crate::types::RgbaImage;

/// Unsharp mask: `src + intensity * (src - blur(src, radius))`.
///
/// Alpha is preserved. A zero radius or zero intensity returns the image
/// unchanged.
#[must_use = "returns the sharpened image"]
pub fn unsharp_mask(image: &RgbaImage, radius: f32, intensity: f32) -> RgbaImage {
    let blurred = crate::blur::gaussian_blur_radius(image, radius);
    let amount = finite_or_zero(intensity);

    let mut out = image.clone();
    for (pixel, soft) in out.pixels_mut().zip(blurred.pixels()) {
        for c in 0..3 {
            let src = f32::from(pixel.0[c]);
            let detail = src - f32::from(soft.0[c]);
            pixel.0[c] = to_channel(amount.mul_add(detail, src));
        }
    }
    out
}

/// Sharpen with the 4-neighbour Laplacian kernel, blended by `intensity`.
///
/// Edge pixels sample their clamped neighbours. Alpha is preserved.
#[must_use = "returns the sharpened image"]
pub fn sharpen(image: &RgbaImage, intensity: f32) -> RgbaImage {
    let (w, h) = image.dimensions();
    let amount = finite_or_zero(intensity);

    let sample = |x: i64, y: i64, c: usize| -> f32 {
        let cx = clamp_coord(x, w);
        let cy = clamp_coord(y, h);
        f32::from(image.get_pixel(cx, cy).0[c])
    };

    RgbaImage::from_fn(w, h, |x, y| {
        let (xi, yi) = (i64::from(x), i64::from(y));
        let src = image.get_pixel(x, y);
        let mut rgba = src.0;
        for (c, channel) in rgba.iter_mut().take(3).enumerate() {
            let center = f32::from(src.0[c]);
            let neighbours = sample(xi - 1, yi, c)
                + sample(xi + 1, yi, c)
                + sample(xi, yi - 1, c)
                + sample(xi, yi + 1, c);
            let laplacian = 4.0f32.mul_add(center, -neighbours);
            *channel = to_channel(amount.mul_add(laplacian, center));
        }
        image::Rgba(rgba)
    })
}

#[allow(clippy::cast_possible_truncation)]
fn clamp_coord(v: i64, len: u32) -> u32 {
    v.clamp(0, i64::from(len) - 1) as u32
}

const fn finite_or_zero(v: f32) -> f32 {
    if v.is_finite() { v } else { 0.0 }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_channel(v: f32) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}
