//! Sepia tone.
//!
//! Maps each pixel through the classic sepia colour matrix and blends the
//! result with the original by `intensity`. Alpha is preserved.

use crate::types::RgbaImage;

/// Rows of the sepia colour matrix (output R, G, B).
const SEPIA_MATRIX: [[f32; 3]; 3] = [
    [0.393, 0.769, 0.189],
    [0.349, 0.686, 0.168],
    [0.272, 0.534, 0.131],
];

/// Blend `image` towards sepia by `intensity` (clamped to `[0, 1]`).
///
/// Intensity `0.0` returns the image unchanged; `1.0` is full sepia.
#[must_use = "returns the toned image"]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn sepia_tone(image: &RgbaImage, intensity: f32) -> RgbaImage {
    let amount = if intensity.is_nan() {
        0.0
    } else {
        intensity.clamp(0.0, 1.0)
    };

    let mut out = image.clone();
    for pixel in out.pixels_mut() {
        let [red, green, blue, alpha] = pixel.0;
        let rgb = [f32::from(red), f32::from(green), f32::from(blue)];
        let toned = SEPIA_MATRIX.map(|row| {
            row[0]
                .mul_add(rgb[0], row[1].mul_add(rgb[1], row[2] * rgb[2]))
                .min(255.0)
        });
        let blend = |orig: f32, sepia: f32| -> u8 {
            orig.mul_add(1.0 - amount, sepia * amount)
                .round()
                .clamp(0.0, 255.0) as u8
        };
        pixel.0 = [
            blend(rgb[0], toned[0]),
            blend(rgb[1], toned[1]),
            blend(rgb[2], toned[2]),
            alpha,
        ];
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RgbaImage {
        RgbaImage::from_fn(8, 8, |x, y| {
            image::Rgba([(x * 30) as u8, (y * 30) as u8, ((x + y) * 15) as u8, 128])
        })
    }

    #[test]
    fn zero_intensity_is_identity() {
        let img = sample();
        assert_eq!(sepia_tone(&img, 0.0), img);
    }

    #[test]
    fn full_intensity_white_becomes_warm() {
        let img = RgbaImage::from_pixel(1, 1, image::Rgba([255, 255, 255, 255]));
        let out = sepia_tone(&img, 1.0);
        let [r, g, b, a] = out.get_pixel(0, 0).0;
        assert_eq!(r, 255);
        assert_eq!(g, 255);
        assert_eq!(b, 239);
        assert_eq!(a, 255);
    }

    #[test]
    fn red_is_at_least_green_is_at_least_blue() {
        let out = sepia_tone(&sample(), 1.0);
        for p in out.pixels() {
            assert!(p.0[0] >= p.0[1] && p.0[1] >= p.0[2], "{:?}", p.0);
        }
    }

    #[test]
    fn alpha_is_preserved() {
        let out = sepia_tone(&sample(), 0.7);
        assert!(out.pixels().all(|p| p.0[3] == 128));
    }

    #[test]
    fn intensity_is_clamped() {
        let img = sample();
        assert_eq!(sepia_tone(&img, 3.0), sepia_tone(&img, 1.0));
        assert_eq!(sepia_tone(&img, -1.0), img);
    }
}
