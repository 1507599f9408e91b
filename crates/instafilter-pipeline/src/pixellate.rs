//! Pixellate: replace each square block with its average colour.

use crate::types::RgbaImage;

/// Block size for a given `scale`: rounded, at least one pixel.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn block_size(scale: f32) -> u32 {
    if scale.is_finite() && scale >= 1.0 {
        scale.round() as u32
    } else {
        1
    }
}

/// Average each `block_size(scale)` square block of `image`.
///
/// Blocks are anchored at the top-left corner; blocks on the right and
/// bottom edges may be partial. A block size of one returns the image
/// unchanged.
#[must_use = "returns the pixellated image"]
#[allow(clippy::cast_possible_truncation)]
pub fn pixellate(image: &RgbaImage, scale: f32) -> RgbaImage {
    let size = block_size(scale);
    if size <= 1 {
        return image.clone();
    }

    let (w, h) = image.dimensions();
    let mut out = RgbaImage::new(w, h);

    for by in (0..h).step_by(size as usize) {
        for bx in (0..w).step_by(size as usize) {
            let x_end = (bx + size).min(w);
            let y_end = (by + size).min(h);

            let mut sums = [0_u64; 4];
            for y in by..y_end {
                for x in bx..x_end {
                    for (sum, &v) in sums.iter_mut().zip(&image.get_pixel(x, y).0) {
                        *sum += u64::from(v);
                    }
                }
            }
            let count = u64::from(x_end - bx) * u64::from(y_end - by);
            let average = image::Rgba(sums.map(|s| ((s + count / 2) / count) as u8));

            for y in by..y_end {
                for x in bx..x_end {
                    out.put_pixel(x, y, average);
                }
            }
        }
    }
    out
}
