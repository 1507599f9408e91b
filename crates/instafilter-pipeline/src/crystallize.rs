//! Crystallize: Voronoi cells filled with the colour under their seed.
//!
//! Seeds sit on a grid with spacing equal to the radius, each jittered
//! inside its grid cell by a fixed hash of the cell coordinates, so the
//! same image and radius always crystallize identically.

use crate::types::RgbaImage;

/// Grid cells searched on each side of a pixel's own cell.
///
/// The pixel's own seed is at most `spacing * sqrt(2)` away, and any seed
/// three or more cells away is at least `2 * spacing` away, so two cells
/// suffice for an exact nearest-seed search.
const SEARCH_CELLS: i64 = 2;

/// Seed spacing for a given radius: rounded, at least one pixel.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn cell_spacing(radius: f32) -> u32 {
    if radius.is_finite() && radius >= 1.0 {
        radius.round() as u32
    } else {
        1
    }
}

/// Crystallize `image` with cells of roughly `radius` pixels.
///
/// A spacing of one pixel returns the image unchanged.
#[must_use = "returns the crystallized image"]
pub fn crystallize(image: &RgbaImage, radius: f32) -> RgbaImage {
    let spacing = cell_spacing(radius);
    if spacing <= 1 {
        return image.clone();
    }

    let (w, h) = image.dimensions();
    let s = i64::from(spacing);

    RgbaImage::from_fn(w, h, |x, y| {
        let (px, py) = (i64::from(x), i64::from(y));
        let (cell_x, cell_y) = (px / s, py / s);

        let mut best = (i64::MAX, (x, y));
        for j in (cell_y - SEARCH_CELLS)..=(cell_y + SEARCH_CELLS) {
            for i in (cell_x - SEARCH_CELLS)..=(cell_x + SEARCH_CELLS) {
                let Some(seed) = seed_for_cell(i, j, s, w, h) else {
                    continue;
                };
                let dx = i64::from(seed.0) - px;
                let dy = i64::from(seed.1) - py;
                let dist = dx * dx + dy * dy;
                if dist < best.0 {
                    best = (dist, seed);
                }
            }
        }
        *image.get_pixel(best.1.0, best.1.1)
    })
}

/// Jittered seed of grid cell `(i, j)`, clamped into the image.
///
/// Returns `None` for cells entirely outside the image.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss
)]
fn seed_for_cell(i: i64, j: i64, spacing: i64, width: u32, height: u32) -> Option<(u32, u32)> {
    let (origin_x, origin_y) = (i * spacing, j * spacing);
    if i < 0 || j < 0 || origin_x >= i64::from(width) || origin_y >= i64::from(height) {
        return None;
    }

    let hash = mix(((i as u64) << 32) ^ (j as u64));
    let jitter_x = (hash % spacing as u64) as i64;
    let jitter_y = ((hash >> 32) % spacing as u64) as i64;

    let sx = (origin_x + jitter_x).min(i64::from(width) - 1);
    let sy = (origin_y + jitter_y).min(i64::from(height) - 1);
    Some((sx as u32, sy as u32))
}

/// `SplitMix64` finalizer.
const fn mix(mut z: u64) -> u64 {
    z = z.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
