//! Bridges between encoded image bytes and in-memory pixel buffers.
//!
//! A picked photo arrives as encoded bytes (PNG, JPEG, BMP, WebP);
//! filters operate on an [`RgbaImage`]; the preview and the saved copy
//! leave as PNG bytes again.

use std::io::Cursor;

use crate::types::{PipelineError, RgbaImage};

/// Decode raw image bytes into an RGBA buffer.
///
/// Supports whatever formats the `image` crate is built with (PNG, JPEG,
/// BMP, and WebP in this workspace).
///
/// # Errors
///
/// Returns [`PipelineError::EmptyInput`] if `bytes` is empty.
/// Returns [`PipelineError::ImageDecode`] if the image format is
/// unrecognized or the data is corrupt.
pub fn decode(bytes: &[u8]) -> Result<RgbaImage, PipelineError> {
    if bytes.is_empty() {
        return Err(PipelineError::EmptyInput);
    }

    let img = image::load_from_memory(bytes)?;
    Ok(img.to_rgba8())
}

/// Encode an RGBA buffer as PNG.
///
/// # Errors
///
/// Returns [`PipelineError::Encode`] if the PNG encoder rejects the image
/// (for example a zero-area buffer).
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, PipelineError> {
    let mut buf = Cursor::new(Vec::new());
    image
        .write_to(&mut buf, image::ImageFormat::Png)
        .map_err(|e| PipelineError::Encode(e.to_string()))?;
    Ok(buf.into_inner())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_returns_error() {
        assert!(matches!(decode(&[]), Err(PipelineError::EmptyInput)));
    }

    #[test]
    fn corrupt_bytes_returns_image_decode_error() {
        let result = decode(&[0xFF, 0xFE, 0x00, 0x01]);
        assert!(matches!(result, Err(PipelineError::ImageDecode(_))));
    }

    #[test]
    fn png_survives_encode_and_decode() {
        let img = RgbaImage::from_fn(5, 3, |x, y| {
            image::Rgba([(x * 50) as u8, (y * 80) as u8, 17, 200])
        });
        let png = encode_png(&img).unwrap();
        assert_eq!(&png[..4], b"\x89PNG");
        assert_eq!(decode(&png).unwrap(), img);
    }

    #[test]
    fn encode_empty_image_fails() {
        let result = encode_png(&RgbaImage::new(0, 0));
        assert!(matches!(result, Err(PipelineError::Encode(_))));
    }
}
