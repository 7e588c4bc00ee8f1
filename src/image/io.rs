//! Decoding and encoding through the `image` crate.
//!
//! Color input is reduced to 8-bit luminance by `image`'s `to_luma8`, which
//! ignores alpha.

use std::path::Path;

use image::{GrayImage, Luma};

use crate::image::{Bitmap, ImageView};
use crate::util::{GlyphMatchError, GlyphMatchResult};

/// Gray level written for ink pixels when encoding a bitmap.
pub const INK_LEVEL: u8 = 0;
/// Gray level written for background pixels when encoding a bitmap.
pub const PAPER_LEVEL: u8 = 255;

/// Decodes an encoded raster (PNG, JPEG, BMP, GIF) into 8-bit grayscale.
pub fn decode_gray(bytes: &[u8]) -> GlyphMatchResult<GrayImage> {
    let img = image::load_from_memory(bytes).map_err(GlyphMatchError::decode)?;
    Ok(img.to_luma8())
}

/// Loads an image from disk and converts it to 8-bit grayscale.
pub fn load_gray<P: AsRef<Path>>(path: P) -> GlyphMatchResult<GrayImage> {
    let img = image::open(path).map_err(GlyphMatchError::decode)?;
    Ok(img.to_luma8())
}

/// Creates a borrowed view over a grayscale image buffer.
pub fn gray_view(img: &GrayImage) -> GlyphMatchResult<ImageView<'_, u8>> {
    ImageView::from_slice(img.as_raw(), img.width() as usize, img.height() as usize)
}

/// Renders a bitmap as black ink on white paper.
pub fn bitmap_to_gray(bitmap: &Bitmap) -> GrayImage {
    GrayImage::from_fn(bitmap.width() as u32, bitmap.height() as u32, |x, y| {
        let ink = bitmap
            .get(x as usize, y as usize)
            .is_some_and(|p| p.is_ink());
        Luma([if ink { INK_LEVEL } else { PAPER_LEVEL }])
    })
}

/// Writes a bitmap to `path`; the format follows the file extension.
pub fn save_bitmap<P: AsRef<Path>>(bitmap: &Bitmap, path: P) -> GlyphMatchResult<()> {
    bitmap_to_gray(bitmap)
        .save(path)
        .map_err(|err| GlyphMatchError::ImageEncode {
            reason: err.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::{bitmap_to_gray, decode_gray, gray_view};
    use crate::image::Bitmap;
    use crate::util::GlyphMatchError;

    #[test]
    fn garbage_bytes_fail_to_decode() {
        let err = decode_gray(b"definitely not a png").unwrap_err();
        assert!(matches!(err, GlyphMatchError::ImageDecode { .. }));
    }

    #[test]
    fn encoded_bitmap_decodes_to_same_levels() {
        let bitmap = Bitmap::from_ascii("#.\n.#").unwrap();
        let gray = bitmap_to_gray(&bitmap);
        let mut bytes = Vec::new();
        gray.write_to(
            &mut std::io::Cursor::new(&mut bytes),
            image::ImageFormat::Png,
        )
        .unwrap();

        let decoded = decode_gray(&bytes).unwrap();
        let view = gray_view(&decoded).unwrap();
        assert_eq!(view.row(0).unwrap(), &[0u8, 255]);
        assert_eq!(view.row(1).unwrap(), &[255u8, 0]);
    }
}
