//! Grayscale thresholding into 1-bit bitmaps.
//!
//! A pixel is ink when its luminance is strictly below the threshold. After
//! thresholding, the outermost rows and columns are forced to background so
//! scan-line and frame artifacts never reach segmentation.

use crate::image::io::{decode_gray, gray_view};
use crate::image::{Bitmap, ImageView, Pixel};
use crate::trace::{trace_event, trace_span};
use crate::util::GlyphMatchResult;

/// Luminance cutoff calibrated for the production captcha rendering.
pub const DEFAULT_THRESHOLD: u8 = 94;

/// Configuration for binarizing captcha images.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BinarizeConfig {
    /// Pixels with luminance below this value become ink.
    pub threshold: u8,
}

impl Default for BinarizeConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

/// Decodes `bytes` and binarizes the result, clearing the border.
pub fn binarize(bytes: &[u8], threshold: u8) -> GlyphMatchResult<Bitmap> {
    let gray = decode_gray(bytes)?;
    let view = gray_view(&gray)?;
    binarize_gray(view, threshold)
}

/// Thresholds a grayscale view and clears the border.
pub fn binarize_gray(gray: ImageView<'_, u8>, threshold: u8) -> GlyphMatchResult<Bitmap> {
    let _span = trace_span!(
        "binarize",
        width = gray.width(),
        height = gray.height(),
        threshold = threshold
    )
    .entered();

    let mut bitmap = threshold_gray(gray, threshold)?;
    force_border_background(&mut bitmap);

    trace_event!("binarized", ink = bitmap.ink_count());
    Ok(bitmap)
}

/// Thresholds without touching the border.
///
/// Template images go through this path so their ink matches glyph ink.
pub fn threshold_gray(gray: ImageView<'_, u8>, threshold: u8) -> GlyphMatchResult<Bitmap> {
    Bitmap::from_fn(gray.width(), gray.height(), |x, y| {
        match gray.get(x, y) {
            Some(&value) if value < threshold => Pixel::Foreground,
            _ => Pixel::Background,
        }
    })
}

/// Sets row 0, the last row, column 0 and the last column to background.
pub fn force_border_background(bitmap: &mut Bitmap) {
    let (width, height) = (bitmap.width(), bitmap.height());
    for x in 0..width {
        bitmap.set(x, 0, Pixel::Background);
        bitmap.set(x, height - 1, Pixel::Background);
    }
    for y in 0..height {
        bitmap.set(0, y, Pixel::Background);
        bitmap.set(width - 1, y, Pixel::Background);
    }
}

#[cfg(test)]
mod tests {
    use super::{binarize_gray, threshold_gray, BinarizeConfig};
    use crate::image::ImageView;

    #[test]
    fn default_threshold_is_production_value() {
        assert_eq!(BinarizeConfig::default().threshold, 94);
    }

    #[test]
    fn threshold_is_strict() {
        let data = [93u8, 94, 95, 0];
        let view = ImageView::from_slice(&data, 4, 1).unwrap();
        let bitmap = threshold_gray(view, 94).unwrap();
        assert_eq!(bitmap.to_string(), "#..#\n");
    }

    #[test]
    fn border_is_cleared_after_thresholding() {
        let data = [0u8; 16];
        let view = ImageView::from_slice(&data, 4, 4).unwrap();
        let bitmap = binarize_gray(view, 94).unwrap();
        assert_eq!(bitmap.to_string(), "....\n.##.\n.##.\n....\n");
    }

    #[test]
    fn strided_views_binarize_only_visible_columns() {
        #[rustfmt::skip]
        let data = [
            255u8, 255, 255, 0,
            255,     0, 255, 0,
            255,   255, 255, 0,
        ];
        let view = ImageView::new(&data, 3, 3, 4).unwrap();
        let bitmap = binarize_gray(view, 128).unwrap();
        assert_eq!(bitmap.ink_count(), 1);
        assert!(bitmap.is_ink_at(1, 1));
    }
}
