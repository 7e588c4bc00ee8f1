//! Column-projection segmentation of binarized captchas.
//!
//! Columns holding more than one ink pixel form glyph regions; each region is
//! cropped at full height and then trimmed to the rows holding more than one
//! ink pixel. Glyphs rendered without a separating column come out as one
//! wide region; no attempt is made to split them.

pub mod projection;

use std::ops::Range;

use crate::image::Bitmap;
use crate::trace::{trace_event, trace_span};
use crate::util::GlyphMatchResult;

pub use projection::{column_ink, content_span, find_regions, row_ink, NOISE_LEVEL};

/// One segmented character candidate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Glyph {
    /// Cropped glyph pixels.
    pub bitmap: Bitmap,
    /// Column span in the source bitmap (half-open).
    pub columns: Range<usize>,
    /// Row span in the source bitmap (half-open).
    pub rows: Range<usize>,
}

/// Splits a binarized bitmap into left-to-right glyphs.
pub fn segment(bitmap: &Bitmap) -> GlyphMatchResult<Vec<Glyph>> {
    let _span = trace_span!("segment", width = bitmap.width(), height = bitmap.height()).entered();

    let view = bitmap.view();
    let regions = find_regions(&column_ink(view));
    let mut glyphs = Vec::with_capacity(regions.len());
    for columns in regions {
        let strip = view.roi(columns.start, 0, columns.len(), view.height())?;
        let rows = content_span(&row_ink(strip)).unwrap_or(0..view.height());
        let crop = bitmap.crop(columns.start, rows.start, columns.len(), rows.len())?;
        glyphs.push(Glyph {
            bitmap: crop,
            columns,
            rows,
        });
    }

    trace_event!("segmented", glyphs = glyphs.len());
    Ok(glyphs)
}
