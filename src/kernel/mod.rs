//! Shifted-overlap similarity kernels.
//!
//! A template is laid over a glyph at an integer offset; ink pixels that land
//! on glyph ink count as overlap. Overlap is normalized by both ink totals and
//! the two ratios are combined with a harmonic mean, so a match has to be good
//! in both directions to score well.

use crate::image::Bitmap;
use crate::template::TemplatePlan;

pub mod scalar;

#[cfg(feature = "rayon")]
pub mod rayon;

/// Shift applied to template coordinates before probing the glyph.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Offset {
    pub dx: isize,
    pub dy: isize,
}

impl Offset {
    pub const ZERO: Offset = Offset { dx: 0, dy: 0 };

    pub fn new(dx: isize, dy: isize) -> Self {
        Self { dx, dy }
    }
}

/// Glyph bitmap with its ink total, computed once per glyph.
#[derive(Clone, Copy, Debug)]
pub struct GlyphPlan<'a> {
    bitmap: &'a Bitmap,
    ink: usize,
}

impl<'a> GlyphPlan<'a> {
    pub fn new(bitmap: &'a Bitmap) -> Self {
        Self {
            bitmap,
            ink: bitmap.ink_count(),
        }
    }

    pub fn bitmap(&self) -> &'a Bitmap {
        self.bitmap
    }

    pub fn ink_count(&self) -> usize {
        self.ink
    }
}

/// Best score of one template over the offset window.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OffsetScore {
    pub score: f32,
    pub offset: Offset,
}

/// Kernel trait for scoring a template against a glyph.
pub trait Kernel {
    /// Similarity at a single offset, in `[0, 1]`.
    fn score_at(glyph: GlyphPlan<'_>, tpl: &TemplatePlan, offset: Offset) -> f32;

    /// Highest similarity over every offset in `[-range, range]^2`.
    ///
    /// Offsets are visited row by row (`dy` outer, `dx` inner, both
    /// ascending); the first offset reaching the maximum is reported. When
    /// nothing overlaps, the score is 0 at [`Offset::ZERO`].
    fn best_offset(glyph: GlyphPlan<'_>, tpl: &TemplatePlan, range: usize) -> OffsetScore;
}

/// Harmonic mean of `overlap / template_ink` and `overlap / glyph_ink`.
///
/// Evaluated as `2 * overlap / (template_ink + glyph_ink)` with a single
/// rounding, so mathematically equal scores compare equal. The result is 0
/// when nothing overlaps.
pub fn harmonic_similarity(overlap: usize, template_ink: usize, glyph_ink: usize) -> f32 {
    let total = template_ink + glyph_ink;
    if overlap == 0 || total == 0 {
        return 0.0;
    }
    (2.0 * overlap as f64 / total as f64) as f32
}

#[cfg(test)]
mod tests {
    use super::harmonic_similarity;

    #[test]
    fn full_overlap_is_one() {
        assert_eq!(harmonic_similarity(12, 12, 12), 1.0);
    }

    #[test]
    fn empty_inputs_score_zero() {
        assert_eq!(harmonic_similarity(0, 0, 0), 0.0);
        assert_eq!(harmonic_similarity(0, 5, 0), 0.0);
        assert_eq!(harmonic_similarity(0, 5, 7), 0.0);
    }

    #[test]
    fn asymmetric_match_is_penalized() {
        // Small glyph fully inside a large template: ratios 1.0 and 0.1.
        let harmonic = harmonic_similarity(10, 100, 10);
        let arithmetic = (1.0 + 0.1) / 2.0;
        assert!((harmonic - 2.0 * 0.1 / 1.1).abs() < 1e-6);
        assert!(harmonic < arithmetic);
    }

    #[test]
    fn equal_ratios_score_bit_identical() {
        // 2*2/(10+2) and 2*1/(4+2) are both exactly 1/3.
        assert_eq!(
            harmonic_similarity(2, 10, 2).to_bits(),
            harmonic_similarity(1, 4, 2).to_bits()
        );
        assert_eq!(
            harmonic_similarity(3, 7, 5).to_bits(),
            harmonic_similarity(6, 14, 10).to_bits()
        );
    }
}
