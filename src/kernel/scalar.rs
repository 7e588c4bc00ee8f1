//! Scalar reference kernel.

use crate::kernel::{harmonic_similarity, GlyphPlan, Kernel, Offset, OffsetScore};
use crate::template::TemplatePlan;

/// Visits every template ink pixel at every offset.
pub struct OverlapScalar;

impl OverlapScalar {
    /// Template ink pixels landing on glyph ink at `offset`.
    pub fn overlap_at(glyph: GlyphPlan<'_>, tpl: &TemplatePlan, offset: Offset) -> usize {
        let bitmap = glyph.bitmap();
        tpl.ink()
            .iter()
            .filter(|&&(x, y)| bitmap.is_ink_at(x + offset.dx, y + offset.dy))
            .count()
    }
}

impl Kernel for OverlapScalar {
    fn score_at(glyph: GlyphPlan<'_>, tpl: &TemplatePlan, offset: Offset) -> f32 {
        let overlap = Self::overlap_at(glyph, tpl, offset);
        harmonic_similarity(overlap, tpl.ink_count(), glyph.ink_count())
    }

    fn best_offset(glyph: GlyphPlan<'_>, tpl: &TemplatePlan, range: usize) -> OffsetScore {
        let mut best = OffsetScore {
            score: 0.0,
            offset: Offset::ZERO,
        };
        if tpl.ink_count() == 0 || glyph.ink_count() == 0 {
            return best;
        }

        // Offsets at or beyond the larger extent cannot overlap any ink.
        let bitmap = glyph.bitmap();
        let reach = tpl
            .width()
            .max(tpl.height())
            .max(bitmap.width())
            .max(bitmap.height());
        let r = isize::try_from(range.min(reach)).unwrap_or(isize::MAX);
        for dy in -r..=r {
            for dx in -r..=r {
                let offset = Offset::new(dx, dy);
                let score = Self::score_at(glyph, tpl, offset);
                if score > best.score {
                    best = OffsetScore { score, offset };
                }
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::OverlapScalar;
    use crate::image::Bitmap;
    use crate::kernel::{GlyphPlan, Kernel, Offset};
    use crate::template::{Template, TemplatePlan};

    fn plan(art: &str) -> TemplatePlan {
        TemplatePlan::from_template(&Template::new("t", Bitmap::from_ascii(art).unwrap()).unwrap())
    }

    #[test]
    fn overlap_respects_glyph_bounds() {
        let glyph = Bitmap::from_ascii("##\n##").unwrap();
        let tpl = plan("##\n##");
        let g = GlyphPlan::new(&glyph);
        assert_eq!(OverlapScalar::overlap_at(g, &tpl, Offset::ZERO), 4);
        assert_eq!(OverlapScalar::overlap_at(g, &tpl, Offset::new(1, 0)), 2);
        assert_eq!(OverlapScalar::overlap_at(g, &tpl, Offset::new(-1, -1)), 1);
        assert_eq!(OverlapScalar::overlap_at(g, &tpl, Offset::new(2, 0)), 0);
    }

    #[test]
    fn best_offset_finds_shifted_copy() {
        let glyph = Bitmap::from_ascii(
            "
            .....
            .....
            ..##.
            ..#..
            ",
        )
        .unwrap();
        let tpl = plan(
            "
            ##...
            #....
            .....
            .....
            ",
        );
        let best = OverlapScalar::best_offset(GlyphPlan::new(&glyph), &tpl, 3);
        assert_eq!(best.score, 1.0);
        assert_eq!(best.offset, Offset::new(2, 2));
    }

    #[test]
    fn oversized_range_is_clamped_to_reachable_offsets() {
        let glyph = Bitmap::from_ascii("#.\n##").unwrap();
        let tpl = plan("#.\n##");
        let g = GlyphPlan::new(&glyph);
        for range in [2, 1_000_000, usize::MAX] {
            let best = OverlapScalar::best_offset(g, &tpl, range);
            assert_eq!(best.score, 1.0);
            assert_eq!(best.offset, Offset::ZERO);
        }
    }

    #[test]
    fn blank_glyph_scores_zero() {
        let glyph = Bitmap::blank(3, 3).unwrap();
        let best = OverlapScalar::best_offset(GlyphPlan::new(&glyph), &plan("#"), 3);
        assert_eq!(best.score, 0.0);
        assert_eq!(best.offset, Offset::ZERO);
    }
}
