//! Library scans: one offset search per template.

use crate::candidate::topk::Scored;
use crate::kernel::scalar::OverlapScalar;
use crate::kernel::{GlyphPlan, Kernel};
use crate::search::MatchConfig;
use crate::template::TemplatePlan;

/// Scores every plan against `glyph`, in library order.
pub(crate) fn score_templates(
    glyph: GlyphPlan<'_>,
    plans: &[TemplatePlan],
    cfg: &MatchConfig,
) -> Vec<Scored> {
    #[cfg(feature = "rayon")]
    if cfg.parallel {
        return crate::kernel::rayon::score_templates_par::<OverlapScalar>(
            glyph,
            plans,
            cfg.offset_range,
        );
    }

    plans
        .iter()
        .enumerate()
        .map(|(index, tpl)| Scored {
            index,
            best: OverlapScalar::best_offset(glyph, tpl, cfg.offset_range),
        })
        .collect()
}
