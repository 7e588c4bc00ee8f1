//! Rayon-parallel template scoring (feature-gated).
//!
//! Templates are scored independently, so the library is split across worker
//! threads; each template's offset search stays sequential. `collect` keeps
//! library order, which the ranking relies on for tie-breaks.

use rayon::prelude::*;

use crate::candidate::topk::Scored;
use crate::kernel::{GlyphPlan, Kernel};
use crate::template::TemplatePlan;

/// Scores every plan against `glyph` in parallel.
pub(crate) fn score_templates_par<K: Kernel>(
    glyph: GlyphPlan<'_>,
    plans: &[TemplatePlan],
    range: usize,
) -> Vec<Scored> {
    plans
        .par_iter()
        .enumerate()
        .map(|(index, tpl)| Scored {
            index,
            best: K::best_offset(glyph, tpl, range),
        })
        .collect()
}
