//! Glyph classification against a template library.
//!
//! Every template is scored at every offset in `[-offset_range,
//! offset_range]^2` and the highest harmonic-mean similarity wins. Equal
//! scores resolve to the lexicographically smallest label. A glyph that
//! overlaps no template at all is reported as unrecognized.

pub(crate) mod scan;

use std::sync::Arc;

use crate::candidate::topk::{best_of, Scored, TopK};
use crate::image::Bitmap;
use crate::kernel::GlyphPlan;
use crate::template::TemplateLibrary;
use crate::trace::{trace_event, trace_span};

pub use crate::kernel::Offset;

/// Text emitted in place of a glyph that matched no template.
pub const UNRECOGNIZED: &str = "?";

/// Default half-width of the offset search window.
pub const DEFAULT_OFFSET_RANGE: usize = 3;

/// Configuration for glyph matching.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MatchConfig {
    /// Offsets `dx, dy` in `[-offset_range, offset_range]` are tried.
    pub offset_range: usize,
    /// Score templates on the rayon pool (requires the `rayon` feature;
    /// otherwise ignored). Results are identical either way.
    pub parallel: bool,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            offset_range: DEFAULT_OFFSET_RANGE,
            parallel: false,
        }
    }
}

/// Outcome of matching one glyph.
#[derive(Clone, Debug, PartialEq)]
pub struct MatchResult {
    /// Winning template label, or `None` when no template scored above zero.
    pub label: Option<String>,
    /// Similarity in `[0, 1]`.
    pub score: f32,
    /// Offset at which the winning template scored best.
    pub offset: Offset,
}

impl MatchResult {
    /// A result for a glyph that matched nothing.
    pub fn unrecognized() -> Self {
        Self {
            label: None,
            score: 0.0,
            offset: Offset::ZERO,
        }
    }

    pub fn is_recognized(&self) -> bool {
        self.label.is_some()
    }

    /// The label, or [`UNRECOGNIZED`].
    pub fn text(&self) -> &str {
        self.label.as_deref().unwrap_or(UNRECOGNIZED)
    }
}

/// Matches glyphs against a shared template library.
#[derive(Clone, Debug)]
pub struct Matcher {
    library: Arc<TemplateLibrary>,
    cfg: MatchConfig,
}

impl Matcher {
    pub fn new(library: Arc<TemplateLibrary>) -> Self {
        Self {
            library,
            cfg: MatchConfig::default(),
        }
    }

    pub fn with_config(mut self, cfg: MatchConfig) -> Self {
        self.cfg = cfg;
        self
    }

    pub fn config(&self) -> &MatchConfig {
        &self.cfg
    }

    pub fn library(&self) -> &Arc<TemplateLibrary> {
        &self.library
    }

    /// Returns the best matching template for `glyph`.
    pub fn match_glyph(&self, glyph: &Bitmap) -> MatchResult {
        best_match(glyph, &self.library, &self.cfg)
    }

    /// Returns up to `k` templates with a positive score, best first.
    pub fn match_glyph_topk(&self, glyph: &Bitmap, k: usize) -> Vec<MatchResult> {
        let _span = trace_span!("match_glyph_topk", k = k).entered();
        let plan = GlyphPlan::new(glyph);
        let mut topk = TopK::new(k);
        for scored in scan::score_templates(plan, self.library.plans(), &self.cfg) {
            if scored.best.score > 0.0 {
                topk.push(scored);
            }
        }
        topk.into_sorted_desc()
            .into_iter()
            .map(|scored| to_result(&self.library, scored))
            .collect()
    }
}

/// Matches one glyph against `library` with the given offset range.
pub fn match_glyph(glyph: &Bitmap, library: &TemplateLibrary, offset_range: usize) -> MatchResult {
    let cfg = MatchConfig {
        offset_range,
        ..MatchConfig::default()
    };
    best_match(glyph, library, &cfg)
}

fn best_match(glyph: &Bitmap, library: &TemplateLibrary, cfg: &MatchConfig) -> MatchResult {
    let _span = trace_span!(
        "match_glyph",
        width = glyph.width(),
        height = glyph.height(),
        templates = library.len()
    )
    .entered();

    let plan = GlyphPlan::new(glyph);
    let result = match best_of(scan::score_templates(plan, library.plans(), cfg)) {
        Some(scored) if scored.best.score > 0.0 => to_result(library, scored),
        _ => MatchResult::unrecognized(),
    };

    trace_event!("glyph_matched", label = result.text(), score = result.score);
    result
}

fn to_result(library: &TemplateLibrary, scored: Scored) -> MatchResult {
    let label = library
        .plans()
        .get(scored.index)
        .map(|plan| plan.label().to_owned());
    match label {
        Some(label) => MatchResult {
            label: Some(label),
            score: scored.best.score,
            offset: scored.best.offset,
        },
        None => MatchResult::unrecognized(),
    }
}
