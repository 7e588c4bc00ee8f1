//! End-to-end captcha recognition.
//!
//! `Recognizer` runs binarization, segmentation and per-glyph matching and
//! concatenates the winning labels left to right. The template library is
//! injected as a shared handle; nothing here touches the filesystem except an
//! attached [`DebugDump`](crate::observe::DebugDump) observer.

use std::ops::Range;
use std::sync::Arc;

use crate::binarize::{binarize, BinarizeConfig};
use crate::image::Bitmap;
use crate::observe::RecognizeObserver;
use crate::search::{MatchConfig, MatchResult, Matcher};
use crate::segment::{segment, Glyph};
use crate::template::TemplateLibrary;
use crate::trace::{trace_event, trace_span};
use crate::util::GlyphMatchResult;

/// Configuration for the full pipeline.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RecognizerConfig {
    pub binarize: BinarizeConfig,
    /// Also controls glyph-level parallelism via `parallel`.
    pub matching: MatchConfig,
}

/// One recognized glyph with its position in the captcha.
#[derive(Clone, Debug, PartialEq)]
pub struct RecognizedGlyph {
    pub columns: Range<usize>,
    pub rows: Range<usize>,
    /// Cropped glyph pixels as they were matched.
    pub bitmap: Bitmap,
    pub result: MatchResult,
}

/// Full recognition output.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Recognition {
    /// Concatenated labels; empty when no glyph was found.
    pub text: String,
    pub glyphs: Vec<RecognizedGlyph>,
}

impl Recognition {
    /// True when every glyph matched a template.
    pub fn is_complete(&self) -> bool {
        self.glyphs.iter().all(|g| g.result.is_recognized())
    }
}

/// Captcha recognizer over a shared, read-only template library.
#[derive(Clone)]
pub struct Recognizer {
    matcher: Matcher,
    binarize: BinarizeConfig,
    observer: Option<Arc<dyn RecognizeObserver>>,
}

impl Recognizer {
    pub fn new(library: Arc<TemplateLibrary>) -> Self {
        Self {
            matcher: Matcher::new(library),
            binarize: BinarizeConfig::default(),
            observer: None,
        }
    }

    pub fn with_config(mut self, cfg: RecognizerConfig) -> Self {
        self.binarize = cfg.binarize;
        self.matcher = self.matcher.with_config(cfg.matching);
        self
    }

    /// Attaches a diagnostic observer.
    pub fn with_observer(mut self, observer: Arc<dyn RecognizeObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn config(&self) -> RecognizerConfig {
        RecognizerConfig {
            binarize: self.binarize,
            matching: *self.matcher.config(),
        }
    }

    pub fn library(&self) -> &Arc<TemplateLibrary> {
        self.matcher.library()
    }

    pub fn matcher(&self) -> &Matcher {
        &self.matcher
    }

    /// Decodes, binarizes and recognizes an encoded captcha image.
    ///
    /// Fails only when the bytes are not a decodable image.
    pub fn classify(&self, bytes: &[u8]) -> GlyphMatchResult<String> {
        Ok(self.recognize(bytes)?.text)
    }

    /// Like [`classify`](Self::classify) but keeps per-glyph results.
    pub fn recognize(&self, bytes: &[u8]) -> GlyphMatchResult<Recognition> {
        let _span = trace_span!("classify", bytes = bytes.len()).entered();
        let bitmap = binarize(bytes, self.binarize.threshold)?;
        if let Some(observer) = &self.observer {
            observer.binarized(&bitmap);
        }
        self.recognize_bitmap(&bitmap)
    }

    /// Recognizes an already binarized bitmap.
    pub fn classify_bitmap(&self, bitmap: &Bitmap) -> GlyphMatchResult<String> {
        Ok(self.recognize_bitmap(bitmap)?.text)
    }

    /// Segments and matches an already binarized bitmap.
    pub fn recognize_bitmap(&self, bitmap: &Bitmap) -> GlyphMatchResult<Recognition> {
        let glyphs = segment(bitmap)?;
        if let Some(observer) = &self.observer {
            observer.segmented(&glyphs);
        }

        let results = self.match_all(&glyphs);
        let mut recognition = Recognition::default();
        for (index, (glyph, result)) in glyphs.into_iter().zip(results).enumerate() {
            if let Some(observer) = &self.observer {
                observer.matched(index, &glyph, &result);
            }
            recognition.text.push_str(result.text());
            recognition.glyphs.push(RecognizedGlyph {
                columns: glyph.columns,
                rows: glyph.rows,
                bitmap: glyph.bitmap,
                result,
            });
        }

        trace_event!(
            "recognized",
            text = recognition.text.as_str(),
            glyphs = recognition.glyphs.len()
        );
        Ok(recognition)
    }

    fn match_all(&self, glyphs: &[Glyph]) -> Vec<MatchResult> {
        #[cfg(feature = "rayon")]
        if self.matcher.config().parallel {
            use rayon::prelude::*;
            return glyphs
                .par_iter()
                .map(|glyph| self.matcher.match_glyph(&glyph.bitmap))
                .collect();
        }

        glyphs
            .iter()
            .map(|glyph| self.matcher.match_glyph(&glyph.bitmap))
            .collect()
    }
}

/// One-shot recognition with default configuration.
///
/// Callers classifying many images should build a [`Recognizer`] once.
pub fn classify(bytes: &[u8], library: &Arc<TemplateLibrary>) -> GlyphMatchResult<String> {
    Recognizer::new(Arc::clone(library)).classify(bytes)
}
