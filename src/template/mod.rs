//! Labeled reference glyphs and their precomputed scoring plans.

use crate::image::Bitmap;
use crate::util::{GlyphMatchError, GlyphMatchResult};

mod library;
mod plan;

pub use library::{LibraryConfig, TemplateLibrary, DEFAULT_EXTENSIONS, TEMPLATE_THRESHOLD};
pub use plan::TemplatePlan;

/// A reference glyph bitmap with its label.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Template {
    label: String,
    bitmap: Bitmap,
}

impl Template {
    /// Creates a template; the label must be non-empty.
    pub fn new(label: impl Into<String>, bitmap: Bitmap) -> GlyphMatchResult<Self> {
        let label = label.into();
        if label.is_empty() {
            return Err(GlyphMatchError::InvalidInput("template label is empty"));
        }
        Ok(Self { label, bitmap })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn bitmap(&self) -> &Bitmap {
        &self.bitmap
    }
}
