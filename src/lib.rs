//! glyphmatch is an offline captcha recognizer built on pixel-level template
//! matching.
//!
//! An image is binarized, split into glyphs by column projection, and each
//! glyph is scored against a library of labeled reference bitmaps with a
//! shifted-overlap, harmonic-mean similarity. Matching can optionally run on
//! the rayon pool via the `rayon` feature; the `tracing` feature emits spans
//! for each stage.
//!
//! ```no_run
//! use std::sync::Arc;
//! use glyphmatch::{Recognizer, TemplateLibrary};
//!
//! let library = Arc::new(TemplateLibrary::load("templates")?);
//! let recognizer = Recognizer::new(library);
//! let text = recognizer.classify(&std::fs::read("captcha.jpg")?)?;
//! println!("{text}");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod binarize;
mod candidate;
pub mod image;
pub mod kernel;
pub mod observe;
pub mod recognize;
pub mod search;
pub mod segment;
pub mod template;
mod trace;
pub mod util;

pub use binarize::{binarize, binarize_gray, BinarizeConfig};
pub use crate::image::{Bitmap, ImageView, Pixel};
pub use observe::{DebugDump, RecognizeObserver};
pub use recognize::{classify, Recognition, RecognizedGlyph, Recognizer, RecognizerConfig};
pub use search::{match_glyph, MatchConfig, MatchResult, Matcher, Offset, UNRECOGNIZED};
pub use segment::{segment, Glyph};
pub use template::{LibraryConfig, Template, TemplateLibrary};
pub use util::{GlyphMatchError, GlyphMatchResult};
