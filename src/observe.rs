//! Diagnostic hooks for the recognition pipeline.
//!
//! Observers see intermediate results after each stage. They cannot alter the
//! outcome and their failures never reach the caller.

use std::fs;
use std::path::{Path, PathBuf};

use crate::image::io::save_bitmap;
use crate::image::Bitmap;
use crate::search::MatchResult;
use crate::segment::Glyph;
use crate::trace::trace_warn;
use crate::util::{GlyphMatchError, GlyphMatchResult};

/// Receives pipeline stages as they complete. All methods default to no-ops.
pub trait RecognizeObserver: Send + Sync {
    /// Called with the binarized captcha (border already cleared).
    fn binarized(&self, _bitmap: &Bitmap) {}

    /// Called with all glyphs, left to right.
    fn segmented(&self, _glyphs: &[Glyph]) {}

    /// Called once per glyph, in left-to-right order.
    fn matched(&self, _index: usize, _glyph: &Glyph, _result: &MatchResult) {}
}

/// Writes the binarized image and every glyph as PNG files into a directory.
///
/// Files are overwritten on each call: `binarized.png` and
/// `glyph_<index>_<label>.png`.
#[derive(Clone, Debug)]
pub struct DebugDump {
    dir: PathBuf,
}

impl DebugDump {
    /// Creates the directory if needed.
    pub fn new<P: AsRef<Path>>(dir: P) -> GlyphMatchResult<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir).map_err(|err| {
            GlyphMatchError::config(format!(
                "cannot create debug directory {}: {err}",
                dir.display()
            ))
        })?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn write(&self, bitmap: &Bitmap, name: &str) {
        let path = self.dir.join(name);
        if let Err(err) = save_bitmap(bitmap, &path) {
            trace_warn!(
                "debug_dump_failed",
                path = path.display().to_string().as_str(),
                reason = err.to_string().as_str()
            );
        }
    }
}

impl RecognizeObserver for DebugDump {
    fn binarized(&self, bitmap: &Bitmap) {
        self.write(bitmap, "binarized.png");
    }

    fn matched(&self, index: usize, glyph: &Glyph, result: &MatchResult) {
        let label = file_safe(result.label.as_deref().unwrap_or("unrecognized"));
        self.write(&glyph.bitmap, &format!("glyph_{index:02}_{label}.png"));
    }
}

fn file_safe(label: &str) -> String {
    label
        .chars()
        .map(|ch| if ch.is_ascii_alphanumeric() { ch } else { '_' })
        .collect()
}
