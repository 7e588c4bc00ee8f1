//! Template libraries loaded from a directory of reference images.
//!
//! Each image file becomes one template labeled by its file stem. Templates
//! are kept in lexicographic label order, which is also the tie-break order
//! used by the matcher. A library is immutable once built and can be shared
//! across threads behind an `Arc`.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::binarize::threshold_gray;
use crate::image::io::{gray_view, load_gray};
use crate::template::{Template, TemplatePlan};
use crate::trace::{trace_event, trace_span, trace_warn};
use crate::util::{GlyphMatchError, GlyphMatchResult};

/// Luminance cutoff for template images, independent of the captcha threshold.
pub const TEMPLATE_THRESHOLD: u8 = 128;

/// File extensions recognized as template images (compared case-insensitively).
pub const DEFAULT_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "gif"];

/// Configuration for loading templates from disk.
#[derive(Clone, Debug)]
pub struct LibraryConfig {
    /// Pixels with luminance below this value become template ink.
    pub threshold: u8,
    /// Extensions of files to load.
    pub extensions: Vec<String>,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            threshold: TEMPLATE_THRESHOLD,
            extensions: DEFAULT_EXTENSIONS.iter().map(|ext| ext.to_string()).collect(),
        }
    }
}

impl LibraryConfig {
    fn accepts(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                self.extensions
                    .iter()
                    .any(|known| known.eq_ignore_ascii_case(ext))
            })
    }
}

/// Immutable, non-empty set of templates with distinct labels.
#[derive(Clone, Debug)]
pub struct TemplateLibrary {
    templates: BTreeMap<String, Template>,
    plans: Vec<TemplatePlan>,
}

impl TemplateLibrary {
    /// Loads every template image in `dir` with the default configuration.
    pub fn load<P: AsRef<Path>>(dir: P) -> GlyphMatchResult<Self> {
        Self::load_with(dir, &LibraryConfig::default())
    }

    /// Loads every template image in `dir`.
    ///
    /// Files that fail to decode are skipped. A missing directory, or one with
    /// no usable template, is a configuration error.
    pub fn load_with<P: AsRef<Path>>(dir: P, cfg: &LibraryConfig) -> GlyphMatchResult<Self> {
        let dir = dir.as_ref();
        let _span = trace_span!("load_templates", dir = dir.display().to_string().as_str()).entered();

        if cfg.extensions.is_empty() {
            return Err(GlyphMatchError::config("no template extensions configured"));
        }
        let entries = fs::read_dir(dir).map_err(|err| {
            GlyphMatchError::config(format!(
                "cannot read template directory {}: {err}",
                dir.display()
            ))
        })?;

        let mut templates = Vec::new();
        for entry in entries {
            let path = entry
                .map_err(|err| {
                    GlyphMatchError::config(format!(
                        "cannot list template directory {}: {err}",
                        dir.display()
                    ))
                })?
                .path();
            if !path.is_file() || !cfg.accepts(&path) {
                continue;
            }
            let Some(label) = path.file_stem().and_then(|stem| stem.to_str()) else {
                trace_warn!("template_skipped", reason = "non-utf8 file name");
                continue;
            };
            let bitmap = match load_gray(&path)
                .and_then(|gray| threshold_gray(gray_view(&gray)?, cfg.threshold))
            {
                Ok(bitmap) => bitmap,
                Err(err) => {
                    trace_warn!(
                        "template_skipped",
                        path = path.display().to_string().as_str(),
                        reason = err.to_string().as_str()
                    );
                    continue;
                }
            };
            templates.push(Template::new(label, bitmap)?);
        }

        if templates.is_empty() {
            return Err(GlyphMatchError::config(format!(
                "no usable template images in {}",
                dir.display()
            )));
        }
        let library = Self::from_templates(templates)?;
        trace_event!("templates_loaded", count = library.len());
        Ok(library)
    }

    /// Builds a library from in-memory templates.
    pub fn from_templates<I>(templates: I) -> GlyphMatchResult<Self>
    where
        I: IntoIterator<Item = Template>,
    {
        let mut map = BTreeMap::new();
        for tpl in templates {
            let label = tpl.label().to_owned();
            if map.insert(label.clone(), tpl).is_some() {
                return Err(GlyphMatchError::config(format!(
                    "duplicate template label {label:?}"
                )));
            }
        }
        if map.is_empty() {
            return Err(GlyphMatchError::config("template library is empty"));
        }
        let plans = map.values().map(TemplatePlan::from_template).collect();
        Ok(Self {
            templates: map,
            plans,
        })
    }

    /// Number of templates (always at least one).
    pub fn len(&self) -> usize {
        self.plans.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.plans.is_empty()
    }

    /// Looks up a template by label.
    pub fn get(&self, label: &str) -> Option<&Template> {
        self.templates.get(label)
    }

    /// Labels in lexicographic order.
    pub fn labels(&self) -> impl Iterator<Item = &str> + '_ {
        self.templates.keys().map(String::as_str)
    }

    /// Templates in lexicographic label order.
    pub fn templates(&self) -> impl Iterator<Item = &Template> + '_ {
        self.templates.values()
    }

    /// Scoring plans in lexicographic label order.
    pub fn plans(&self) -> &[TemplatePlan] {
        &self.plans
    }
}
