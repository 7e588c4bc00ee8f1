use clap::Parser;
use glyphmatch::{
    BinarizeConfig, DebugDump, LibraryConfig, MatchConfig, MatchResult, Recognition, Recognizer,
    RecognizerConfig, TemplateLibrary,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

const SCHEMA_JSON: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.schema.json"));
const EXAMPLE_JSON: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.example.json"));

#[derive(Parser, Debug)]
#[command(author, version, about = "Captcha recognizer (JSON config driven)")]
struct Cli {
    /// Path to the JSON configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "config.json")]
    config: PathBuf,
    /// Extra images to classify, appended to the config's `images`.
    #[arg(value_name = "IMAGE")]
    images: Vec<PathBuf>,
    /// Print the JSON schema and exit.
    #[arg(long)]
    print_schema: bool,
    /// Print an example config and exit.
    #[arg(long)]
    print_example: bool,
    /// Enable tracing output.
    #[arg(long)]
    trace: bool,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct TemplatesJson {
    threshold: u8,
    extensions: Vec<String>,
}

impl Default for TemplatesJson {
    fn default() -> Self {
        let cfg = LibraryConfig::default();
        Self {
            threshold: cfg.threshold,
            extensions: cfg.extensions,
        }
    }
}

impl From<TemplatesJson> for LibraryConfig {
    fn from(value: TemplatesJson) -> Self {
        Self {
            threshold: value.threshold,
            extensions: value.extensions,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct BinarizeJson {
    threshold: u8,
}

impl Default for BinarizeJson {
    fn default() -> Self {
        Self {
            threshold: BinarizeConfig::default().threshold,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct MatchJson {
    offset_range: usize,
    parallel: bool,
}

impl Default for MatchJson {
    fn default() -> Self {
        let cfg = MatchConfig::default();
        Self {
            offset_range: cfg.offset_range,
            parallel: cfg.parallel,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct Config {
    templates_dir: String,
    images: Vec<PathBuf>,
    output_path: Option<String>,
    debug_dir: Option<PathBuf>,
    expected_length: Option<usize>,
    topk: usize,
    templates: TemplatesJson,
    binarize: BinarizeJson,
    #[serde(rename = "match")]
    match_cfg: MatchJson,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            templates_dir: String::new(),
            images: Vec::new(),
            output_path: None,
            debug_dir: None,
            expected_length: None,
            topk: 1,
            templates: TemplatesJson::default(),
            binarize: BinarizeJson::default(),
            match_cfg: MatchJson::default(),
        }
    }
}

#[derive(Debug, Serialize)]
struct CandidateRecord {
    label: Option<String>,
    score: f32,
    dx: isize,
    dy: isize,
}

impl From<&MatchResult> for CandidateRecord {
    fn from(value: &MatchResult) -> Self {
        Self {
            label: value.label.clone(),
            score: value.score,
            dx: value.offset.dx,
            dy: value.offset.dy,
        }
    }
}

#[derive(Debug, Serialize)]
struct GlyphRecord {
    columns: [usize; 2],
    rows: [usize; 2],
    best: CandidateRecord,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    alternatives: Vec<CandidateRecord>,
}

#[derive(Debug, Serialize)]
struct ImageRecord {
    image: String,
    text: String,
    accepted: Option<bool>,
    glyphs: Vec<GlyphRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Debug, Serialize)]
struct Output {
    templates: usize,
    results: Vec<ImageRecord>,
}

fn image_record(
    recognizer: &Recognizer,
    image: String,
    recognition: Recognition,
    cfg: &Config,
) -> ImageRecord {
    let glyphs = recognition
        .glyphs
        .iter()
        .map(|glyph| {
            let alternatives = if cfg.topk > 1 {
                recognizer
                    .matcher()
                    .match_glyph_topk(&glyph.bitmap, cfg.topk)
                    .iter()
                    .map(CandidateRecord::from)
                    .collect()
            } else {
                Vec::new()
            };
            GlyphRecord {
                columns: [glyph.columns.start, glyph.columns.end],
                rows: [glyph.rows.start, glyph.rows.end],
                best: CandidateRecord::from(&glyph.result),
                alternatives,
            }
        })
        .collect();
    let accepted = cfg
        .expected_length
        .map(|len| recognition.text.chars().count() == len);
    ImageRecord {
        image,
        text: recognition.text,
        accepted,
        glyphs,
        error: None,
    }
}

/// Reads and recognizes one image; failures are recorded, not propagated.
fn classify_path(recognizer: &Recognizer, path: &Path, cfg: &Config) -> ImageRecord {
    let image = path.display().to_string();
    let outcome = fs::read(path)
        .map_err(|err| err.to_string())
        .and_then(|bytes| recognizer.recognize(&bytes).map_err(|err| err.to_string()));
    match outcome {
        Ok(recognition) => {
            tracing::info!(image = %image, text = %recognition.text, "classified");
            image_record(recognizer, image, recognition, cfg)
        }
        Err(reason) => {
            tracing::warn!(image = %image, error = %reason, "image skipped");
            ImageRecord {
                image,
                text: String::new(),
                accepted: cfg.expected_length.map(|_| false),
                glyphs: Vec::new(),
                error: Some(reason),
            }
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.trace {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive("glyphmatch=info".parse()?),
            )
            .with_target(false)
            .init();
    }

    if cli.print_schema {
        println!("{SCHEMA_JSON}");
        return Ok(());
    }
    if cli.print_example {
        println!("{EXAMPLE_JSON}");
        return Ok(());
    }

    let config_text = fs::read_to_string(&cli.config)?;
    let mut config: Config = serde_json::from_str(&config_text)?;
    config.images.extend(cli.images);
    if config.templates_dir.is_empty() {
        return Err("templates_dir must be set in the config".into());
    }
    if config.images.is_empty() {
        return Err("no images given in the config or on the command line".into());
    }

    let library_cfg: LibraryConfig = std::mem::take(&mut config.templates).into();
    let library = Arc::new(TemplateLibrary::load_with(
        &config.templates_dir,
        &library_cfg,
    )?);
    let mut recognizer = Recognizer::new(Arc::clone(&library)).with_config(RecognizerConfig {
        binarize: BinarizeConfig {
            threshold: config.binarize.threshold,
        },
        matching: MatchConfig {
            offset_range: config.match_cfg.offset_range,
            parallel: config.match_cfg.parallel,
        },
    });
    if let Some(dir) = &config.debug_dir {
        recognizer = recognizer.with_observer(Arc::new(DebugDump::new(dir)?));
    }

    let results: Vec<ImageRecord> = config
        .images
        .iter()
        .map(|path| classify_path(&recognizer, path, &config))
        .collect();

    let output = Output {
        templates: library.len(),
        results,
    };
    let json = serde_json::to_string_pretty(&output)?;
    match &config.output_path {
        Some(path) => fs::write(path, json)?,
        None => println!("{json}"),
    }

    Ok(())
}
