//! Error types for glyphmatch.

use thiserror::Error;

/// Result alias for glyphmatch operations.
pub type GlyphMatchResult<T> = std::result::Result<T, GlyphMatchError>;

/// Errors that can occur while loading templates or recognizing an image.
///
/// Recognition quality problems (no glyphs, a glyph matching nothing) are not
/// errors; they are reported in-band by the recognizer.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GlyphMatchError {
    /// The input bytes could not be decoded as a raster image.
    #[error("image decode failed: {reason}")]
    ImageDecode { reason: String },
    /// A bitmap could not be encoded or written (diagnostic output only).
    #[error("image encode failed: {reason}")]
    ImageEncode { reason: String },
    /// The template source or a configuration value is unusable.
    #[error("configuration error: {reason}")]
    Configuration { reason: String },
    /// Width or height is zero or overflows.
    #[error("invalid dimensions {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    /// Stride is smaller than the row width.
    #[error("invalid stride {stride} for width {width}")]
    InvalidStride { width: usize, stride: usize },
    /// The backing buffer is shorter than the dimensions require.
    #[error("buffer too small: needed {needed}, got {got}")]
    BufferTooSmall { needed: usize, got: usize },
    /// A crop rectangle does not fit inside its source.
    #[error("region {x},{y} {width}x{height} outside {img_width}x{img_height}")]
    RoiOutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
        img_width: usize,
        img_height: usize,
    },
    /// The input data or parameters are invalid.
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),
}

impl GlyphMatchError {
    pub(crate) fn config(reason: impl Into<String>) -> Self {
        Self::Configuration {
            reason: reason.into(),
        }
    }

    pub(crate) fn decode(reason: impl ToString) -> Self {
        Self::ImageDecode {
            reason: reason.to_string(),
        }
    }
}
