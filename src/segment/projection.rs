//! Projection profiles and run detection over them.

use std::ops::Range;

use crate::image::{ImageView, Pixel};

/// Counts at or below this value are treated as noise, not ink.
pub const NOISE_LEVEL: usize = 1;

/// Ink count per column.
pub fn column_ink(view: ImageView<'_, Pixel>) -> Vec<usize> {
    let mut counts = vec![0usize; view.width()];
    for row in view.rows() {
        for (count, pixel) in counts.iter_mut().zip(row) {
            *count += usize::from(pixel.is_ink());
        }
    }
    counts
}

/// Ink count per row.
pub fn row_ink(view: ImageView<'_, Pixel>) -> Vec<usize> {
    view.rows()
        .map(|row| row.iter().filter(|p| p.is_ink()).count())
        .collect()
}

/// Returns the half-open index ranges where `profile` stays above [`NOISE_LEVEL`].
///
/// A run still open at the end of the profile closes at `profile.len()`.
pub fn find_regions(profile: &[usize]) -> Vec<Range<usize>> {
    let mut regions = Vec::new();
    let mut start = None;
    for (idx, &count) in profile.iter().enumerate() {
        let inked = count > NOISE_LEVEL;
        match (start, inked) {
            (None, true) => start = Some(idx),
            (Some(begin), false) => {
                regions.push(begin..idx);
                start = None;
            }
            _ => {}
        }
    }
    if let Some(begin) = start {
        regions.push(begin..profile.len());
    }
    regions
}

/// Half-open span from the first to the last entry above [`NOISE_LEVEL`],
/// or `None` when no entry qualifies.
pub fn content_span(profile: &[usize]) -> Option<Range<usize>> {
    let top = profile.iter().position(|&count| count > NOISE_LEVEL)?;
    let bottom = profile.iter().rposition(|&count| count > NOISE_LEVEL)?;
    Some(top..bottom + 1)
}
