//! Owned 1-bit bitmaps.

use std::fmt;

use crate::image::ImageView;
use crate::util::{GlyphMatchError, GlyphMatchResult};

/// One bitmap cell: ink or paper.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Pixel {
    /// Light pixel.
    #[default]
    Background,
    /// Dark pixel (ink).
    Foreground,
}

impl Pixel {
    #[inline]
    pub fn is_ink(self) -> bool {
        self == Pixel::Foreground
    }
}

/// Row-major binary image with positive dimensions.
#[derive(Clone, PartialEq, Eq)]
pub struct Bitmap {
    data: Vec<Pixel>,
    width: usize,
    height: usize,
}

impl Bitmap {
    /// Creates an all-background bitmap.
    pub fn blank(width: usize, height: usize) -> GlyphMatchResult<Self> {
        let len = checked_area(width, height)?;
        Ok(Self {
            data: vec![Pixel::Background; len],
            width,
            height,
        })
    }

    /// Wraps a row-major pixel buffer of exactly `width * height` cells.
    pub fn from_pixels(data: Vec<Pixel>, width: usize, height: usize) -> GlyphMatchResult<Self> {
        let needed = checked_area(width, height)?;
        if data.len() < needed {
            return Err(GlyphMatchError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        if data.len() > needed {
            return Err(GlyphMatchError::InvalidDimensions { width, height });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Builds a bitmap by evaluating `f(x, y)` for every cell.
    pub fn from_fn<F>(width: usize, height: usize, mut f: F) -> GlyphMatchResult<Self>
    where
        F: FnMut(usize, usize) -> Pixel,
    {
        let len = checked_area(width, height)?;
        let mut data = Vec::with_capacity(len);
        for y in 0..height {
            for x in 0..width {
                data.push(f(x, y));
            }
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Parses a drawing where `#` marks ink and `.` marks background.
    ///
    /// Blank lines and surrounding whitespace are ignored; every remaining
    /// line must have the same length.
    pub fn from_ascii(text: &str) -> GlyphMatchResult<Self> {
        let rows: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        let height = rows.len();
        let width = rows.first().map_or(0, |row| row.chars().count());
        let mut data = Vec::with_capacity(width * height);
        for row in &rows {
            if row.chars().count() != width {
                return Err(GlyphMatchError::InvalidInput("ragged bitmap rows"));
            }
            for ch in row.chars() {
                data.push(match ch {
                    '#' => Pixel::Foreground,
                    '.' => Pixel::Background,
                    _ => return Err(GlyphMatchError::InvalidInput("expected '#' or '.'")),
                });
            }
        }
        Self::from_pixels(data, width, height)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the row-major pixel buffer.
    pub fn pixels(&self) -> &[Pixel] {
        &self.data
    }

    /// Returns the pixel at `(x, y)` if it is within bounds.
    pub fn get(&self, x: usize, y: usize) -> Option<Pixel> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.data[y * self.width + x])
    }

    /// Returns true when `(x, y)` is inside the bitmap and inked.
    ///
    /// Signed coordinates let callers test shifted positions without
    /// pre-clipping.
    #[inline]
    pub fn is_ink_at(&self, x: isize, y: isize) -> bool {
        if x < 0 || y < 0 {
            return false;
        }
        self.get(x as usize, y as usize).is_some_and(Pixel::is_ink)
    }

    /// Sets the pixel at `(x, y)`; out-of-bounds writes are ignored.
    pub fn set(&mut self, x: usize, y: usize, pixel: Pixel) {
        if x < self.width && y < self.height {
            self.data[y * self.width + x] = pixel;
        }
    }

    /// Borrowed view over the whole bitmap.
    pub fn view(&self) -> ImageView<'_, Pixel> {
        ImageView {
            data: &self.data,
            width: self.width,
            height: self.height,
            stride: self.width,
        }
    }

    /// Copies the rectangle at `(x, y)` into a new bitmap.
    pub fn crop(&self, x: usize, y: usize, width: usize, height: usize) -> GlyphMatchResult<Self> {
        let roi = self.view().roi(x, y, width, height)?;
        Ok(Self {
            data: roi.to_vec(),
            width,
            height,
        })
    }

    /// Total number of ink pixels.
    pub fn ink_count(&self) -> usize {
        self.data.iter().filter(|p| p.is_ink()).count()
    }

    /// Iterates over ink coordinates in row-major order.
    pub fn ink_points(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let width = self.width;
        self.data
            .iter()
            .enumerate()
            .filter(|(_, p)| p.is_ink())
            .map(move |(idx, _)| (idx % width, idx / width))
    }
}

impl fmt::Debug for Bitmap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Bitmap {}x{}", self.width, self.height)?;
        fmt::Display::fmt(self, f)
    }
}

impl fmt::Display for Bitmap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.data.chunks(self.width) {
            for pixel in row {
                f.write_str(if pixel.is_ink() { "#" } else { "." })?;
            }
            f.write_str("\n")?;
        }
        Ok(())
    }
}

fn checked_area(width: usize, height: usize) -> GlyphMatchResult<usize> {
    if width == 0 || height == 0 {
        return Err(GlyphMatchError::InvalidDimensions { width, height });
    }
    width
        .checked_mul(height)
        .ok_or(GlyphMatchError::InvalidDimensions { width, height })
}

#[cfg(test)]
mod tests {
    use super::{Bitmap, Pixel};
    use crate::util::GlyphMatchError;

    #[test]
    fn ascii_round_trips_through_display() {
        let art = "\
            .#.
            ###
        ";
        let bitmap = Bitmap::from_ascii(art).unwrap();
        assert_eq!((bitmap.width(), bitmap.height()), (3, 2));
        assert_eq!(bitmap.ink_count(), 4);
        assert_eq!(bitmap.to_string(), ".#.\n###\n");
    }

    #[test]
    fn ascii_rejects_ragged_rows() {
        let err = Bitmap::from_ascii("##\n#").unwrap_err();
        assert_eq!(err, GlyphMatchError::InvalidInput("ragged bitmap rows"));
    }

    #[test]
    fn empty_ascii_is_invalid_dimensions() {
        let err = Bitmap::from_ascii("\n  \n").unwrap_err();
        assert_eq!(
            err,
            GlyphMatchError::InvalidDimensions {
                width: 0,
                height: 0
            }
        );
    }

    #[test]
    fn signed_lookup_is_false_outside() {
        let bitmap = Bitmap::from_fn(2, 2, |_, _| Pixel::Foreground).unwrap();
        assert!(bitmap.is_ink_at(1, 1));
        assert!(!bitmap.is_ink_at(-1, 0));
        assert!(!bitmap.is_ink_at(0, 2));
    }

    #[test]
    fn crop_copies_region() {
        let bitmap = Bitmap::from_ascii(
            "
            ....
            .##.
            .#..
            ",
        )
        .unwrap();
        let crop = bitmap.crop(1, 1, 2, 2).unwrap();
        assert_eq!(crop.to_string(), "##\n#.\n");
        let points: Vec<_> = crop.ink_points().collect();
        assert_eq!(points, vec![(0, 0), (1, 0), (0, 1)]);
    }
}
