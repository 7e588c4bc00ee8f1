//! Image views and binary bitmaps.
//!
//! `ImageView` is a borrowed 2D view into a 1D buffer with an explicit stride,
//! used for grayscale input (`u8`) and for bitmap crops (`Pixel`). The stride
//! counts elements between the starts of consecutive rows; ROI slices are
//! zero-copy and retain the original stride.

use crate::util::{GlyphMatchError, GlyphMatchResult};

mod bitmap;
pub mod io;

pub use bitmap::{Bitmap, Pixel};

/// Borrowed 2D image view with an explicit stride.
#[derive(Copy, Clone, Debug)]
pub struct ImageView<'a, T> {
    data: &'a [T],
    width: usize,
    height: usize,
    stride: usize,
}

impl<'a, T> ImageView<'a, T> {
    /// Creates a contiguous view with `stride == width`.
    pub fn from_slice(data: &'a [T], width: usize, height: usize) -> GlyphMatchResult<Self> {
        Self::new(data, width, height, width)
    }

    /// Creates a view with an explicit stride.
    pub fn new(data: &'a [T], width: usize, height: usize, stride: usize) -> GlyphMatchResult<Self> {
        let needed = required_len(width, height, stride)?;
        if data.len() < needed {
            return Err(GlyphMatchError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
            stride,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Returns the element at `(x, y)` if it is within bounds.
    pub fn get(&self, x: usize, y: usize) -> Option<&'a T> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data.get(y * self.stride + x)
    }

    /// Returns row `y` as a slice of length `width`.
    pub fn row(&self, y: usize) -> Option<&'a [T]> {
        if y >= self.height {
            return None;
        }
        let start = y * self.stride;
        self.data.get(start..start + self.width)
    }

    /// Iterates over rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &'a [T]> + '_ {
        (0..self.height).filter_map(move |y| self.row(y))
    }

    /// Returns a zero-copy view of the rectangle at `(x, y)` of size `width x height`.
    pub fn roi(
        &self,
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    ) -> GlyphMatchResult<ImageView<'a, T>> {
        if width == 0 || height == 0 {
            return Err(GlyphMatchError::InvalidDimensions { width, height });
        }
        let out_of_bounds = GlyphMatchError::RoiOutOfBounds {
            x,
            y,
            width,
            height,
            img_width: self.width,
            img_height: self.height,
        };
        let fits = x
            .checked_add(width)
            .zip(y.checked_add(height))
            .is_some_and(|(end_x, end_y)| end_x <= self.width && end_y <= self.height);
        if !fits {
            return Err(out_of_bounds);
        }

        let start = y * self.stride + x;
        let data = self.data.get(start..).ok_or(out_of_bounds)?;
        ImageView::new(data, width, height, self.stride)
    }
}

impl<T: Copy> ImageView<'_, T> {
    /// Copies the view into a contiguous row-major buffer.
    pub fn to_vec(&self) -> Vec<T> {
        let mut out = Vec::with_capacity(self.width * self.height);
        for row in self.rows() {
            out.extend_from_slice(row);
        }
        out
    }
}

fn required_len(width: usize, height: usize, stride: usize) -> GlyphMatchResult<usize> {
    if width == 0 || height == 0 {
        return Err(GlyphMatchError::InvalidDimensions { width, height });
    }
    if stride < width {
        return Err(GlyphMatchError::InvalidStride { width, stride });
    }
    (height - 1)
        .checked_mul(stride)
        .and_then(|v| v.checked_add(width))
        .ok_or(GlyphMatchError::InvalidDimensions { width, height })
}
