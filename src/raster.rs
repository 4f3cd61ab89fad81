//! Raster and pixel value types.
//!
//! A [`Raster`] is an owned, row-major grid of [`Rgb`] pixels. The index
//! arithmetic lives in exactly one private function so that no other module
//! has to reason about the layout. [`PixelIndex`] addresses a pixel by
//! `(row, column)` and is the unit of the seed sets and of the returned
//! object mask.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::SegmentationError;

/// A 24-bit RGB pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb {
    /// Pure black.
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    /// Pure white.
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    /// Create a pixel from its channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Intensity of the pixel, defined as the maximum channel value.
    pub fn intensity(self) -> u8 {
        self.r.max(self.g).max(self.b)
    }
}

/// A `(row, column)` position in a raster. Equality and hashing are by value.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct PixelIndex {
    /// Row, counted from the top.
    pub i: usize,
    /// Column, counted from the left.
    pub j: usize,
}

impl PixelIndex {
    /// Create an index from row `i` and column `j`.
    pub const fn new(i: usize, j: usize) -> Self {
        Self { i, j }
    }
}

impl fmt::Display for PixelIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.i, self.j)
    }
}

/// Which of the two operator seed sets a value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SeedLabel {
    /// Pixels the operator marked as object.
    Object,
    /// Pixels the operator marked as background.
    Background,
}

impl fmt::Display for SeedLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeedLabel::Object => write!(f, "object"),
            SeedLabel::Background => write!(f, "background"),
        }
    }
}

/// An owned row-major grid of RGB pixels.
///
/// Constructors validate that both dimensions are positive and that all rows
/// have equal length, so a `Raster` in hand is always well formed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    width: usize,
    height: usize,
    pixels: Vec<Rgb>,
}

impl Raster {
    /// Create a raster of the given dimensions with every pixel set to
    /// `fill`.
    pub fn filled(width: usize, height: usize, fill: Rgb) -> Result<Self, SegmentationError> {
        if width == 0 || height == 0 {
            return Err(SegmentationError::InvalidRaster { width, height });
        }
        Ok(Self {
            width,
            height,
            pixels: vec![fill; width * height],
        })
    }

    /// Build a raster from rows of pixels, e.g. as produced by an image
    /// loader. Fails with `InvalidRaster` if there are no rows, no columns,
    /// or the rows are ragged.
    pub fn from_rows(rows: Vec<Vec<Rgb>>) -> Result<Self, SegmentationError> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if width == 0 || height == 0 || rows.iter().any(|row| row.len() != width) {
            return Err(SegmentationError::InvalidRaster { width, height });
        }
        let mut pixels = Vec::with_capacity(width * height);
        for row in rows {
            pixels.extend(row);
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    // The one and only place that maps (i, j) onto the flat buffer.
    fn offset(&self, index: PixelIndex) -> usize {
        index.i * self.width + index.j
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Whether `index` lies inside the raster.
    pub fn contains(&self, index: PixelIndex) -> bool {
        index.i < self.height && index.j < self.width
    }

    /// The pixel at `index`, or `None` if the index is out of range.
    pub fn get(&self, index: PixelIndex) -> Option<Rgb> {
        if self.contains(index) {
            Some(self.pixels[self.offset(index)])
        } else {
            None
        }
    }

    /// Overwrite the pixel at `index`.
    pub fn set(&mut self, index: PixelIndex, color: Rgb) -> Result<(), SegmentationError> {
        if !self.contains(index) {
            return Err(SegmentationError::IndexOutOfRange {
                index,
                width: self.width,
                height: self.height,
            });
        }
        let offset = self.offset(index);
        self.pixels[offset] = color;
        Ok(())
    }

    /// Intensities of all pixels in row-major order.
    ///
    /// The segmentation builder keeps this sibling array instead of storing a
    /// color inside every graph vertex.
    pub fn intensities(&self) -> Vec<u8> {
        self.pixels.iter().map(|p| p.intensity()).collect()
    }
}
