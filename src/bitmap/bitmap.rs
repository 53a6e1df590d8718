use std::fmt;
use std::ops::Index;

use crate::{Error, Result};

/// The pixel value sprites use for "no color here". It sits just above the 16 palette colors and
/// occupies bit 4, so it never collides with a color bit.
pub const TRANSPARENT: u8 = 16;

/// The highest palette color index.
pub const MAX_COLOR: u8 = 15;

/// A palette-indexed image.
///
/// Pixels are stored row by row, `width * height` of them. Each pixel is an index into the
/// [`Palette`], or [`TRANSPARENT`] for sprites. The buffer always holds exactly `width * height`
/// pixels.
///
/// [`Palette`]: crate::Palette
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Image {
    width: u16,
    height: u16,
    pixels: Vec<u8>,
}

impl Image {
    /// Creates an image filled with color 0.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    pub fn new(width: u16, height: u16) -> Self {
        assert!(width > 0 && height > 0, "empty image");

        Self {
            width,
            height,
            pixels: vec![0; usize::from(width) * usize::from(height)],
        }
    }

    /// Wraps an existing pixel buffer.
    ///
    /// # Errors
    ///
    /// It is an error if the buffer doesn't hold exactly `width * height` pixels.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    pub fn from_pixels(width: u16, height: u16, pixels: Vec<u8>) -> Result<Self> {
        assert!(width > 0 && height > 0, "empty image");

        let expected = usize::from(width) * usize::from(height);
        if pixels.len() != expected {
            return Err(Error::BufferLength {
                expected,
                actual: pixels.len(),
            });
        }

        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u16 {
        self.height
    }

    /// All of the pixels, row by row.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Consumes the image and returns its pixel buffer.
    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    /// Iterates over the image one row at a time.
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        self.pixels.chunks_exact(self.width.into())
    }

    /// Reads a pixel. Returns `None` if `(x, y)` is outside the image.
    pub fn get(&self, x: usize, y: usize) -> Option<u8> {
        self.offset(x, y).map(|offset| self.pixels[offset])
    }

    /// Gets a mutable reference to a pixel. Returns `None` if `(x, y)` is outside the image.
    pub fn get_mut(&mut self, x: usize, y: usize) -> Option<&mut u8> {
        let offset = self.offset(x, y)?;
        Some(&mut self.pixels[offset])
    }

    /// Returns `true` if the pixel at `(x, y)` has its transparency bit set. Pixels outside the
    /// image aren't transparent.
    pub fn is_transparent(&self, x: usize, y: usize) -> bool {
        self.get(x, y)
            .map_or(false, |pixel| pixel & TRANSPARENT != 0)
    }

    /// Checks that the image is `width` by `height`.
    pub fn check_size(&self, width: u16, height: u16) -> Result<()> {
        if self.width == width && self.height == height {
            Ok(())
        } else {
            Err(Error::DimensionMismatch {
                expected_width: width,
                expected_height: height,
                width: self.width,
                height: self.height,
            })
        }
    }

    /// Checks that no pixel is greater than `max`. The error names the first offending pixel in
    /// row order.
    pub fn check_range(&self, max: u8) -> Result<()> {
        match self.pixels.iter().position(|&pixel| pixel > max) {
            None => Ok(()),
            Some(offset) => {
                let width = usize::from(self.width);
                Err(Error::InvalidPixel {
                    x: offset % width,
                    y: offset / width,
                    value: self.pixels[offset],
                    max,
                })
            }
        }
    }

    fn offset(&self, x: usize, y: usize) -> Option<usize> {
        let width = usize::from(self.width);
        let height = usize::from(self.height);

        if x < width && y < height {
            Some(y * width + x)
        } else {
            None
        }
    }
}

impl Index<(usize, usize)> for Image {
    type Output = u8;

    /// Reads the pixel at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` is outside the image.
    fn index(&self, (x, y): (usize, usize)) -> &Self::Output {
        let offset = self
            .offset(x, y)
            .unwrap_or_else(|| panic!("pixel ({}, {}) outside {}", x, y, self));
        &self.pixels[offset]
    }
}

impl fmt::Debug for Image {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.debug_struct("Image")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("pixels", &format!("<{} pixels>", self.pixels.len()))
            .finish()
    }
}

impl fmt::Display for Image {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "{}x{} image", self.width, self.height)
    }
}
