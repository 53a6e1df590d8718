//! The bit-plane encoding shared by PIC images and sprites.
//!
//! Pixels aren't stored one after another. Instead the image is split into four bit-planes, one
//! for each bit of the 4-bit color index, and the planes are stored one after another. Within a
//! plane, rows are stored top to bottom, and each row packs eight pixels into a byte with the
//! leftmost pixel in the most significant bit.
//!
//! Sprites carry a fifth plane holding the transparency bit (bit 4 of the pixel value). It lives
//! in a separate stream and its bytes are produced right after the plane 3 byte covering the
//! same eight pixels.
//!
//! For a 16 pixel wide image the byte layout is:
//!
//! ```text
//! pixel stream:  plane 0 row 0 | plane 0 row 1 | ... | plane 3 row 15
//!                [2 bytes]       [2 bytes]             [2 bytes]
//! mask stream:   row 0 | row 1 | ... | row 15
//! ```

use std::io::{Read, Write};

use log::trace;

use crate::bitmap::Image;
use crate::{Error, Result, Stream};

/// The number of color bit-planes.
pub const PLANES: u8 = 4;

/// The pixel bit carried by the mask plane.
const MASK_BIT: u8 = PLANES;

/// The dimensions of a planar image.
///
/// Creating a layout checks that the width packs evenly into bytes, so encoding and decoding
/// never have to deal with partial bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Layout {
    width: u16,
    height: u16,
}

impl Layout {
    /// Checks the dimensions and creates a layout.
    ///
    /// # Errors
    ///
    /// It is an error if the width isn't a multiple of 8.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    pub fn new(width: u16, height: u16) -> Result<Self> {
        assert!(width > 0 && height > 0, "empty layout");

        if width % 8 != 0 {
            return Err(Error::UnalignedWidth { width });
        }

        Ok(Self { width, height })
    }

    /// Width in pixels.
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Bytes in one row of one plane.
    pub fn row_bytes(&self) -> usize {
        usize::from(self.width / 8)
    }

    /// Bytes an image takes up in the pixel stream.
    pub fn plane_bytes(&self) -> usize {
        usize::from(PLANES) * self.mask_bytes()
    }

    /// Bytes an image takes up in the mask stream.
    pub fn mask_bytes(&self) -> usize {
        self.row_bytes() * usize::from(self.height)
    }

    /// Reads an image. Pass a `mask` stream to read the transparency plane as well.
    ///
    /// Nothing is returned unless the whole image is read. Running out of data in either stream is
    /// an [`Error::Read`].
    pub fn decode(&self, pixels: &mut dyn Read, mask: Option<&mut dyn Read>) -> Result<Image> {
        let mut image = vec![0u8; usize::from(self.width) * usize::from(self.height)];
        let mut row = vec![0u8; self.row_bytes()];
        let mut pixels = Tracked::new(pixels, Stream::Pixels);
        let mut masks = mask.map(|mask| Tracked::new(mask, Stream::Mask));

        for plane in 0..PLANES {
            for target in image.chunks_exact_mut(self.width.into()) {
                pixels.read_row(&mut row)?;
                unpack_row(&row, plane, target);

                // The mask plane follows the last color plane.
                if plane == PLANES - 1 {
                    if let Some(masks) = masks.as_mut() {
                        masks.read_row(&mut row)?;
                        unpack_row(&row, MASK_BIT, target);
                    }
                }
            }
        }

        trace!(
            "decoded {}x{} image from {} pixel bytes",
            self.width,
            self.height,
            pixels.offset
        );

        Image::from_pixels(self.width, self.height, image)
    }

    /// Writes an image. Pass a `mask` stream to write the transparency plane as well.
    ///
    /// Pixel bits above the encoded planes are ignored, so without a mask a transparent pixel is
    /// written as color 0. On error the streams are left holding whatever was written up to that
    /// point.
    ///
    /// # Errors
    ///
    /// It is an error if the image isn't the size of the layout.
    pub fn encode(
        &self,
        image: &Image,
        pixels: &mut dyn Write,
        mask: Option<&mut dyn Write>,
    ) -> Result<()> {
        image.check_size(self.width, self.height)?;

        let mut row = vec![0u8; self.row_bytes()];
        let mut pixels = Tracked::new(pixels, Stream::Pixels);
        let mut masks = mask.map(|mask| Tracked::new(mask, Stream::Mask));

        for plane in 0..PLANES {
            for source in image.rows() {
                pack_row(source, plane, &mut row);
                pixels.write_row(&row)?;

                if plane == PLANES - 1 {
                    if let Some(masks) = masks.as_mut() {
                        pack_row(source, MASK_BIT, &mut row);
                        masks.write_row(&row)?;
                    }
                }
            }
        }

        trace!(
            "encoded {}x{} image into {} pixel bytes",
            self.width,
            self.height,
            pixels.offset
        );

        Ok(())
    }
}

/// ORs bit `bit` into each pixel of `target` from the packed `row`. Bit 7 of each byte is the
/// leftmost of its eight pixels.
fn unpack_row(row: &[u8], bit: u8, target: &mut [u8]) {
    for (&byte, group) in row.iter().zip(target.chunks_exact_mut(8)) {
        for (offset, pixel) in group.iter_mut().enumerate() {
            *pixel |= ((byte >> (7 - offset)) & 1) << bit;
        }
    }
}

/// Packs bit `bit` of each pixel in `source` into `row`, eight pixels per byte.
fn pack_row(source: &[u8], bit: u8, row: &mut [u8]) {
    for (byte, group) in row.iter_mut().zip(source.chunks_exact(8)) {
        *byte = group
            .iter()
            .enumerate()
            .fold(0, |acc, (offset, &pixel)| {
                acc | ((pixel >> bit) & 1) << (7 - offset)
            });
    }
}

/// Flushes a buffered stream after `offset` bytes have been written to it.
pub(crate) fn flush(writer: &mut dyn Write, stream: Stream, offset: u64) -> Result<()> {
    writer.flush().map_err(|source| Error::Write {
        stream,
        offset,
        source,
    })
}

/// A stream that remembers how far into it we are, for error messages.
struct Tracked<S> {
    stream: S,
    kind: Stream,
    offset: u64,
}

impl<S> Tracked<S> {
    fn new(stream: S, kind: Stream) -> Self {
        Self {
            stream,
            kind,
            offset: 0,
        }
    }
}

impl<R: Read> Tracked<R> {
    fn read_row(&mut self, row: &mut [u8]) -> Result<()> {
        self.stream
            .read_exact(row)
            .map_err(|source| Error::Read {
                stream: self.kind,
                offset: self.offset,
                source,
            })?;
        self.offset += row.len() as u64;
        Ok(())
    }
}

impl<W: Write> Tracked<W> {
    fn write_row(&mut self, row: &[u8]) -> Result<()> {
        self.stream
            .write_all(row)
            .map_err(|source| Error::Write {
                stream: self.kind,
                offset: self.offset,
                source,
            })?;
        self.offset += row.len() as u64;
        Ok(())
    }
}
