use std::fmt;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use bytes::{Buf, BufMut, Bytes, BytesMut};
use log::debug;

use crate::bitmap::{Image, MAX_COLOR};
use crate::planar::{self, Layout};
use crate::{Result, ResultExt, Stream};

/// A full-screen Wasteland picture, such as the title screen or an encounter portrait.
///
/// PIC files are a single 288x128 image stored as four bit-planes with no header and no
/// transparency. Every file is exactly [`Pic::SIZE`] bytes.
#[derive(Clone, PartialEq, Eq)]
pub struct Pic {
    image: Image,
}

impl Pic {
    /// Width in pixels.
    pub const WIDTH: u16 = 288;

    /// Height in pixels.
    pub const HEIGHT: u16 = 128;

    /// Size of a PIC file in bytes.
    pub const SIZE: usize = 4 * (Self::WIDTH as usize / 8) * Self::HEIGHT as usize;

    /// Wraps an image.
    ///
    /// # Errors
    ///
    /// It is an error if the image isn't 288x128 or has a pixel outside the 16 colors.
    pub fn new(image: Image) -> Result<Self> {
        image.check_size(Self::WIDTH, Self::HEIGHT)?;
        image.check_range(MAX_COLOR)?;
        Ok(Self { image })
    }

    /// Creates a picture filled with color 0.
    pub fn blank() -> Self {
        Self {
            image: Image::new(Self::WIDTH, Self::HEIGHT),
        }
    }

    fn layout() -> Result<Layout> {
        Layout::new(Self::WIDTH, Self::HEIGHT)
    }

    /// Loads a PIC file from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading {}", path.display());

        let file = File::open(path).err_path(path)?;
        Self::load_reader(BufReader::new(file)).map_err(|err| err.in_file(path))
    }

    /// Reads a picture from a generic reader. Exactly [`Pic::SIZE`] bytes are consumed; anything
    /// after them is left unread.
    pub fn load_reader(mut reader: impl Read) -> Result<Self> {
        let image = Self::layout()?.decode(&mut reader, None)?;
        Ok(Self { image })
    }

    /// Reads a picture from an in-memory buffer. Trailing bytes are ignored.
    pub fn load_raw(raw: impl Into<Bytes>) -> Result<Self> {
        Self::load_reader(raw.into().reader())
    }

    /// Saves the picture to disk, replacing any existing file.
    ///
    /// If writing fails partway through, the file is left truncated.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        debug!("Saving {}", path.display());

        let file = File::create(path).err_path(path)?;
        let mut writer = BufWriter::new(file);
        self.save_writer(&mut writer)
            .map_err(|err| err.in_file(path))?;

        planar::flush(&mut writer, Stream::Pixels, Self::SIZE as u64)
            .map_err(|err| err.in_file(path))
    }

    /// Writes the picture to a generic writer.
    pub fn save_writer(&self, mut writer: impl Write) -> Result<()> {
        Self::layout()?.encode(&self.image, &mut writer, None)
    }

    /// Encodes the picture into an in-memory buffer of [`Pic::SIZE`] bytes.
    pub fn to_raw(&self) -> Result<Bytes> {
        let mut writer = BytesMut::with_capacity(Self::SIZE).writer();
        self.save_writer(&mut writer)?;
        Ok(writer.into_inner().freeze())
    }

    /// The picture's pixels.
    pub fn image(&self) -> &Image {
        &self.image
    }

    /// Consumes the picture and returns its pixels.
    pub fn into_image(self) -> Image {
        self.image
    }
}

impl fmt::Debug for Pic {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "Pic({:?})", self.image)
    }
}
