use std::path::{Path, PathBuf};
use std::{fmt, io};

use thiserror::Error;

use crate::planar::Layout;

#[derive(Error, Debug)]
pub enum Error {
    #[error("could not access {}", path.display())]
    Open { path: PathBuf, source: io::Error },

    #[error("could not read {stream} data at byte {offset}")]
    Read {
        stream: Stream,
        offset: u64,
        source: io::Error,
    },

    #[error("could not write {stream} data at byte {offset}")]
    Write {
        stream: Stream,
        offset: u64,
        source: io::Error,
    },

    #[error("expected a {expected_width}x{expected_height} image, got {width}x{height}")]
    DimensionMismatch {
        expected_width: u16,
        expected_height: u16,
        width: u16,
        height: u16,
    },

    #[error("pixel ({x}, {y}) has value {value}, maximum is {max}")]
    InvalidPixel { x: usize, y: usize, value: u8, max: u8 },

    #[error("expected {expected} pixels, got {actual}")]
    BufferLength { expected: usize, actual: usize },

    #[error("expected {expected} images, got {actual}")]
    ImageCount { expected: usize, actual: usize },

    #[error("width {width} is not a multiple of 8")]
    UnalignedWidth { width: u16 },

    #[error("could not convert {}", path.display())]
    Raster {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("error in {}", path.display())]
    File {
        path: PathBuf,
        #[source]
        source: Box<Error>,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

/// The two byte streams a planar image can be spread across.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Stream {
    /// The four color bit-planes.
    Pixels,
    /// The separate transparency plane of a sprite.
    Mask,
}

impl fmt::Display for Stream {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Stream::Pixels => write!(fmt, "pixel"),
            Stream::Mask => write!(fmt, "mask"),
        }
    }
}

impl Error {
    /// Blames `path` for a codec error. Errors that already name a file are left as is.
    pub fn in_file(self, path: impl AsRef<Path>) -> Self {
        match self {
            err @ Error::Open { .. } | err @ Error::Raster { .. } | err @ Error::File { .. } => {
                err
            }
            err => Error::File {
                path: path.as_ref().into(),
                source: Box::new(err),
            },
        }
    }

    /// Moves the offset of a stream error past `index` earlier images of the same layout, for
    /// streams holding several images back to back.
    pub(crate) fn offset_by(self, layout: &Layout, index: usize) -> Self {
        let skip = |stream: Stream| -> u64 {
            let bytes = match stream {
                Stream::Pixels => layout.plane_bytes(),
                Stream::Mask => layout.mask_bytes(),
            };
            (bytes * index) as u64
        };

        match self {
            Error::Read {
                stream,
                offset,
                source,
            } => Error::Read {
                stream,
                offset: offset + skip(stream),
                source,
            },
            Error::Write {
                stream,
                offset,
                source,
            } => Error::Write {
                stream,
                offset: offset + skip(stream),
                source,
            },
            err => err,
        }
    }

    /// Returns `true` if the error, or the error it wraps, is a premature end of data.
    pub fn is_truncated(&self) -> bool {
        match self {
            Error::Read { .. } => true,
            Error::File { source, .. } => source.is_truncated(),
            _ => false,
        }
    }
}

/// Import this trait to add an extension method to convert a [`std::io::Result`] into a
/// [`Result`].
pub trait ResultExt<T> {
    fn err_path(self, path: impl AsRef<Path>) -> Result<T>;
}

impl<T> ResultExt<T> for io::Result<T> {
    /// Maps a [`std::io::Error`] into an [`Error::Open`] by adding a file path for context.
    fn err_path(self, path: impl AsRef<Path>) -> Result<T> {
        self.map_err(|err| Error::Open {
            path: path.as_ref().into(),
            source: err,
        })
    }
}
