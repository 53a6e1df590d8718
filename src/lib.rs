//! Read and write the planar PIC images and sprites of the game Wasteland.
//!
//! Both formats store 16-color images as bit-planes. [`Pic`] handles the 288x128 title and
//! portrait pictures, [`Sprites`] the sets of ten 16x16 icons with their transparency masks. The
//! [`convert`] module bridges to ordinary PNG files.

pub use bitmap::{Image, ImageSet, MAX_COLOR, TRANSPARENT};
pub use error::*;
pub use palette::*;
pub use pic::*;
pub use planar::Layout;
pub use sprites::*;

pub mod bitmap;
pub mod cli;
pub mod convert;
mod error;
mod palette;
mod pic;
pub mod planar;
mod sprites;

#[cfg(test)]
pub(crate) mod test;

#[cfg(test)]
#[macro_use]
extern crate assert_matches;

#[cfg(test)]
#[macro_use]
extern crate lazy_static;
