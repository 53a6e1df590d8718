//! Palette-indexed pixel buffers.
//!
//! An [`Image`] is a rectangle of palette indices stored row by row. An [`ImageSet`] is a group
//! of images that all share the same size, such as the ten sprites of a sprite file.

pub use bitmap::*;
pub use set::*;

#[allow(clippy::module_inception)]
mod bitmap;
mod set;
