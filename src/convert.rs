//! Conversion between palette images and ordinary raster files such as PNGs.
//!
//! Source images can be any size and any colors. They're resampled to the target size and each
//! pixel is matched to the nearest [`Palette`] color.

use std::fs;
use std::path::{Path, PathBuf};

use image::imageops::FilterType;
use image::{DynamicImage, Rgba, RgbaImage};
use log::debug;

use crate::bitmap::{Image, TRANSPARENT};
use crate::{Error, Palette, Result, ResultExt};

/// Pixels less opaque than this become [`TRANSPARENT`] when transparency is allowed.
const ALPHA_THRESHOLD: u8 = 128;

/// Decodes a raster image file. The format is detected from the file contents.
pub fn load_raster(path: impl AsRef<Path>) -> Result<DynamicImage> {
    let path = path.as_ref();
    debug!("Loading {}", path.display());

    image::io::Reader::open(path)
        .err_path(path)?
        .with_guessed_format()
        .err_path(path)?
        .decode()
        .map_err(|source| Error::Raster {
            path: path.into(),
            source,
        })
}

/// Resamples `source` to `width` by `height` and maps it onto the palette.
///
/// With `transparency`, mostly transparent pixels become [`TRANSPARENT`]. Without it the alpha
/// channel is ignored and every pixel gets a color.
pub fn quantize(source: &DynamicImage, width: u16, height: u16, transparency: bool) -> Image {
    let resized = source
        .resize_exact(width.into(), height.into(), FilterType::Triangle)
        .to_rgba8();

    let pixels = resized
        .pixels()
        .map(|&Rgba([r, g, b, a])| {
            if transparency && a < ALPHA_THRESHOLD {
                TRANSPARENT
            } else {
                Palette::EGA.nearest(r, g, b)
            }
        })
        .collect();

    // `resize_exact` always produces `width * height` pixels.
    Image::from_pixels(width, height, pixels).expect("resized image has wrong size")
}

/// Draws an image in true color. Transparent pixels get an alpha of 0.
pub fn render(image: &Image) -> RgbaImage {
    RgbaImage::from_fn(image.width().into(), image.height().into(), |x, y| {
        Rgba(Palette::EGA.rgba(image[(x as usize, y as usize)]))
    })
}

/// Renders an image and saves it. The format is chosen from the file extension.
pub fn save_raster(image: &Image, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    debug!("Saving {}", path.display());

    render(image).save(path).map_err(|source| Error::Raster {
        path: path.into(),
        source,
    })
}

/// Lists the PNG files in a directory, sorted by file name. Subdirectories aren't searched.
pub fn raster_files(dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    let mut paths = Vec::new();

    for entry in fs::read_dir(dir).err_path(dir)? {
        let path = entry.err_path(dir)?.path();
        let is_png = path
            .extension()
            .map_or(false, |ext| ext.eq_ignore_ascii_case("png"));

        if is_png && path.is_file() {
            paths.push(path);
        }
    }

    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    debug!("Found {} PNG files in {}", paths.len(), dir.display());

    Ok(paths)
}
