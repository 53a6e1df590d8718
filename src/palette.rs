use std::ops::Index;

use image::imageops::ColorMap;
use image::Rgba;

/// The fixed 16-color palette every Wasteland image is drawn with.
///
/// Pixels store indices into this table. Sprites additionally use [`TRANSPARENT`], which has no
/// color of its own.
///
/// [`TRANSPARENT`]: crate::bitmap::TRANSPARENT
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    rgb: [(u8, u8, u8); PALETTE_COLORS],
}

const PALETTE_COLORS: usize = 16;

impl Palette {
    /// The standard EGA palette.
    pub const EGA: Palette = Palette {
        rgb: [
            (0x00, 0x00, 0x00),
            (0x00, 0x00, 0xaa),
            (0x00, 0xaa, 0x00),
            (0x00, 0xaa, 0xaa),
            (0xaa, 0x00, 0x00),
            (0xaa, 0x00, 0xaa),
            (0xaa, 0x55, 0x00),
            (0xaa, 0xaa, 0xaa),
            (0x55, 0x55, 0x55),
            (0x55, 0x55, 0xff),
            (0x55, 0xff, 0x55),
            (0x55, 0xff, 0xff),
            (0xff, 0x55, 0x55),
            (0xff, 0x55, 0xff),
            (0xff, 0xff, 0x55),
            (0xff, 0xff, 0xff),
        ],
    };

    /// The number of colors, always 16.
    pub const fn len(&self) -> usize {
        PALETTE_COLORS
    }

    /// Always `false`.
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Looks up a color. Returns `None` if `index` isn't a color.
    pub fn rgb(&self, index: u8) -> Option<(u8, u8, u8)> {
        self.rgb.get(usize::from(index)).copied()
    }

    /// Converts a pixel to RGBA. Transparent pixels, and anything else out of range, become
    /// transparent black.
    pub fn rgba(&self, pixel: u8) -> [u8; 4] {
        match self.rgb(pixel) {
            Some((r, g, b)) => [r, g, b, 0xff],
            None => [0, 0, 0, 0],
        }
    }

    /// Finds the palette entry closest to a color. Ties go to the lower index.
    pub fn nearest(&self, r: u8, g: u8, b: u8) -> u8 {
        let distance = |&(pr, pg, pb): &(u8, u8, u8)| {
            let dr = i32::from(pr) - i32::from(r);
            let dg = i32::from(pg) - i32::from(g);
            let db = i32::from(pb) - i32::from(b);
            dr * dr + dg * dg + db * db
        };

        // `min_by_key` keeps the first minimum, and the palette has 16 entries so the index
        // always fits.
        self.rgb
            .iter()
            .enumerate()
            .min_by_key(|(_, color)| distance(color))
            .map_or(0, |(index, _)| index as u8)
    }
}

impl Index<u8> for Palette {
    type Output = (u8, u8, u8);

    /// Looks up a color.
    ///
    /// # Panics
    ///
    /// Panics if `index` is 16 or greater.
    fn index(&self, index: u8) -> &Self::Output {
        &self.rgb[usize::from(index)]
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::EGA
    }
}

/// Lets `image::imageops` map true-color images onto the palette. Alpha is ignored.
impl ColorMap for Palette {
    type Color = Rgba<u8>;

    fn index_of(&self, color: &Rgba<u8>) -> usize {
        let [r, g, b, _] = color.0;
        self.nearest(r, g, b).into()
    }

    fn map_color(&self, color: &mut Rgba<u8>) {
        let [r, g, b, a] = color.0;
        let (r, g, b) = self[self.nearest(r, g, b)];
        *color = Rgba([r, g, b, a]);
    }
}
