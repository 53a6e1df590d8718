use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::ops::Deref;
use std::path::Path;

use bytes::{Buf, BufMut, Bytes, BytesMut};
use log::debug;

use crate::bitmap::{Image, ImageSet, TRANSPARENT};
use crate::planar::{self, Layout};
use crate::{Error, Result, ResultExt, Stream};

/// The ten 16x16 icons Wasteland draws on the map, such as the party marker.
///
/// Sprites are spread over two files. The sprite file holds the four color planes of each
/// sprite in turn, and the mask file holds one transparency plane per sprite. Pixels are colors
/// 0-15 or [`TRANSPARENT`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sprites(ImageSet);

impl Sprites {
    /// The number of sprites in a set.
    pub const COUNT: usize = 10;

    /// Width and height of each sprite in pixels.
    pub const SIZE: u16 = 16;

    /// Size of a sprite file in bytes.
    pub const SPRITES_BYTES: usize =
        Self::COUNT * 4 * Self::SIZE as usize / 8 * Self::SIZE as usize;

    /// Size of a mask file in bytes.
    pub const MASKS_BYTES: usize = Self::COUNT * Self::SIZE as usize / 8 * Self::SIZE as usize;

    /// Wraps a set of images.
    ///
    /// # Errors
    ///
    /// It is an error if there aren't ten 16x16 images or a pixel is greater than
    /// [`TRANSPARENT`].
    pub fn new(set: ImageSet) -> Result<Self> {
        if set.len() != Self::COUNT {
            return Err(Error::ImageCount {
                expected: Self::COUNT,
                actual: set.len(),
            });
        }
        if (set.width(), set.height()) != (Self::SIZE, Self::SIZE) {
            return Err(Error::DimensionMismatch {
                expected_width: Self::SIZE,
                expected_height: Self::SIZE,
                width: set.width(),
                height: set.height(),
            });
        }
        set.check_range(TRANSPARENT)?;

        Ok(Self(set))
    }

    /// Creates ten sprites filled with color 0.
    pub fn blank() -> Self {
        Self(ImageSet::new(Self::COUNT, Self::SIZE, Self::SIZE))
    }

    fn layout() -> Result<Layout> {
        Layout::new(Self::SIZE, Self::SIZE)
    }

    /// Loads sprites from a sprite file and its mask file.
    pub fn load(sprites_path: impl AsRef<Path>, masks_path: impl AsRef<Path>) -> Result<Self> {
        let sprites_path = sprites_path.as_ref();
        let masks_path = masks_path.as_ref();
        debug!(
            "Loading {} and {}",
            sprites_path.display(),
            masks_path.display()
        );

        let sprites = File::open(sprites_path).err_path(sprites_path)?;
        let masks = File::open(masks_path).err_path(masks_path)?;

        Self::load_reader(BufReader::new(sprites), BufReader::new(masks))
            .map_err(|err| blame(err, sprites_path, masks_path))
    }

    /// Reads sprites from a pair of generic readers. Exactly [`Sprites::SPRITES_BYTES`] and
    /// [`Sprites::MASKS_BYTES`] bytes are consumed.
    pub fn load_reader(mut sprites: impl Read, mut masks: impl Read) -> Result<Self> {
        let layout = Self::layout()?;
        let images = (0..Self::COUNT)
            .map(|index| {
                layout
                    .decode(&mut sprites, Some(&mut masks))
                    .map_err(|err| err.offset_by(&layout, index))
            })
            .collect::<Result<Vec<Image>>>()?;

        Ok(Self(ImageSet::from_images(Self::SIZE, Self::SIZE, images)?))
    }

    /// Reads sprites from in-memory buffers. Trailing bytes are ignored.
    pub fn load_raw(sprites: impl Into<Bytes>, masks: impl Into<Bytes>) -> Result<Self> {
        Self::load_reader(sprites.into().reader(), masks.into().reader())
    }

    /// Saves the sprites to a sprite file and a mask file, replacing any existing files.
    ///
    /// If writing fails partway through, whichever file was being written is left truncated.
    pub fn save(&self, sprites_path: impl AsRef<Path>, masks_path: impl AsRef<Path>) -> Result<()> {
        let sprites_path = sprites_path.as_ref();
        let masks_path = masks_path.as_ref();
        debug!(
            "Saving {} and {}",
            sprites_path.display(),
            masks_path.display()
        );

        let sprites = File::create(sprites_path).err_path(sprites_path)?;
        let masks = File::create(masks_path).err_path(masks_path)?;
        let mut sprites = BufWriter::new(sprites);
        let mut masks = BufWriter::new(masks);

        self.save_writer(&mut sprites, &mut masks)
            .map_err(|err| blame(err, sprites_path, masks_path))?;

        planar::flush(&mut sprites, Stream::Pixels, Self::SPRITES_BYTES as u64)
            .map_err(|err| err.in_file(sprites_path))?;
        planar::flush(&mut masks, Stream::Mask, Self::MASKS_BYTES as u64)
            .map_err(|err| err.in_file(masks_path))
    }

    /// Writes the sprites to a pair of generic writers.
    pub fn save_writer(&self, mut sprites: impl Write, mut masks: impl Write) -> Result<()> {
        let layout = Self::layout()?;

        for (index, image) in self.0.iter().enumerate() {
            layout
                .encode(image, &mut sprites, Some(&mut masks))
                .map_err(|err| err.offset_by(&layout, index))?;
        }

        Ok(())
    }

    /// Encodes the sprites into in-memory sprite and mask buffers.
    pub fn to_raw(&self) -> Result<(Bytes, Bytes)> {
        let mut sprites = BytesMut::with_capacity(Self::SPRITES_BYTES).writer();
        let mut masks = BytesMut::with_capacity(Self::MASKS_BYTES).writer();
        self.save_writer(&mut sprites, &mut masks)?;

        Ok((
            sprites.into_inner().freeze(),
            masks.into_inner().freeze(),
        ))
    }

    /// Consumes the sprites and returns the images.
    pub fn into_set(self) -> ImageSet {
        self.0
    }
}

impl Deref for Sprites {
    type Target = ImageSet;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Blames whichever file a stream error came from.
fn blame(err: Error, sprites_path: &Path, masks_path: &Path) -> Error {
    let in_masks = matches!(
        err,
        Error::Read {
            stream: Stream::Mask,
            ..
        } | Error::Write {
            stream: Stream::Mask,
            ..
        }
    );

    if in_masks {
        err.in_file(masks_path)
    } else {
        err.in_file(sprites_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::*;

    #[test]
    fn sizes() {
        assert_eq!(Sprites::SPRITES_BYTES, 1280);
        assert_eq!(Sprites::MASKS_BYTES, 320);

        let (sprites, masks) = Sprites::blank().to_raw().unwrap();
        assert_eq!(sprites.len(), 1280);
        assert_eq!(masks.len(), 320);
    }

    /// Encodes one sprite filled with `pixel` and returns its sprite and mask bytes.
    fn encode_solid(pixel: u8) -> (Bytes, Bytes) {
        let mut set = ImageSet::new(Sprites::COUNT, 16, 16);
        set.set(0, Image::from_pixels(16, 16, vec![pixel; 256]).unwrap())
            .unwrap();
        let (sprites, masks) = Sprites::new(set).unwrap().to_raw().unwrap();

        (sprites.slice(..128), masks.slice(..32))
    }

    #[test]
    fn all_zero() {
        let (sprites, masks) = encode_solid(0);
        assert!(sprites.iter().all(|&byte| byte == 0x00));
        assert!(masks.iter().all(|&byte| byte == 0x00));
    }

    #[test]
    fn all_white() {
        let (sprites, masks) = encode_solid(15);
        assert!(sprites.iter().all(|&byte| byte == 0xff));
        assert!(masks.iter().all(|&byte| byte == 0x00));
    }

    #[test]
    fn all_transparent() {
        let (sprites, masks) = encode_solid(TRANSPARENT);
        assert!(sprites.iter().all(|&byte| byte == 0x00));
        assert!(masks.iter().all(|&byte| byte == 0xff));
    }

    #[test]
    fn sprites_are_sequential() {
        let raw_sprites = [&[0xffu8; 128][..], &[0; 1152][..]].concat();
        let raw_masks = [&[0xffu8; 32][..], &[0; 288][..]].concat();

        let sprites = Sprites::load_raw(raw_sprites, raw_masks).unwrap();
        assert!(sprites[0].pixels().iter().all(|&pixel| pixel == 31));
        assert!(sprites[1..]
            .iter()
            .all(|image| image.pixels().iter().all(|&pixel| pixel == 0)));
    }

    #[test]
    fn round_trip() {
        let sprites = Sprites::new(SPRITE_SET.clone()).unwrap();
        let (raw_sprites, raw_masks) = sprites.to_raw().unwrap();

        let loaded = Sprites::load_raw(raw_sprites.clone(), raw_masks.clone()).unwrap();
        assert_eq!(loaded, sprites);
        assert_eq!(loaded.to_raw().unwrap(), (raw_sprites, raw_masks));
    }

    #[test]
    fn bytes_round_trip() {
        let raw_sprites = noise(Sprites::SPRITES_BYTES, 1);
        let raw_masks = noise(Sprites::MASKS_BYTES, 2);

        let sprites = Sprites::load_raw(raw_sprites.clone(), raw_masks.clone()).unwrap();
        let (sprites2, masks2) = sprites.to_raw().unwrap();

        assert_eq!(sprites2, raw_sprites);
        assert_eq!(masks2, raw_masks);
    }

    #[test]
    fn mask_bits() {
        let raw_sprites = noise(Sprites::SPRITES_BYTES, 8);
        let raw_masks = noise(Sprites::MASKS_BYTES, 9);
        let sprites = Sprites::load_raw(raw_sprites, raw_masks.clone()).unwrap();

        for (index, image) in sprites.iter().enumerate() {
            for y in 0..16 {
                for x in 0..16 {
                    let byte = raw_masks[index * 32 + y * 2 + x / 8];
                    let bit = (byte >> (7 - x % 8)) & 1 == 1;
                    assert_eq!(image.is_transparent(x, y), bit);
                }
            }
        }
    }

    #[test]
    fn truncated_sprites() {
        let raw_sprites = vec![0u8; Sprites::SPRITES_BYTES - 1];
        let raw_masks = vec![0u8; Sprites::MASKS_BYTES];

        let err = Sprites::load_raw(raw_sprites, raw_masks).unwrap_err();
        assert!(err.is_truncated());
        assert_matches!(
            err,
            Error::Read {
                stream: Stream::Pixels,
                // Sprite 9, plane 3, row 15.
                offset: 1278,
                ..
            }
        );
    }

    #[test]
    fn truncated_masks() {
        let raw_sprites = vec![0u8; Sprites::SPRITES_BYTES];
        let raw_masks = vec![0u8; Sprites::MASKS_BYTES - 2];

        assert_matches!(
            Sprites::load_raw(raw_sprites, raw_masks),
            Err(Error::Read {
                stream: Stream::Mask,
                offset: 318,
                ..
            })
        );
    }

    #[test]
    fn mask_write_failure() {
        let mut raw_sprites = Vec::new();
        let mut raw_masks = [0u8; 100];

        assert_matches!(
            Sprites::blank().save_writer(&mut raw_sprites, &mut &mut raw_masks[..]),
            Err(Error::Write {
                stream: Stream::Mask,
                offset: 100,
                ..
            })
        );
        // Sprite 3 stopped after plane 3 of its third row.
        assert_eq!(raw_sprites.len(), 3 * 128 + 3 * 32 + 3 * 2);
    }

    #[test]
    fn validation() {
        assert_matches!(
            Sprites::new(ImageSet::new(9, 16, 16)),
            Err(Error::ImageCount {
                expected: 10,
                actual: 9
            })
        );
        assert_matches!(
            Sprites::new(ImageSet::new(10, 8, 16)),
            Err(Error::DimensionMismatch { .. })
        );

        let mut set = ImageSet::new(10, 16, 16);
        set.set(4, Image::from_pixels(16, 16, vec![17; 256]).unwrap())
            .unwrap();
        assert_matches!(
            Sprites::new(set),
            Err(Error::InvalidPixel { value: 17, .. })
        );
    }

    #[test]
    fn files() {
        let dir = tempfile::tempdir().unwrap();
        let sprites_path = dir.path().join("ic0_9.wlf");
        let masks_path = dir.path().join("masks.wlf");
        let sprites = Sprites::new(SPRITE_SET.clone()).unwrap();

        sprites.save(&sprites_path, &masks_path).unwrap();
        assert_eq!(std::fs::metadata(&sprites_path).unwrap().len(), 1280);
        assert_eq!(std::fs::metadata(&masks_path).unwrap().len(), 320);
        assert_eq!(Sprites::load(&sprites_path, &masks_path).unwrap(), sprites);
    }

    #[test]
    fn truncated_mask_file() {
        let dir = tempfile::tempdir().unwrap();
        let sprites_path = dir.path().join("ic0_9.wlf");
        let masks_path = dir.path().join("masks.wlf");
        std::fs::write(&sprites_path, vec![0u8; 1280]).unwrap();
        std::fs::write(&masks_path, vec![0u8; 100]).unwrap();

        let err = Sprites::load(&sprites_path, &masks_path).unwrap_err();
        assert!(err.is_truncated());
        assert_matches!(err, Error::File { path, .. } if path == masks_path);
    }

    #[test]
    fn missing_mask_file() {
        let dir = tempfile::tempdir().unwrap();
        let sprites_path = dir.path().join("ic0_9.wlf");
        let masks_path = dir.path().join("masks.wlf");
        std::fs::write(&sprites_path, vec![0u8; 1280]).unwrap();

        assert_matches!(
            Sprites::load(&sprites_path, &masks_path),
            Err(Error::Open { path, .. }) if path == masks_path
        );
    }
}
