use std::convert::TryFrom;
use std::ops::Deref;
use std::{fmt, slice, vec};

use crate::bitmap::Image;
use crate::{Error, Result};

/// An ordered group of [`Image`]s that are all the same size.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageSet {
    width: u16,
    height: u16,
    images: Vec<Image>,
}

impl ImageSet {
    /// Creates `count` blank images of the given size.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    pub fn new(count: usize, width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            images: vec![Image::new(width, height); count],
        }
    }

    /// Groups existing images.
    ///
    /// # Errors
    ///
    /// It is an error if any image isn't `width` by `height`.
    pub fn from_images(width: u16, height: u16, images: Vec<Image>) -> Result<Self> {
        for image in &images {
            image.check_size(width, height)?;
        }

        Ok(Self {
            width,
            height,
            images,
        })
    }

    /// Width of every image in pixels.
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Height of every image in pixels.
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Replaces the image at `index` and returns the old one.
    ///
    /// # Errors
    ///
    /// It is an error if the new image is the wrong size.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn set(&mut self, index: usize, image: Image) -> Result<Image> {
        image.check_size(self.width, self.height)?;
        Ok(std::mem::replace(&mut self.images[index], image))
    }

    /// Checks that no pixel in any image is greater than `max`.
    pub fn check_range(&self, max: u8) -> Result<()> {
        self.images
            .iter()
            .try_for_each(|image| image.check_range(max))
    }

    /// Consumes the set and returns the images.
    pub fn into_images(self) -> Vec<Image> {
        self.images
    }
}

impl Deref for ImageSet {
    type Target = [Image];

    fn deref(&self) -> &Self::Target {
        &self.images
    }
}

impl IntoIterator for ImageSet {
    type Item = Image;
    type IntoIter = vec::IntoIter<Image>;

    fn into_iter(self) -> Self::IntoIter {
        self.images.into_iter()
    }
}

impl<'a> IntoIterator for &'a ImageSet {
    type Item = &'a Image;
    type IntoIter = slice::Iter<'a, Image>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Debug for ImageSet {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(
            fmt,
            "ImageSet({} x {}x{})",
            self.images.len(),
            self.width,
            self.height
        )
    }
}

impl From<ImageSet> for Vec<Image> {
    fn from(set: ImageSet) -> Self {
        set.into_images()
    }
}

impl TryFrom<Vec<Image>> for ImageSet {
    type Error = Error;

    /// Groups images, taking the size from the first one. It is an error if `images` is empty.
    fn try_from(images: Vec<Image>) -> Result<Self> {
        let (width, height) = match images.first() {
            Some(first) => (first.width(), first.height()),
            None => {
                return Err(Error::ImageCount {
                    expected: 1,
                    actual: 0,
                })
            }
        };
        Self::from_images(width, height, images)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new() {
        let set = ImageSet::new(10, 16, 16);

        assert_eq!(set.len(), 10);
        assert_eq!((set.width(), set.height()), (16, 16));
        assert!(set.iter().all(|image| image == &Image::new(16, 16)));
    }

    #[test]
    fn mismatched_sizes() {
        let images = vec![Image::new(16, 16), Image::new(16, 8)];

        assert_matches!(
            ImageSet::from_images(16, 16, images.clone()),
            Err(Error::DimensionMismatch { height: 8, .. })
        );
        assert_matches!(
            ImageSet::try_from(images),
            Err(Error::DimensionMismatch { .. })
        );
    }

    #[test]
    fn try_from_empty() {
        assert_matches!(
            ImageSet::try_from(Vec::new()),
            Err(Error::ImageCount {
                expected: 1,
                actual: 0
            })
        );
    }

    #[test]
    fn set() {
        let mut set = ImageSet::new(2, 8, 1);
        let image = Image::from_pixels(8, 1, vec![1; 8]).unwrap();

        let old = set.set(1, image.clone()).unwrap();
        assert_eq!(old, Image::new(8, 1));
        assert_eq!(set[1], image);

        assert_matches!(
            set.set(0, Image::new(16, 1)),
            Err(Error::DimensionMismatch { .. })
        );
        assert_eq!(set[0], Image::new(8, 1));
    }

    #[test]
    fn check_range() {
        let mut set = ImageSet::new(3, 8, 1);
        set.set(2, Image::from_pixels(8, 1, vec![16; 8]).unwrap())
            .unwrap();

        assert_matches!(set.check_range(16), Ok(()));
        assert_matches!(
            set.check_range(15),
            Err(Error::InvalidPixel { value: 16, .. })
        );
    }
}
