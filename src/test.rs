//! Shared fixtures so tests don't rebuild the same images over and over.

use crate::bitmap::{Image, ImageSet, MAX_COLOR, TRANSPARENT};

/// Deterministic pseudo-random bytes.
pub fn noise(len: usize, seed: u32) -> Vec<u8> {
    let mut state = seed.wrapping_mul(2_654_435_761).wrapping_add(1);

    (0..len)
        .map(|_| {
            // xorshift32
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            (state >> 24) as u8
        })
        .collect()
}

/// Noise reduced to pixels no greater than `max`.
pub fn noise_image(width: u16, height: u16, max: u8, seed: u32) -> Image {
    let len = usize::from(width) * usize::from(height);
    let pixels = noise(len, seed)
        .into_iter()
        .map(|byte| byte % (max + 1))
        .collect();

    Image::from_pixels(width, height, pixels).unwrap()
}

lazy_static! {
    /// Ten sprites: blank, solid white, fully transparent, diagonal stripes, and noise.
    pub static ref SPRITE_SET: ImageSet = {
        let mut images = vec![
            Image::new(16, 16),
            Image::from_pixels(16, 16, vec![MAX_COLOR; 256]).unwrap(),
            Image::from_pixels(16, 16, vec![TRANSPARENT; 256]).unwrap(),
            Image::from_pixels(16, 16, (0..256).map(|i| ((i % 16 + i / 16) % 17) as u8).collect())
                .unwrap(),
        ];
        for seed in 0..6 {
            images.push(noise_image(16, 16, TRANSPARENT, seed));
        }

        ImageSet::from_images(16, 16, images).unwrap()
    };

    /// A full-screen picture in every color.
    pub static ref PIC_IMAGE: Image = noise_image(288, 128, MAX_COLOR, 42);
}
