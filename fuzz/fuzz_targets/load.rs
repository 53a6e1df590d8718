#![no_main]
use libfuzzer_sys::fuzz_target;

use wlgfx::{Pic, Sprites};

fuzz_target!(|data: &[u8]| {
    // Whatever loads must survive a round trip unchanged.
    if let Ok(pic) = Pic::load_raw(data.to_vec()) {
        let raw = pic.to_raw().unwrap();
        assert_eq!(raw, data[..Pic::SIZE]);
    }

    let split = data.len().min(Sprites::SPRITES_BYTES);
    let (sprites, masks) = data.split_at(split);
    if let Ok(loaded) = Sprites::load_raw(sprites.to_vec(), masks.to_vec()) {
        let (raw_sprites, raw_masks) = loaded.to_raw().unwrap();
        assert_eq!(raw_sprites, sprites);
        assert_eq!(raw_masks, masks[..Sprites::MASKS_BYTES]);
    }
});
