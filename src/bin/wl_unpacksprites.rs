use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use wlgfx::{cli, convert, Sprites};

/// Unpacks sprites into PNG files.
///
/// Each sprite is written to OUTPUT_DIR as 000.png, 001.png and so on. Transparent pixels are
/// fully transparent in the PNGs.
#[derive(Parser, Debug)]
#[command(version)]
struct Args {
    /// Sprite file to read
    sprites_file: PathBuf,

    /// Sprite mask file to read
    masks_file: PathBuf,

    /// Directory to write the PNG files to
    output_dir: PathBuf,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args: Args = cli::parse_args();

    let sprites = Sprites::load(&args.sprites_file, &args.masks_file)
        .context("Unable to read sprites")?;

    fs::create_dir_all(&args.output_dir).with_context(|| {
        format!(
            "Unable to create output directory {}",
            args.output_dir.display()
        )
    })?;

    for (index, image) in sprites.iter().enumerate() {
        let path = args.output_dir.join(format!("{:03}.png", index));
        convert::save_raster(image, &path)?;
        info!("Wrote {}", path.display());
    }

    Ok(())
}
