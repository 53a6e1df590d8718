use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};

use wlgfx::{cli, convert, Sprites};

/// Packs PNG files into sprites.
///
/// The first 10 PNG files found in INPUT_DIR are used, sorted alphabetically. Size and colors
/// don't matter because the images are automatically converted. Transparent pixels stay
/// transparent. Missing sprites are left blank.
#[derive(Parser, Debug)]
#[command(version)]
struct Args {
    /// Directory containing the PNG files
    input_dir: PathBuf,

    /// Sprite file to write
    sprites_file: PathBuf,

    /// Sprite mask file to write
    masks_file: PathBuf,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args: Args = cli::parse_args();

    let files = convert::raster_files(&args.input_dir).with_context(|| {
        format!(
            "Unable to read input directory {}",
            args.input_dir.display()
        )
    })?;
    if files.len() > Sprites::COUNT {
        warn!(
            "Found {} PNG files, only the first {} are used",
            files.len(),
            Sprites::COUNT
        );
    } else if files.len() < Sprites::COUNT {
        warn!(
            "Found {} PNG files, the remaining sprites are left blank",
            files.len()
        );
    }

    let mut set = Sprites::blank().into_set();
    for (index, path) in files.iter().take(Sprites::COUNT).enumerate() {
        let source = convert::load_raster(path)
            .with_context(|| format!("Unable to read PNG from {}", path.display()))?;
        let image = convert::quantize(&source, Sprites::SIZE, Sprites::SIZE, true);
        set.set(index, image)?;
        info!("Sprite {}: {}", index, path.display());
    }

    Sprites::new(set)?
        .save(&args.sprites_file, &args.masks_file)
        .context("Unable to write sprites")?;

    Ok(())
}
