use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use wlgfx::{cli, convert, Pic};

/// Converts a PIC image file into a PNG image file.
#[derive(Parser, Debug)]
#[command(version)]
struct Args {
    /// PIC file to read
    pic_file: PathBuf,

    /// PNG file to write
    png_file: PathBuf,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args: Args = cli::parse_args();

    let pic = Pic::load(&args.pic_file)
        .with_context(|| format!("Unable to read PIC file {}", args.pic_file.display()))?;

    convert::save_raster(pic.image(), &args.png_file)
        .with_context(|| format!("Unable to write PNG file {}", args.png_file.display()))?;
    info!("Wrote {}", args.png_file.display());

    Ok(())
}
