use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use wlgfx::{cli, convert, Pic};

/// Converts a PNG image file into a PIC image file.
///
/// The PNG file can have any dimensions and colors. It is scaled to 288x128 and mapped onto the
/// 16-color palette.
#[derive(Parser, Debug)]
#[command(version)]
struct Args {
    /// PNG file to read
    png_file: PathBuf,

    /// PIC file to write
    pic_file: PathBuf,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args: Args = cli::parse_args();

    let source = convert::load_raster(&args.png_file)
        .with_context(|| format!("Unable to read PNG file {}", args.png_file.display()))?;
    let image = convert::quantize(&source, Pic::WIDTH, Pic::HEIGHT, false);
    let pic = Pic::new(image)?;

    pic.save(&args.pic_file)
        .with_context(|| format!("Unable to write PIC file {}", args.pic_file.display()))?;
    info!("Wrote {}", args.pic_file.display());

    Ok(())
}
