use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use std::fs;

use display::PaletteFormat;
use ge5::Ge5Image;

mod display;
mod fix;
mod ge5;
mod matching;
mod palette;

/// Reorders the colors of GE5 images so a set of images can share the
/// palette of the first one.
#[derive(Parser, Debug)]
#[command(version, after_help = "If --fix is given, --rgb and --data output the resulting palettes.")]
struct Args {
    /// Output the palette of every file in RGB format
    #[arg(long)]
    rgb: bool,

    /// Output the palette of every file as a data statement
    #[arg(long)]
    data: bool,

    /// Reorder the colors of every file after the first to match the first
    /// file's palette, saving each result under a "-new" name
    #[arg(long)]
    fix: bool,

    /// Image files; the first one is the palette reference
    #[arg(required = true)]
    files: Vec<String>,
}

pub struct ImageFile {
    pub name: String,
    pub image: Ge5Image,
}

fn load_files(names: &[String]) -> Result<Vec<ImageFile>> {
    let mut files = Vec::with_capacity(names.len());
    for name in names {
        info!("Loading {}", name);
        let data = fs::read(name).with_context(|| format!("Reading {}", name))?;
        files.push(ImageFile {
            name: name.clone(),
            image: Ge5Image::new(data),
        });
    }
    Ok(files)
}

pub fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let mut files = load_files(&args.files)?;

    if args.fix {
        fix::fix_palettes(&mut files)?;
    }
    if args.rgb {
        display::print_palettes(&files, PaletteFormat::Rgb);
    }
    if args.data {
        display::print_palettes(&files, PaletteFormat::Data);
    }
    Ok(())
}
