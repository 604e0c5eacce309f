//! Print basic statistics of a grayscale image file.
//!
//! Optionally applies a JSON header (pixel type and geometry) before
//! computing statistics, and writes a contrast-stretched PNG preview.

use anyhow::{Context, Result};
use clap::Parser;
use recon_image::io::{read_gray, save_normalized_png};
use recon_image::ImageHeader;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "image_stats", about = "Print size, pixel type, length and sum of an image")]
struct Args {
    /// Grayscale image to inspect (8 or 16 bit PNG)
    input: PathBuf,

    /// JSON header whose pixel type and geometry are applied to the image
    #[arg(long)]
    header: Option<PathBuf>,

    /// Write a normalized 8-bit preview to this path
    #[arg(long)]
    normalize_out: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut image = read_gray(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;

    if let Some(header_path) = &args.header {
        let header = ImageHeader::load_from_file(header_path)
            .with_context(|| format!("failed to load header {}", header_path.display()))?;
        image = header.apply(image)?;
    }

    let geometry = image.geometry();
    println!("File:       {}", args.input.display());
    println!("Size:       {}", image.size());
    println!("Pixel type: {}", image.pixel_id());
    println!("Origin:     {:?}", geometry.origin);
    println!("Spacing:    {:?}", geometry.spacing);
    println!("Length:     {}", image.len());
    println!("Sum:        {}", image.sum());
    if let Some((min, max)) = image.min_max() {
        println!("Min:        {min}");
        println!("Max:        {max}");
    }

    if let Some(out) = &args.normalize_out {
        save_normalized_png(&image.to_float64(), out)
            .with_context(|| format!("failed to write {}", out.display()))?;
        log::info!("wrote preview to {}", out.display());
    }

    Ok(())
}
