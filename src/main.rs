use anyhow::{Context, Result};
use asset_gen::{generate_all_assets, logging, AssetConfig, FontBook};
use clap::Parser;
use std::{path::PathBuf, process::ExitCode};

#[derive(Debug, Parser)]
#[clap(
    name = "asset-gen",
    about = "Generate the app icon, adaptive icon, splash screen and favicon"
)]
struct Args {
    /// Output directory.
    #[clap(short, long, value_name = "DIR", default_value = "assets")]
    output: PathBuf,

    /// JSON file overriding the palette and branding texts.
    #[clap(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Extra TrueType/OpenType font to try before the system fonts. Repeatable.
    #[clap(long = "font", value_name = "PATH")]
    fonts: Vec<PathBuf>,

    /// Enable debug logging
    #[clap(short, long)]
    verbose: bool,
}

fn run(args: &Args) -> Result<()> {
    let config = match &args.config {
        Some(path) => AssetConfig::load(path).context("Failed to load config")?,
        None => AssetConfig::default(),
    };
    let mut fonts = FontBook::system(&args.fonts);

    let generated = generate_all_assets(&args.output, &config, &mut fonts)?;
    println!("✓ Generated {} assets in {}", generated.len(), args.output.display());
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    logging::init_logging(args.verbose);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            // Printed directly so failures show even with RUST_LOG=off.
            eprintln!("Error: {err:?}");
            ExitCode::FAILURE
        }
    }
}
