use std::error::Error;
use std::path::PathBuf;

use clap::Parser;

use qrweave::{BlendMode, StyleParams, StyledQrBuilder};

/// Weaves a scannable QR code into a background image.
#[derive(Parser, Debug)]
#[command(name = "qrweave", version, about)]
struct Cli {
    /// Text or URL to encode
    #[arg(short, long)]
    data: String,

    /// Background image: a local path, or fetched remotely when it starts with http
    #[arg(short, long)]
    background: String,

    /// Blending mode
    #[arg(short, long, value_enum, default_value_t = BlendMode::AdaptiveBrightness)]
    mode: BlendMode,

    /// Output side length in pixels, at least 300; defaults to the background's
    /// smaller dimension
    #[arg(short, long)]
    size: Option<u32>,

    /// Dimming factor for darken-on-black, within (0, 1]
    #[arg(long, default_value_t = 0.3)]
    darken_factor: f32,

    /// Output path; the extension picks the image format
    #[arg(short, long, default_value = "out.png")]
    out: PathBuf,
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let params = StyleParams { darken_factor: cli.darken_factor, ..Default::default() };

    let mut builder = StyledQrBuilder::new(&cli.data);
    builder.source(cli.background.as_str()).mode(cli.mode).params(params);
    if let Some(size) = cli.size {
        builder.side(size);
    }

    let styled = builder.build()?;
    styled.save(&cli.out)?;
    println!("\x1b[1;32mStyled QR saved to {}\x1b[0m", cli.out.display());

    Ok(())
}
