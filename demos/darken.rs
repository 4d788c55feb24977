use std::error::Error;

use image::{DynamicImage, Rgb, RgbImage};
use qrweave::{BlendMode, StyleParams, StyledQrBuilder};

fn main() -> Result<(), Box<dyn Error>> {
    // Bright checker so the dimmed modules stand out clearly
    let bg = RgbImage::from_fn(800, 800, |x, y| {
        if (x / 100 + y / 100) % 2 == 0 {
            Rgb([235, 225, 200])
        } else {
            Rgb([255, 245, 225])
        }
    });

    let styled = StyledQrBuilder::new("https://example.com/menu")
        .background(DynamicImage::ImageRgb8(bg))
        .mode(BlendMode::DarkenOnBlack)
        .side(500) // fixed output side, independent of the background
        .params(StyleParams { darken_factor: 0.3, ..Default::default() })
        .build()?;

    styled.save("darken_qr.png")?;
    println!("Darkened styled QR saved to: darken_qr.png");
    println!("QR metadata: {}", styled.metadata());

    Ok(())
}
