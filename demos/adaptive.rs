use std::error::Error;

use image::{DynamicImage, Rgb, RgbImage};
use qrweave::{BlendMode, StyledQrBuilder};

fn main() -> Result<(), Box<dyn Error>> {
    // Synthetic sunset gradient; swap in .source("photo.jpg") or an http(s)
    // URL for a real background
    let bg = RgbImage::from_fn(640, 640, |x, y| {
        let r = 60 + (y * 180 / 639) as u8;
        let g = 40 + (x * 90 / 639) as u8;
        let b = 90u8.saturating_sub((y * 70 / 639) as u8);
        Rgb([r, g, b])
    });

    let styled = StyledQrBuilder::new("https://example.com/tickets")
        .background(DynamicImage::ImageRgb8(bg))
        .mode(BlendMode::AdaptiveBrightness)
        .build()?;

    styled.save("adaptive_qr.png")?;
    println!("Adaptive styled QR saved to: adaptive_qr.png");
    println!("QR metadata: {}", styled.metadata());

    Ok(())
}
