use image::{GrayImage, Rgb, RgbImage, Rgba, RgbaImage};
use imageproc::map::{map_colors, map_colors2};

use crate::common::error::{WeaveError, WeaveResult};
use crate::common::params::StyleParams;

// Pixel helpers
//------------------------------------------------------------------------------

/// ITU-R BT.601 luminance in 16.16 fixed point, truncating.
#[inline]
pub fn luma(px: Rgba<u8>) -> u8 {
    let [r, g, b, _] = px.0;
    ((19595 * r as u32 + 38470 * g as u32 + 7471 * b as u32) >> 16) as u8
}

/// Composites `fg` over `bg`, weighing every channel by `fg`'s alpha and
/// rounding half up. A fully transparent `fg` leaves `bg` untouched.
#[inline]
fn over(fg: Rgba<u8>, bg: Rgba<u8>) -> Rgba<u8> {
    let a = fg.0[3] as u16;
    let mut out = [0u8; 4];
    for (o, (&f, &b)) in out.iter_mut().zip(fg.0.iter().zip(bg.0.iter())) {
        *o = ((f as u16 * a + b as u16 * (255 - a) + 127) / 255) as u8;
    }
    Rgba(out)
}

/// Uniform multiplicative dimming, rounded to nearest.
#[inline]
fn darken(px: Rgb<u8>, factor: f32) -> Rgb<u8> {
    let [r, g, b] = px.0;
    Rgb([scale(r, factor), scale(g, factor), scale(b, factor)])
}

#[inline]
fn scale(c: u8, factor: f32) -> u8 {
    (c as f32 * factor).round() as u8
}

fn check_dims(matrix: &GrayImage, bg_w: u32, bg_h: u32) -> WeaveResult<()> {
    let (mw, mh) = matrix.dimensions();
    if (mw, mh) != (bg_w, bg_h) {
        return Err(WeaveError::DimensionMismatch { matrix: (mw, mh), background: (bg_w, bg_h) });
    }
    Ok(())
}

// Adaptive brightness
//------------------------------------------------------------------------------

/// Dark modules become translucent black. Light modules keep the background,
/// lifted per channel wherever the pixel underneath is too dim to read
/// against the dark modules.
pub fn adaptive_brightness(
    matrix: &GrayImage,
    background: &RgbaImage,
    params: StyleParams,
) -> WeaveResult<RgbaImage> {
    check_dims(matrix, background.width(), background.height())?;
    let module = Rgba([0, 0, 0, params.module_alpha]);
    Ok(map_colors2(matrix, background, |m, bg| {
        if m.0[0] < params.module_threshold {
            module
        } else if luma(bg) < params.luma_floor {
            let [r, g, b, a] = bg.0;
            Rgba([
                r.saturating_add(params.lighten_offset),
                g.saturating_add(params.lighten_offset),
                b.saturating_add(params.lighten_offset),
                a,
            ])
        } else {
            bg
        }
    }))
}

// Transparent overlay
//------------------------------------------------------------------------------

/// Stamps the dark modules as translucent black over the untouched
/// background. Light modules are fully transparent in the stamp, so the
/// background passes through exactly.
pub fn transparent_overlay(
    matrix: &GrayImage,
    background: &RgbaImage,
    params: StyleParams,
) -> WeaveResult<RgbaImage> {
    check_dims(matrix, background.width(), background.height())?;
    let dark = Rgba([0, 0, 0, params.module_alpha]);
    let clear = Rgba([255, 255, 255, 0]);
    let overlay: RgbaImage =
        map_colors(matrix, |m| if m.0[0] < params.module_threshold { dark } else { clear });
    Ok(map_colors2(&overlay, background, over))
}

// Darken on black
//------------------------------------------------------------------------------

/// Dark modules reveal a uniformly dimmed copy of the background; light
/// modules keep it untouched. Works on plain RGB, no alpha involved.
pub fn darken_on_black(
    matrix: &GrayImage,
    background: &RgbImage,
    params: StyleParams,
) -> WeaveResult<RgbImage> {
    check_dims(matrix, background.width(), background.height())?;
    Ok(map_colors2(matrix, background, |m, bg| {
        if m.0[0] < params.module_threshold {
            darken(bg, params.darken_factor)
        } else {
            bg
        }
    }))
}
