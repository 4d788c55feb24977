use image::imageops::{self, FilterType};
use image::{GrayImage, Luma};
use qrcode::types::QrError;
use qrcode::{EcLevel, QrCode, Version};

use crate::common::error::WeaveResult;

// Module matrix
//------------------------------------------------------------------------------

/// Pixels per module when the symbol is first rendered.
pub const MODULE_SIZE: u32 = 10;

/// Light border around the symbol, in modules.
pub const QUIET_ZONE: u32 = 4;

/// Smallest QR version requested before growing to fit the payload.
pub const VERSION_FLOOR: i16 = 6;

/// Square black & white pixel grid of a QR symbol, quiet zone included.
/// Rescaling never interpolates, so every pixel stays 0 or 255 and module
/// edges survive at any output side.
#[derive(Debug, Clone)]
pub struct ModuleMatrix {
    canvas: GrayImage,
    version: i16,
}

impl ModuleMatrix {
    /// Encodes `data` at error correction level High, growing the version from
    /// `min_version` until the payload fits.
    pub fn encode(data: &str, min_version: i16) -> WeaveResult<Self> {
        let (code, version) = Self::fit(data.as_bytes(), min_version)?;

        let qz_sz = QUIET_ZONE * MODULE_SIZE;
        let qr_sz = code.width() as u32 * MODULE_SIZE;
        let total_sz = qz_sz + qr_sz + qz_sz;

        let mut canvas = GrayImage::new(total_sz, total_sz);
        for y in 0..total_sz {
            for x in 0..total_sz {
                if x < qz_sz || x >= qz_sz + qr_sz || y < qz_sz || y >= qz_sz + qr_sz {
                    canvas.put_pixel(x, y, Luma([255]));
                    continue;
                }
                let c = ((x - qz_sz) / MODULE_SIZE) as usize;
                let r = ((y - qz_sz) / MODULE_SIZE) as usize;
                canvas.put_pixel(x, y, Luma([code[(c, r)].select(0, 255)]));
            }
        }

        Ok(Self { canvas, version })
    }

    fn fit(data: &[u8], min_version: i16) -> WeaveResult<(QrCode, i16)> {
        debug_assert!((1..=40).contains(&min_version), "Invalid version floor {min_version}");
        for v in min_version..=40 {
            match QrCode::with_version(data, Version::Normal(v), EcLevel::H) {
                Ok(code) => return Ok((code, v)),
                Err(QrError::DataTooLong) => continue,
                Err(e) => return Err(e.into()),
            }
        }
        Err(QrError::DataTooLong.into())
    }

    /// Nearest-neighbor rescale to `side`x`side`.
    pub fn rescaled(mut self, side: u32) -> Self {
        if self.canvas.width() != side {
            self.canvas = imageops::resize(&self.canvas, side, side, FilterType::Nearest);
        }
        self
    }

    pub fn canvas(&self) -> &GrayImage {
        &self.canvas
    }

    pub fn version(&self) -> i16 {
        self.version
    }

    pub fn side(&self) -> u32 {
        self.canvas.width()
    }

    pub fn is_dark(&self, x: u32, y: u32, threshold: u8) -> bool {
        self.canvas.get_pixel(x, y)[0] < threshold
    }

    /// Share of pixels darker than `threshold`, as a percentage.
    pub fn dark_coverage(&self, threshold: u8) -> u32 {
        let dark = self.canvas.pixels().filter(|p| p[0] < threshold).count();
        (dark * 100 / (self.side() * self.side()) as usize) as u32
    }
}
