mod blend;

pub use blend::{adaptive_brightness, darken_on_black, luma, transparent_overlay};

use std::path::Path;

use image::DynamicImage;

use crate::background::{self, BackgroundSource};
use crate::common::error::{WeaveError, WeaveResult};
use crate::common::params::{BlendMode, StyleParams};
use crate::matrix::{ModuleMatrix, VERSION_FLOOR};

// Builder
//------------------------------------------------------------------------------

/// Weaves a scannable QR symbol for `data` into a background image.
pub struct StyledQrBuilder<'a> {
    data: &'a str,
    source: Option<BackgroundSource>,
    background: Option<DynamicImage>,
    mode: BlendMode,
    params: StyleParams,
    side: Option<u32>,
    min_version: i16,
}

impl<'a> StyledQrBuilder<'a> {
    pub fn new(data: &'a str) -> Self {
        Self {
            data,
            source: None,
            background: None,
            mode: BlendMode::default(),
            params: StyleParams::default(),
            side: None,
            min_version: VERSION_FLOOR,
        }
    }

    pub fn source<S: Into<BackgroundSource>>(&mut self, source: S) -> &mut Self {
        self.source = Some(source.into());
        self
    }

    /// Uses an already-loaded image, skipping acquisition. Takes precedence
    /// over any configured source.
    pub fn background(&mut self, image: DynamicImage) -> &mut Self {
        self.background = Some(image);
        self
    }

    pub fn mode(&mut self, mode: BlendMode) -> &mut Self {
        self.mode = mode;
        self
    }

    pub fn params(&mut self, params: StyleParams) -> &mut Self {
        self.params = params;
        self
    }

    /// Output side length in pixels. Without it the side is derived from the
    /// background.
    pub fn side(&mut self, side: u32) -> &mut Self {
        self.side = Some(side);
        self
    }

    pub fn min_version(&mut self, min_version: i16) -> &mut Self {
        self.min_version = min_version;
        self
    }

    pub fn metadata(&self) -> String {
        match self.side {
            Some(s) => format!(
                "{{ Mode: {}, Side: {}, Version floor: {} }}",
                self.mode, s, self.min_version
            ),
            None => format!(
                "{{ Mode: {}, Side: Auto, Version floor: {} }}",
                self.mode, self.min_version
            ),
        }
    }
}


impl StyledQrBuilder<'_> {
    pub fn build(&self) -> WeaveResult<StyledQr> {
        println!("\nWeaving styled QR {}...", self.metadata());
        if self.data.is_empty() {
            return Err(WeaveError::InvalidConfig("data must not be empty".into()));
        }
        self.params.validate()?;
        if let Some(s) = self.side {
            if s < background::MIN_TARGET_SIDE {
                return Err(WeaveError::InvalidConfig(format!(
                    "side must be at least {}, got {s}",
                    background::MIN_TARGET_SIDE
                )));
            }
        }

        println!("Loading background...");
        let raw = match (&self.background, &self.source) {
            (Some(img), _) => img.clone(),
            (None, Some(src)) => src.load()?,
            (None, None) => {
                return Err(WeaveError::InvalidConfig("no background source given".into()))
            }
        };
        let side = background::target_side(&raw, self.side);

        println!("Normalizing background to {side}x{side}...");
        let bg = background::normalize(raw, side);

        println!("Encoding QR matrix...");
        let matrix = ModuleMatrix::encode(self.data, self.min_version)?.rescaled(side);

        println!("Blending ({})...", self.mode);
        let image = match self.mode {
            BlendMode::AdaptiveBrightness => DynamicImage::ImageRgba8(adaptive_brightness(
                matrix.canvas(),
                &bg.to_rgba8(),
                self.params,
            )?),
            BlendMode::TransparentOverlay => DynamicImage::ImageRgba8(transparent_overlay(
                matrix.canvas(),
                &bg.to_rgba8(),
                self.params,
            )?),
            BlendMode::DarkenOnBlack => DynamicImage::ImageRgb8(darken_on_black(
                matrix.canvas(),
                &bg.to_rgb8(),
                self.params,
            )?),
        };

        println!("\x1b[1;32mStyled QR woven successfully!\n\x1b[0m");

        println!("Report:");
        println!("Mode: {}, Side: {side}px, QR version: {}", self.mode, matrix.version());
        println!("Dark pixel coverage: {}%\n", matrix.dark_coverage(self.params.module_threshold));

        Ok(StyledQr { image, side, version: matrix.version(), mode: self.mode })
    }
}

// Styled QR
//------------------------------------------------------------------------------

/// Finished composite, ready to be written out.
#[derive(Debug)]
pub struct StyledQr {
    image: DynamicImage,
    side: u32,
    version: i16,
    mode: BlendMode,
}

impl StyledQr {
    pub fn image(&self) -> &DynamicImage {
        &self.image
    }

    pub fn into_image(self) -> DynamicImage {
        self.image
    }

    pub fn side(&self) -> u32 {
        self.side
    }

    pub fn version(&self) -> i16 {
        self.version
    }

    pub fn mode(&self) -> BlendMode {
        self.mode
    }

    pub fn metadata(&self) -> String {
        format!("{{ Mode: {}, Side: {}, Version: {} }}", self.mode, self.side, self.version)
    }

    /// Writes the composite to `path` in the format implied by its extension.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> WeaveResult<()> {
        self.image.save(path).map_err(WeaveError::Write)
    }
}
