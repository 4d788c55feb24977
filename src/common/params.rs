use std::fmt::{Display, Formatter};

use clap::ValueEnum;

use crate::common::error::{WeaveError, WeaveResult};

// Blend mode
//------------------------------------------------------------------------------

/// Per-pixel compositing policy. Exactly one applies per run.
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy, ValueEnum)]
pub enum BlendMode {
    /// Dark modules become translucent black; dim pixels under light modules
    /// are lifted for contrast.
    #[default]
    AdaptiveBrightness,
    /// Dark modules are alpha-composited over the untouched background.
    TransparentOverlay,
    /// Dark modules reveal a uniformly dimmed copy of the background.
    DarkenOnBlack,
}

impl Display for BlendMode {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        let name = match self {
            Self::AdaptiveBrightness => "adaptive-brightness",
            Self::TransparentOverlay => "transparent-overlay",
            Self::DarkenOnBlack => "darken-on-black",
        };
        f.write_str(name)
    }
}

// Style parameters
//------------------------------------------------------------------------------

/// Tunable constants of the compositing algorithms.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct StyleParams {
    /// Matrix luminance strictly below this is a dark module.
    pub module_threshold: u8,
    /// Background luminance strictly below this triggers the lighten branch.
    pub luma_floor: u8,
    /// Saturating per-channel add for backgrounds under the luma floor.
    pub lighten_offset: u8,
    /// Alpha of composited dark modules.
    pub module_alpha: u8,
    /// Multiplicative dimming for darken-on-black, within (0, 1].
    pub darken_factor: f32,
}

impl Default for StyleParams {
    fn default() -> Self {
        Self {
            module_threshold: 128,
            luma_floor: 120,
            lighten_offset: 80,
            module_alpha: 200,
            darken_factor: 0.3,
        }
    }
}

impl StyleParams {
    pub fn validate(&self) -> WeaveResult<()> {
        if !(self.darken_factor > 0.0 && self.darken_factor <= 1.0) {
            return Err(WeaveError::InvalidConfig(format!(
                "darken factor must be within (0, 1], got {}",
                self.darken_factor
            )));
        }
        Ok(())
    }
}
