//! # qrweave
//!
//! A Rust library and CLI for weaving QR codes into background images. The QR module matrix and
//! the background are normalized to the same square size, then merged pixel by pixel under a
//! blending policy that keeps the symbol scannable while letting the photo show through.
//!
//! ## Features
//!
//! - **Three blending modes**: adaptive brightness, transparent overlay, darken-on-black
//! - **Local & remote backgrounds**: file paths and `http(s)` URLs
//! - **Automatic sizing**: output side derived from the background, floored for readability
//! - **Fit-to-payload encoding**: QR version grows from a floor until the data fits, always at
//!   error correction level High so the artwork eats into the redundancy margin, not the data
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use qrweave::{BlendMode, StyledQrBuilder};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let styled = StyledQrBuilder::new("https://example.com")
//!     .source("photos/beach.jpg") // or an http(s) URL
//!     .mode(BlendMode::AdaptiveBrightness)
//!     .build()?;
//!
//! styled.save("styled_qr.png")?;
//! # Ok(())
//! # }
//! ```
//!
//! Backgrounds can also be handed over pre-loaded, which keeps the pipeline free of any I/O:
//!
//! ```rust
//! use image::DynamicImage;
//! use qrweave::{BlendMode, StyledQrBuilder};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let bg = DynamicImage::new_rgb8(600, 600);
//! let styled = StyledQrBuilder::new("https://example.com")
//!     .background(bg)
//!     .mode(BlendMode::DarkenOnBlack)
//!     .build()?;
//!
//! assert_eq!(styled.side(), 600);
//! # Ok(())
//! # }
//! ```
//!
//! ## Blending modes
//!
//! - **adaptive-brightness**: dark modules become translucent black; pixels under light modules
//!   are lifted per channel when too dim, so the symbol never sinks into a dark photo
//! - **transparent-overlay**: dark modules are alpha-composited over the untouched background
//! - **darken-on-black**: dark modules reveal a uniformly dimmed copy of the background, light
//!   modules pass it through untouched; output stays plain RGB
//!
//! The thresholds and factors behind these modes live in [`StyleParams`] and can be tuned per
//! run.

#![allow(clippy::items_after_test_module)]

pub mod background;
pub(crate) mod common;
pub mod compose;
pub mod matrix;

pub use background::BackgroundSource;
pub use common::error::{WeaveError, WeaveResult};
pub use common::params::{BlendMode, StyleParams};
pub use compose::{StyledQr, StyledQrBuilder};
pub use matrix::ModuleMatrix;
