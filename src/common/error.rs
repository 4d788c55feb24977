use std::fmt::{Display, Formatter};

// Error
//------------------------------------------------------------------------------

#[derive(Debug)]
pub enum WeaveError {
    /// Remote background unreachable, or the server answered with a failure status.
    Fetch(reqwest::Error),
    /// Background bytes are not a decodable image.
    Decode(image::ImageError),
    /// Payload cannot be encoded as a QR symbol at any permitted version.
    Encode(qrcode::types::QrError),
    /// Composited image could not be written out.
    Write(image::ImageError),
    /// Module matrix and background must be squares of the same side.
    DimensionMismatch { matrix: (u32, u32), background: (u32, u32) },
    /// Rejected configuration value.
    InvalidConfig(String),
}

impl Display for WeaveError {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            Self::Fetch(e) => write!(f, "Failed to fetch background: {e}"),
            Self::Decode(e) => write!(f, "Failed to decode background: {e}"),
            Self::Encode(e) => write!(f, "Failed to encode QR: {e}"),
            Self::Write(e) => write!(f, "Failed to write output: {e}"),
            Self::DimensionMismatch { matrix, background } => write!(
                f,
                "Matrix {}x{} doesn't match background {}x{}",
                matrix.0, matrix.1, background.0, background.1
            ),
            Self::InvalidConfig(msg) => write!(f, "Invalid config: {msg}"),
        }
    }
}

impl std::error::Error for WeaveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Fetch(e) => Some(e),
            Self::Decode(e) | Self::Write(e) => Some(e),
            Self::Encode(e) => Some(e),
            Self::DimensionMismatch { .. } | Self::InvalidConfig(_) => None,
        }
    }
}

impl From<reqwest::Error> for WeaveError {
    fn from(e: reqwest::Error) -> Self {
        Self::Fetch(e)
    }
}

impl From<qrcode::types::QrError> for WeaveError {
    fn from(e: qrcode::types::QrError) -> Self {
        Self::Encode(e)
    }
}

pub type WeaveResult<T> = Result<T, WeaveError>;
