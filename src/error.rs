//! Errors

use thiserror::Error;

/// Errors raised while building shapes, configuring a raster or
/// reading back a command stream
#[derive(Debug, Error)]
pub enum Error {
    /// Width, height or stroke width below one
    #[error("{what} must be at least 1, got {value}")]
    InvalidDimension { what: &'static str, value: i32 },
    /// Width or height past the drawable range
    #[error("{what} must be at most {max}, got {value}")]
    DimensionTooLarge { what: &'static str, value: i32, max: i32 },
    /// Point list too short for the shape
    #[error("expected at least {expected} points, found {found}")]
    TooFewPoints { expected: usize, found: usize },
    /// Point outside of the representable coordinate range
    #[error("point ({x},{y}) is outside of the drawable range")]
    CoordinateOutOfRange { x: i32, y: i32 },
    /// Raster configuration rejected
    #[error("invalid raster configuration: {0}")]
    InvalidConfig(String),
    /// Malformed command stream
    #[error("malformed command stream at byte {offset}: {reason}")]
    Decode { offset: usize, reason: &'static str },
    /// Byte sink failure
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// Preview image failure
    #[error(transparent)]
    Image(#[from] image::ImageError),
}

/// Result with the crate [`Error`]
pub type Result<T> = std::result::Result<T, Error>;
