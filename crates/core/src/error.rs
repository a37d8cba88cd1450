//! Error types for the fractal-lab core.

use thiserror::Error;

/// Errors produced by fractal generation and rasterization.
#[derive(Debug, Error)]
pub enum FractalError {
    /// Width or height was zero (or overflowed) when creating a raster.
    #[error("invalid dimensions: width and height must be non-zero")]
    InvalidDimensions,

    /// A parameter value fell outside its allowed range.
    #[error("invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    /// Geometry that cannot be generated without dividing by zero
    /// (e.g. branch angles summing to 180 degrees or more).
    #[error("degenerate geometry: {0}")]
    DegenerateGeometry(String),

    /// A color string could not be parsed.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// A requested fractal name was not recognized.
    #[error("unknown fractal: {0}")]
    UnknownFractal(String),

    /// An I/O failure while writing an image file.
    #[error("io error: {0}")]
    Io(String),
}

impl FractalError {
    /// Convenience constructor for out-of-range parameters.
    pub fn invalid_parameter(name: &str, reason: impl Into<String>) -> Self {
        FractalError::InvalidParameter {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}
