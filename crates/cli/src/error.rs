//! Structured CLI errors with meaningful exit codes.
//!
//! Exit code scheme:
//! - 0:  success
//! - 2:  clap arg parse error (automatic, before our code runs)
//! - 10: fractal error (unknown fractal, invalid parameters, degenerate geometry)
//! - 11: I/O error (file write, image encoding)
//! - 12: input error (bad JSON params)
//! - 13: serialization error

use fractal_lab_core::FractalError;
use std::fmt;

/// Errors produced by CLI operations, each mapped to a distinct exit code.
pub enum CliError {
    /// A fractal-level error (unknown name, invalid parameters, geometry).
    Fractal(FractalError),
    /// An I/O error (file write, image encoding).
    Io(String),
    /// A user input error (bad JSON params).
    Input(String),
    /// A serialization error (JSON output failure).
    Serialization(String),
}

impl CliError {
    /// Returns the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Fractal(_) => 10,
            CliError::Io(_) => 11,
            CliError::Input(_) => 12,
            CliError::Serialization(_) => 13,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Fractal(e) => write!(f, "{e}"),
            CliError::Io(msg) => write!(f, "{msg}"),
            CliError::Input(msg) => write!(f, "{msg}"),
            CliError::Serialization(msg) => write!(f, "{msg}"),
        }
    }
}

impl From<FractalError> for CliError {
    fn from(e: FractalError) -> Self {
        match e {
            FractalError::Io(msg) => CliError::Io(msg),
            other => CliError::Fractal(other),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Serialization(e.to_string())
    }
}
