//! Error types for font inspection.

use std::result;

use read_fonts::ReadError;

/// Errors that can occur while inspecting a font binary.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to parse font: {0}")]
    Parse(#[from] ReadError),

    #[error("font data is empty")]
    Empty,
}

pub type Result<T> = result::Result<T, Error>;
