//! Error types for the preview engine.

use std::{io, result};

pub use font_inspect::Error as ParseError;

/// An upload rejected before any parsing was attempted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("file is {size} bytes, limit is {limit}")]
    TooLarge { size: u64, limit: u64 },

    #[error("unsupported font type: {name} ({mime})")]
    UnsupportedType { name: String, mime: String },
}

/// The rendering environment refused a font resource.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistrationError {
    #[error("font family already registered: {0}")]
    DuplicateFamily(String),

    #[error("font resource is empty")]
    EmptyResource,

    #[error("font resource rejected: {0}")]
    Rejected(String),
}

/// A failure inside the activation sequence.
#[derive(Debug, thiserror::Error)]
pub enum ActivationError {
    #[error("failed to read font file: {0}")]
    Read(#[source] io::Error),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("failed to register font: {0}")]
    Registration(#[from] RegistrationError),
}

/// A key/value store read or write failure.
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("settings store I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("settings store is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// The clipboard refused a write.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("clipboard write failed: {0}")]
pub struct ClipboardError(pub String);

/// Errors returned by session operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Activation(#[from] ActivationError),

    #[error("font size must be a positive number of pixels, got {0}")]
    InvalidFontSize(u32),

    #[error("no axis {0} in the active font")]
    UnknownAxis(String),

    #[error("axis {tag} needs a finite value, got {value}")]
    InvalidAxisValue { tag: String, value: f32 },

    #[error("no feature {0} in the active font")]
    UnknownFeature(String),

    #[error("selection {start}..{end} is outside the preview text ({len} characters)")]
    InvalidSelection { start: usize, end: usize, len: usize },

    #[error("no text is selected")]
    NoSelection,

    #[error("no feature is selected")]
    NoFeatureSelected,

    #[error(transparent)]
    Clipboard(#[from] ClipboardError),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

pub type Result<T> = result::Result<T, Error>;
