//! fontdrop CLI library.

pub mod cli;
mod error;
pub mod io;

pub use error::ArgError;
pub use io::{FontFile, StdoutClipboard, guess_mime};
