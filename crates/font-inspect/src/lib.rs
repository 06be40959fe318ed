//! # Font Inspect
//!
//! Read the variation axes (`fvar`) and OpenType substitution feature tags
//! (`GSUB`) a font declares.
//!
//! ## Example
//!
//! ```no_run
//! let data = std::fs::read("variable.ttf").unwrap();
//! let font = font_inspect::inspect(&data).unwrap();
//! for axis in &font.axes {
//!     println!("{} {}..{} ({})", axis.tag, axis.min_value, axis.max_value, axis.default_value);
//! }
//! ```

mod error;
mod inspect;

pub use error::{Error, Result};
pub use inspect::inspect;

/// A variation axis declared in the font's `fvar` table, in user-space units.
#[derive(Debug, Clone, PartialEq)]
pub struct VariationAxis {
    pub tag: String,
    pub min_value: f32,
    pub max_value: f32,
    pub default_value: f32,
}

impl VariationAxis {
    pub fn new(tag: impl Into<String>, min_value: f32, max_value: f32, default_value: f32) -> Self {
        Self { tag: tag.into(), min_value, max_value, default_value }
    }
}

impl From<(&str, f32, f32, f32)> for VariationAxis {
    fn from((tag, min, max, default): (&str, f32, f32, f32)) -> Self {
        Self::new(tag, min, max, default)
    }
}

/// The tables of a parsed font that matter for previewing it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedFont {
    /// Variation axes in `fvar` order. Empty for static fonts.
    pub axes: Vec<VariationAxis>,
    /// Distinct GSUB feature tags, in first-seen order. Empty without a GSUB table.
    pub features: Vec<String>,
}

impl ParsedFont {
    pub fn is_variable(&self) -> bool {
        !self.axes.is_empty()
    }

    pub fn has_features(&self) -> bool {
        !self.features.is_empty()
    }
}
