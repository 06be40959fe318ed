//! The live preview surface and CSS export.

use crate::{controls::VariationSettings, document::PreviewDocument, render::FontFamilyId};

/// Visual state of the live preview.
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewSurface {
    pub font_family: Option<FontFamilyId>,
    pub font_size_px: u32,
    pub variation_settings: VariationSettings,
    pub grid_visible: bool,
    pub document: PreviewDocument,
}

impl PreviewSurface {
    pub fn new(font_size_px: u32) -> Self {
        Self {
            font_family: None,
            font_size_px,
            variation_settings: VariationSettings::default(),
            grid_visible: true,
            document: PreviewDocument::default(),
        }
    }
}

/// Inputs of an exported CSS declaration block.
#[derive(Debug, Clone, Copy)]
pub struct CssExport<'a> {
    pub font_family: Option<&'a str>,
    pub fallback_family: &'a str,
    pub font_size_px: u32,
    pub color: &'a str,
    pub variation_settings: &'a VariationSettings,
}

impl CssExport<'_> {
    /// Render the declaration block. The variation line is omitted when empty.
    pub fn render(&self) -> String {
        let mut css = format!(
            "font-family: '{}';\nfont-size: {}px;\ncolor: {};",
            self.font_family.unwrap_or(self.fallback_family),
            self.font_size_px,
            self.color,
        );
        if !self.variation_settings.is_empty() {
            css.push_str(&format!("\nfont-variation-settings: {};", self.variation_settings));
        }
        css
    }
}
