//! Configuration constants for the preview engine.

use std::time::Duration;

use crate::messages::Locale;

/// Largest accepted upload, in bytes (3 MiB).
pub const MAX_UPLOAD_BYTES: u64 = 3 * 1024 * 1024;

/// MIME types accepted without looking at the filename.
pub const ACCEPTED_MIME_TYPES: &[&str] = &[
    "font/ttf",
    "font/otf",
    "font/woff2",
    "application/font-sfnt",
    "application/vnd.ms-opentype",
];

/// Filename extensions accepted regardless of MIME type (compared lowercase).
pub const ACCEPTED_EXTENSIONS: &[&str] = &[".ttf", ".otf", ".woff2"];

/// Key under which preview settings are persisted.
pub const SETTINGS_KEY: &str = "fontdropSettings";

/// Prefix of generated font family identifiers.
pub const FONT_FAMILY_PREFIX: &str = "FontDrop_";

/// Delay before the progress indicator is hidden after an activation ends.
pub const PROGRESS_HIDE_DELAY: Duration = Duration::from_secs(1);

/// How long a notification stays on screen.
pub const NOTIFICATION_DURATION: Duration = Duration::from_secs(5);

/// Preview font size before any settings are restored.
pub const DEFAULT_FONT_SIZE_PX: u32 = 48;

/// Family written to exported CSS when no font is active.
pub const FALLBACK_FONT_FAMILY: &str = "Arial";

/// Text color written to exported CSS when the color source has none.
pub const DEFAULT_TEXT_COLOR: &str = "#000000";

/// Runtime preview configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewConfig {
    pub locale: Locale,
    pub default_font_size_px: u32,
    pub fallback_font_family: String,
    pub default_text_color: String,
    pub settings_key: String,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            locale: Locale::default(),
            default_font_size_px: DEFAULT_FONT_SIZE_PX,
            fallback_font_family: FALLBACK_FONT_FAMILY.to_string(),
            default_text_color: DEFAULT_TEXT_COLOR.to_string(),
            settings_key: SETTINGS_KEY.to_string(),
        }
    }
}

impl PreviewConfig {
    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    pub fn with_settings_key(mut self, key: impl Into<String>) -> Self {
        self.settings_key = key.into();
        self
    }
}
