//! User-facing message catalog.

use std::{fmt, str::FromStr};

use crate::notify::Severity;

/// Language of user-facing text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Locale {
    #[default]
    Arabic,
    English,
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ar" | "arabic" => Ok(Self::Arabic),
            "en" | "english" => Ok(Self::English),
            other => Err(format!("unknown locale '{other}', expected 'ar' or 'en'")),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Arabic => "ar",
            Self::English => "en",
        })
    }
}

/// Every message the engine can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Message {
    FileTooLarge,
    UnsupportedFileType,
    FontReadFailed,
    FontParseFailed,
    FontRegistrationFailed,
    FontLoaded,
    NoSelection,
    NoFeatureSelected,
    FeatureApplied,
    CssCopied,
    CssCopyFailed,
    NoAxes,
    NoFeatures,
}

impl Message {
    /// Severity used when the message is shown as a notification.
    pub fn severity(self) -> Severity {
        match self {
            Self::FileTooLarge
            | Self::UnsupportedFileType
            | Self::NoSelection
            | Self::NoFeatureSelected
            | Self::CssCopyFailed => Severity::Warning,
            Self::FontReadFailed | Self::FontParseFailed | Self::FontRegistrationFailed => {
                Severity::Danger
            }
            Self::FontLoaded | Self::FeatureApplied | Self::CssCopied => Severity::Success,
            Self::NoAxes | Self::NoFeatures => Severity::Info,
        }
    }

    pub fn text(self, locale: Locale) -> &'static str {
        match locale {
            Locale::Arabic => self.arabic(),
            Locale::English => self.english(),
        }
    }

    fn arabic(self) -> &'static str {
        match self {
            Self::FileTooLarge => "حجم الملف كبير جداً. الحد الأقصى هو 3 ميجابايت.",
            Self::UnsupportedFileType => "نوع الملف غير مدعوم. استخدم TTF أو OTF أو WOFF2.",
            Self::FontReadFailed => "تعذرت قراءة ملف الخط.",
            Self::FontParseFailed => "خطأ في تحميل الخط. تأكد من صحة الملف.",
            Self::FontRegistrationFailed => "تعذر تسجيل الخط للعرض.",
            Self::FontLoaded => "تم تحميل الخط بنجاح!",
            Self::NoSelection => "حدد جزءاً من النص أولاً",
            Self::NoFeatureSelected => "اختر خاصية OpenType أولاً",
            Self::FeatureApplied => "تم تطبيق الخاصية بنجاح!",
            Self::CssCopied => "تم نسخ CSS بنجاح!",
            Self::CssCopyFailed => "فشل في نسخ CSS",
            Self::NoAxes => "لا توجد محاور متغيرة في هذا الخط",
            Self::NoFeatures => "لا توجد خصائص OpenType",
        }
    }

    fn english(self) -> &'static str {
        match self {
            Self::FileTooLarge => "The file is too large. The maximum size is 3 MB.",
            Self::UnsupportedFileType => "Unsupported file type. Use TTF, OTF or WOFF2.",
            Self::FontReadFailed => "The font file could not be read.",
            Self::FontParseFailed => "The font could not be loaded. Check that the file is valid.",
            Self::FontRegistrationFailed => "The font could not be registered for rendering.",
            Self::FontLoaded => "Font loaded successfully!",
            Self::NoSelection => "Select part of the text first",
            Self::NoFeatureSelected => "Choose an OpenType feature first",
            Self::FeatureApplied => "Feature applied successfully!",
            Self::CssCopied => "CSS copied successfully!",
            Self::CssCopyFailed => "Failed to copy CSS",
            Self::NoAxes => "This font has no variation axes",
            Self::NoFeatures => "No OpenType features",
        }
    }
}

/// Human-readable description of an OpenType feature tag.
///
/// Unknown tags are described by the tag itself.
pub fn feature_description(tag: &str, locale: Locale) -> &str {
    let known = match locale {
        Locale::Arabic => match tag {
            "liga" => Some("ربط الحروف"),
            "kern" => Some("تباعد الحروف"),
            "mark" => Some("علامات التشكيل"),
            "mkmk" => Some("ربط العلامات"),
            "calt" => Some("بدائل السياق"),
            "salt" => Some("بدائل أسلوبية"),
            "swsh" => Some("حروف زخرفية"),
            "cswh" => Some("زخارف السياق"),
            "locl" => Some("أشكال محلية"),
            "init" => Some("الأشكال الابتدائية"),
            "medi" => Some("الأشكال الوسطية"),
            "fina" => Some("الأشكال النهائية"),
            "isol" => Some("الأشكال المنفصلة"),
            _ => None,
        },
        Locale::English => match tag {
            "liga" => Some("Standard ligatures"),
            "kern" => Some("Kerning"),
            "mark" => Some("Mark positioning"),
            "mkmk" => Some("Mark-to-mark positioning"),
            "calt" => Some("Contextual alternates"),
            "salt" => Some("Stylistic alternates"),
            "swsh" => Some("Swash"),
            "cswh" => Some("Contextual swash"),
            "locl" => Some("Localized forms"),
            "init" => Some("Initial forms"),
            "medi" => Some("Medial forms"),
            "fina" => Some("Terminal forms"),
            "isol" => Some("Isolated forms"),
            _ => None,
        },
    };
    known.unwrap_or(tag)
}
