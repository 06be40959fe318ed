//! Axis slider and feature list models, and the variation-settings description.

use std::fmt;

use font_inspect::VariationAxis;
use indexmap::IndexMap;

use crate::messages::{Locale, feature_description};

/// Ordered `(axis tag, value)` pairs applied to rendered text.
///
/// Displays as a CSS `font-variation-settings` value, e.g. `"wght" 400, "wdth" 100`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VariationSettings(Vec<(String, f32)>);

impl VariationSettings {
    pub fn new(pairs: impl IntoIterator<Item = (String, f32)>) -> Self {
        Self(pairs.into_iter().collect())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn pairs(&self) -> &[(String, f32)] {
        &self.0
    }

    /// Parse a serialized description. Malformed and non-finite entries are skipped.
    pub fn parse(s: &str) -> Self {
        Self(
            s.split(',')
                .filter_map(|entry| {
                    let (tag, value) = entry.trim().rsplit_once(' ')?;
                    let tag = tag.trim().strip_prefix('"')?.strip_suffix('"')?;
                    let value: f32 = value.trim().parse().ok()?;
                    value.is_finite().then(|| (tag.to_string(), value))
                })
                .collect(),
        )
    }

    pub fn to_map(&self) -> IndexMap<String, f32> {
        self.0.iter().cloned().collect()
    }
}

impl fmt::Display for VariationSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (tag, value)) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "\"{tag}\" {value}")?;
        }
        Ok(())
    }
}

/// Serialize feature tags as a CSS `font-feature-settings` value, e.g. `"liga" 1`.
pub fn feature_settings<S: AsRef<str>>(tags: &[S]) -> String {
    tags.iter().map(|t| format!("\"{}\" 1", t.as_ref())).collect::<Vec<_>>().join(", ")
}

/// One range input bound to a variation axis.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisSlider {
    pub tag: String,
    pub min: f32,
    pub max: f32,
    pub default: f32,
    pub value: f32,
}

impl AxisSlider {
    pub fn step(&self) -> f32 {
        (self.max - self.min) / 100.0
    }

    /// Label text: `wght: 400 (100-900)`.
    pub fn label(&self) -> String {
        format!("{}: {} ({}-{})", self.tag, self.value, self.min, self.max)
    }

    /// Non-finite values leave the slider where it is.
    fn set(&mut self, value: f32) -> f32 {
        if value.is_finite() {
            self.value = value.clamp(self.min, self.max);
        }
        self.value
    }
}

impl From<&VariationAxis> for AxisSlider {
    /// Inverted `fvar` ranges are normalized so that `min <= max`.
    fn from(axis: &VariationAxis) -> Self {
        let min = axis.min_value.min(axis.max_value);
        let max = axis.min_value.max(axis.max_value);
        let default = axis.default_value.clamp(min, max);
        Self { tag: axis.tag.clone(), min, max, default, value: default }
    }
}

/// The axis slider panel. Without sliders it shows a "no axes" placeholder.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AxisPanel {
    sliders: Vec<AxisSlider>,
}

impl AxisPanel {
    pub fn from_axes(axes: &[VariationAxis]) -> Self {
        Self { sliders: axes.iter().map(AxisSlider::from).collect() }
    }

    pub fn sliders(&self) -> &[AxisSlider] {
        &self.sliders
    }

    pub fn is_placeholder(&self) -> bool {
        self.sliders.is_empty()
    }

    /// Set an axis value, clamped to its range. Returns the value applied.
    /// NaN and infinities are ignored and return the current value.
    pub fn set_value(&mut self, tag: &str, value: f32) -> Option<f32> {
        self.sliders.iter_mut().find(|s| s.tag == tag).map(|s| s.set(value))
    }

    /// The current values in display order.
    pub fn variation_settings(&self) -> VariationSettings {
        VariationSettings::new(self.sliders.iter().map(|s| (s.tag.clone(), s.value)))
    }
}

/// One selectable feature tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureOption {
    pub tag: String,
    pub description: String,
    pub selected: bool,
}

impl FeatureOption {
    /// Option text: `liga - Standard ligatures`.
    pub fn label(&self) -> String {
        format!("{} - {}", self.tag, self.description)
    }
}

/// The feature tag list. Without options it shows a "no features" placeholder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeatureList {
    options: Vec<FeatureOption>,
}

impl FeatureList {
    pub fn from_tags<S: AsRef<str>>(tags: &[S], locale: Locale) -> Self {
        let mut options: Vec<FeatureOption> = Vec::with_capacity(tags.len());
        for tag in tags {
            let tag: &str = tag.as_ref();
            if options.iter().any(|o| o.tag == tag) {
                continue;
            }
            options.push(FeatureOption {
                tag: tag.to_string(),
                description: feature_description(tag, locale).to_string(),
                selected: false,
            });
        }
        Self { options }
    }

    pub fn options(&self) -> &[FeatureOption] {
        &self.options
    }

    pub fn is_placeholder(&self) -> bool {
        self.options.is_empty()
    }

    /// Replace the selection with `tags`. Fails on the first unknown tag,
    /// leaving the previous selection unchanged.
    pub fn select<S: AsRef<str>>(&mut self, tags: &[S]) -> Result<(), String> {
        for tag in tags {
            let tag: &str = tag.as_ref();
            if !self.options.iter().any(|o| o.tag == tag) {
                return Err(tag.to_string());
            }
        }
        for option in &mut self.options {
            option.selected = tags.iter().any(|t| t.as_ref() == option.tag);
        }
        Ok(())
    }

    /// Selected tags in list order.
    pub fn selected(&self) -> Vec<&str> {
        self.options.iter().filter(|o| o.selected).map(|o| o.tag.as_str()).collect()
    }
}
