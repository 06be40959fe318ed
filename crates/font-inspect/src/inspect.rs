use std::collections::HashSet;

use log::debug;
use read_fonts::{FontRef, TableProvider};
use skrifa::MetadataProvider;

use crate::{Error, ParsedFont, Result, VariationAxis};

/// Parse font data and collect its variation axes and GSUB feature tags.
///
/// Missing `fvar` or `GSUB` tables are not errors; they yield empty lists.
/// A malformed GSUB feature list is treated the same way.
pub fn inspect(data: &[u8]) -> Result<ParsedFont> {
    if data.is_empty() {
        return Err(Error::Empty);
    }
    let font = FontRef::new(data)?;

    let axes = font
        .axes()
        .iter()
        .map(|axis| {
            VariationAxis::new(
                axis.tag().to_string(),
                axis.min_value(),
                axis.max_value(),
                axis.default_value(),
            )
        })
        .collect();

    Ok(ParsedFont { axes, features: feature_tags(&font) })
}

fn feature_tags(font: &FontRef) -> Vec<String> {
    let Ok(gsub) = font.gsub() else {
        return Vec::new();
    };
    let feature_list = match gsub.feature_list() {
        Ok(list) => list,
        Err(e) => {
            debug!("Ignoring unreadable GSUB feature list: {e}");
            return Vec::new();
        }
    };

    let mut seen = HashSet::new();
    feature_list
        .feature_records()
        .iter()
        .map(|r| r.feature_tag().to_string())
        .filter(|tag| seen.insert(tag.clone()))
        .collect()
}
