//! Font registration with the rendering environment.

use std::{collections::HashMap, fmt, sync::Arc};

use log::debug;

use crate::{config::FONT_FAMILY_PREFIX, error::RegistrationError};

/// A font family name generated for one activation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FontFamilyId(String);

impl FontFamilyId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FontFamilyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Generates family identifiers from a millisecond timestamp.
///
/// A timestamp that does not advance past the previous one is bumped, so two
/// activations in the same session never share a name.
#[derive(Debug, Clone)]
pub struct FamilyNamer {
    prefix: String,
    last: Option<i64>,
}

impl Default for FamilyNamer {
    fn default() -> Self {
        Self::new(FONT_FAMILY_PREFIX)
    }
}

impl FamilyNamer {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self { prefix: prefix.into(), last: None }
    }

    pub fn next_at(&mut self, timestamp_millis: i64) -> FontFamilyId {
        let stamp = match self.last {
            Some(last) if timestamp_millis <= last => last + 1,
            _ => timestamp_millis,
        };
        self.last = Some(stamp);
        FontFamilyId(format!("{}{stamp}", self.prefix))
    }

    pub fn next(&mut self) -> FontFamilyId {
        self.next_at(chrono::Utc::now().timestamp_millis())
    }
}

/// Font bytes handed to the rendering environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontResource {
    pub data: Arc<[u8]>,
    pub mime: String,
}

impl FontResource {
    pub fn new(data: impl Into<Arc<[u8]>>, mime: impl Into<String>) -> Self {
        Self { data: data.into(), mime: mime.into() }
    }
}

/// Loads font resources so text can be rendered with them.
///
/// `register` returns once the resource is ready for use or has been refused.
pub trait RenderingEnvironment {
    fn register(
        &mut self,
        family: &FontFamilyId,
        resource: FontResource,
    ) -> Result<(), RegistrationError>;

    /// Drop a family that is no longer displayed.
    fn release(&mut self, _family: &FontFamilyId) {}
}

/// An in-memory registry of loaded fonts.
#[derive(Debug, Clone, Default)]
pub struct FontRegistry {
    fonts: HashMap<FontFamilyId, FontResource>,
}

impl FontRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, family: &FontFamilyId) -> Option<&FontResource> {
        self.fonts.get(family)
    }

    pub fn contains(&self, family: &FontFamilyId) -> bool {
        self.fonts.contains_key(family)
    }

    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }
}

impl RenderingEnvironment for FontRegistry {
    fn register(
        &mut self,
        family: &FontFamilyId,
        resource: FontResource,
    ) -> Result<(), RegistrationError> {
        if resource.data.is_empty() {
            return Err(RegistrationError::EmptyResource);
        }
        if self.fonts.contains_key(family) {
            return Err(RegistrationError::DuplicateFamily(family.to_string()));
        }
        debug!("Registered {family} ({} bytes)", resource.data.len());
        self.fonts.insert(family.clone(), resource);
        Ok(())
    }

    fn release(&mut self, family: &FontFamilyId) {
        if self.fonts.remove(family).is_some() {
            debug!("Released {family}");
        }
    }
}
