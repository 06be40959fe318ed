//! Persisted preview settings and their key/value backends.

use std::{
    cell::RefCell,
    collections::{BTreeMap, HashMap},
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
    rc::Rc,
};

use indexmap::IndexMap;
use log::{debug, error};
use serde::{Deserialize, Deserializer, Serialize, de};

use crate::{controls::VariationSettings, error::PersistenceError};

/// String key/value storage scoped to one origin.
pub trait KeyValueStore {
    /// `Ok(None)` when the key is absent.
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistenceError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistenceError> {
        (**self).set(key, value)
    }
}

/// A store held in memory. Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore(Rc<RefCell<HashMap<String, String>>>);

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        Ok(self.0.borrow().get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistenceError> {
        self.0.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// A store persisted as a JSON object in one file.
///
/// A missing file reads as an empty store. Each `set` rewrites the file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, PersistenceError> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistenceError> {
        let mut all = self.read_all()?;
        all.insert(key.to_string(), value.to_string());
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(&all)?)?;
        Ok(())
    }
}

/// The record written under the settings key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewSettings {
    #[serde(deserialize_with = "positive_size")]
    pub font_size: u32,
    #[serde(default)]
    pub variation_settings: String,
    #[serde(default)]
    pub font_family: Option<String>,
}

impl PreviewSettings {
    /// Axis values recovered from the stored description.
    pub fn axis_values(&self) -> IndexMap<String, f32> {
        VariationSettings::parse(&self.variation_settings).to_map()
    }
}

/// Accepts a positive integer given as a JSON number or a numeric string.
fn positive_size<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u32),
        Text(String),
    }

    let size = match Raw::deserialize(deserializer)? {
        Raw::Number(n) => n,
        Raw::Text(s) => s.trim().parse().map_err(de::Error::custom)?,
    };
    if size == 0 {
        return Err(de::Error::custom("font size must be positive"));
    }
    Ok(size)
}

/// Reads and writes [`PreviewSettings`] under a fixed key.
pub struct SettingsStore {
    backend: Box<dyn KeyValueStore>,
    key: String,
}

impl SettingsStore {
    pub fn new(backend: impl KeyValueStore + 'static, key: impl Into<String>) -> Self {
        Self { backend: Box::new(backend), key: key.into() }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Overwrite the stored record.
    pub fn save(&mut self, settings: &PreviewSettings) -> Result<(), PersistenceError> {
        let json = serde_json::to_string(settings)?;
        self.backend.set(&self.key, &json)
    }

    /// Read the stored record. Absent, unreadable and malformed records all
    /// yield `None`; failures are logged.
    pub fn load(&self) -> Option<PreviewSettings> {
        let raw = match self.backend.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("No saved settings under '{}'", self.key);
                return None;
            }
            Err(e) => {
                error!("Error loading settings: {e}");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(settings) => Some(settings),
            Err(e) => {
                error!("Error loading settings: {e}");
                None
            }
        }
    }
}
