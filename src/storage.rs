//! Key-value persistence for presets, configuration and session state.
//!
//! Values are JSON documents. Native builds keep one file per key in the
//! platform config directory; the browser build uses `localStorage`.

use std::collections::HashMap;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::StorageError;

/// String key-value store.
pub trait KeyValueStore {
    /// Read a value. `Ok(None)` if the key is absent.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write a value, replacing any previous one.
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete a value. Missing keys are not an error.
    fn remove_item(&mut self, key: &str) -> Result<(), StorageError>;
}

/// Load and parse a JSON value, falling back to `None` on any failure.
pub fn load_json<T: DeserializeOwned>(store: &impl KeyValueStore, key: &str) -> Option<T> {
    match store.get_item(key) {
        Ok(Some(json)) => match serde_json::from_str(&json) {
            Ok(value) => Some(value),
            Err(e) => {
                log::warn!("Ignoring corrupt value for '{}': {}", key, e);
                None
            }
        },
        Ok(None) => {
            log::debug!("No stored value for '{}'", key);
            None
        }
        Err(e) => {
            log::warn!("Failed to read '{}': {}", key, e);
            None
        }
    }
}

/// Serialize and store a value. Failures are logged and reported as `false`.
pub fn save_json<T: Serialize + ?Sized>(store: &mut impl KeyValueStore, key: &str, value: &T) -> bool {
    let result = serde_json::to_string(value)
        .map_err(StorageError::from)
        .and_then(|json| store.set_item(key, &json));
    match result {
        Ok(()) => true,
        Err(e) => {
            log::error!("Failed to save '{}': {}", key, e);
            false
        }
    }
}

/// In-memory store, used in tests and when no persistent store is available.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    items: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        self.items.remove(key);
        Ok(())
    }
}

/// File-backed store: `<dir>/<key>.json` per key.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: std::path::PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl FileStore {
    /// Directory name under the platform config dir.
    pub const APP_DIR: &'static str = "protocalc";

    /// Store rooted at an explicit directory.
    pub fn new(dir: impl Into<std::path::PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store in the platform config directory, falling back to `~/.config`.
    pub fn default_location() -> Result<Self, StorageError> {
        let base = dirs::config_dir()
            .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
            .ok_or_else(|| {
                StorageError::Unavailable("could not determine config directory".to_string())
            })?;
        Ok(Self::new(base.join(Self::APP_DIR)))
    }

    pub fn dir(&self) -> &std::path::Path {
        &self.dir
    }

    fn path(&self, key: &str) -> std::path::PathBuf {
        let name: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '_' || c == '-' { c } else { '_' })
            .collect();
        self.dir.join(format!("{}.json", name))
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl KeyValueStore for FileStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        match std::fs::read_to_string(self.path(key)) {
            Ok(json) => Ok(Some(json)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.path(key);
        std::fs::write(&path, value)?;
        log::debug!("💾 Wrote {:?}", path);
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        match std::fs::remove_file(self.path(key)) {
            Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }
}

/// Browser `localStorage`.
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone)]
pub struct LocalStore {
    storage: web_sys::Storage,
}

#[cfg(target_arch = "wasm32")]
impl LocalStore {
    /// Open the window's `localStorage`.
    pub fn open() -> Result<Self, StorageError> {
        let window = web_sys::window()
            .ok_or_else(|| StorageError::Unavailable("No window object available".to_string()))?;
        let storage = window
            .local_storage()
            .map_err(|e| StorageError::Unavailable(format!("localStorage access error: {:?}", e)))?
            .ok_or_else(|| StorageError::Unavailable("localStorage not available".to_string()))?;
        Ok(Self { storage })
    }
}

#[cfg(target_arch = "wasm32")]
impl KeyValueStore for LocalStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.storage
            .get_item(key)
            .map_err(|e| StorageError::Unavailable(format!("Failed to read localStorage: {:?}", e)))
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.storage
            .set_item(key, value)
            .map_err(|e| StorageError::Unavailable(format!("Failed to save to localStorage: {:?}", e)))
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        self.storage
            .remove_item(key)
            .map_err(|e| StorageError::Unavailable(format!("Failed to remove from localStorage: {:?}", e)))
    }
}
