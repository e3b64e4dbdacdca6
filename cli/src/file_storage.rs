//! Session storage backed by a single JSON file.
//!
//! The file holds one flat object of string values, so the persisted layout
//! matches the browser's `localStorage` keys one for one.

#[cfg(test)]
#[path = "file_storage_test.rs"]
mod file_storage_test;

use std::fs::OpenOptions;
use std::io::{self, Write as _};
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use session::{KeyValueStorage, StorageError};

#[derive(Clone, Debug)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Map<String, Value>, StorageError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => return Err(e.into()),
        };
        if raw.trim().is_empty() {
            return Ok(Map::new());
        }
        match serde_json::from_str::<Value>(&raw)? {
            Value::Object(map) => Ok(map),
            _ => Err(StorageError::Unavailable(format!("{} is not a JSON object", self.path.display()))),
        }
    }

    fn save(&self, map: &Map<String, Value>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let rendered = serde_json::to_string_pretty(map)?;
        let tmp = self.path.with_extension("json.tmp");
        // `mode` only applies on create, so a leftover temp file is replaced.
        match std::fs::remove_file(&tmp) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => return Err(e.into()),
            _ => {}
        }
        let mut file = owner_only_options().open(&tmp)?;
        file.write_all(rendered.as_bytes())?;
        file.sync_all()?;
        drop(file);
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

/// The file holds a bearer token: readable by the owner only.
fn owner_only_options() -> OpenOptions {
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt as _;
        options.mode(0o600);
    }
    options
}

impl KeyValueStorage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.load()?.get(key).and_then(Value::as_str).map(str::to_owned))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut map = self.load()?;
        map.insert(key.to_owned(), Value::String(value.to_owned()));
        self.save(&map)
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let mut map = self.load()?;
        if map.remove(key).is_none() {
            return Ok(());
        }
        if map.is_empty() {
            return match std::fs::remove_file(&self.path) {
                Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e.into()),
                _ => Ok(()),
            };
        }
        self.save(&map)
    }
}
