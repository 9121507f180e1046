use std::collections::BTreeMap;
use std::fs::{self, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::{KeyValueStore, create_file_parent};
use crate::errors::StorageError;

/// Slots kept as one JSON object in a file on disk.
pub struct FileStore {
    pub medium: String,
    pub path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            medium: "file".to_string(),
            path: path.as_ref().to_path_buf(),
        }
    }

    // storage.json -> storage.json.bak
    fn backup_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_os_string();
        name.push(".bak");
        PathBuf::from(name)
    }

    fn read_slots(&self) -> Result<BTreeMap<String, String>, StorageError> {
        if !fs::exists(&self.path)? {
            return Ok(BTreeMap::new());
        }

        let mut file = OpenOptions::new().read(true).open(&self.path)?;
        let mut data = String::new();
        file.read_to_string(&mut data)?;

        // serde_json will give an error if data is empty
        if data.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        Ok(serde_json::from_str(&data)?)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let mut slots = self.read_slots()?;
        Ok(slots.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut slots = match self.read_slots() {
            Ok(slots) => slots,
            Err(StorageError::Json(e)) => {
                let backup = self.backup_path();
                warn!(
                    path = %self.path.display(),
                    backup = %backup.display(),
                    error = %e,
                    "moving unreadable storage file aside"
                );
                fs::rename(&self.path, &backup)?;
                BTreeMap::new()
            }
            Err(e) => return Err(e),
        };
        slots.insert(key.to_string(), value.to_string());

        create_file_parent(&self.path)?;
        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&self.path)?;

        let data = serde_json::to_string(&slots)?;
        file.write_all(data.as_bytes())?;

        debug!(path = %self.path.display(), key, bytes = value.len(), "slot written");
        Ok(())
    }

    fn get_medium(&self) -> &str {
        &self.medium
    }
}
