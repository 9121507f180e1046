pub mod file;
pub mod memory;
pub mod storage_port;

use std::fs;
use std::path::Path;

use crate::config::Config;
use crate::errors::{AppError, StorageError};

pub use file::FileStore;
pub use memory::MemoryStore;

/// Persistent string-keyed store, the role local storage plays in a browser.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    fn get_medium(&self) -> &str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageMedium {
    Mem,
    File,
}

impl StorageMedium {
    pub fn is_mem(&self) -> bool {
        matches!(self, StorageMedium::Mem)
    }

    pub fn is_file(&self) -> bool {
        matches!(self, StorageMedium::File)
    }

    pub fn is_which(&self) -> &str {
        if self.is_mem() { "mem" } else { "file" }
    }

    pub fn from(str: &str) -> Result<Self, AppError> {
        match str.to_lowercase().as_str() {
            "mem" => Ok(StorageMedium::Mem),
            "file" | "json" => Ok(StorageMedium::File),
            _ => Err(AppError::Config(format!(
                "'{str}' is not a recognized storage medium (mem, file)"
            ))),
        }
    }
}

pub fn parse_storage_type(config: &Config) -> Box<dyn KeyValueStore> {
    match config.storage_medium {
        StorageMedium::Mem => Box::new(MemoryStore::new()),
        StorageMedium::File => Box::new(FileStore::new(&config.storage_path)),
    }
}

pub fn create_file_parent(path: &Path) -> Result<(), std::io::Error> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}
