use std::path::PathBuf;

use crate::errors::AppError;
use crate::storage::StorageMedium;

pub const DEFAULT_STORAGE_PATH: &str = "./.instance/storage.json";
pub const DEFAULT_STORAGE_KEY: &str = "contacts";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub storage_medium: StorageMedium,
    pub storage_path: PathBuf,
    /// Slot holding the serialized contact list.
    pub storage_key: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage_medium: StorageMedium::File,
            storage_path: PathBuf::from(DEFAULT_STORAGE_PATH),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }
}

impl Config {
    /// Builds a config from the raw `STORAGE_CHOICE`, `STORAGE_PATH` and
    /// `STORAGE_KEY` values. Unset values keep their defaults.
    pub fn from_values(
        choice: Option<String>,
        path: Option<String>,
        key: Option<String>,
    ) -> Result<Self, AppError> {
        let mut config = Config::default();

        if let Some(choice) = choice {
            config.storage_medium = StorageMedium::from(&choice)?;
        }
        if let Some(path) = path.filter(|p| !p.trim().is_empty()) {
            config.storage_path = PathBuf::from(path);
        }
        if let Some(key) = key {
            if key.trim().is_empty() {
                return Err(AppError::Config("storage key must not be empty".to_string()));
            }
            config.storage_key = key;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_nothing_is_set() -> Result<(), AppError> {
        let config = Config::from_values(None, None, None)?;
        assert_eq!(config, Config::default());
        assert!(config.storage_medium.is_file());
        assert_eq!(config.storage_key, "contacts");
        Ok(())
    }

    #[test]
    fn values_override_defaults() -> Result<(), AppError> {
        let config = Config::from_values(
            Some("mem".to_string()),
            Some("/tmp/book.json".to_string()),
            Some("book".to_string()),
        )?;

        assert!(config.storage_medium.is_mem());
        assert_eq!(config.storage_path, PathBuf::from("/tmp/book.json"));
        assert_eq!(config.storage_key, "book");
        Ok(())
    }

    #[test]
    fn rejects_unknown_medium_and_blank_key() {
        assert!(Config::from_values(Some("remote".to_string()), None, None).is_err());
        assert!(Config::from_values(None, None, Some(" ".to_string())).is_err());
    }
}
