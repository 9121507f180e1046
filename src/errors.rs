use thiserror::Error;

use crate::domain::contact::ContactId;

/// Failures of the key-value storage collaborator.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error while accessing storage: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage data is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Reasons a contact operation is refused.
///
/// All of them are recoverable and meant to be shown to the user as-is.
/// Validation failures are detected before anything is mutated.
#[derive(Debug, Error)]
pub enum ContactError {
    #[error("Name & Phone are required")]
    MissingRequiredField,

    #[error("Invalid phone number, expected 01 followed by 9 digits")]
    InvalidPhoneFormat,

    #[error("Phone already exists")]
    DuplicatePhone,

    #[error("Contact {0} not found")]
    NotFound(ContactId),

    #[error("No contact is being edited")]
    NoEditInProgress,

    #[error("Contact could not be saved: {0}")]
    Storage(#[from] StorageError),
}

impl ContactError {
    /// True for the three rules checked by validation.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ContactError::MissingRequiredField
                | ContactError::InvalidPhoneFormat
                | ContactError::DuplicatePhone
        )
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Contact(#[from] ContactError),

    #[error("I/O error while accessing a file or resource: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("{0} Not found")]
    NotFound(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Photo error: {0}")]
    Photo(String),

    #[error("Configuration error: {0}")]
    Config(String),
}
