pub use crate::cli::{command, run_app};
pub use crate::config::Config;
pub use crate::domain::{
    contact::{self, Contact, ContactDraft, ContactId, validate_phone},
    manager::ContactStore,
    search::{Counts, Search},
};
pub use crate::errors::{AppError, ContactError, StorageError};
pub use crate::photo::encode_photo;
pub use crate::storage::{
    self, FileStore, KeyValueStore, MemoryStore, StorageMedium,
    storage_port::{ImportReport, export_contacts_to_csv, import_contacts_from_csv},
};
