use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use super::KeyValueStore;
use crate::errors::StorageError;

/// Slots held in process memory. Clones share the same slots.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    data: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store with one slot already written.
    pub fn with_slot(key: &str, value: &str) -> Self {
        let store = Self::new();
        store
            .data
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        store
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.data.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.data
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn get_medium(&self) -> &str {
        "mem"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_slots() -> Result<(), StorageError> {
        let store = MemoryStore::new();
        let handle = store.clone();

        assert_eq!(handle.get("contacts")?, None);
        store.set("contacts", "[]")?;
        assert_eq!(handle.get("contacts")?.as_deref(), Some("[]"));
        Ok(())
    }
}
