use std::collections::HashSet;

use chrono::Utc;
use tracing::{debug, info, warn};

use super::contact::{Contact, ContactDraft, ContactId, validate_phone};
use super::search::{Counts, Search};
use crate::config::Config;
use crate::errors::{ContactError, StorageError};
use crate::storage::{KeyValueStore, parse_storage_type};

/// Owns the contact list and is the only writer of its storage slot.
///
/// The list is read once when the store is built and written back after every
/// successful mutation. If the write fails the mutation is undone, so the list
/// in memory always matches what was last persisted.
pub struct ContactStore {
    contacts: Vec<Contact>,
    storage: Box<dyn KeyValueStore>,
    key: String,
    editing: Option<ContactId>,
    last_id: i64,
}

impl ContactStore {
    /// Reads the slot `key` from `storage`. Missing or unreadable data gives an
    /// empty list instead of an error.
    pub fn load(storage: Box<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        let key = key.into();
        let contacts = read_persisted(storage.as_ref(), &key);
        let last_id = contacts.iter().map(|c| c.id.0).max().unwrap_or_default();

        info!(
            medium = storage.get_medium(),
            key = %key,
            contacts = contacts.len(),
            "contact store loaded"
        );

        Self {
            contacts,
            storage,
            key,
            editing: None,
            last_id,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::load(parse_storage_type(config), config.storage_key.as_str())
    }

    /// All contacts in display order (the order they were added).
    pub fn list(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn get(&self, id: ContactId) -> Option<&Contact> {
        self.contacts.iter().find(|c| c.id == id)
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    /// Checks `candidate` against the rules in order and reports the first one
    /// it breaks. The contact `excluding` may already own the phone number.
    pub fn validate(
        &self,
        candidate: &ContactDraft,
        excluding: Option<ContactId>,
    ) -> Result<(), ContactError> {
        if !candidate.has_required_fields() {
            return Err(ContactError::MissingRequiredField);
        }

        if !validate_phone(&candidate.phone) {
            return Err(ContactError::InvalidPhoneFormat);
        }

        if self
            .contacts
            .iter()
            .any(|c| c.phone == candidate.phone && Some(c.id) != excluding)
        {
            return Err(ContactError::DuplicatePhone);
        }

        Ok(())
    }

    pub fn add(&mut self, candidate: ContactDraft) -> Result<Contact, ContactError> {
        self.validate(&candidate, None)?;

        let id = self.next_id();
        let contact = Contact::from_draft(id, candidate);
        self.contacts.push(contact.clone());

        if let Err(e) = self.save() {
            self.contacts.pop();
            return Err(e.into());
        }

        info!(id = %id, "contact added");
        Ok(contact)
    }

    /// Replaces every field of contact `id` but keeps its id and position.
    pub fn update(&mut self, id: ContactId, candidate: ContactDraft) -> Result<Contact, ContactError> {
        let index = self.position(id)?;
        self.validate(&candidate, Some(id))?;

        let previous = self.contacts[index].clone();
        self.contacts[index].apply(candidate);

        if let Err(e) = self.save() {
            self.contacts[index] = previous;
            return Err(e.into());
        }

        info!(id = %id, "contact updated");
        Ok(self.contacts[index].clone())
    }

    /// Removes contact `id`. Returns `false` without touching storage when no
    /// such contact exists.
    pub fn delete(&mut self, id: ContactId) -> Result<bool, ContactError> {
        let Some(index) = self.contacts.iter().position(|c| c.id == id) else {
            debug!(id = %id, "delete ignored, no such contact");
            return Ok(false);
        };

        let removed = self.contacts.remove(index);

        if let Err(e) = self.save() {
            self.contacts.insert(index, removed);
            return Err(e.into());
        }

        if self.editing == Some(id) {
            self.editing = None;
        }

        info!(id = %id, "contact deleted");
        Ok(true)
    }

    /// Flips the favorite flag and returns its new value.
    pub fn toggle_favorite(&mut self, id: ContactId) -> Result<bool, ContactError> {
        self.toggle(id, |c| &mut c.favorite)
    }

    /// Flips the emergency flag and returns its new value.
    pub fn toggle_emergency(&mut self, id: ContactId) -> Result<bool, ContactError> {
        self.toggle(id, |c| &mut c.emergency)
    }

    pub fn search(&self, query: &str) -> Search<'_> {
        Search::new(&self.contacts, query)
    }

    pub fn counts(&self) -> Counts {
        Counts::of(&self.contacts)
    }

    pub fn favorites(&self) -> impl Iterator<Item = &Contact> {
        self.contacts.iter().filter(|c| c.favorite)
    }

    pub fn emergencies(&self) -> impl Iterator<Item = &Contact> {
        self.contacts.iter().filter(|c| c.emergency)
    }

    /// Marks contact `id` as being edited and returns its current fields.
    pub fn begin_edit(&mut self, id: ContactId) -> Result<ContactDraft, ContactError> {
        let draft = self
            .get(id)
            .map(Contact::to_draft)
            .ok_or(ContactError::NotFound(id))?;
        self.editing = Some(id);
        Ok(draft)
    }

    pub fn editing(&self) -> Option<ContactId> {
        self.editing
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// Updates the contact under edit. The edit stays open if the update fails.
    pub fn commit_edit(&mut self, candidate: ContactDraft) -> Result<Contact, ContactError> {
        let id = self.editing.ok_or(ContactError::NoEditInProgress)?;
        let updated = self.update(id, candidate)?;
        self.editing = None;
        Ok(updated)
    }

    fn toggle(
        &mut self,
        id: ContactId,
        flag: impl Fn(&mut Contact) -> &mut bool,
    ) -> Result<bool, ContactError> {
        let index = self.position(id)?;

        let value = flag(&mut self.contacts[index]);
        *value = !*value;
        let new_value = *value;

        if let Err(e) = self.save() {
            let value = flag(&mut self.contacts[index]);
            *value = !*value;
            return Err(e.into());
        }

        debug!(id = %id, value = new_value, "flag toggled");
        Ok(new_value)
    }

    fn position(&self, id: ContactId) -> Result<usize, ContactError> {
        self.contacts
            .iter()
            .position(|c| c.id == id)
            .ok_or(ContactError::NotFound(id))
    }

    // Creation time in milliseconds, bumped when two contacts share a millisecond.
    fn next_id(&mut self) -> ContactId {
        let now = Utc::now().timestamp_millis();
        match self.last_id.checked_add(1) {
            Some(next) => {
                self.last_id = now.max(next);
                ContactId(self.last_id)
            }
            // A stored id sits at the top of the range: take the first free one.
            None => {
                let used: HashSet<i64> = self.contacts.iter().map(|c| c.id.0).collect();
                let mut id = now.max(1);
                while used.contains(&id) {
                    id = id.checked_add(1).unwrap_or(1);
                }
                ContactId(id)
            }
        }
    }

    fn save(&self) -> Result<(), StorageError> {
        let data = serde_json::to_string(&self.contacts)?;
        self.storage.set(&self.key, &data)
    }
}

fn read_persisted(storage: &dyn KeyValueStore, key: &str) -> Vec<Contact> {
    let data = match storage.get(key) {
        Ok(Some(data)) => data,
        Ok(None) => return Vec::new(),
        Err(e) => {
            warn!(key, error = %e, "could not read contacts, starting empty");
            return Vec::new();
        }
    };

    let records: Vec<Contact> = match serde_json::from_str(&data) {
        Ok(records) => records,
        Err(e) => {
            warn!(key, error = %e, "stored contacts are malformed, starting empty");
            return Vec::new();
        }
    };

    let mut seen = HashSet::new();
    let mut phones = HashSet::new();
    records
        .into_iter()
        .filter(|c| {
            if c.name.trim().is_empty() || c.phone.trim().is_empty() {
                warn!(id = %c.id, "dropping stored contact without name or phone");
                return false;
            }
            if !seen.insert(c.id) {
                warn!(id = %c.id, "dropping stored contact with duplicate id");
                return false;
            }
            if !phones.insert(c.phone.clone()) {
                warn!(id = %c.id, "dropping stored contact with duplicate phone");
                return false;
            }
            true
        })
        .collect()
}
