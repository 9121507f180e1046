pub mod contact;
pub mod manager;
pub mod search;

pub use contact::{Contact, ContactDraft, ContactId};
pub use manager::ContactStore;
pub use search::{Counts, Search};
