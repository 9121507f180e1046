use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

// `\d` is Unicode-aware in `regex`; phone numbers are ASCII only.
static PHONE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^01[0-9]{9}$").unwrap());

/// Stable identity of a contact: its creation time in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContactId(pub i64);

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: ContactId,
    pub name: String,
    pub phone: String,

    #[serde(
        default,
        deserialize_with = "deserialize_optional_text",
        serialize_with = "serialize_optional_text"
    )]
    pub email: Option<String>,

    #[serde(
        default,
        deserialize_with = "deserialize_optional_text",
        serialize_with = "serialize_optional_text"
    )]
    pub address: Option<String>,

    #[serde(
        default,
        deserialize_with = "deserialize_optional_text",
        serialize_with = "serialize_optional_text"
    )]
    pub group: Option<String>,

    #[serde(
        default,
        deserialize_with = "deserialize_optional_text",
        serialize_with = "serialize_optional_text"
    )]
    pub notes: Option<String>,

    #[serde(default, deserialize_with = "deserialize_flag")]
    pub favorite: bool,

    #[serde(default, deserialize_with = "deserialize_flag")]
    pub emergency: bool,

    #[serde(
        default,
        deserialize_with = "deserialize_optional_text",
        serialize_with = "serialize_optional_text"
    )]
    pub photo: Option<String>,
}

/// Candidate fields for `add` and `update`. Everything a contact has except its id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDraft {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub phone: String,

    #[serde(default, deserialize_with = "deserialize_optional_text")]
    pub email: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_text")]
    pub address: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_text")]
    pub group: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_text")]
    pub notes: Option<String>,

    #[serde(default, deserialize_with = "deserialize_flag")]
    pub favorite: bool,

    #[serde(default, deserialize_with = "deserialize_flag")]
    pub emergency: bool,

    #[serde(default, deserialize_with = "deserialize_optional_text")]
    pub photo: Option<String>,
}

impl ContactDraft {
    pub fn new(name: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            ..Self::default()
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn with_photo(mut self, photo: impl Into<String>) -> Self {
        self.photo = Some(photo.into());
        self
    }

    pub fn favorite(mut self, favorite: bool) -> Self {
        self.favorite = favorite;
        self
    }

    pub fn emergency(mut self, emergency: bool) -> Self {
        self.emergency = emergency;
        self
    }

    /// Name and phone are required; whitespace alone does not count.
    pub fn has_required_fields(&self) -> bool {
        !self.name.trim().is_empty() && !self.phone.trim().is_empty()
    }
}

impl Contact {
    pub(crate) fn from_draft(id: ContactId, draft: ContactDraft) -> Self {
        let mut contact = Contact {
            id,
            name: String::new(),
            phone: String::new(),
            email: None,
            address: None,
            group: None,
            notes: None,
            favorite: false,
            emergency: false,
            photo: None,
        };
        contact.apply(draft);
        contact
    }

    /// Replaces every field but the id.
    pub(crate) fn apply(&mut self, draft: ContactDraft) {
        self.name = draft.name;
        self.phone = draft.phone;
        self.email = non_blank(draft.email);
        self.address = non_blank(draft.address);
        self.group = non_blank(draft.group);
        self.notes = non_blank(draft.notes);
        self.favorite = draft.favorite;
        self.emergency = draft.emergency;
        self.photo = non_blank(draft.photo);
    }

    pub fn to_draft(&self) -> ContactDraft {
        ContactDraft {
            name: self.name.clone(),
            phone: self.phone.clone(),
            email: self.email.clone(),
            address: self.address.clone(),
            group: self.group.clone(),
            notes: self.notes.clone(),
            favorite: self.favorite,
            emergency: self.emergency,
            photo: self.photo.clone(),
        }
    }

    /// Up to two leading letters of the name's words, e.g. "Ada Lovelace" -> "AL".
    pub fn initials(&self) -> String {
        self.name
            .split(' ')
            .filter_map(|word| word.chars().next())
            .take(2)
            .collect()
    }

    /// `needle` must already be lowercase.
    pub(crate) fn matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.phone.to_lowercase().contains(needle)
            || self
                .email
                .as_ref()
                .is_some_and(|email| email.to_lowercase().contains(needle))
    }
}

pub fn validate_phone(phone: &str) -> bool {
    PHONE_REGEX.is_match(phone)
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

// Older records store absent text as "" and may carry null or omit the field.
fn deserialize_optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(non_blank(value))
}

// A blank CSV cell or a JSON null reads as false.
fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or_default())
}

fn serialize_optional_text<S>(value: &Option<String>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(value.as_deref().unwrap_or_default())
}
