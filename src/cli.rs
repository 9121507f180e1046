pub mod command;
pub mod run;

pub use run::run_app;

use crate::domain::{Contact, Counts};

pub const EMPTY_LIST: &str = "No contacts found";

/// Placeholder for optional text that is not set.
pub fn or_dash(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("-")
}

/// What stands in for the avatar: a photo marker or the initials.
pub fn avatar(contact: &Contact) -> String {
    if contact.photo.is_some() {
        "[photo]".to_string()
    } else {
        contact.initials()
    }
}

pub fn tags(contact: &Contact) -> String {
    let mut tags = Vec::new();
    if let Some(group) = &contact.group {
        tags.push(group.as_str());
    }
    if contact.favorite {
        tags.push("favorite");
    }
    if contact.emergency {
        tags.push("emergency");
    }
    tags.join(", ")
}

pub fn listing_format(i: usize, contact: &Contact) -> String {
    format!(
        "{i:>3}. {:<15} {:<7} {:<20} {:<12} {:<30} {:<20} {}",
        contact.id,
        avatar(contact),
        contact.name,
        contact.phone,
        or_dash(&contact.email),
        or_dash(&contact.address),
        tags(contact)
    )
}

pub fn display_contact(contact: &Contact) -> String {
    format!(
        "Id: {}\n\
        Name: {}\n\
        Phone: {}\n\
        Email: {}\n\
        Address: {}\n\
        Group: {}\n\
        Notes: {}\n\
        Favorite: {}\n\
        Emergency: {}\n\
        Photo: {}",
        contact.id,
        contact.name,
        contact.phone,
        or_dash(&contact.email),
        or_dash(&contact.address),
        or_dash(&contact.group),
        or_dash(&contact.notes),
        yes_no(contact.favorite),
        yes_no(contact.emergency),
        if contact.photo.is_some() { "yes" } else { "no" }
    )
}

pub fn display_counts(counts: &Counts) -> String {
    format!(
        "Total: {}\nFavorites: {}\nEmergency: {}",
        counts.total, counts.favorites, counts.emergency
    )
}

/// Numbered rows, or the empty-list notice.
pub fn render_list<'a>(contacts: impl IntoIterator<Item = &'a Contact>) -> String {
    let rows: Vec<String> = contacts
        .into_iter()
        .enumerate()
        .map(|(i, c)| listing_format(i + 1, c))
        .collect();

    if rows.is_empty() {
        EMPTY_LIST.to_string()
    } else {
        rows.join("\n")
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}
