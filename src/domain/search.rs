use serde::Serialize;

use crate::domain::contact::Contact;

/// Contacts whose name, phone or email contain a query, ignoring case.
///
/// Nothing is matched until the search is iterated. Iterating `&Search` starts
/// over from the first contact each time, so one search can be walked again
/// (for example once to count and once to render).
#[derive(Debug, Clone)]
pub struct Search<'a> {
    contacts: &'a [Contact],
    needle: String,
}

impl<'a> Search<'a> {
    pub(crate) fn new(contacts: &'a [Contact], query: &str) -> Self {
        Self {
            contacts,
            needle: query.to_lowercase(),
        }
    }

    pub fn iter(&self) -> SearchIter<'a, '_> {
        SearchIter {
            inner: self.contacts,
            needle: &self.needle,
            idx: 0,
        }
    }
}

impl<'a, 's> IntoIterator for &'s Search<'a> {
    type Item = &'a Contact;
    type IntoIter = SearchIter<'a, 's>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

pub struct SearchIter<'a, 's> {
    inner: &'a [Contact],
    needle: &'s str,
    idx: usize,
}

impl<'a> Iterator for SearchIter<'a, '_> {
    type Item = &'a Contact;

    fn next(&mut self) -> Option<Self::Item> {
        while self.idx < self.inner.len() {
            let contact = &self.inner[self.idx];
            self.idx += 1;
            if contact.matches(self.needle) {
                return Some(contact);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.inner.len() - self.idx))
    }
}

/// Totals shown next to the contact list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Counts {
    pub total: usize,
    pub favorites: usize,
    pub emergency: usize,
}

impl Counts {
    pub(crate) fn of(contacts: &[Contact]) -> Self {
        contacts.iter().fold(
            Counts {
                total: contacts.len(),
                ..Counts::default()
            },
            |mut counts, contact| {
                counts.favorites += usize::from(contact.favorite);
                counts.emergency += usize::from(contact.emergency);
                counts
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::contact::{ContactDraft, ContactId};

    fn contacts() -> Vec<Contact> {
        vec![
            Contact::from_draft(
                ContactId(1),
                ContactDraft::new("Ada Lovelace", "01712345678").with_email("ada@Analytical.org"),
            ),
            Contact::from_draft(
                ContactId(2),
                ContactDraft::new("Charles Babbage", "01812345678").favorite(true),
            ),
            Contact::from_draft(
                ContactId(3),
                ContactDraft::new("Grace Hopper", "01912345678")
                    .with_email("grace@navy.mil")
                    .emergency(true),
            ),
        ]
    }

    #[test]
    fn search_is_case_insensitive_over_name_phone_and_email() {
        let contacts = contacts();

        let names = |query: &str| {
            Search::new(&contacts, query)
                .iter()
                .map(|c| c.name.clone())
                .collect::<Vec<_>>()
        };

        assert_eq!(names("LOVE"), vec!["Ada Lovelace"]);
        assert_eq!(names("analytical"), vec!["Ada Lovelace"]);
        assert_eq!(names("0181"), vec!["Charles Babbage"]);
        assert_eq!(names("12345678").len(), 3);
        assert!(names("nobody").is_empty());
    }

    #[test]
    fn search_keeps_collection_order_and_restarts() {
        let contacts = contacts();
        let search = Search::new(&contacts, "a");

        let first: Vec<ContactId> = search.iter().map(|c| c.id).collect();
        let second: Vec<ContactId> = (&search).into_iter().map(|c| c.id).collect();

        assert_eq!(first, vec![ContactId(1), ContactId(2), ContactId(3)]);
        assert_eq!(first, second);
    }

    #[test]
    fn empty_query_matches_everything() {
        let contacts = contacts();
        assert_eq!(Search::new(&contacts, "").iter().count(), 3);
    }

    #[test]
    fn counts_flags() {
        assert_eq!(
            Counts::of(&contacts()),
            Counts {
                total: 3,
                favorites: 1,
                emergency: 1
            }
        );
        assert_eq!(Counts::of(&[]), Counts::default());
    }
}
