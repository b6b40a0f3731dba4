//! Contact collection operations.

use crate::model::contact::{Contact, ContactForm};
use crate::repo::collection::{Collection, Record};
use chrono::NaiveDateTime;

impl Record for Contact {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Creates one contact in front of the list, entered today.
pub fn create_contact(
    contacts: &Collection<Contact>,
    form: &ContactForm,
    id: String,
    now: NaiveDateTime,
) -> (Collection<Contact>, Contact) {
    let contact = Contact {
        id,
        name: form.name.trim().to_string(),
        phone: form.phone.trim().to_string(),
        segment: form.segment.trim().to_string(),
        entry_date: now.date(),
        created_at: Some(now),
        updated_at: Some(now),
    };
    (contacts.prepend(contact.clone()), contact)
}

/// Merges form fields into an existing contact. Returns `None` for unknown ids.
pub fn update_contact(
    contacts: &Collection<Contact>,
    id: &str,
    form: &ContactForm,
    now: NaiveDateTime,
) -> Option<(Collection<Contact>, Contact)> {
    let existing = contacts.get(id)?;
    let contact = Contact {
        name: form.name.trim().to_string(),
        phone: form.phone.trim().to_string(),
        segment: form.segment.trim().to_string(),
        updated_at: Some(now),
        ..existing.clone()
    };
    let (next, _) = contacts.upsert(contact.clone());
    Some((next, contact))
}

pub fn delete_contact(contacts: &Collection<Contact>, id: &str) -> Collection<Contact> {
    contacts.remove(id)
}
