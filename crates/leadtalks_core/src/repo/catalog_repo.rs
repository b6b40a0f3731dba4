//! Shared tag and custom field definition operations.
//!
//! # Invariants
//! - Deleting a tag strips its id from every lead's `label_ids`.
//! - Deleting a field definition drops its stored value from every lead.

use crate::model::catalog::{CustomField, Tag};
use crate::model::lead::Lead;
use crate::repo::collection::{Collection, Record};
use crate::repo::lead_repo::UpsertOutcome;

impl Record for Tag {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for CustomField {
    fn id(&self) -> &str {
        &self.id
    }
}

pub fn upsert_tag(tags: &Collection<Tag>, tag: Tag) -> (Collection<Tag>, UpsertOutcome) {
    let (next, existed) = tags.upsert(tag);
    (next, outcome(existed))
}

pub fn upsert_field(
    fields: &Collection<CustomField>,
    field: CustomField,
) -> (Collection<CustomField>, UpsertOutcome) {
    let (next, existed) = fields.upsert(field);
    (next, outcome(existed))
}

/// Removes a tag definition and every lead reference to it.
pub fn delete_tag(
    tags: &Collection<Tag>,
    leads: &Collection<Lead>,
    tag_id: &str,
) -> (Collection<Tag>, Collection<Lead>) {
    let next_leads = if leads.iter().any(|lead| has_label(lead, tag_id)) {
        leads.map(|lead| {
            let mut lead = lead.clone();
            lead.label_ids.retain(|label| label != tag_id);
            lead
        })
    } else {
        leads.clone()
    };
    (tags.remove(tag_id), next_leads)
}

/// Removes a field definition and every stored value of it.
pub fn delete_field(
    fields: &Collection<CustomField>,
    leads: &Collection<Lead>,
    field_id: &str,
) -> (Collection<CustomField>, Collection<Lead>) {
    let next_leads = if leads
        .iter()
        .any(|lead| lead.custom_fields.contains_key(field_id))
    {
        leads.map(|lead| {
            let mut lead = lead.clone();
            lead.custom_fields.remove(field_id);
            lead
        })
    } else {
        leads.clone()
    };
    (fields.remove(field_id), next_leads)
}

fn has_label(lead: &Lead, tag_id: &str) -> bool {
    lead.label_ids.iter().any(|label| label == tag_id)
}

fn outcome(existed: bool) -> UpsertOutcome {
    if existed {
        UpsertOutcome::Updated
    } else {
        UpsertOutcome::Created
    }
}
