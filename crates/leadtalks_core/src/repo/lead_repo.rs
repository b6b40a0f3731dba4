//! Lead collection operations.
//!
//! # Responsibility
//! - Build new leads from partial input.
//! - Upsert and delete leads over immutable snapshots.
//!
//! # Invariants
//! - Update of an unknown id inserts the input unchanged (create-by-upsert),
//!   so one save handler serves both "new" and "edit" flows.
//! - Update of a known id keeps collection length and position and stamps
//!   `updated_at`.
//! - Delete cascades to notes of that lead only; calendar events and tasks
//!   referencing the lead are left untouched.

use crate::model::lead::{Lead, LeadDraft};
use crate::model::note::Note;
use crate::repo::collection::{Collection, Record};
use chrono::NaiveDateTime;
use std::collections::BTreeMap;

impl Record for Lead {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Whether an upsert replaced an existing record or inserted a new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Created,
    Updated,
}

/// Snapshots produced by deleting one lead.
#[derive(Debug, Clone)]
pub struct LeadDeletion {
    pub leads: Collection<Lead>,
    pub notes: Collection<Note>,
    pub removed_notes: usize,
}

/// Builds a lead from partial input.
///
/// # Contract
/// - `created_at` and `updated_at` are both `now`.
/// - Money values default to `0`, tags to an empty sequence.
/// - Never fails; name validation belongs to the save path.
pub fn create_lead(draft: LeadDraft, id: String, now: NaiveDateTime) -> Lead {
    Lead {
        id,
        name: draft.name,
        phone: draft.phone,
        email: draft.email,
        company: draft.company,
        stage_id: draft.stage_id,
        owner: draft.owner,
        sale_value: draft.sale_value.unwrap_or(0.0),
        monthly_value: draft.monthly_value.unwrap_or(0.0),
        created_at: now,
        updated_at: Some(now),
        tags: draft.tags.unwrap_or_default(),
        label_ids: Vec::new(),
        custom_fields: BTreeMap::new(),
    }
}

/// Upserts one lead.
pub fn update_lead(
    leads: &Collection<Lead>,
    lead: Lead,
    now: NaiveDateTime,
) -> (Collection<Lead>, UpsertOutcome) {
    if leads.contains_id(&lead.id) {
        let stamped = Lead {
            updated_at: Some(now),
            ..lead
        };
        let (next, _) = leads.upsert(stamped);
        (next, UpsertOutcome::Updated)
    } else {
        (leads.prepend(lead), UpsertOutcome::Created)
    }
}

/// Deletes one lead and every note referencing it.
pub fn delete_lead(leads: &Collection<Lead>, notes: &Collection<Note>, id: &str) -> LeadDeletion {
    let next_notes = notes.retain(|note| note.lead_id != id);
    let removed_notes = notes.len() - next_notes.len();
    LeadDeletion {
        leads: leads.remove(id),
        notes: next_notes,
        removed_notes,
    }
}

/// Replaces `stage_id` of exactly one lead, keeping every other record as is.
pub fn assign_stage(leads: &Collection<Lead>, lead_id: &str, stage_id: &str) -> Collection<Lead> {
    leads.map(|lead| {
        if lead.id == lead_id {
            Lead {
                stage_id: stage_id.to_string(),
                ..lead.clone()
            }
        } else {
            lead.clone()
        }
    })
}

#[cfg(test)]
mod tests {
    use super::{create_lead, update_lead, UpsertOutcome};
    use crate::model::lead::LeadDraft;
    use crate::repo::collection::Collection;
    use chrono::{Duration, NaiveDate, NaiveDateTime};

    fn at(hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 10, 1)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    #[test]
    fn create_lead_fills_defaults() {
        let lead = create_lead(LeadDraft::in_stage("novo"), "l1".to_string(), at(9));
        assert_eq!(lead.stage_id, "novo");
        assert_eq!(lead.sale_value, 0.0);
        assert_eq!(lead.monthly_value, 0.0);
        assert!(lead.tags.is_empty());
        assert_eq!(lead.created_at, at(9));
        assert_eq!(lead.updated_at, Some(at(9)));
    }

    #[test]
    fn update_existing_stamps_updated_at_in_place() {
        let first = create_lead(LeadDraft::in_stage("novo"), "l1".to_string(), at(9));
        let second = create_lead(LeadDraft::in_stage("novo"), "l2".to_string(), at(9));
        let leads = Collection::new(vec![first.clone(), second]);

        let mut edited = first;
        edited.name = "Acme".to_string();
        let later = at(9) + Duration::hours(2);
        let (next, outcome) = update_lead(&leads, edited, later);

        assert_eq!(outcome, UpsertOutcome::Updated);
        assert_eq!(next.len(), 2);
        assert_eq!(next[0].name, "Acme");
        assert_eq!(next[0].updated_at, Some(later));
    }
}
