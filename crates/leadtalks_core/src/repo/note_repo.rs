//! Note collection operations.
//!
//! # Invariants
//! - New notes are appended, so a lead's history reads in insertion order.
//! - Notes are never edited after creation.

use crate::model::note::{Note, NoteDraft};
use crate::repo::collection::{Collection, Record};
use chrono::NaiveDateTime;

impl Record for Note {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Stamps a note draft with id and creation time.
pub fn build_note(draft: NoteDraft, id: String, now: NaiveDateTime) -> Note {
    Note {
        id,
        lead_id: draft.lead_id,
        text: draft.text,
        author: draft.author,
        created_at: now,
        kind: draft.kind,
        calendar_event_id: draft.calendar_event_id,
    }
}

/// Creates one note and appends it.
pub fn create_note(
    notes: &Collection<Note>,
    draft: NoteDraft,
    id: String,
    now: NaiveDateTime,
) -> (Collection<Note>, Note) {
    let note = build_note(draft, id, now);
    (notes.append(note.clone()), note)
}

/// Notes of one lead in insertion order.
pub fn notes_for_lead<'a>(notes: &'a Collection<Note>, lead_id: &str) -> Vec<&'a Note> {
    notes.iter().filter(|note| note.lead_id == lead_id).collect()
}

#[cfg(test)]
mod tests {
    use super::{create_note, notes_for_lead};
    use crate::model::note::{NoteDraft, NoteKind};
    use crate::repo::collection::Collection;
    use chrono::NaiveDate;

    fn draft(lead_id: &str, text: &str) -> NoteDraft {
        NoteDraft {
            lead_id: lead_id.to_string(),
            text: text.to_string(),
            author: "Agência Brakeel".to_string(),
            kind: NoteKind::Note,
            calendar_event_id: None,
        }
    }

    #[test]
    fn notes_are_appended_in_insertion_order() {
        let now = NaiveDate::from_ymd_opt(2025, 9, 18)
            .unwrap()
            .and_hms_opt(14, 30, 0)
            .unwrap();
        let (notes, _) = create_note(&Collection::default(), draft("1", "first"), "n1".into(), now);
        let (notes, _) = create_note(&notes, draft("2", "other lead"), "n2".into(), now);
        let (notes, created) = create_note(&notes, draft("1", "second"), "n3".into(), now);

        assert_eq!(created.created_at, now);
        let history: Vec<&str> = notes_for_lead(&notes, "1")
            .iter()
            .map(|note| note.text.as_str())
            .collect();
        assert_eq!(history, vec!["first", "second"]);
    }
}
