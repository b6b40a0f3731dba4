//! Calendar event collection operations.
//!
//! # Invariants
//! - Upsert by id: known ids are replaced in place keeping their original
//!   `created_at`; unknown ids are prepended.
//! - Kind-dependent fields are normalized when an event is built from a form.
//! - Deleting an event never touches notes that point back at it.

use crate::model::event::{CalendarEvent, EventForm};
use crate::repo::collection::{Collection, Record};
use crate::repo::lead_repo::UpsertOutcome;
use chrono::{NaiveDate, NaiveDateTime};

impl Record for CalendarEvent {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Builds an event from validated form input.
///
/// # Contract
/// - `start_time` is kept for task and meeting kinds only.
/// - `end_time` is kept for meetings only.
/// - `status`/`priority` are kept for task kind only.
/// - Blank description and blank lead id are stored as `None`.
pub fn event_from_form(
    form: &EventForm,
    id: String,
    date: NaiveDate,
    lead_name: Option<String>,
    created_at: NaiveDateTime,
) -> CalendarEvent {
    let kind = form.kind;
    CalendarEvent {
        id,
        kind,
        title: form.title.trim().to_string(),
        description: Some(form.description.trim().to_string()).filter(|text| !text.is_empty()),
        lead_id: form.lead_id.clone().filter(|lead_id| !lead_id.is_empty()),
        lead_name,
        date,
        start_time: form.start_time.filter(|_| kind.uses_start_time()),
        end_time: form.end_time.filter(|_| kind.uses_end_time()),
        status: Some(form.status).filter(|_| kind.uses_task_fields()),
        priority: Some(form.priority).filter(|_| kind.uses_task_fields()),
        created_at,
    }
}

/// Upserts one event.
pub fn update_event(
    events: &Collection<CalendarEvent>,
    event: CalendarEvent,
) -> (Collection<CalendarEvent>, UpsertOutcome) {
    match events.get(&event.id) {
        Some(existing) => {
            let merged = CalendarEvent {
                created_at: existing.created_at,
                ..event
            };
            let (next, _) = events.upsert(merged);
            (next, UpsertOutcome::Updated)
        }
        None => (events.prepend(event), UpsertOutcome::Created),
    }
}

pub fn delete_event(events: &Collection<CalendarEvent>, id: &str) -> Collection<CalendarEvent> {
    events.remove(id)
}

#[cfg(test)]
mod tests {
    use super::{event_from_form, update_event};
    use crate::model::event::{EventForm, EventKind};
    use crate::model::task::{Priority, TaskStatus};
    use crate::repo::collection::Collection;
    use crate::repo::lead_repo::UpsertOutcome;
    use chrono::{NaiveDate, NaiveTime};

    fn form(kind: EventKind) -> EventForm {
        EventForm {
            kind,
            title: " Reunião de proposta ".to_string(),
            lead_id: Some(String::new()),
            date: NaiveDate::from_ymd_opt(2025, 10, 30),
            start_time: NaiveTime::from_hms_opt(13, 0, 0),
            end_time: NaiveTime::from_hms_opt(13, 30, 0),
            status: TaskStatus::Done,
            priority: Priority::High,
            ..EventForm::default()
        }
    }

    fn build(kind: EventKind) -> crate::model::event::CalendarEvent {
        let date = NaiveDate::from_ymd_opt(2025, 10, 30).unwrap();
        event_from_form(&form(kind), "e1".into(), date, None, date.and_hms_opt(8, 0, 0).unwrap())
    }

    #[test]
    fn meeting_keeps_time_window_but_not_task_fields() {
        let meeting = build(EventKind::Meeting);
        assert_eq!(meeting.title, "Reunião de proposta");
        assert!(meeting.end_time.is_some());
        assert!(meeting.status.is_none());
        assert!(meeting.priority.is_none());
        assert!(meeting.lead_id.is_none());
        assert!(meeting.description.is_none());
    }

    #[test]
    fn task_keeps_start_and_task_fields_only() {
        let task = build(EventKind::Task);
        assert!(task.start_time.is_some());
        assert!(task.end_time.is_none());
        assert_eq!(task.status, Some(TaskStatus::Done));
        assert_eq!(task.priority, Some(Priority::High));

        let note = build(EventKind::Note);
        assert!(note.start_time.is_none());
    }

    #[test]
    fn update_keeps_original_creation_time() {
        let original = build(EventKind::Task);
        let (events, outcome) = update_event(&Collection::default(), original.clone());
        assert_eq!(outcome, UpsertOutcome::Created);

        let mut edited = original.clone();
        edited.title = "Outro".to_string();
        edited.created_at = original.created_at + chrono::Duration::days(1);
        let (events, outcome) = update_event(&events, edited);
        assert_eq!(outcome, UpsertOutcome::Updated);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].title, "Outro");
        assert_eq!(events[0].created_at, original.created_at);
    }
}
