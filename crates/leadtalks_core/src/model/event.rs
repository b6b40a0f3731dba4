//! Calendar event model.
//!
//! # Responsibility
//! - Define dated actionable items (task, note, meeting) shown on the calendar.
//! - Define the form input shared by the calendar page and the lead detail flow.
//!
//! # Invariants
//! - `start_time` is meaningful for task and meeting kinds only.
//! - `end_time` is meaningful for meetings only.
//! - `status`/`priority` are meaningful for task kind only.
//! - `lead_name` is a snapshot copied at save time.

use crate::model::lead::LeadId;
use crate::model::note::NoteKind;
use crate::model::task::{Priority, TaskStatus};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

pub type EventId = String;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
    #[serde(rename = "tarefa")]
    Task,
    #[serde(rename = "nota")]
    Note,
    #[serde(rename = "reuniao")]
    Meeting,
}

impl EventKind {
    /// Display label, also used as the prefix of companion note texts.
    pub fn label(self) -> &'static str {
        match self {
            Self::Task => "Tarefa",
            Self::Note => "Nota",
            Self::Meeting => "Reunião",
        }
    }

    /// Note kind mirrored by companion notes.
    pub fn note_kind(self) -> NoteKind {
        match self {
            Self::Task => NoteKind::Task,
            Self::Note => NoteKind::Note,
            Self::Meeting => NoteKind::Meeting,
        }
    }

    pub fn uses_start_time(self) -> bool {
        matches!(self, Self::Task | Self::Meeting)
    }

    pub fn uses_end_time(self) -> bool {
        self == Self::Meeting
    }

    pub fn uses_task_fields(self) -> bool {
        self == Self::Task
    }
}

impl Default for EventKind {
    fn default() -> Self {
        Self::Task
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub id: EventId,
    #[serde(rename = "tipo")]
    pub kind: EventKind,
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(
        rename = "descricao",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,
    #[serde(rename = "leadId", default, skip_serializing_if = "Option::is_none")]
    pub lead_id: Option<LeadId>,
    #[serde(rename = "nomeLead", default, skip_serializing_if = "Option::is_none")]
    pub lead_name: Option<String>,
    #[serde(rename = "data")]
    pub date: NaiveDate,
    #[serde(
        rename = "horaInicio",
        default,
        with = "crate::model::time_of_day",
        skip_serializing_if = "Option::is_none"
    )]
    pub start_time: Option<NaiveTime>,
    #[serde(
        rename = "horaFim",
        default,
        with = "crate::model::time_of_day",
        skip_serializing_if = "Option::is_none"
    )]
    pub end_time: Option<NaiveTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    #[serde(
        rename = "prioridade",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub priority: Option<Priority>,
    #[serde(rename = "criadoEm")]
    pub created_at: NaiveDateTime,
}

/// Input of the calendar event modal.
///
/// `id = None` creates an event. `title` and `date` are required by the store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventForm {
    pub id: Option<EventId>,
    pub kind: EventKind,
    pub title: String,
    pub description: String,
    pub lead_id: Option<LeadId>,
    pub date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub status: TaskStatus,
    pub priority: Priority,
}
