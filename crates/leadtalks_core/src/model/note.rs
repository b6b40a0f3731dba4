//! Lead activity note model.
//!
//! # Invariants
//! - Notes are immutable once created.
//! - Notes are deleted only as a cascade of deleting their lead.
//! - `calendar_event_id` is a weak back-reference and never drives deletion.

use crate::model::event::EventId;
use crate::model::lead::LeadId;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

pub type NoteId = String;

/// Origin of a note entry in a lead's history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoteKind {
    #[serde(rename = "nota")]
    Note,
    #[serde(rename = "movimentacao")]
    StageChange,
    #[serde(rename = "tarefa")]
    Task,
    #[serde(rename = "reuniao")]
    Meeting,
}

/// Timestamped activity entry attached to a lead (`NotaLead`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    #[serde(rename = "leadId")]
    pub lead_id: LeadId,
    #[serde(rename = "texto")]
    pub text: String,
    #[serde(rename = "autor")]
    pub author: String,
    #[serde(rename = "criadoEm")]
    pub created_at: NaiveDateTime,
    #[serde(rename = "tipo")]
    pub kind: NoteKind,
    #[serde(
        rename = "calendarioEventoId",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub calendar_event_id: Option<EventId>,
}

/// Partial note input; id and creation time are stamped by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteDraft {
    pub lead_id: LeadId,
    pub text: String,
    pub author: String,
    pub kind: NoteKind,
    pub calendar_event_id: Option<EventId>,
}
