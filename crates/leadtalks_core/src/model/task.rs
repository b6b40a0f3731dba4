//! Task (`Tarefa`) model.
//!
//! # Invariants
//! - `lead_id` may be empty, meaning the task is unassigned.
//! - `lead_name` is a snapshot copied at save time and never refreshed.

use crate::model::lead::LeadId;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

pub type TaskId = String;

/// Task completion state, shared with task-kind calendar events.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskStatus {
    #[default]
    #[serde(rename = "pendente")]
    Pending,
    #[serde(rename = "concluida")]
    Done,
}

/// Task urgency, shared with task-kind calendar events.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
    #[serde(rename = "baixa")]
    Low,
    #[default]
    #[serde(rename = "media")]
    Medium,
    #[serde(rename = "alta")]
    High,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    #[serde(rename = "nomeLead")]
    pub lead_name: String,
    #[serde(rename = "leadId")]
    pub lead_id: LeadId,
    #[serde(rename = "descricaoTarefa")]
    pub description: String,
    #[serde(rename = "dataEntrega")]
    pub due_date: NaiveDate,
    pub status: TaskStatus,
    #[serde(rename = "prioridade")]
    pub priority: Priority,
    #[serde(rename = "criadoPor")]
    pub created_by: String,
    #[serde(rename = "criadoEm")]
    pub created_at: NaiveDateTime,
    #[serde(rename = "atualizadoEm")]
    pub updated_at: NaiveDateTime,
}

impl Task {
    pub fn is_assigned(&self) -> bool {
        !self.lead_id.is_empty()
    }
}

/// Input of the task modal.
///
/// `due_date` is optional here because the form can be submitted without it;
/// the store rejects such submissions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskForm {
    pub id: Option<TaskId>,
    pub lead_id: LeadId,
    pub description: String,
    pub due_date: Option<NaiveDate>,
    pub status: TaskStatus,
    pub priority: Priority,
}
