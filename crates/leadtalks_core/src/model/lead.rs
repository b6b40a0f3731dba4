//! Lead domain model.
//!
//! # Responsibility
//! - Define the sales prospect record tracked through pipeline stages.
//! - Provide the partial input (`LeadDraft`) used by the "new lead" action.
//!
//! # Invariants
//! - `stage_id` should reference a stage present in the stage collection for
//!   the lead to appear on the kanban board. This is not enforced at write time.
//! - `sale_value` is conceptually non-negative but unenforced.

use crate::model::catalog::TagId;
use crate::model::stage::StageId;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Opaque lead identifier, unique within the lead collection.
pub type LeadId = String;

/// Sales prospect record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lead {
    pub id: LeadId,
    #[serde(rename = "nomeLead")]
    pub name: String,
    #[serde(rename = "telefone")]
    pub phone: String,
    pub email: String,
    #[serde(rename = "empresa")]
    pub company: String,
    /// Foreign key into the stage collection.
    #[serde(rename = "etapaFunil")]
    pub stage_id: StageId,
    #[serde(rename = "responsavel")]
    pub owner: String,
    #[serde(rename = "valorVenda")]
    pub sale_value: f64,
    #[serde(rename = "valorMensal")]
    pub monthly_value: f64,
    #[serde(rename = "criadoEm")]
    pub created_at: NaiveDateTime,
    #[serde(
        rename = "atualizadoEm",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<NaiveDateTime>,
    /// Free-form tag labels, ordered as entered.
    #[serde(default)]
    pub tags: Vec<String>,
    /// References into the shared tag definitions.
    #[serde(rename = "etiquetas", default)]
    pub label_ids: Vec<TagId>,
    /// Values keyed by custom field definition id.
    #[serde(rename = "camposPersonalizados", default)]
    pub custom_fields: BTreeMap<String, serde_json::Value>,
}

/// Partial lead input accepted by `create_lead`.
///
/// Missing money values default to `0`, missing tags to an empty sequence.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LeadDraft {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub company: String,
    pub stage_id: StageId,
    pub owner: String,
    pub sale_value: Option<f64>,
    pub monthly_value: Option<f64>,
    pub tags: Option<Vec<String>>,
}

impl LeadDraft {
    /// Draft seeded with a target stage, as used by the per-stage "+" card.
    pub fn in_stage(stage_id: impl Into<StageId>) -> Self {
        Self {
            stage_id: stage_id.into(),
            ..Self::default()
        }
    }
}

impl Lead {
    /// Whether the lead has a non-blank name, the only field the lead form requires.
    pub fn has_name(&self) -> bool {
        !self.name.trim().is_empty()
    }
}
