//! Shared tag and custom field definitions.
//!
//! Definitions live in the shared store and are reusable across leads.

use serde::{Deserialize, Serialize};

pub type TagId = String;
pub type FieldId = String;

/// Color palette offered by the tag form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagColor {
    Vermelho,
    Laranja,
    Amarelo,
    Verde,
    #[default]
    Azul,
    Roxo,
    Rosa,
    Cinza,
}

impl TagColor {
    pub fn hex(self) -> &'static str {
        match self {
            Self::Vermelho => "#ef4444",
            Self::Laranja => "#f97316",
            Self::Amarelo => "#eab308",
            Self::Verde => "#22c55e",
            Self::Azul => "#3b82f6",
            Self::Roxo => "#a855f7",
            Self::Rosa => "#ec4899",
            Self::Cinza => "#6b7280",
        }
    }
}

/// Tag definition (`EtiquetaPersonalizada`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: TagId,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "cor")]
    pub color: TagColor,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldType {
    #[default]
    #[serde(rename = "texto")]
    Text,
    #[serde(rename = "numero")]
    Number,
    #[serde(rename = "data")]
    Date,
    #[serde(rename = "selecao")]
    SingleSelect,
}

/// Custom field definition (`CampoPersonalizado`).
///
/// `options` is non-empty exactly when `field_type` is `SingleSelect`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomField {
    pub id: FieldId,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "tipo")]
    pub field_type: FieldType,
    #[serde(rename = "opcoes", default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagForm {
    pub id: Option<TagId>,
    pub name: String,
    pub color: TagColor,
}

/// Input of the custom field form; `options_text` holds one option per line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldForm {
    pub id: Option<FieldId>,
    pub name: String,
    pub field_type: FieldType,
    pub options_text: String,
}

/// Splits the multi-line options input, trimming entries and dropping blanks.
pub fn parse_options(options_text: &str) -> Vec<String> {
    options_text
        .lines()
        .map(str::trim)
        .filter(|option| !option.is_empty())
        .map(str::to_string)
        .collect()
}
