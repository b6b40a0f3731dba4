//! Tri-state column sorting for tabular views.
//!
//! # Responsibility
//! - Track which column is sorted and in which direction.
//! - Produce a sorted view over any record list without touching store order.
//!
//! # Invariants
//! - Only one column is active at a time; selecting another column resets
//!   the previous one.
//! - Clicking an inactive column starts at `desc`; clicking the active column
//!   cycles `desc -> asc -> none`.
//! - `none` yields the input order. Sorting is stable for equal keys.
//! - Comparator choice: date-like column names compare as timestamps, then
//!   numeric pairs compare numerically, everything else compares as folded text.

use crate::model::contact::Contact;
use crate::model::event::{CalendarEvent, EventKind};
use crate::model::lead::Lead;
use crate::model::task::{Priority, Task, TaskStatus};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use std::cmp::Ordering;

/// Column-name fragments that mark a date-valued column.
const DATE_COLUMN_MARKERS: [&str; 4] = ["data", "Data", "Entrada", "Em"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

/// One cell value as seen by the comparator.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Number(f64),
    Timestamp(NaiveDateTime),
    Empty,
}

impl FieldValue<'_> {
    fn as_timestamp(&self) -> Option<NaiveDateTime> {
        match self {
            Self::Timestamp(value) => Some(*value),
            Self::Text(text) => parse_timestamp(text),
            Self::Number(_) | Self::Empty => None,
        }
    }

    fn as_text(&self) -> String {
        match self {
            Self::Text(text) => (*text).to_string(),
            Self::Number(value) => value.to_string(),
            Self::Timestamp(value) => value.format("%Y-%m-%dT%H:%M:%S").to_string(),
            Self::Empty => String::new(),
        }
    }
}

impl<'a> From<&'a str> for FieldValue<'a> {
    fn from(value: &'a str) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for FieldValue<'_> {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<NaiveDateTime> for FieldValue<'_> {
    fn from(value: NaiveDateTime) -> Self {
        Self::Timestamp(value)
    }
}

impl From<NaiveDate> for FieldValue<'_> {
    fn from(value: NaiveDate) -> Self {
        Self::Timestamp(value.and_time(chrono::NaiveTime::MIN))
    }
}

impl<'a, T: Into<FieldValue<'a>>> From<Option<T>> for FieldValue<'a> {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Self::Empty)
    }
}

/// Records whose columns can be looked up by wire name.
pub trait SortFields {
    /// Value of `column`; unknown columns yield `FieldValue::Empty`.
    fn sort_value(&self, column: &str) -> FieldValue<'_>;
}

/// Active sort column and direction of one table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortState {
    column: Option<String>,
    direction: Option<SortDirection>,
}

/// Sorted rows plus the state that produced them.
#[derive(Debug)]
pub struct SortedView<'a, T> {
    pub rows: Vec<&'a T>,
    pub sort_column: Option<&'a str>,
    pub sort_direction: Option<SortDirection>,
}

impl SortState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with `column` already active in `direction`.
    pub fn with_default(column: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            column: Some(column.into()),
            direction: Some(direction),
        }
    }

    pub fn column(&self) -> Option<&str> {
        self.column.as_deref()
    }

    pub fn direction(&self) -> Option<SortDirection> {
        self.direction
    }

    /// Header click on `column`.
    pub fn on_sort(&mut self, column: &str) {
        if self.column.as_deref() == Some(column) {
            match self.direction {
                Some(SortDirection::Desc) => self.direction = Some(SortDirection::Asc),
                Some(SortDirection::Asc) => {
                    self.direction = None;
                    self.column = None;
                }
                None => self.direction = Some(SortDirection::Desc),
            }
        } else {
            self.column = Some(column.to_string());
            self.direction = Some(SortDirection::Desc);
        }
    }

    /// Sorted view over `data`; `data` itself is never reordered.
    pub fn apply<'a, T: SortFields>(&'a self, data: &'a [T]) -> SortedView<'a, T> {
        self.apply_refs(data.iter().collect())
    }

    /// Same as `apply`, for rows that were already filtered.
    pub fn apply_refs<'a, T: SortFields>(&'a self, mut rows: Vec<&'a T>) -> SortedView<'a, T> {
        if let (Some(column), Some(direction)) = (self.column.as_deref(), self.direction) {
            rows.sort_by(|a, b| {
                let ordering = compare_values(column, &a.sort_value(column), &b.sort_value(column));
                match direction {
                    SortDirection::Asc => ordering,
                    SortDirection::Desc => ordering.reverse(),
                }
            });
        }

        SortedView {
            rows,
            sort_column: self.column.as_deref(),
            sort_direction: self.direction,
        }
    }
}

pub fn is_date_column(column: &str) -> bool {
    DATE_COLUMN_MARKERS
        .iter()
        .any(|marker| column.contains(marker))
}

/// Compares two cells of `column`.
///
/// Unparseable or missing dates order before every parseable date.
pub fn compare_values(column: &str, a: &FieldValue<'_>, b: &FieldValue<'_>) -> Ordering {
    if is_date_column(column) {
        return a.as_timestamp().cmp(&b.as_timestamp());
    }
    if let (FieldValue::Number(left), FieldValue::Number(right)) = (a, b) {
        return left.total_cmp(right);
    }
    collate(&a.as_text(), &b.as_text())
}

/// Parses ISO-like date or date-time text.
pub fn parse_timestamp(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    if let Ok(value) = DateTime::parse_from_rfc3339(text) {
        return Some(value.naive_local());
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(value) = NaiveDateTime::parse_from_str(text, format) {
            return Some(value);
        }
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .map(|date| date.and_time(chrono::NaiveTime::MIN))
}

/// Case-insensitive comparison that ranks accented letters with their base
/// letter first and only then by accent.
pub fn collate(a: &str, b: &str) -> Ordering {
    let left = a.to_lowercase();
    let right = b.to_lowercase();
    let primary = left.chars().map(fold_accent).cmp(right.chars().map(fold_accent));
    primary.then_with(|| left.cmp(&right))
}

fn fold_accent(c: char) -> char {
    match c {
        'á' | 'à' | 'â' | 'ã' | 'ä' => 'a',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'ç' => 'c',
        'ñ' => 'n',
        other => other,
    }
}

fn status_text(status: TaskStatus) -> &'static str {
    match status {
        TaskStatus::Pending => "pendente",
        TaskStatus::Done => "concluida",
    }
}

fn priority_text(priority: Priority) -> &'static str {
    match priority {
        Priority::Low => "baixa",
        Priority::Medium => "media",
        Priority::High => "alta",
    }
}

impl SortFields for Lead {
    fn sort_value(&self, column: &str) -> FieldValue<'_> {
        match column {
            "id" => self.id.as_str().into(),
            "nomeLead" => self.name.as_str().into(),
            "telefone" => self.phone.as_str().into(),
            "email" => self.email.as_str().into(),
            "empresa" => self.company.as_str().into(),
            "etapaFunil" => self.stage_id.as_str().into(),
            "responsavel" => self.owner.as_str().into(),
            "valorVenda" => self.sale_value.into(),
            "valorMensal" => self.monthly_value.into(),
            "criadoEm" => self.created_at.into(),
            "atualizadoEm" => self.updated_at.into(),
            _ => FieldValue::Empty,
        }
    }
}

impl SortFields for Task {
    fn sort_value(&self, column: &str) -> FieldValue<'_> {
        match column {
            "id" => self.id.as_str().into(),
            "nomeLead" => self.lead_name.as_str().into(),
            "descricaoTarefa" => self.description.as_str().into(),
            "dataEntrega" => self.due_date.into(),
            "status" => status_text(self.status).into(),
            "prioridade" => priority_text(self.priority).into(),
            "criadoPor" => self.created_by.as_str().into(),
            "criadoEm" => self.created_at.into(),
            "atualizadoEm" => self.updated_at.into(),
            _ => FieldValue::Empty,
        }
    }
}

impl SortFields for Contact {
    fn sort_value(&self, column: &str) -> FieldValue<'_> {
        match column {
            "id" => self.id.as_str().into(),
            "nome" => self.name.as_str().into(),
            "telefone" => self.phone.as_str().into(),
            "segmento" => self.segment.as_str().into(),
            "dataEntrada" => self.entry_date.into(),
            "criadoEm" => self.created_at.into(),
            "atualizadoEm" => self.updated_at.into(),
            _ => FieldValue::Empty,
        }
    }
}

impl SortFields for CalendarEvent {
    fn sort_value(&self, column: &str) -> FieldValue<'_> {
        match column {
            "id" => self.id.as_str().into(),
            "tipo" => match self.kind {
                EventKind::Task => "tarefa".into(),
                EventKind::Note => "nota".into(),
                EventKind::Meeting => "reuniao".into(),
            },
            "titulo" => self.title.as_str().into(),
            "descricao" => self.description.as_deref().into(),
            "nomeLead" => self.lead_name.as_deref().into(),
            "data" => self.date.into(),
            "status" => self.status.map(status_text).into(),
            "prioridade" => self.priority.map(priority_text).into(),
            "criadoEm" => self.created_at.into(),
            _ => FieldValue::Empty,
        }
    }
}
