//! Substring text filter.
//!
//! # Invariants
//! - A record matches when any of its searchable fields contains the query as
//!   a case-insensitive substring.
//! - An empty query matches everything.
//! - Filtering preserves collection order.

use crate::model::contact::Contact;
use crate::model::event::CalendarEvent;
use crate::model::lead::Lead;
use crate::model::task::Task;

/// Records exposing the fixed set of fields a list search looks at.
pub trait Searchable {
    fn search_fields(&self) -> Vec<&str>;
}

impl Searchable for Lead {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.company.as_str()]
    }
}

impl Searchable for Task {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.lead_name.as_str(), self.description.as_str()]
    }
}

impl Searchable for Contact {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.segment.as_str()]
    }
}

impl Searchable for CalendarEvent {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.title.as_str(), self.lead_name.as_deref().unwrap_or_default()]
    }
}

/// Lowercased search query typed in a list toolbar.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextFilter {
    needle: String,
}

impl TextFilter {
    pub fn new(query: &str) -> Self {
        Self {
            needle: query.to_lowercase(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.needle.is_empty()
    }

    /// Whether any of `fields` contains the query, ignoring case.
    pub fn matches_fields(&self, fields: &[&str]) -> bool {
        self.is_empty()
            || fields
                .iter()
                .any(|field| field.to_lowercase().contains(&self.needle))
    }

    pub fn matches<T: Searchable>(&self, record: &T) -> bool {
        self.matches_fields(&record.search_fields())
    }

    /// Matching records in collection order.
    pub fn apply<'a, T: Searchable>(&self, records: &'a [T]) -> Vec<&'a T> {
        records.iter().filter(|record| self.matches(*record)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::TextFilter;

    #[test]
    fn empty_query_matches_everything() {
        assert!(TextFilter::new("").matches_fields(&["", "x"]));
        assert!(TextFilter::new("").matches_fields(&[]));
    }

    #[test]
    fn matches_any_field_case_insensitively() {
        let filter = TextFilter::new("CLÍ");
        assert!(filter.matches_fields(&["Dr. João", "Clínica Coração"]));
        assert!(!filter.matches_fields(&["Diógenes", "Multitarefa Ltda"]));
    }
}
