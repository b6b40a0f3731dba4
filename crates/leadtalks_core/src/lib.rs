//! Core domain logic for Lead Talks.
//! This crate is the single source of truth for pipeline, task and calendar
//! invariants; presentation layers only read snapshots and call mutations.

pub mod clock;
pub mod config;
pub mod logging;
pub mod model;
pub mod repo;
pub mod seed;
pub mod service;
pub mod view;

pub use clock::{new_token, Clock, ManualClock, SystemClock};
pub use config::{ConfigError, CoreConfig};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::catalog::{CustomField, FieldForm, FieldType, Tag, TagColor, TagForm};
pub use model::contact::{format_phone, Contact, ContactForm};
pub use model::event::{CalendarEvent, EventForm, EventKind};
pub use model::lead::{Lead, LeadDraft, LeadId};
pub use model::note::{Note, NoteKind};
pub use model::stage::{Stage, StageColor, StageForm, StageId, UnknownStyleKey};
pub use model::task::{Priority, Task, TaskForm, TaskStatus};
pub use repo::collection::Collection;
pub use repo::lead_repo::UpsertOutcome;
pub use service::dashboard::DashboardSummary;
pub use service::kanban::{DragEnd, DropLocation, StageColumn};
pub use service::lead_flow::{FlowContext, FlowError, LeadFlow};
pub use service::store::{
    CrmStore, Notice, NoticeLevel, RequiredField, StoreData, StoreError, UNKNOWN_STAGE_LABEL,
};
pub use view::filter::TextFilter;
pub use view::sorting::{SortDirection, SortState};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
