//! Session coordinator and use-case engines.
//!
//! # Responsibility
//! - Own the collections of one session (`store::CrmStore`).
//! - Drive board drags, lead-detail wizards and overview counters on top of
//!   the pure `repo` operations.

pub mod dashboard;
pub mod kanban;
pub mod lead_flow;
pub mod store;
