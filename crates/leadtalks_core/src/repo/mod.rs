//! Entity store: pure operations over immutable collection snapshots.
//!
//! # Responsibility
//! - Define create/update/delete contracts per entity collection.
//! - Keep copy-on-write details away from the coordinator and views.
//!
//! # Invariants
//! - Operations take the current snapshot and return a new one; callers swap
//!   the whole reference and never mutate in place.
//! - New records are prepended unless an entity documents otherwise
//!   (notes and stages append).
//! - No operation here fails; rejected input is the coordinator's concern.

pub mod catalog_repo;
pub mod collection;
pub mod contact_repo;
pub mod event_repo;
pub mod lead_repo;
pub mod note_repo;
pub mod stage_repo;
pub mod task_repo;
