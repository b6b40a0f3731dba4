//! Read-only projections: text filter, tri-state sort and calendar grids.
//!
//! Views borrow from store snapshots and never reorder or copy records.

pub mod calendar;
pub mod filter;
pub mod sorting;
