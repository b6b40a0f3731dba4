//! Demo data set shipped with the core.
//!
//! The fixture is stored in wire shape (`data/demo.json`) so loading it also
//! exercises every entity's serde mapping.

use crate::clock::Clock;
use crate::config::CoreConfig;
use crate::service::store::{CrmStore, StoreData};

const DEMO_JSON: &str = include_str!("../data/demo.json");

/// Parses the bundled demo collections.
pub fn demo_data() -> Result<StoreData, serde_json::Error> {
    serde_json::from_str(DEMO_JSON)
}

impl<C: Clock> CrmStore<C> {
    /// Store pre-loaded with the demo pipeline, leads, tasks and calendar.
    pub fn with_demo_data(config: CoreConfig, clock: C) -> Result<Self, serde_json::Error> {
        Ok(Self::from_data(config, clock, demo_data()?))
    }
}

#[cfg(test)]
mod tests {
    use super::demo_data;

    #[test]
    fn demo_fixture_parses() {
        let data = demo_data().expect("demo fixture should parse");
        assert_eq!(data.stages.len(), 3);
        assert_eq!(data.leads.len(), 5);
        assert_eq!(data.tasks.len(), 4);
        assert_eq!(data.events.len(), 2);
        assert_eq!(data.notes.len(), 2);
        assert_eq!(data.contacts.len(), 4);
        assert!(data.tags.is_empty());
    }
}
