//! Time source and id generation.
//!
//! # Responsibility
//! - Provide the wall-clock reading used to stamp `criadoEm`/`atualizadoEm`.
//! - Generate time-ordered opaque identifiers.
//!
//! # Invariants
//! - Generated tokens are unique within the process and sort by creation time.

use chrono::{Duration, Local, NaiveDateTime};
use std::cell::Cell;
use uuid::Uuid;

/// Wall-clock source used by the store.
pub trait Clock {
    fn now(&self) -> NaiveDateTime;
}

/// Local wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Manually driven clock for deterministic callers (tests, replays).
#[derive(Debug, Clone)]
pub struct ManualClock {
    current: Cell<NaiveDateTime>,
}

impl ManualClock {
    pub fn new(start: NaiveDateTime) -> Self {
        Self {
            current: Cell::new(start),
        }
    }

    pub fn set(&self, value: NaiveDateTime) {
        self.current.set(value);
    }

    pub fn advance(&self, by: Duration) {
        self.current.set(self.current.get() + by);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> NaiveDateTime {
        self.current.get()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> NaiveDateTime {
        (**self).now()
    }
}

/// Returns a new current-time-derived unique token (UUIDv7).
pub fn new_token() -> String {
    Uuid::now_v7().to_string()
}

#[cfg(test)]
mod tests {
    use super::{new_token, Clock, ManualClock};
    use chrono::{Duration, NaiveDate};

    #[test]
    fn manual_clock_advances() {
        let start = NaiveDate::from_ymd_opt(2025, 10, 1)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        let clock = ManualClock::new(start);
        clock.advance(Duration::minutes(5));
        assert_eq!(clock.now(), start + Duration::minutes(5));
    }

    #[test]
    fn tokens_are_unique_and_time_ordered() {
        let first = new_token();
        let second = new_token();
        assert_ne!(first, second);
        assert!(first < second);
    }
}
