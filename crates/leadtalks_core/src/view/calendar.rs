//! Week and month projections over calendar events.
//!
//! # Invariants
//! - Weeks start on Monday; month grids start on Sunday.
//! - A month grid always has 42 cells.
//! - Events without a start time never occupy a time slot.

use crate::model::event::CalendarEvent;
use chrono::{Datelike, Days, NaiveDate, NaiveTime, Timelike};

/// Number of cells in a month grid (six rows of seven days).
pub const MONTH_GRID_CELLS: usize = 42;

const FIRST_SLOT_HOUR: u32 = 6;
const SLOT_COUNT: u32 = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthCell {
    pub date: NaiveDate,
    pub in_month: bool,
}

impl MonthCell {
    pub fn day(&self) -> u32 {
        self.date.day()
    }
}

/// Monday of the week containing `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    let offset = u64::from(date.weekday().num_days_from_monday());
    date - Days::new(offset)
}

pub fn week_days(start: NaiveDate) -> Vec<NaiveDate> {
    start.iter_days().take(7).collect()
}

/// Half-hour slots from 06:00 through 21:30.
pub fn time_slots() -> Vec<NaiveTime> {
    (0..SLOT_COUNT)
        .filter_map(|index| {
            NaiveTime::from_hms_opt(FIRST_SLOT_HOUR + index / 2, (index % 2) * 30, 0)
        })
        .collect()
}

pub fn events_on(events: &[CalendarEvent], date: NaiveDate) -> Vec<&CalendarEvent> {
    events.iter().filter(|event| event.date == date).collect()
}

/// Events on `date` starting exactly at `slot` (minute precision).
pub fn events_in_slot(
    events: &[CalendarEvent],
    date: NaiveDate,
    slot: NaiveTime,
) -> Vec<&CalendarEvent> {
    events
        .iter()
        .filter(|event| event.date == date)
        .filter(|event| {
            event
                .start_time
                .is_some_and(|start| start.hour() == slot.hour() && start.minute() == slot.minute())
        })
        .collect()
}

pub fn events_in_month(events: &[CalendarEvent], year: i32, month: u32) -> Vec<&CalendarEvent> {
    events
        .iter()
        .filter(|event| event.date.year() == year && event.date.month() == month)
        .collect()
}

/// Sunday-first grid for `month` of `year`, padded with neighbouring days.
///
/// Returns `None` when `year`/`month` do not name a calendar month.
pub fn month_grid(year: i32, month: u32) -> Option<Vec<MonthCell>> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let leading = u64::from(first.weekday().num_days_from_sunday());
    let grid_start = first.checked_sub_days(Days::new(leading))?;

    Some(
        grid_start
            .iter_days()
            .take(MONTH_GRID_CELLS)
            .map(|date| MonthCell {
                date,
                in_month: date.year() == year && date.month() == month,
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::{month_grid, time_slots, week_days, week_start, MONTH_GRID_CELLS};
    use chrono::{NaiveDate, NaiveTime};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn week_starts_on_monday() {
        assert_eq!(week_start(date(2025, 10, 29)), date(2025, 10, 27));
        assert_eq!(week_start(date(2025, 10, 27)), date(2025, 10, 27));
        assert_eq!(week_start(date(2025, 11, 2)), date(2025, 10, 27));
        let days = week_days(date(2025, 10, 27));
        assert_eq!(days.len(), 7);
        assert_eq!(days[6], date(2025, 11, 2));
    }

    #[test]
    fn slots_cover_morning_to_evening() {
        let slots = time_slots();
        assert_eq!(slots.len(), 32);
        assert_eq!(slots[0], NaiveTime::from_hms_opt(6, 0, 0).expect("valid time"));
        assert_eq!(slots[1], NaiveTime::from_hms_opt(6, 30, 0).expect("valid time"));
        assert_eq!(slots[31], NaiveTime::from_hms_opt(21, 30, 0).expect("valid time"));
    }

    #[test]
    fn october_2025_grid_pads_with_september_and_november() {
        let grid = month_grid(2025, 10).expect("valid month");
        assert_eq!(grid.len(), MONTH_GRID_CELLS);
        // 2025-10-01 is a Wednesday: three leading days.
        assert_eq!(grid[0].date, date(2025, 9, 28));
        assert!(!grid[0].in_month);
        assert_eq!(grid[3].date, date(2025, 10, 1));
        assert!(grid[3].in_month);
        assert_eq!(grid.iter().filter(|cell| cell.in_month).count(), 31);
        assert_eq!(grid[41].day(), 8);
    }

    #[test]
    fn invalid_month_has_no_grid() {
        assert!(month_grid(2025, 13).is_none());
    }
}
