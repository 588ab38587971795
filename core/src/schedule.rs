//! Date ranges behind the "due soon" listings.

use chrono::{Datelike, Days, Local, NaiveDate};
use std::fmt;

/// Source of the current local date.
///
/// Handlers ask the clock for "today" instead of reading the system time
/// directly, which keeps the due-window routes deterministic under test.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Wall clock in the server's local time zone
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Clock pinned to one date
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Named date windows relative to today.
///
/// Weeks run Sunday through Saturday: the start is today minus its
/// Sunday-based weekday index, the end is six days later. Both bounds are
/// inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DueWindow {
    Today,
    NextDay,
    ThisWeek,
}

impl DueWindow {
    /// Inclusive `(start, end)` dates of this window
    pub fn bounds(self, today: NaiveDate) -> (NaiveDate, NaiveDate) {
        match self {
            DueWindow::Today => (today, today),
            DueWindow::NextDay => {
                let tomorrow = today + Days::new(1);
                (tomorrow, tomorrow)
            }
            DueWindow::ThisWeek => {
                let start = today - Days::new(u64::from(today.weekday().num_days_from_sunday()));
                (start, start + Days::new(6))
            }
        }
    }

    /// Single date for one-day windows, `None` for ranges
    pub fn single_day(self, today: NaiveDate) -> Option<NaiveDate> {
        match self.bounds(today) {
            (start, end) if start == end => Some(start),
            _ => None,
        }
    }

    /// Path segment under `/todoitems`
    pub fn path_segment(self) -> &'static str {
        match self {
            DueWindow::Today => "today",
            DueWindow::NextDay => "nextday",
            DueWindow::ThisWeek => "thisweek",
        }
    }
}

impl fmt::Display for DueWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path_segment())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_today_and_next_day() {
        let today = date(2026, 10, 16);
        assert_eq!(DueWindow::Today.bounds(today), (today, today));
        assert_eq!(
            DueWindow::NextDay.bounds(today),
            (date(2026, 10, 17), date(2026, 10, 17))
        );
        assert_eq!(DueWindow::NextDay.single_day(today), Some(date(2026, 10, 17)));
        assert_eq!(DueWindow::ThisWeek.single_day(today), None);
    }

    #[test]
    fn test_next_day_crosses_year_end() {
        assert_eq!(
            DueWindow::NextDay.single_day(date(2026, 12, 31)),
            Some(date(2027, 1, 1))
        );
    }

    #[test]
    fn test_week_starts_on_sunday() {
        // 2026-10-16 is a Friday
        let (start, end) = DueWindow::ThisWeek.bounds(date(2026, 10, 16));
        assert_eq!(start, date(2026, 10, 11));
        assert_eq!(end, date(2026, 10, 17));
        assert_eq!(start.weekday(), chrono::Weekday::Sun);
    }

    #[test]
    fn test_week_on_sunday_and_saturday() {
        // Sunday is its own week start
        assert_eq!(
            DueWindow::ThisWeek.bounds(date(2026, 10, 11)),
            (date(2026, 10, 11), date(2026, 10, 17))
        );
        // Saturday is the last day of the week
        assert_eq!(
            DueWindow::ThisWeek.bounds(date(2026, 10, 17)),
            (date(2026, 10, 11), date(2026, 10, 17))
        );
    }

    #[test]
    fn test_week_spanning_months() {
        // 2026-11-02 is a Monday
        assert_eq!(
            DueWindow::ThisWeek.bounds(date(2026, 11, 2)),
            (date(2026, 11, 1), date(2026, 11, 7))
        );
        // 2026-10-01 is a Thursday
        assert_eq!(
            DueWindow::ThisWeek.bounds(date(2026, 10, 1)),
            (date(2026, 9, 27), date(2026, 10, 3))
        );
    }

    #[test]
    fn test_clocks() {
        let fixed = FixedClock(date(2024, 2, 29));
        assert_eq!(fixed.today(), date(2024, 2, 29));
        assert_eq!(SystemClock.today(), Local::now().date_naive());
    }

    #[test]
    fn test_display_matches_path_segment() {
        assert_eq!(DueWindow::Today.to_string(), "today");
        assert_eq!(DueWindow::NextDay.to_string(), "nextday");
        assert_eq!(DueWindow::ThisWeek.to_string(), "thisweek");
    }
}
