//! Date range covered by a generation run.

use chrono::{Datelike, Duration, NaiveDate};

use crate::error::{LunchCalError, LunchCalResult};

/// Inclusive range of calendar dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        DateRange { start, end }
    }

    /// `[today, today + days]`, or an error when the end is not a valid date.
    pub fn days_ahead(today: NaiveDate, days: u32) -> LunchCalResult<Self> {
        let end = today
            .checked_add_signed(Duration::days(i64::from(days)))
            .ok_or(LunchCalError::DateOutOfRange { start: today, days })?;

        Ok(DateRange { start: today, end })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Mondays of every week overlapping this range.
    pub fn week_starts(&self) -> Vec<NaiveDate> {
        week_starts(self.start, self.end)
    }
}

/// Enumerate the Monday of each week that overlaps `[start, end]`.
///
/// Starts at the Monday on or before `start` and steps a week at a time
/// while the Monday is still on or before `end`. Weeks that would fall
/// outside chrono's supported dates are left out.
pub fn week_starts(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    let monday = start.checked_sub_signed(Duration::days(i64::from(
        start.weekday().num_days_from_monday(),
    )));
    let mut weeks = Vec::new();

    let mut current = monday;
    while let Some(week) = current.filter(|week| *week <= end) {
        weeks.push(week);
        current = week.checked_add_signed(Duration::days(7));
    }

    weeks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_week_starts_from_wednesday() {
        let weeks = week_starts(date(2024, 1, 10), date(2024, 1, 20));
        assert_eq!(weeks, vec![date(2024, 1, 8), date(2024, 1, 15)]);
    }

    #[test]
    fn test_week_starts_spanning_three_weeks() {
        // Wednesday to the Monday twelve days later
        let weeks = week_starts(date(2024, 1, 10), date(2024, 1, 22));
        assert_eq!(weeks, vec![date(2024, 1, 8), date(2024, 1, 15), date(2024, 1, 22)]);
    }

    #[test]
    fn test_week_starts_monday_start_is_its_own_week() {
        let weeks = week_starts(date(2024, 1, 8), date(2024, 1, 8));
        assert_eq!(weeks, vec![date(2024, 1, 8)]);
    }

    #[test]
    fn test_week_starts_crosses_year_boundary() {
        let weeks = week_starts(date(2024, 12, 31), date(2025, 1, 6));
        assert_eq!(weeks, vec![date(2024, 12, 30), date(2025, 1, 6)]);
    }

    #[test]
    fn test_week_starts_inverted_range_is_empty() {
        assert!(week_starts(date(2024, 1, 20), date(2024, 1, 1)).is_empty());
    }

    #[test]
    fn test_days_ahead_is_inclusive() {
        let range = DateRange::days_ahead(date(2024, 1, 10), 10).unwrap();
        assert_eq!(range.end, date(2024, 1, 20));
        assert!(range.contains(date(2024, 1, 10)));
        assert!(range.contains(date(2024, 1, 20)));
        assert!(!range.contains(date(2024, 1, 9)));
        assert!(!range.contains(date(2024, 1, 21)));
    }

    #[test]
    fn test_days_ahead_past_last_date_is_error() {
        let err = DateRange::days_ahead(date(2026, 10, 16), u32::MAX).unwrap_err();
        assert!(matches!(err, LunchCalError::DateOutOfRange { days: u32::MAX, .. }));
    }

    #[test]
    fn test_week_starts_near_last_date_stops() {
        let weeks = week_starts(NaiveDate::MAX - Duration::days(20), NaiveDate::MAX);
        assert!(!weeks.is_empty());
        assert!(weeks.len() <= 4);
        assert!(weeks.iter().all(|w| w.weekday() == chrono::Weekday::Mon));
    }
}
