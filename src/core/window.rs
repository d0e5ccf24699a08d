//! Reporting window for the time-series charts.

use chrono::{Days, Local, NaiveDate};
use std::collections::HashSet;

pub const DEFAULT_WINDOW_DAYS: usize = 7;

/// Longest trailing window a configuration may ask for.
pub const MAX_WINDOW_DAYS: usize = 3660;

const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

/// Ordered, duplicate-free list of calendar-day keys, oldest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateWindow {
    keys: Vec<String>,
}

impl DateWindow {
    /// Uses the given keys as-is, dropping repeats so no record lands on two points.
    pub fn from_keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = HashSet::new();
        let mut unique = Vec::new();
        for key in keys {
            let key: String = key.into();
            if seen.insert(key.clone()) {
                unique.push(key);
            }
        }
        Self { keys: unique }
    }

    /// The `days` calendar days ending on `end`, inclusive.
    ///
    /// Stops early at the first representable date instead of overflowing.
    pub fn trailing(end: NaiveDate, days: usize) -> Self {
        let mut keys: Vec<String> = (0..days as u64)
            .map_while(|offset| end.checked_sub_days(Days::new(offset)))
            .map(|day| day.format(DATE_KEY_FORMAT).to_string())
            .collect();
        keys.reverse();
        Self { keys }
    }

    pub fn trailing_from_today(days: usize) -> Self {
        Self::trailing(Local::now().date_naive(), days)
    }

    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl Default for DateWindow {
    fn default() -> Self {
        Self::trailing_from_today(DEFAULT_WINDOW_DAYS)
    }
}

/// True when `timestamp` falls on the calendar day `key`.
///
/// The key must be a prefix of the timestamp, followed by nothing or by an ISO
/// date/time separator, so `2024-01-1` does not match `2024-01-10`.
pub fn is_same_day(timestamp: &str, key: &str) -> bool {
    match timestamp.strip_prefix(key) {
        Some(rest) => rest.is_empty() || rest.starts_with('T') || rest.starts_with(' '),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_window_is_oldest_first() {
        let end = NaiveDate::from_ymd_opt(2024, 3, 2).unwrap();
        let window = DateWindow::trailing(end, 3);
        assert_eq!(window.keys(), ["2024-02-29", "2024-03-01", "2024-03-02"]);
    }

    #[test]
    fn test_trailing_window_of_zero_days_is_empty() {
        let end = NaiveDate::from_ymd_opt(2024, 1, 7).unwrap();
        assert!(DateWindow::trailing(end, 0).is_empty());
    }

    #[test]
    fn test_trailing_window_stops_at_earliest_date() {
        let end = NaiveDate::MIN.checked_add_days(Days::new(2)).unwrap();
        let window = DateWindow::trailing(end, 10);
        assert_eq!(window.len(), 3);
        assert_eq!(window.keys()[0], NaiveDate::MIN.format(DATE_KEY_FORMAT).to_string());
    }

    #[test]
    fn test_default_window_has_seven_days() {
        assert_eq!(DateWindow::default().len(), DEFAULT_WINDOW_DAYS);
    }

    #[test]
    fn test_from_keys_drops_duplicates() {
        let window = DateWindow::from_keys(["2024-01-01", "2024-01-02", "2024-01-01"]);
        assert_eq!(window.keys(), ["2024-01-01", "2024-01-02"]);
    }

    #[test]
    fn test_same_day_matching() {
        assert!(is_same_day("2024-01-01", "2024-01-01"));
        assert!(is_same_day("2024-01-01T10:15:00Z", "2024-01-01"));
        assert!(is_same_day("2024-01-01 10:15", "2024-01-01"));
        assert!(!is_same_day("2024-01-10", "2024-01-1"));
        assert!(!is_same_day("2024-01-01", "2024-01"));
        assert!(!is_same_day("2024-01-02", "2024-01-01"));
    }
}
