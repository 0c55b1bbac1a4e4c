//! Service calendars: a weekly pattern, a validity range and per-date
//! exceptions.
//!
//! This is the model behind a GTFS `calendar.txt` row together with its
//! `calendar_dates.txt` entries.
//!
//! # Precedence
//!
//! An exception always wins. Without one, a date is active iff its weekday
//! is set in the daymap AND the date lies within `[start_date, end_date]`.
//! A missing bound fails that range check, so the weekly pattern only
//! contributes inside a fully bounded range. Exceptions may sit outside the
//! range and still count.

use std::collections::BTreeMap;

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::date::Date;
use crate::error::{CalendarError, Result};

/// The 7-flag weekly recurrence pattern, indexed Monday = 0 .. Sunday = 6.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Weekdays([bool; 7]);

impl Weekdays {
    /// No weekday set.
    pub const NONE: Weekdays = Weekdays([false; 7]);
    /// Every weekday set.
    pub const ALL: Weekdays = Weekdays([true; 7]);
    /// Monday through Friday.
    pub const MONDAY_TO_FRIDAY: Weekdays = Weekdays([true, true, true, true, true, false, false]);

    pub fn from_flags(flags: [bool; 7]) -> Self {
        Weekdays(flags)
    }

    pub fn flags(&self) -> [bool; 7] {
        self.0
    }

    pub fn contains(&self, weekday: Weekday) -> bool {
        self.0[weekday.num_days_from_monday() as usize]
    }

    pub fn set(&mut self, weekday: Weekday, active: bool) {
        self.0[weekday.num_days_from_monday() as usize] = active;
    }

    /// True if no weekday is set.
    pub fn is_none(&self) -> bool {
        self.0.iter().all(|flag| !flag)
    }
}

/// A per-date override of the weekly pattern.
///
/// "No exception" is `None` at the lookup site, never a variant here, so
/// a setter cannot be asked to store it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExceptionType {
    /// Service forced active on the date (GTFS code 1).
    Added,
    /// Service forced inactive on the date (GTFS code 2).
    Removed,
}

impl ExceptionType {
    /// Map a GTFS `exception_type` value.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidExceptionCode`] for anything but 1 or 2.
    pub fn from_gtfs_code(code: u8) -> Result<Self> {
        match code {
            1 => Ok(ExceptionType::Added),
            2 => Ok(ExceptionType::Removed),
            other => Err(CalendarError::InvalidExceptionCode(other)),
        }
    }

    pub fn gtfs_code(self) -> u8 {
        match self {
            ExceptionType::Added => 1,
            ExceptionType::Removed => 2,
        }
    }

    /// The activity this exception forces.
    pub fn is_active(self) -> bool {
        matches!(self, ExceptionType::Added)
    }
}

/// Describes exactly on which days a service runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceCalendar {
    /// Service identifier. Carried along, never interpreted.
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub daymap: Weekdays,
    #[serde(default)]
    pub start_date: Option<Date>,
    #[serde(default)]
    pub end_date: Option<Date>,
    #[serde(default)]
    pub exceptions: BTreeMap<Date, ExceptionType>,
}

impl ServiceCalendar {
    /// An empty calendar: no weekday, no range, no exceptions.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Replace the weekly pattern.
    pub fn with_weekdays(mut self, daymap: Weekdays) -> Self {
        self.daymap = daymap;
        self
    }

    /// Bound the weekly pattern to `[start, end]`.
    pub fn with_range(mut self, start: Date, end: Date) -> Self {
        self.start_date = Some(start);
        self.end_date = Some(end);
        self
    }

    /// Add (or replace) an exception.
    pub fn with_exception(mut self, date: Date, exception: ExceptionType) -> Self {
        self.set_exception_type_on(date, exception);
        self
    }

    pub fn set_weekday(&mut self, weekday: Weekday, active: bool) {
        self.daymap.set(weekday, active);
    }

    pub fn set_start_date(&mut self, start: Option<Date>) {
        self.start_date = start;
    }

    pub fn set_end_date(&mut self, end: Option<Date>) {
        self.end_date = end;
    }

    /// Whether the service runs on `date`.
    pub fn is_active_on(&self, date: Date) -> bool {
        match self.exception_type_on(date) {
            Some(exception) => exception.is_active(),
            None => self.daymap.contains(date.weekday()) && self.in_range(date),
        }
    }

    /// The exception recorded for `date`, if any.
    pub fn exception_type_on(&self, date: Date) -> Option<ExceptionType> {
        self.exceptions.get(&date).copied()
    }

    /// Force `date` active or inactive, replacing any previous exception.
    pub fn set_exception_type_on(&mut self, date: Date, exception: ExceptionType) {
        self.exceptions.insert(date, exception);
    }

    /// Drop the exception on `date`, returning what was there.
    pub fn remove_exception(&mut self, date: Date) -> Option<ExceptionType> {
        self.exceptions.remove(&date)
    }

    /// True iff no weekday is set and there are no exceptions.
    ///
    /// The range is not consulted, and a table holding only
    /// [`ExceptionType::Removed`] entries still makes the calendar
    /// non-empty even though it is never active.
    pub fn is_empty(&self) -> bool {
        self.daymap.is_none() && self.exceptions.is_empty()
    }

    fn in_range(&self, date: Date) -> bool {
        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) => start <= date && date <= end,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    fn january_weekdays() -> ServiceCalendar {
        ServiceCalendar::new("WD")
            .with_weekdays(Weekdays::MONDAY_TO_FRIDAY)
            .with_range(date(2024, 1, 1), date(2024, 1, 31))
    }

    // ── Weekdays ────────────────────────────────────────────────────────

    #[test]
    fn test_weekdays_set_and_contains() {
        let mut days = Weekdays::NONE;
        assert!(days.is_none());
        days.set(Weekday::Sun, true);
        assert!(days.contains(Weekday::Sun));
        assert!(!days.contains(Weekday::Mon));
        assert!(days.flags()[6]);
        assert!(!days.is_none());
    }

    #[test]
    fn test_weekday_indexing_matches_date() {
        let d = date(2024, 1, 3); // Wednesday
        let mut days = Weekdays::NONE;
        days.set(d.weekday(), true);
        assert!(days.flags()[d.weekday_index()]);
    }

    // ── ExceptionType ───────────────────────────────────────────────────

    #[test]
    fn test_exception_gtfs_codes() {
        assert_eq!(ExceptionType::from_gtfs_code(1).unwrap(), ExceptionType::Added);
        assert_eq!(ExceptionType::from_gtfs_code(2).unwrap(), ExceptionType::Removed);
        assert_eq!(ExceptionType::Removed.gtfs_code(), 2);
        let err = ExceptionType::from_gtfs_code(0).unwrap_err().to_string();
        assert!(err.contains("Invalid exception type code"), "got: {err}");
    }

    // ── is_active_on ────────────────────────────────────────────────────

    #[test]
    fn test_active_on_weekday_inside_range() {
        let cal = january_weekdays();
        assert!(cal.is_active_on(date(2024, 1, 2))); // Tuesday
        assert!(!cal.is_active_on(date(2024, 1, 6))); // Saturday
    }

    #[test]
    fn test_range_bounds_are_inclusive() {
        let cal = january_weekdays();
        assert!(cal.is_active_on(date(2024, 1, 1)));
        assert!(cal.is_active_on(date(2024, 1, 31)));
        assert!(!cal.is_active_on(date(2023, 12, 29))); // Friday, before range
        assert!(!cal.is_active_on(date(2024, 2, 1))); // Thursday, after range
    }

    #[test]
    fn test_exception_overrides_pattern_and_range() {
        let cal = january_weekdays()
            .with_exception(date(2024, 1, 6), ExceptionType::Added)
            .with_exception(date(2024, 1, 8), ExceptionType::Removed)
            .with_exception(date(2024, 6, 1), ExceptionType::Added);
        assert!(cal.is_active_on(date(2024, 1, 6)));
        assert!(!cal.is_active_on(date(2024, 1, 8)));
        assert!(cal.is_active_on(date(2024, 6, 1)));
    }

    #[test]
    fn test_missing_bound_disables_weekly_pattern() {
        let mut cal = january_weekdays();
        cal.set_end_date(None);
        assert!(!cal.is_active_on(date(2024, 1, 2)));
        cal.set_end_date(Some(date(2024, 1, 31)));
        cal.set_start_date(None);
        assert!(!cal.is_active_on(date(2024, 1, 2)));
    }

    #[test]
    fn test_set_weekday_toggles_single_flag() {
        let mut cal = january_weekdays();
        cal.set_weekday(Weekday::Sat, true);
        assert!(cal.is_active_on(date(2024, 1, 6)));
        cal.set_weekday(Weekday::Mon, false);
        assert!(!cal.is_active_on(date(2024, 1, 8)));
        assert!(cal.is_active_on(date(2024, 1, 9)));
    }

    // ── exceptions ──────────────────────────────────────────────────────

    #[test]
    fn test_exception_lookup_and_replace() {
        let mut cal = ServiceCalendar::new("X");
        let d = date(2024, 3, 15);
        assert_eq!(cal.exception_type_on(d), None);
        cal.set_exception_type_on(d, ExceptionType::Added);
        assert_eq!(cal.exception_type_on(d), Some(ExceptionType::Added));
        cal.set_exception_type_on(d, ExceptionType::Removed);
        assert_eq!(cal.exception_type_on(d), Some(ExceptionType::Removed));
        assert_eq!(cal.exceptions.len(), 1);
    }

    #[test]
    fn test_remove_exception_restores_pattern() {
        let mut cal = january_weekdays().with_exception(date(2024, 1, 8), ExceptionType::Removed);
        assert!(!cal.is_active_on(date(2024, 1, 8)));
        assert_eq!(cal.remove_exception(date(2024, 1, 8)), Some(ExceptionType::Removed));
        assert!(cal.is_active_on(date(2024, 1, 8)));
        assert_eq!(cal.remove_exception(date(2024, 1, 8)), None);
    }

    // ── is_empty ────────────────────────────────────────────────────────

    #[test]
    fn test_new_calendar_is_empty() {
        let cal = ServiceCalendar::new("EMPTY");
        assert!(cal.is_empty());
        assert_eq!(cal.id, "EMPTY");
    }

    #[test]
    fn test_empty_ignores_range() {
        let cal = ServiceCalendar::new("R").with_range(date(2024, 1, 1), date(2024, 12, 31));
        assert!(cal.is_empty());
    }

    #[test]
    fn test_removed_only_exceptions_are_not_empty() {
        let cal = ServiceCalendar::new("R").with_exception(date(2024, 1, 1), ExceptionType::Removed);
        assert!(!cal.is_empty());
        assert!(!cal.is_active_on(date(2024, 1, 1)));
    }

    #[test]
    fn test_single_weekday_is_not_empty() {
        let mut cal = ServiceCalendar::new("S");
        cal.set_weekday(Weekday::Sun, true);
        assert!(!cal.is_empty());
    }

    // ── serde ───────────────────────────────────────────────────────────

    #[test]
    fn test_deserialize_gtfs_style_json() {
        let json = r#"{
            "id": "WE",
            "daymap": [false, false, false, false, false, true, true],
            "start_date": "20240101",
            "end_date": "20240131",
            "exceptions": {"20240101": "added", "20240106": "removed"}
        }"#;
        let cal: ServiceCalendar = serde_json::from_str(json).unwrap();
        assert_eq!(cal.id, "WE");
        assert!(cal.is_active_on(date(2024, 1, 1)));
        assert!(!cal.is_active_on(date(2024, 1, 6)));
        assert!(cal.is_active_on(date(2024, 1, 7)));
    }

    #[test]
    fn test_deserialize_fills_missing_fields() {
        let cal: ServiceCalendar = serde_json::from_str(r#"{"id": "bare"}"#).unwrap();
        assert!(cal.is_empty());
        assert_eq!(cal.start_date, None);
    }
}
