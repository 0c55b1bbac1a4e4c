//! Day-granularity calendar dates.
//!
//! [`Date`] is a thin, `Copy` wrapper around a proleptic Gregorian
//! [`NaiveDate`]. Ordering, day arithmetic and weekday derivation all go
//! through chrono, so leap years and month rollover are never computed by
//! hand.
//!
//! # Time Convention
//!
//! Whenever a date has to become an instant, it is anchored at
//! [`NOON_HOUR`]:00 UTC. Noon is far from any midnight boundary, so the
//! instant lands on the same calendar day in every UTC offset in use and
//! no DST transition can move it to a neighbouring day.
//!
//! # Unset Dates
//!
//! There is no "unset" `Date`. Optional bounds are `Option<Date>`, and
//! year 0 (the GTFS-era encoding for "unset") is rejected by
//! [`Date::from_ymd`].

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Days, NaiveDate, NaiveTime, TimeDelta, Utc, Weekday};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{CalendarError, Result};

/// Hour of day (UTC) used for every date-to-instant conversion.
pub const NOON_HOUR: i64 = 12;

/// A calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Date(NaiveDate);

impl Date {
    /// Build a date from calendar fields.
    ///
    /// No normalization is performed: `(2024, 2, 30)` is an error, not
    /// March 1st. Use [`Date::offset_by_days`] for calendar-correct
    /// arithmetic.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidDate`] if the fields do not name a
    /// real day, or if `year` is 0.
    ///
    /// # Examples
    ///
    /// ```
    /// use service_calendar::Date;
    ///
    /// let leap_day = Date::from_ymd(2024, 2, 29).unwrap();
    /// assert_eq!(leap_day.to_string(), "20240229");
    /// assert!(Date::from_ymd(2023, 2, 29).is_err());
    /// ```
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self> {
        let invalid = CalendarError::InvalidDate { year, month, day };
        if year == 0 {
            return Err(invalid);
        }
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Date)
            .ok_or(invalid)
    }

    /// Wrap an existing chrono date.
    pub fn from_naive(date: NaiveDate) -> Self {
        Date(date)
    }

    pub fn naive(self) -> NaiveDate {
        self.0
    }

    pub fn year(self) -> i32 {
        self.0.year()
    }

    pub fn month(self) -> u32 {
        self.0.month()
    }

    pub fn day(self) -> u32 {
        self.0.day()
    }

    /// The date `days` days after this one (before it, if negative).
    ///
    /// Returns `None` only when the result falls outside chrono's
    /// representable range.
    pub fn offset_by_days(self, days: i64) -> Option<Self> {
        let magnitude = Days::new(days.unsigned_abs());
        let shifted = if days >= 0 {
            self.0.checked_add_days(magnitude)
        } else {
            self.0.checked_sub_days(magnitude)
        };
        shifted.map(Date)
    }

    /// The following day.
    pub fn succ(self) -> Option<Self> {
        self.0.succ_opt().map(Date)
    }

    /// The preceding day.
    pub fn pred(self) -> Option<Self> {
        self.0.pred_opt().map(Date)
    }

    /// Signed number of days from `self` to `other`.
    pub fn days_until(self, other: Date) -> i64 {
        other.0.signed_duration_since(self.0).num_days()
    }

    pub fn weekday(self) -> Weekday {
        self.0.weekday()
    }

    /// Weekday as a daymap index: Monday = 0 through Sunday = 6.
    pub fn weekday_index(self) -> usize {
        self.0.weekday().num_days_from_monday() as usize
    }

    /// Noon UTC on this day.
    pub fn to_noon_timestamp(self) -> DateTime<Utc> {
        let noon = NaiveTime::MIN + TimeDelta::hours(NOON_HOUR);
        self.0.and_time(noon).and_utc()
    }
}

impl From<NaiveDate> for Date {
    fn from(date: NaiveDate) -> Self {
        Date(date)
    }
}

impl From<Date> for NaiveDate {
    fn from(date: Date) -> Self {
        date.0
    }
}

/// Formats as GTFS `YYYYMMDD`.
impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}{:02}{:02}", self.year(), self.month(), self.day())
    }
}

/// Parses GTFS `YYYYMMDD`.
impl FromStr for Date {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.len() != 8 || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CalendarError::InvalidDateString(s.to_string()));
        }
        let field = |range: std::ops::Range<usize>| -> Result<u32> {
            s[range]
                .parse()
                .map_err(|_| CalendarError::InvalidDateString(s.to_string()))
        };
        let year = field(0..4)? as i32;
        Date::from_ymd(year, field(4..6)?, field(6..8)?)
    }
}

impl Serialize for Date {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Date {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

/// Every date from `start` to `end` inclusive, ascending.
pub(crate) fn days_forward(start: Date, end: Date) -> impl Iterator<Item = Date> {
    std::iter::successors(Some(start), |d| d.succ()).take_while(move |d| *d <= end)
}

/// Every date from `end` down to `start` inclusive, descending.
pub(crate) fn days_backward(start: Date, end: Date) -> impl Iterator<Item = Date> {
    std::iter::successors(Some(end), |d| d.pred()).take_while(move |d| *d >= start)
}
