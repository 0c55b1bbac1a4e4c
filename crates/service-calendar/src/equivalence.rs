//! Equivalence of two service calendars.
//!
//! Two calendars are equivalent iff they are active on exactly the same
//! dates. Outside the union of both defined windows both sides are
//! inactive and trivially agree, so only that union is scanned, one day at
//! a time.
//!
//! # Fast Rejection
//!
//! Before scanning, calendars whose defined windows do not overlap at all
//! are reported as different. This is a cheap necessary-condition check,
//! not a proof: two calendars with disjoint windows that are both never
//! active (for instance, one holding only `Removed` exceptions) are still
//! reported as different. Callers rely on that outcome, so it is kept.
//!
//! Calendars with the same definition (weekly pattern, range and
//! exceptions; the id is ignored) are equivalent without any of the checks
//! below. Two empty calendars (no weekday, no exception) are equivalent
//! whatever their ranges.
//!
//! # Missing Bounds
//!
//! Otherwise a missing first or last defined date orders before every real
//! date. The two cases therefore differ:
//!
//! - a missing *last* defined date (no exceptions, no end date) makes the
//!   window disjoint from any calendar that defines a first date, so the
//!   pair is reported different;
//! - a missing *first* defined date (no exceptions, no start date) on both
//!   sides leaves no window to scan, so the pair is reported equivalent.
//!   Neither side can be active in that case.

use crate::calendar::ServiceCalendar;
use crate::date::{days_forward, Date};
use crate::error::Result;
use crate::options::ScanOptions;

/// What `is_equivalent` has to do for a given pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Comparison {
    /// Same definition, or the same value in memory.
    Identical,
    /// Defined windows do not overlap.
    Disjoint,
    /// Neither side can ever be active.
    Undefined,
    /// Scan `[start, end]` inclusive.
    Scan(Date, Date),
}

impl ServiceCalendar {
    /// Whether `self` and `other` run on exactly the same dates.
    ///
    /// # Examples
    ///
    /// ```
    /// use service_calendar::{Date, ExceptionType, ServiceCalendar, Weekdays};
    ///
    /// let d = |day| Date::from_ymd(2024, 1, day).unwrap();
    /// let weekly = ServiceCalendar::new("A")
    ///     .with_weekdays(Weekdays::from_flags([true, false, false, false, false, false, false]))
    ///     .with_range(d(1), d(14));
    /// // The same two Mondays, spelled as exceptions only
    /// let listed = ServiceCalendar::new("B")
    ///     .with_exception(d(1), ExceptionType::Added)
    ///     .with_exception(d(8), ExceptionType::Added);
    /// assert!(weekly.is_equivalent(&listed));
    /// ```
    pub fn is_equivalent(&self, other: &ServiceCalendar) -> bool {
        match self.comparison(other) {
            Comparison::Identical | Comparison::Undefined => true,
            Comparison::Disjoint => false,
            Comparison::Scan(start, end) => self.agrees_over(other, start, end),
        }
    }

    /// [`is_equivalent`](Self::is_equivalent) with a scan cap.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::ScanLimitExceeded`](crate::CalendarError::ScanLimitExceeded)
    /// without scanning if the comparison window is wider than the cap.
    pub fn is_equivalent_with_options(
        &self,
        other: &ServiceCalendar,
        options: &ScanOptions,
    ) -> Result<bool> {
        match self.comparison(other) {
            Comparison::Identical | Comparison::Undefined => Ok(true),
            Comparison::Disjoint => Ok(false),
            Comparison::Scan(start, end) => {
                options.check_window(start, end)?;
                Ok(self.agrees_over(other, start, end))
            }
        }
    }

    /// The first date on which exactly one of the two calendars is active.
    ///
    /// Only meaningful once the windows overlap; returns `None` when the
    /// pair is identical, undefined, disjoint or agrees everywhere.
    pub fn first_disagreement(&self, other: &ServiceCalendar) -> Option<Date> {
        match self.comparison(other) {
            Comparison::Scan(start, end) => {
                days_forward(start, end).find(|d| self.is_active_on(*d) != other.is_active_on(*d))
            }
            _ => None,
        }
    }

    fn comparison(&self, other: &ServiceCalendar) -> Comparison {
        if std::ptr::eq(self, other) || self.same_definition(other) {
            return Comparison::Identical;
        }
        if self.is_empty() && other.is_empty() {
            return Comparison::Undefined;
        }

        let (first_a, last_a) = (self.first_defined_date(), self.last_defined_date());
        let (first_b, last_b) = (other.first_defined_date(), other.last_defined_date());

        if first_a > last_b || first_b > last_a {
            tracing::debug!(a = %self.id, b = %other.id, "defined windows are disjoint");
            return Comparison::Disjoint;
        }

        let start = match (first_a, first_b) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        };
        let end = last_a.max(last_b);

        match (start, end) {
            (Some(start), Some(end)) => Comparison::Scan(start, end),
            _ => Comparison::Undefined,
        }
    }

    fn same_definition(&self, other: &ServiceCalendar) -> bool {
        self.daymap == other.daymap
            && self.start_date == other.start_date
            && self.end_date == other.end_date
            && self.exceptions == other.exceptions
    }

    fn agrees_over(&self, other: &ServiceCalendar, start: Date, end: Date) -> bool {
        tracing::trace!(a = %self.id, b = %other.id, %start, %end, "scanning calendars");
        match days_forward(start, end).find(|d| self.is_active_on(*d) != other.is_active_on(*d)) {
            Some(date) => {
                tracing::debug!(a = %self.id, b = %other.id, %date, "calendars disagree");
                false
            }
            None => true,
        }
    }
}
