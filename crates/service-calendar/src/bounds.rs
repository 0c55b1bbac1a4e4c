//! Boundary discovery: where a calendar is defined and where it is active.
//!
//! The *defined window* of a calendar runs from its earliest explicitly
//! determined date (earliest exception or start date) to its latest one
//! (latest exception or end date). Outside it the calendar is inactive, so
//! every active-date search is a day-by-day scan of that window. Cost is
//! proportional to the days spanned, not to the number of exceptions.

use crate::calendar::ServiceCalendar;
use crate::date::{days_backward, days_forward, Date};
use crate::error::Result;
use crate::options::ScanOptions;

impl ServiceCalendar {
    /// The earliest date on which this calendar is explicitly determined.
    ///
    /// `None` if there are no exceptions and no start date.
    pub fn first_defined_date(&self) -> Option<Date> {
        let first_exception = self.exceptions.keys().next().copied();
        match (first_exception, self.start_date) {
            (Some(exception), Some(start)) => Some(exception.min(start)),
            (exception, start) => exception.or(start),
        }
    }

    /// The latest date on which this calendar is explicitly determined.
    ///
    /// `None` if there are no exceptions and no end date.
    pub fn last_defined_date(&self) -> Option<Date> {
        let last_exception = self.exceptions.keys().next_back().copied();
        match (last_exception, self.end_date) {
            (Some(exception), Some(end)) => Some(exception.max(end)),
            (exception, end) => exception.or(end),
        }
    }

    /// The defined window, if both ends exist.
    pub fn defined_window(&self) -> Option<(Date, Date)> {
        Some((self.first_defined_date()?, self.last_defined_date()?))
    }

    /// The first date the service runs, or `None` if it never does.
    ///
    /// # Examples
    ///
    /// ```
    /// use service_calendar::{Date, ExceptionType, ServiceCalendar};
    ///
    /// let day = Date::from_ymd(2024, 3, 15).unwrap();
    /// let cal = ServiceCalendar::new("once").with_exception(day, ExceptionType::Added);
    /// assert_eq!(cal.first_active_date(), Some(day));
    /// ```
    pub fn first_active_date(&self) -> Option<Date> {
        let (start, end) = self.defined_window()?;
        days_forward(start, end).find(|d| self.is_active_on(*d))
    }

    /// The last date the service runs, or `None` if it never does.
    pub fn last_active_date(&self) -> Option<Date> {
        let (start, end) = self.defined_window()?;
        days_backward(start, end).find(|d| self.is_active_on(*d))
    }

    /// Every date the service runs, ascending.
    pub fn active_dates(&self) -> Vec<Date> {
        match self.defined_window() {
            Some((start, end)) => days_forward(start, end)
                .filter(|d| self.is_active_on(*d))
                .collect(),
            None => Vec::new(),
        }
    }

    /// [`first_active_date`](Self::first_active_date) with a scan cap.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::ScanLimitExceeded`](crate::CalendarError::ScanLimitExceeded)
    /// without scanning if the defined window is wider than the cap.
    pub fn first_active_date_with_options(&self, options: &ScanOptions) -> Result<Option<Date>> {
        if let Some((start, end)) = self.defined_window() {
            options.check_window(start, end)?;
        }
        Ok(self.first_active_date())
    }

    /// [`last_active_date`](Self::last_active_date) with a scan cap.
    pub fn last_active_date_with_options(&self, options: &ScanOptions) -> Result<Option<Date>> {
        if let Some((start, end)) = self.defined_window() {
            options.check_window(start, end)?;
        }
        Ok(self.last_active_date())
    }

    /// [`active_dates`](Self::active_dates) with a scan cap.
    pub fn active_dates_with_options(&self, options: &ScanOptions) -> Result<Vec<Date>> {
        if let Some((start, end)) = self.defined_window() {
            options.check_window(start, end)?;
        }
        Ok(self.active_dates())
    }
}
