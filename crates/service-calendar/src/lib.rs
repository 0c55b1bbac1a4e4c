//! # service-calendar
//!
//! Transit service calendars and their exact equivalence.
//!
//! A [`ServiceCalendar`] combines a weekly pattern, a validity range and a
//! sparse table of per-date exceptions (the GTFS `calendar.txt` +
//! `calendar_dates.txt` model). Two calendars can spell the same set of
//! service days very differently; [`ServiceCalendar::is_equivalent`]
//! decides whether they actually agree on every date.
//!
//! The crate performs no I/O. Callers hand in already-parsed dates.
//!
//! ## Modules
//!
//! - [`date`] — Day-granularity [`Date`] value, day arithmetic, noon-UTC anchoring
//! - [`calendar`] — [`ServiceCalendar`], [`Weekdays`], [`ExceptionType`], activity queries
//! - [`bounds`] — Defined window and first/last active date discovery
//! - [`equivalence`] — Full equivalence comparison between two calendars
//! - [`options`] — [`ScanOptions`] scan cap
//! - [`error`] — Error types

pub mod bounds;
pub mod calendar;
pub mod date;
pub mod equivalence;
pub mod error;
pub mod options;

pub use calendar::{ExceptionType, ServiceCalendar, Weekdays};
pub use date::{Date, NOON_HOUR};
pub use error::{CalendarError, Result};
pub use options::ScanOptions;
