//! Error types for service-calendar operations.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalendarError {
    #[error("Invalid date: {year:04}-{month:02}-{day:02}")]
    InvalidDate { year: i32, month: u32, day: u32 },

    #[error("Invalid date string: {0}")]
    InvalidDateString(String),

    #[error("Invalid exception type code: {0}")]
    InvalidExceptionCode(u8),

    #[error("Scan of {days} days exceeds the limit of {limit} days")]
    ScanLimitExceeded { days: u64, limit: u64 },
}

pub type Result<T> = std::result::Result<T, CalendarError>;
