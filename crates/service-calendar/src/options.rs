//! Scan configuration.

use serde::{Deserialize, Serialize};

use crate::date::Date;
use crate::error::{CalendarError, Result};

/// Options for the `*_with_options` scanning operations.
///
/// The default places no cap on the scanned window, which keeps the plain
/// operations exact for any pair of real dates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanOptions {
    /// Largest window (in days, inclusive of both ends) a scan may walk.
    /// Wider windows are refused up front.
    pub max_scan_days: Option<u64>,
}

impl ScanOptions {
    /// Options with the given day cap.
    pub fn capped(max_scan_days: u64) -> Self {
        Self {
            max_scan_days: Some(max_scan_days),
        }
    }

    /// Fail closed if `[start, end]` is wider than the cap.
    pub(crate) fn check_window(&self, start: Date, end: Date) -> Result<()> {
        let Some(limit) = self.max_scan_days else {
            return Ok(());
        };
        let span = start.days_until(end);
        if span < 0 {
            return Ok(());
        }
        let days = span.unsigned_abs() + 1;
        if days > limit {
            tracing::warn!(%start, %end, days, limit, "refusing calendar scan");
            return Err(CalendarError::ScanLimitExceeded { days, limit });
        }
        Ok(())
    }
}
