//! Price data port trait.

use crate::domain::error::TrendrankError;
use crate::domain::ohlcv::OhlcvBar;
use chrono::NaiveDate;

/// Source of daily price history.
///
/// Implementations report every failure as an `Err`; callers decide whether
/// a failure is fatal. The screen pipeline treats it as a per-symbol skip.
pub trait DataPort {
    /// Daily bars dated within `[start_date, end_date]`, both ends inclusive.
    fn fetch_ohlcv(
        &self,
        ticker: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<OhlcvBar>, TrendrankError>;

    /// Short label for log lines.
    fn source_name(&self) -> &str;
}
