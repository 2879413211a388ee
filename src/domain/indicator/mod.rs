//! Trend indicators computed from a symbol's price series.
//!
//! - `IndicatorSet`: the per-symbol values the scorer and presenter consume
//! - [`sma`]: trailing moving averages
//! - [`roc`]: day-over-day percent change

pub mod roc;
pub mod sma;

use crate::domain::ohlcv::PriceSeries;
use crate::domain::universe::SkipReason;
use serde::Serialize;

/// Fewest bars that still allow a day-over-day comparison.
pub const MIN_BARS: usize = 2;
pub const SHORT_MA_PERIOD: usize = 5;
pub const LONG_MA_PERIOD: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IndicatorSet {
    pub current_price: f64,
    pub prev_price: f64,
    pub change_pct: f64,
    pub ma5: f64,
    pub ma20: f64,
}

impl IndicatorSet {
    pub fn compute(series: &PriceSeries) -> Result<Self, SkipReason> {
        if series.len() < MIN_BARS {
            return Err(SkipReason::InsufficientData { rows: series.len() });
        }

        let closes = series.closes();
        let n = closes.len();
        let current_price = closes[n - 1];
        let prev_price = closes[n - 2];

        // Non-empty here, so the means are always defined.
        let ma5 = sma::trailing_mean(&closes, SHORT_MA_PERIOD).unwrap_or(current_price);
        let ma20 = sma::trailing_mean(&closes, LONG_MA_PERIOD).unwrap_or(current_price);

        Ok(Self {
            current_price,
            prev_price,
            change_pct: roc::percent_change(prev_price, current_price),
            ma5,
            ma20,
        })
    }

    /// Display copy with every value rounded to 2 decimals.
    ///
    /// Never score from this; scoring must see the raw values.
    pub fn rounded(&self) -> Self {
        Self {
            current_price: round2(self.current_price),
            prev_price: round2(self.prev_price),
            change_pct: round2(self.change_pct),
            ma5: round2(self.ma5),
            ma20: round2(self.ma20),
        }
    }
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
