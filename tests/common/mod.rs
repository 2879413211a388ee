#![allow(dead_code)]

use chrono::{Duration, NaiveDate};
use std::cell::RefCell;
use std::collections::HashMap;
use trendrank::domain::error::TrendrankError;
pub use trendrank::domain::ohlcv::OhlcvBar;
use trendrank::ports::data_port::DataPort;

pub struct MockDataPort {
    pub data: HashMap<String, Vec<OhlcvBar>>,
    pub errors: HashMap<String, String>,
    pub requests: RefCell<Vec<(String, NaiveDate, NaiveDate)>>,
}

impl MockDataPort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
            requests: RefCell::new(Vec::new()),
        }
    }

    pub fn with_closes(mut self, ticker: &str, closes: &[f64]) -> Self {
        self.data.insert(ticker.to_string(), bars_from_closes(closes));
        self
    }

    pub fn with_error(mut self, ticker: &str, reason: &str) -> Self {
        self.errors.insert(ticker.to_string(), reason.to_string());
        self
    }

    pub fn requested_tickers(&self) -> Vec<String> {
        self.requests.borrow().iter().map(|r| r.0.clone()).collect()
    }
}

impl DataPort for MockDataPort {
    fn fetch_ohlcv(
        &self,
        ticker: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<OhlcvBar>, TrendrankError> {
        self.requests
            .borrow_mut()
            .push((ticker.to_string(), start_date, end_date));
        if let Some(reason) = self.errors.get(ticker) {
            return Err(TrendrankError::provider(ticker, reason.clone()));
        }
        Ok(self.data.get(ticker).cloned().unwrap_or_default())
    }

    fn source_name(&self) -> &str {
        "mock"
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// One bar per calendar day starting 2024-01-01.
pub fn bars_from_closes(closes: &[f64]) -> Vec<OhlcvBar> {
    let start = date(2024, 1, 1);
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| OhlcvBar::from_close(start + Duration::days(i as i64), close))
        .collect()
}

/// 25 closes: first 20 at 95, last 5 averaging 120 and rising at the end.
///
/// ma5 = 120, ma20 = (15 * 95 + 5 * 120) / 20 = 101.25.
pub fn uptrend_closes() -> Vec<f64> {
    let mut closes = vec![95.0; 20];
    closes.extend([116.0, 118.0, 120.0, 122.0, 124.0]);
    closes
}

/// Falling series: negative last change and ma5 below ma20.
pub fn downtrend_closes() -> Vec<f64> {
    (0..25).map(|i| 200.0 - i as f64).collect()
}
