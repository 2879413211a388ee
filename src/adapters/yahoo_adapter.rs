//! Yahoo Finance chart API adapter.
//!
//! Issues one blocking `GET /v8/finance/chart/{ticker}` per call with a daily
//! interval. No caching, no retries; the HTTP client's default timeout applies.

use crate::domain::error::TrendrankError;
use crate::domain::ohlcv::OhlcvBar;
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;
use chrono::{DateTime, Duration, NaiveDate, NaiveTime};
use reqwest::StatusCode;
use reqwest::blocking::Client;
use serde::Deserialize;
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com";
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: Chart,
}

#[derive(Debug, Deserialize)]
struct Chart {
    result: Option<Vec<ChartResult>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    meta: Option<ChartMeta>,
    timestamp: Option<Vec<i64>>,
    indicators: ChartIndicators,
}

#[derive(Debug, Deserialize)]
struct ChartMeta {
    #[serde(rename = "gmtoffset", default)]
    gmt_offset: i64,
}

#[derive(Debug, Deserialize)]
struct ChartIndicators {
    quote: Vec<ChartQuote>,
    #[serde(rename = "adjclose")]
    adj_close: Option<Vec<ChartAdjClose>>,
}

#[derive(Debug, Deserialize)]
struct ChartQuote {
    open: Option<Vec<Option<f64>>>,
    high: Option<Vec<Option<f64>>>,
    low: Option<Vec<Option<f64>>>,
    close: Option<Vec<Option<f64>>>,
    volume: Option<Vec<Option<i64>>>,
}

#[derive(Debug, Deserialize)]
struct ChartAdjClose {
    #[serde(rename = "adjclose")]
    adj_close: Option<Vec<Option<f64>>>,
}

pub struct YahooAdapter {
    client: Client,
    base_url: String,
}

impl YahooAdapter {
    pub fn new(base_url: &str, user_agent: &str) -> Result<Self, TrendrankError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .build()
            .map_err(|e| TrendrankError::ConfigInvalid {
                section: "provider".into(),
                key: "user_agent".into(),
                reason: e.to_string(),
            })?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &dyn ConfigPort) -> Result<Self, TrendrankError> {
        let base_url = config
            .get_string("provider", "base_url")
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let user_agent = config
            .get_string("provider", "user_agent")
            .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string());
        Self::new(&base_url, &user_agent)
    }

    /// `period2` is midnight UTC after `end_date`, so the end date's session
    /// is requested whatever time of day the exchange stamps it.
    fn chart_url(&self, ticker: &str, start_date: NaiveDate, end_date: NaiveDate) -> String {
        let period1 = start_date.and_time(NaiveTime::MIN).and_utc().timestamp();
        let period2 = (end_date + Duration::days(1))
            .and_time(NaiveTime::MIN)
            .and_utc()
            .timestamp();
        format!(
            "{}/v8/finance/chart/{}?period1={}&period2={}&interval=1d&events=history",
            self.base_url, ticker, period1, period2
        )
    }
}

impl DataPort for YahooAdapter {
    fn fetch_ohlcv(
        &self,
        ticker: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<OhlcvBar>, TrendrankError> {
        let url = self.chart_url(ticker, start_date, end_date);
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| TrendrankError::provider(ticker, format!("request failed: {}", e)))?;
        let status = response.status();
        let body = response
            .text()
            .map_err(|e| TrendrankError::provider(ticker, format!("failed to read body: {}", e)))?;
        debug!(ticker, %status, bytes = body.len(), "chart response");

        if !status.is_success() {
            return Err(status_error(ticker, status, &body));
        }

        let bars = parse_chart(ticker, &body)?;
        Ok(within_range(bars, start_date, end_date))
    }

    fn source_name(&self) -> &str {
        "yahoo"
    }
}

/// Error for a non-2xx response. The API usually explains itself in a
/// `chart.error` payload; otherwise the status line is reported.
pub fn status_error(ticker: &str, status: StatusCode, body: &str) -> TrendrankError {
    match parse_chart(ticker, body) {
        Err(e @ TrendrankError::Provider { .. }) if body.contains("\"error\"") => e,
        _ => TrendrankError::provider(ticker, format!("HTTP {}", status)),
    }
}

/// Keeps bars dated within `[start_date, end_date]`, both ends inclusive.
fn within_range(
    mut bars: Vec<OhlcvBar>,
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> Vec<OhlcvBar> {
    bars.retain(|b| b.date >= start_date && b.date <= end_date);
    bars
}

/// Parses a chart API body into date-ordered bars.
///
/// Close comes from the adjusted-close column when the response carries one
/// with any values, else from the raw close; columns are never mixed. Rows without a finite close are dropped;
/// missing open/high/low fall back to the close.
pub fn parse_chart(ticker: &str, body: &str) -> Result<Vec<OhlcvBar>, TrendrankError> {
    let response: ChartResponse = serde_json::from_str(body)
        .map_err(|e| TrendrankError::provider(ticker, format!("malformed response: {}", e)))?;

    if let Some(error) = response.chart.error {
        return Err(TrendrankError::provider(
            ticker,
            format!("{}: {}", error.code, error.description),
        ));
    }

    let Some(result) = response.chart.result.and_then(|r| r.into_iter().next()) else {
        return Ok(Vec::new());
    };

    let gmt_offset = result.meta.map(|m| m.gmt_offset).unwrap_or(0);
    let timestamps = result.timestamp.unwrap_or_default();
    let Some(quote) = result.indicators.quote.into_iter().next() else {
        return Ok(Vec::new());
    };
    let adj_closes = result
        .indicators
        .adj_close
        .and_then(|ac| ac.into_iter().next())
        .and_then(|ac| ac.adj_close)
        .filter(|ac| ac.iter().any(Option::is_some));

    let opens = quote.open.unwrap_or_default();
    let highs = quote.high.unwrap_or_default();
    let lows = quote.low.unwrap_or_default();
    let closes = adj_closes.or(quote.close).unwrap_or_default();
    let volumes = quote.volume.unwrap_or_default();
    let at = |v: &[Option<f64>], i: usize| v.get(i).copied().flatten();

    let mut bars = Vec::with_capacity(timestamps.len());
    for (i, &ts) in timestamps.iter().enumerate() {
        let Some(close) = at(&closes, i).filter(|c| c.is_finite()) else {
            continue;
        };
        // Exchange-local calendar date.
        let Some(date) = DateTime::from_timestamp(ts + gmt_offset, 0).map(|dt| dt.date_naive())
        else {
            continue;
        };

        bars.push(OhlcvBar {
            date,
            open: at(&opens, i).unwrap_or(close),
            high: at(&highs, i).unwrap_or(close),
            low: at(&lows, i).unwrap_or(close),
            close,
            volume: volumes.get(i).copied().flatten().unwrap_or(0),
        });
    }

    bars.sort_by_key(|b| b.date);
    Ok(bars)
}
