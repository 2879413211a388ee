//! Screen pipeline: fetch → validate → indicators → score → rank.
//!
//! Symbols are processed one at a time in universe order. Any per-symbol
//! failure becomes a [`SkipReason`]; only the all-skipped case surfaces as
//! [`TrendrankError::EmptyResult`].

use crate::domain::error::TrendrankError;
use crate::domain::indicator::IndicatorSet;
use crate::domain::lookback::LookbackWindow;
use crate::domain::ohlcv::PriceSeries;
use crate::domain::ranking::{rank, Ranking, ScoredRecord};
use crate::domain::universe::{SkipReason, SkippedSymbol, Symbol, Universe};
use crate::ports::data_port::DataPort;
use chrono::NaiveDate;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenRequest {
    pub window: LookbackWindow,
    pub end_date: NaiveDate,
    pub top_n: usize,
}

impl ScreenRequest {
    pub fn date_range(&self) -> (NaiveDate, NaiveDate) {
        self.window.date_range(self.end_date)
    }
}

#[derive(Debug)]
pub struct ScreenOutcome {
    pub request: ScreenRequest,
    pub ranking: Result<Ranking, TrendrankError>,
    pub skipped: Vec<SkippedSymbol>,
}

/// Fetches, validates and scores a single symbol.
pub fn evaluate_symbol(
    data_port: &dyn DataPort,
    symbol: &Symbol,
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> Result<ScoredRecord, SkipReason> {
    let bars = data_port
        .fetch_ohlcv(&symbol.ticker, start_date, end_date)
        .map_err(|e| SkipReason::FetchFailed {
            reason: e.to_string(),
        })?;
    let series = PriceSeries::new(symbol.ticker.clone(), bars);
    let indicators = IndicatorSet::compute(&series)?;
    debug!(
        ticker = %symbol.ticker,
        rows = series.len(),
        last_date = ?series.last_date(),
        change_pct = indicators.change_pct,
        ma5 = indicators.ma5,
        ma20 = indicators.ma20,
        "computed indicators"
    );
    Ok(ScoredRecord::new(symbol.clone(), &indicators))
}

pub fn run_screen(
    data_port: &dyn DataPort,
    universe: &Universe,
    request: ScreenRequest,
) -> ScreenOutcome {
    let (start_date, end_date) = request.date_range();
    info!(
        source = data_port.source_name(),
        symbols = universe.count(),
        %start_date,
        %end_date,
        "screening {} symbols over {} days",
        universe.count(),
        request.window.days()
    );

    let mut records = Vec::with_capacity(universe.count());
    let mut skipped = Vec::new();

    for symbol in universe.iter() {
        match evaluate_symbol(data_port, symbol, start_date, end_date) {
            Ok(record) => {
                info!("  {} ({}): score {}", symbol.name, symbol.ticker, record.score);
                records.push(record);
            }
            Err(reason) => {
                warn!("skipping {} ({}): {}", symbol.name, symbol.ticker, reason);
                skipped.push(SkippedSymbol {
                    symbol: symbol.clone(),
                    reason,
                });
            }
        }
    }

    let ranking = rank(records, request.top_n).map_err(|e| match e {
        TrendrankError::EmptyResult { .. } => TrendrankError::EmptyResult {
            attempted: universe.count(),
        },
        other => other,
    });

    if !skipped.is_empty() {
        info!(
            "ranked {} of {} symbols",
            universe.count() - skipped.len(),
            universe.count()
        );
    }

    ScreenOutcome {
        request,
        ranking,
        skipped,
    }
}
