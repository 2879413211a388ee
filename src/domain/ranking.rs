//! Scored records and the top-N ranking built from them.

use crate::domain::error::TrendrankError;
use crate::domain::indicator::IndicatorSet;
use crate::domain::score::{score, Score};
use crate::domain::universe::Symbol;
use serde::Serialize;

pub const DEFAULT_TOP_N: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredRecord {
    pub symbol: Symbol,
    /// Rounded to 2 decimals.
    pub indicators: IndicatorSet,
    pub score: Score,
}

impl ScoredRecord {
    /// Scores the raw indicators, then stores their rounded display copy.
    pub fn new(symbol: Symbol, raw: &IndicatorSet) -> Self {
        let score = score(raw);
        Self {
            symbol,
            indicators: raw.rounded(),
            score,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ranking {
    records: Vec<ScoredRecord>,
    candidates: usize,
}

impl Ranking {
    pub fn records(&self) -> &[ScoredRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of records that were ranked before truncation.
    pub fn candidates(&self) -> usize {
        self.candidates
    }
}

/// Sorts by score descending and keeps the first `top_n`.
///
/// The sort is stable: equal scores stay in arrival order.
pub fn rank(mut records: Vec<ScoredRecord>, top_n: usize) -> Result<Ranking, TrendrankError> {
    if records.is_empty() {
        return Err(TrendrankError::EmptyResult { attempted: 0 });
    }
    let candidates = records.len();
    records.sort_by(|a, b| b.score.cmp(&a.score));
    records.truncate(top_n);
    Ok(Ranking {
        records,
        candidates,
    })
}
