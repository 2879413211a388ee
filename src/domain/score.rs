//! Momentum score: the sum of independent binary trend signals.
//!
//! | Rule            | Condition          | Points |
//! |-----------------|--------------------|--------|
//! | Positive day    | `change_pct > 0`   | 3      |
//! | Short over long | `ma5 > ma20`       | 4      |
//!
//! Comparisons are strict and run on unrounded values, so a score is one of
//! {0, 3, 4, 7}. The score orders the ranking; it is not a trading signal.

use crate::domain::indicator::IndicatorSet;
use serde::Serialize;
use std::fmt;

pub const POSITIVE_CHANGE_POINTS: u8 = 3;
pub const MA_CROSS_POINTS: u8 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Score(u8);

impl Score {
    pub const MAX: Score = Score(POSITIVE_CHANGE_POINTS + MA_CROSS_POINTS);

    pub fn value(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoreRule {
    pub points: u8,
    pub description: &'static str,
}

pub const RULES: [ScoreRule; 2] = [
    ScoreRule {
        points: POSITIVE_CHANGE_POINTS,
        description: "1-day return is positive",
    },
    ScoreRule {
        points: MA_CROSS_POINTS,
        description: "5-day moving average is above the 20-day moving average",
    },
];

pub fn score(indicators: &IndicatorSet) -> Score {
    let mut points = 0;
    if indicators.change_pct > 0.0 {
        points += POSITIVE_CHANGE_POINTS;
    }
    if indicators.ma5 > indicators.ma20 {
        points += MA_CROSS_POINTS;
    }
    Score(points)
}
