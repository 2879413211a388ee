//! Screening universe: the ordered list of symbols evaluated on every run.
//!
//! Declaration order matters. It is the processing order of the pipeline and
//! the tie-break order of the ranking, so the universe is kept as an ordered
//! list of pairs rather than a map.

use serde::Serialize;
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Symbol {
    pub name: String,
    pub ticker: String,
}

impl Symbol {
    pub fn new(name: impl Into<String>, ticker: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ticker: ticker.into(),
        }
    }
}

/// Reference universe: a handful of KOSPI 200 constituents (Yahoo tickers).
const DEFAULT_SYMBOLS: [(&str, &str); 6] = [
    ("Samsung Electronics", "005930.KS"),
    ("NAVER", "035420.KS"),
    ("Kakao", "035720.KS"),
    ("Hyundai Motor", "005380.KS"),
    ("Samsung C&T", "028260.KS"),
    ("LG Chem", "051910.KS"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Universe {
    symbols: Vec<Symbol>,
}

impl Universe {
    pub fn reference() -> Self {
        Self {
            symbols: DEFAULT_SYMBOLS
                .iter()
                .map(|(name, ticker)| Symbol::new(*name, *ticker))
                .collect(),
        }
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    pub fn count(&self) -> usize {
        self.symbols.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Symbol> {
        self.symbols.iter()
    }
}

impl Default for Universe {
    fn default() -> Self {
        Self::reference()
    }
}

/// Why a symbol was left out of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SkipReason {
    FetchFailed { reason: String },
    InsufficientData { rows: usize },
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::FetchFailed { reason } => write!(f, "fetch failed: {}", reason),
            SkipReason::InsufficientData { rows } => {
                write!(f, "insufficient data: {} rows", rows)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedSymbol {
    pub symbol: Symbol,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UniverseError {
    #[error("empty token in symbol list")]
    EmptyToken,

    #[error("malformed symbol entry '{0}' (expected Name:TICKER)")]
    Malformed(String),

    #[error("duplicate ticker: {0}")]
    DuplicateTicker(String),
}

/// Parses `Name:TICKER, Name:TICKER, ...` into an ordered universe.
///
/// The ticker is taken after the last `:` so display names may contain colons.
/// Tickers are upper-cased; names are kept as written.
pub fn parse_universe(input: &str) -> Result<Universe, UniverseError> {
    let mut symbols = Vec::new();
    let mut seen = HashSet::new();

    for token in input.split(',') {
        let trimmed = token.trim();
        if trimmed.is_empty() {
            return Err(UniverseError::EmptyToken);
        }
        let (name, ticker) = trimmed
            .rsplit_once(':')
            .ok_or_else(|| UniverseError::Malformed(trimmed.to_string()))?;
        let name = name.trim();
        let ticker = ticker.trim().to_uppercase();
        if name.is_empty() || ticker.is_empty() {
            return Err(UniverseError::Malformed(trimmed.to_string()));
        }
        if !seen.insert(ticker.clone()) {
            return Err(UniverseError::DuplicateTicker(ticker));
        }
        symbols.push(Symbol::new(name, ticker));
    }

    Ok(Universe { symbols })
}
