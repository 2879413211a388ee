//! Core domain types and logic.

pub mod ohlcv;
pub mod universe;
pub mod lookback;
pub mod indicator;
pub mod score;
pub mod ranking;
pub mod screen;
pub mod config_validation;
pub mod error;
