//! Trailing simple moving average.
//!
//! SMA(n) = mean of the last min(n, len) closes.
//! Short series average over everything available instead of producing a warmup gap.

pub fn trailing_mean(closes: &[f64], period: usize) -> Option<f64> {
    if closes.is_empty() || period == 0 {
        return None;
    }
    let window = &closes[closes.len().saturating_sub(period)..];
    Some(window.iter().sum::<f64>() / window.len() as f64)
}
