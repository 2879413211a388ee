//! One-period rate of change.
//!
//! ROC = ((current - previous) / previous) * 100
//! If previous == 0: ROC = 0

pub fn percent_change(previous: f64, current: f64) -> f64 {
    if previous == 0.0 {
        0.0
    } else {
        (current - previous) / previous * 100.0
    }
}
