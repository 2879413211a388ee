//! Report rendering port trait.

use crate::domain::error::TrendrankError;
use crate::domain::screen::ScreenOutcome;
use std::io::Write;

/// Presentation settings that are not part of the screen result itself.
#[derive(Debug, Clone)]
pub struct ReportOptions {
    pub currency: String,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            currency: "KRW".to_string(),
        }
    }
}

/// Port for rendering a screen outcome.
pub trait ReportPort {
    /// Renders the ranking and its detail cards.
    fn render(
        &self,
        outcome: &ScreenOutcome,
        options: &ReportOptions,
        out: &mut dyn Write,
    ) -> Result<(), TrendrankError>;
}
