//! JSON report for scripting; the same content as the console report.

use crate::domain::error::TrendrankError;
use crate::domain::ranking::ScoredRecord;
use crate::domain::score::{ScoreRule, RULES};
use crate::domain::screen::ScreenOutcome;
use crate::domain::universe::SkippedSymbol;
use crate::ports::report_port::{ReportOptions, ReportPort};
use chrono::NaiveDate;
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
struct JsonReportBody<'a> {
    lookback_days: u32,
    start_date: NaiveDate,
    end_date: NaiveDate,
    currency: &'a str,
    candidates: usize,
    ranking: &'a [ScoredRecord],
    skipped: &'a [SkippedSymbol],
    criteria: &'a [ScoreRule],
}

#[derive(Serialize)]
struct JsonError<'a> {
    error: String,
    skipped: &'a [SkippedSymbol],
}

#[derive(Debug, Default)]
pub struct JsonReport {
    pretty: bool,
}

impl JsonReport {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    fn write_json<T: Serialize>(&self, out: &mut dyn Write, value: &T) -> Result<(), TrendrankError> {
        let result = if self.pretty {
            serde_json::to_writer_pretty(&mut *out, value)
        } else {
            serde_json::to_writer(&mut *out, value)
        };
        result.map_err(|e| TrendrankError::Io(e.into()))?;
        writeln!(out)?;
        Ok(())
    }
}

impl ReportPort for JsonReport {
    fn render(
        &self,
        outcome: &ScreenOutcome,
        options: &ReportOptions,
        out: &mut dyn Write,
    ) -> Result<(), TrendrankError> {
        match &outcome.ranking {
            Ok(ranking) => {
                let (start_date, end_date) = outcome.request.date_range();
                self.write_json(
                    out,
                    &JsonReportBody {
                        lookback_days: outcome.request.window.days(),
                        start_date,
                        end_date,
                        currency: &options.currency,
                        candidates: ranking.candidates(),
                        ranking: ranking.records(),
                        skipped: &outcome.skipped,
                        criteria: &RULES,
                    },
                )
            }
            Err(e) => self.write_json(
                out,
                &JsonError {
                    error: e.to_string(),
                    skipped: &outcome.skipped,
                },
            ),
        }
    }
}
