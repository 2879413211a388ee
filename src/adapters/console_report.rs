//! Plain-text terminal report.
//!
//! Layout:
//! - header with the lookback window and date range
//! - ranked table (name, ticker, price, 1-day %, MA5, MA20, score)
//! - one detail card per ranked symbol
//! - scoring criteria and disclaimer
//!
//! An empty screen renders only the error line.

use crate::domain::error::TrendrankError;
use crate::domain::ranking::{Ranking, ScoredRecord};
use crate::domain::score::RULES;
use crate::domain::screen::ScreenOutcome;
use crate::ports::report_port::{ReportOptions, ReportPort};
use std::io::Write;

pub const EMPTY_MESSAGE: &str =
    "error: could not load price data for any symbol. Please try again later.";

const HEADERS: [&str; 7] = ["Name", "Ticker", "Price", "1D %", "MA5", "MA20", "Score"];

#[derive(Debug, Default)]
pub struct ConsoleReport;

impl ConsoleReport {
    pub fn new() -> Self {
        Self
    }
}

impl ReportPort for ConsoleReport {
    fn render(
        &self,
        outcome: &ScreenOutcome,
        options: &ReportOptions,
        out: &mut dyn Write,
    ) -> Result<(), TrendrankError> {
        let ranking = match &outcome.ranking {
            Ok(ranking) => ranking,
            Err(_) => {
                writeln!(out, "{}", EMPTY_MESSAGE)?;
                return Ok(());
            }
        };

        let (start, end) = outcome.request.date_range();
        writeln!(out, "=== Top {} Momentum Picks ===", ranking.len())?;
        writeln!(
            out,
            "Lookback: {} days ({} to {}), {} of {} symbols ranked",
            outcome.request.window.days(),
            start,
            end,
            ranking.candidates(),
            ranking.candidates() + outcome.skipped.len(),
        )?;
        writeln!(out)?;

        write_table(out, ranking)?;

        for record in ranking.records() {
            writeln!(out)?;
            write_card(out, record, &options.currency)?;
        }

        writeln!(out)?;
        writeln!(out, "Scoring criteria:")?;
        for rule in RULES.iter() {
            writeln!(out, "  +{}  {}", rule.points, rule.description)?;
        }
        writeln!(
            out,
            "Higher scores mean a stronger recent trend. For learning purposes only, not investment advice."
        )?;
        Ok(())
    }
}

fn table_row(record: &ScoredRecord) -> [String; 7] {
    let ind = &record.indicators;
    [
        record.symbol.name.clone(),
        record.symbol.ticker.clone(),
        format!("{:.2}", ind.current_price),
        format!("{:.2}", ind.change_pct),
        format!("{:.2}", ind.ma5),
        format!("{:.2}", ind.ma20),
        record.score.to_string(),
    ]
}

fn write_table(out: &mut dyn Write, ranking: &Ranking) -> std::io::Result<()> {
    let rows: Vec<[String; 7]> = ranking.records().iter().map(table_row).collect();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row.iter()) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let line = |cells: &[String]| -> String {
        cells
            .iter()
            .enumerate()
            .map(|(i, cell)| {
                // Text columns left-aligned, numbers right-aligned.
                if i < 2 {
                    format!("{:<w$}", cell, w = widths[i])
                } else {
                    format!("{:>w$}", cell, w = widths[i])
                }
            })
            .collect::<Vec<_>>()
            .join("  ")
    };

    let header: Vec<String> = HEADERS.iter().map(|h| h.to_string()).collect();
    writeln!(out, "{}", line(&header).trim_end())?;
    let rule_len: usize = widths.iter().sum::<usize>() + 2 * (widths.len() - 1);
    writeln!(out, "{}", "-".repeat(rule_len))?;
    for row in &rows {
        writeln!(out, "{}", line(row).trim_end())?;
    }
    Ok(())
}

fn write_card(out: &mut dyn Write, record: &ScoredRecord, currency: &str) -> std::io::Result<()> {
    writeln!(out, "--- {} ({}) ---", record.symbol.name, record.symbol.ticker)?;
    writeln!(
        out,
        "  Current price: {:.2} {}",
        record.indicators.current_price, currency
    )?;
    writeln!(out, "  1-day change:  {:.2} %", record.indicators.change_pct)?;
    writeln!(out, "  Score:         {}", record.score)?;
    Ok(())
}
