//! CLI definition and dispatch.

use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand, ValueEnum};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::info;

use crate::adapters::console_report::ConsoleReport;
use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::json_report::JsonReport;
use crate::adapters::yahoo_adapter::YahooAdapter;
use crate::domain::config_validation::validate_screen_config;
use crate::domain::error::TrendrankError;
use crate::domain::lookback::{LookbackWindow, DEFAULT_LOOKBACK_DAYS};
use crate::domain::ranking::DEFAULT_TOP_N;
use crate::domain::score::RULES;
use crate::domain::screen::{run_screen, ScreenRequest};
use crate::domain::universe::{parse_universe, Universe};
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;
use crate::ports::report_port::{ReportOptions, ReportPort};

pub const DEFAULT_CURRENCY: &str = "KRW";

#[derive(Parser, Debug)]
#[command(name = "trendrank", about = "Rank equities by a simple momentum score")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fetch prices, score every symbol and print the top picks
    Rank {
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Days of history to request (30-180)
        #[arg(short, long, value_parser = clap::value_parser!(u32).range(30..=180))]
        lookback_days: Option<u32>,
        /// Number of symbols to show
        #[arg(short = 'n', long, value_parser = clap::value_parser!(u32).range(1..))]
        top: Option<u32>,
        /// Read prices from {DIR}/{TICKER}.csv instead of the network
        #[arg(long)]
        data_dir: Option<PathBuf>,
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
    /// List the configured symbols in ranking order
    Symbols {
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Show how the score is computed
    Criteria,
}

/// Command-line values that take precedence over the config file.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub lookback_days: Option<u32>,
    pub top: Option<u32>,
    pub data_dir: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct ScreenSettings {
    pub window: LookbackWindow,
    pub top_n: usize,
    pub currency: String,
    pub universe: Universe,
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Rank {
            config,
            lookback_days,
            top,
            data_dir,
            format,
        } => run_rank(
            config.as_deref(),
            Overrides {
                lookback_days,
                top,
                data_dir,
            },
            format,
        ),
        Command::Symbols { config } => run_symbols(config.as_deref()),
        Command::Criteria => run_criteria(),
    }
}

pub fn load_config(path: Option<&Path>) -> Result<FileConfigAdapter, ExitCode> {
    let Some(path) = path else {
        return Ok(FileConfigAdapter::empty());
    };
    info!("Loading config from {}", path.display());
    let adapter = FileConfigAdapter::from_file(path).map_err(|e| {
        eprintln!("error: {e}");
        ExitCode::from(&e)
    })?;
    validate_screen_config(&adapter).map_err(|e| {
        eprintln!("error: {e}");
        ExitCode::from(&e)
    })?;
    Ok(adapter)
}

pub fn build_universe(config: &dyn ConfigPort) -> Result<Universe, TrendrankError> {
    match config.get_string("universe", "symbols") {
        Some(symbols) => Ok(parse_universe(&symbols)?),
        None => Ok(Universe::reference()),
    }
}

pub fn build_screen_settings(
    config: &dyn ConfigPort,
    overrides: &Overrides,
) -> Result<ScreenSettings, TrendrankError> {
    let days = match overrides.lookback_days {
        Some(d) => d as i64,
        None => config.get_int("screen", "lookback_days", DEFAULT_LOOKBACK_DAYS as i64),
    };
    let window = LookbackWindow::new(days).map_err(|e| TrendrankError::ConfigInvalid {
        section: "screen".into(),
        key: "lookback_days".into(),
        reason: e.to_string(),
    })?;

    let top_n = match overrides.top {
        Some(n) => n as i64,
        None => config.get_int("screen", "top_n", DEFAULT_TOP_N as i64),
    };
    if top_n < 1 {
        return Err(TrendrankError::ConfigInvalid {
            section: "screen".into(),
            key: "top_n".into(),
            reason: "top_n must be a positive integer".into(),
        });
    }

    let currency = config
        .get_string("screen", "currency")
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| DEFAULT_CURRENCY.to_string());

    Ok(ScreenSettings {
        window,
        top_n: top_n as usize,
        currency,
        universe: build_universe(config)?,
    })
}

/// Picks the price source: `--data-dir` wins, then `[provider] source`.
pub fn build_data_port(
    config: &dyn ConfigPort,
    overrides: &Overrides,
) -> Result<Box<dyn DataPort>, TrendrankError> {
    if let Some(dir) = &overrides.data_dir {
        return Ok(Box::new(CsvAdapter::new(dir.clone())));
    }

    let source = config
        .get_string("provider", "source")
        .map(|s| s.to_lowercase())
        .unwrap_or_else(|| "yahoo".to_string());

    match source.as_str() {
        "csv" => {
            let dir = config.get_string("provider", "data_dir").ok_or_else(|| {
                TrendrankError::ConfigMissing {
                    section: "provider".into(),
                    key: "data_dir".into(),
                }
            })?;
            Ok(Box::new(CsvAdapter::new(PathBuf::from(dir))))
        }
        "yahoo" => Ok(Box::new(YahooAdapter::from_config(config)?)),
        other => Err(TrendrankError::ConfigInvalid {
            section: "provider".into(),
            key: "source".into(),
            reason: format!("unknown source '{}'", other),
        }),
    }
}

fn run_rank(config_path: Option<&Path>, overrides: Overrides, format: OutputFormat) -> ExitCode {
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    let settings = match build_screen_settings(&config, &overrides) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let data_port = match build_data_port(&config, &overrides) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let report: Box<dyn ReportPort> = match format {
        OutputFormat::Table => Box::new(ConsoleReport::new()),
        OutputFormat::Json => Box::new(JsonReport::new(true)),
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    run_rank_pipeline(
        data_port.as_ref(),
        &settings,
        Local::now().date_naive(),
        report.as_ref(),
        &mut out,
    )
}

/// Runs one screen and renders it. An empty screen still exits 0.
pub fn run_rank_pipeline(
    data_port: &dyn DataPort,
    settings: &ScreenSettings,
    end_date: NaiveDate,
    report: &dyn ReportPort,
    out: &mut dyn Write,
) -> ExitCode {
    let request = ScreenRequest {
        window: settings.window,
        end_date,
        top_n: settings.top_n,
    };
    let outcome = run_screen(data_port, &settings.universe, request);

    let options = ReportOptions {
        currency: settings.currency.clone(),
    };
    if let Err(e) = report.render(&outcome, &options, out) {
        eprintln!("error: failed to write report: {e}");
        return (&e).into();
    }
    ExitCode::SUCCESS
}

fn run_symbols(config_path: Option<&Path>) -> ExitCode {
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };
    let universe = match build_universe(&config) {
        Ok(u) => u,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for (i, symbol) in universe.iter().enumerate() {
        if let Err(e) = writeln!(out, "{:>2}. {} ({})", i + 1, symbol.name, symbol.ticker) {
            eprintln!("error: {e}");
            return ExitCode::from(1);
        }
    }
    eprintln!("{} symbols configured", universe.count());
    ExitCode::SUCCESS
}

fn run_criteria() -> ExitCode {
    println!("Score = sum of the rules that hold (max 7):");
    for rule in RULES.iter() {
        println!("  +{}  {}", rule.points, rule.description);
    }
    ExitCode::SUCCESS
}
