//! Configuration validation.
//!
//! Validates every config field before a screen runs. All keys are optional;
//! only values that are present are checked.

use crate::domain::error::TrendrankError;
use crate::domain::lookback::{LookbackWindow, MAX_LOOKBACK_DAYS, MIN_LOOKBACK_DAYS};
use crate::domain::universe::parse_universe;
use crate::ports::config_port::ConfigPort;

pub const PROVIDER_SOURCES: [&str; 2] = ["yahoo", "csv"];

pub fn validate_screen_config(config: &dyn ConfigPort) -> Result<(), TrendrankError> {
    validate_lookback(config)?;
    validate_top_n(config)?;
    validate_currency(config)?;
    validate_universe(config)?;
    validate_provider(config)?;
    Ok(())
}

fn invalid(section: &str, key: &str, reason: impl Into<String>) -> TrendrankError {
    TrendrankError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason: reason.into(),
    }
}

fn validate_lookback(config: &dyn ConfigPort) -> Result<(), TrendrankError> {
    let Some(raw) = config.get_string("screen", "lookback_days") else {
        return Ok(());
    };
    let days: i64 = raw
        .trim()
        .parse()
        .map_err(|_| invalid("screen", "lookback_days", "lookback_days must be an integer"))?;
    LookbackWindow::new(days).map_err(|_| {
        invalid(
            "screen",
            "lookback_days",
            format!(
                "lookback_days must be between {} and {}",
                MIN_LOOKBACK_DAYS, MAX_LOOKBACK_DAYS
            ),
        )
    })?;
    Ok(())
}

fn validate_top_n(config: &dyn ConfigPort) -> Result<(), TrendrankError> {
    let Some(raw) = config.get_string("screen", "top_n") else {
        return Ok(());
    };
    match raw.trim().parse::<i64>() {
        Ok(n) if n >= 1 => Ok(()),
        _ => Err(invalid("screen", "top_n", "top_n must be a positive integer")),
    }
}

fn validate_currency(config: &dyn ConfigPort) -> Result<(), TrendrankError> {
    match config.get_string("screen", "currency") {
        Some(s) if s.trim().is_empty() => {
            Err(invalid("screen", "currency", "currency must not be empty"))
        }
        _ => Ok(()),
    }
}

fn validate_universe(config: &dyn ConfigPort) -> Result<(), TrendrankError> {
    if let Some(symbols) = config.get_string("universe", "symbols") {
        parse_universe(&symbols)?;
    }
    Ok(())
}

fn validate_provider(config: &dyn ConfigPort) -> Result<(), TrendrankError> {
    let source = config
        .get_string("provider", "source")
        .map(|s| s.trim().to_lowercase())
        .unwrap_or_else(|| "yahoo".to_string());

    if !PROVIDER_SOURCES.contains(&source.as_str()) {
        return Err(invalid(
            "provider",
            "source",
            format!("unknown source '{}' (expected yahoo or csv)", source),
        ));
    }

    if source == "csv" {
        match config.get_string("provider", "data_dir") {
            Some(s) if !s.trim().is_empty() => {}
            _ => {
                return Err(TrendrankError::ConfigMissing {
                    section: "provider".to_string(),
                    key: "data_dir".to_string(),
                })
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::file_config_adapter::FileConfigAdapter;
    use crate::domain::universe::UniverseError;

    fn validate(ini: &str) -> Result<(), TrendrankError> {
        let adapter = FileConfigAdapter::from_string(ini).unwrap();
        validate_screen_config(&adapter)
    }

    fn invalid_key(result: Result<(), TrendrankError>) -> String {
        match result {
            Err(TrendrankError::ConfigInvalid { key, .. }) => key,
            other => panic!("expected ConfigInvalid, got {:?}", other),
        }
    }

    #[test]
    fn empty_config_is_valid() {
        assert!(validate("").is_ok());
    }

    #[test]
    fn full_config_is_valid() {
        let ini = r#"
[screen]
lookback_days = 120
top_n = 3
currency = USD

[universe]
symbols = Apple:AAPL, Microsoft:MSFT

[provider]
source = csv
data_dir = /tmp/prices
"#;
        assert!(validate(ini).is_ok());
    }

    #[test]
    fn lookback_out_of_range() {
        assert_eq!(invalid_key(validate("[screen]\nlookback_days = 20\n")), "lookback_days");
        assert_eq!(invalid_key(validate("[screen]\nlookback_days = 181\n")), "lookback_days");
    }

    #[test]
    fn lookback_not_a_number() {
        assert_eq!(invalid_key(validate("[screen]\nlookback_days = ninety\n")), "lookback_days");
    }

    #[test]
    fn top_n_must_be_positive() {
        assert_eq!(invalid_key(validate("[screen]\ntop_n = 0\n")), "top_n");
        assert_eq!(invalid_key(validate("[screen]\ntop_n = -2\n")), "top_n");
    }

    #[test]
    fn bad_universe() {
        let err = validate("[universe]\nsymbols = Apple:AAPL,,MSFT\n").unwrap_err();
        assert!(matches!(err, TrendrankError::Universe(UniverseError::EmptyToken)));
    }

    #[test]
    fn unknown_source() {
        assert_eq!(invalid_key(validate("[provider]\nsource = bloomberg\n")), "source");
    }

    #[test]
    fn csv_source_requires_data_dir() {
        let err = validate("[provider]\nsource = csv\n").unwrap_err();
        assert!(matches!(err, TrendrankError::ConfigMissing { key, .. } if key == "data_dir"));
    }
}
