//! Integration tests for the screen pipeline.
//!
//! Tests cover:
//! - Indicator and score scenarios through a mock data port
//! - Stable ranking in universe order and top-N truncation
//! - Per-symbol skips (fetch failure, insufficient data)
//! - Empty result when every symbol is skipped
//! - Lookback window only changing the requested date range

mod common;

use approx::assert_relative_eq;
use common::*;
use trendrank::domain::error::TrendrankError;
use trendrank::domain::lookback::LookbackWindow;
use trendrank::domain::screen::{evaluate_symbol, run_screen, ScreenRequest};
use trendrank::domain::universe::{parse_universe, SkipReason, Symbol, Universe};

fn request(days: i64) -> ScreenRequest {
    ScreenRequest {
        window: LookbackWindow::new(days).unwrap(),
        end_date: date(2024, 6, 30),
        top_n: 5,
    }
}

fn tickers(outcome: &trendrank::domain::screen::ScreenOutcome) -> Vec<String> {
    outcome
        .ranking
        .as_ref()
        .unwrap()
        .records()
        .iter()
        .map(|r| r.symbol.ticker.clone())
        .collect()
}

mod scenarios {
    use super::*;

    #[test]
    fn two_rows_positive_change_scores_three() {
        let port = MockDataPort::new().with_closes("A", &[100.0, 110.0]);
        let (start, end) = request(90).date_range();
        let record = evaluate_symbol(&port, &Symbol::new("A", "A"), start, end).unwrap();

        assert_eq!(record.indicators.prev_price, 100.0);
        assert_eq!(record.indicators.current_price, 110.0);
        assert_relative_eq!(record.indicators.change_pct, 10.0);
        assert_relative_eq!(record.indicators.ma5, 105.0);
        assert_relative_eq!(record.indicators.ma20, 105.0);
        assert_eq!(record.score.value(), 3);
    }

    #[test]
    fn uptrend_scores_seven() {
        let port = MockDataPort::new().with_closes("UP", &uptrend_closes());
        let (start, end) = request(90).date_range();
        let record = evaluate_symbol(&port, &Symbol::new("Up", "UP"), start, end).unwrap();

        assert_relative_eq!(record.indicators.ma5, 120.0);
        assert_relative_eq!(record.indicators.ma20, 101.25);
        assert!(record.indicators.change_pct > 0.0);
        assert_eq!(record.score.value(), 7);
    }

    #[test]
    fn downtrend_scores_zero() {
        let port = MockDataPort::new().with_closes("DN", &downtrend_closes());
        let (start, end) = request(90).date_range();
        let record = evaluate_symbol(&port, &Symbol::new("Down", "DN"), start, end).unwrap();
        assert_eq!(record.score.value(), 0);
    }

    #[test]
    fn zero_previous_price_is_not_an_error() {
        let port = MockDataPort::new().with_closes("Z", &[0.0, 50.0]);
        let (start, end) = request(90).date_range();
        let record = evaluate_symbol(&port, &Symbol::new("Z", "Z"), start, end).unwrap();

        assert_eq!(record.indicators.change_pct, 0.0);
        assert!(!record.indicators.change_pct.is_nan());
        // ma5 (25) > ma20 (25) is false; change is not positive
        assert_eq!(record.score.value(), 0);
    }

    #[test]
    fn all_reference_symbols_fail() {
        let universe = Universe::reference();
        let mut port = MockDataPort::new();
        for symbol in universe.iter() {
            port = port.with_error(&symbol.ticker, "connection refused");
        }

        let outcome = run_screen(&port, &universe, request(90));

        assert!(matches!(
            outcome.ranking,
            Err(TrendrankError::EmptyResult { attempted: 6 })
        ));
        assert_eq!(outcome.skipped.len(), 6);
        assert_eq!(port.requested_tickers().len(), 6);
    }

    #[test]
    fn lookback_only_changes_requested_range() {
        let universe = parse_universe("Up:UP,Flat:FLAT").unwrap();
        let make_port = || {
            MockDataPort::new()
                .with_closes("UP", &uptrend_closes())
                .with_closes("FLAT", &[10.0, 10.0, 10.0])
        };

        let short_port = make_port();
        let long_port = make_port();
        let short = run_screen(&short_port, &universe, request(30));
        let long = run_screen(&long_port, &universe, request(180));

        assert_eq!(short.ranking.as_ref().unwrap(), long.ranking.as_ref().unwrap());

        let short_req = short_port.requests.borrow();
        let long_req = long_port.requests.borrow();
        assert_eq!(short_req[0].1, date(2024, 5, 31));
        assert_eq!(long_req[0].1, date(2024, 1, 2));
        assert_eq!(short_req[0].2, date(2024, 6, 30));
        assert_eq!(long_req[0].2, date(2024, 6, 30));
    }
}

mod ranking {
    use super::*;

    #[test]
    fn equal_scores_keep_universe_order() {
        let universe = parse_universe("A:A,B:B,C:C,D:D").unwrap();
        let port = MockDataPort::new()
            .with_closes("A", &[100.0, 101.0])
            .with_closes("B", &uptrend_closes())
            .with_closes("C", &[100.0, 102.0])
            .with_closes("D", &uptrend_closes());

        let outcome = run_screen(&port, &universe, request(90));

        assert_eq!(tickers(&outcome), vec!["B", "D", "A", "C"]);
    }

    #[test]
    fn ranking_truncates_to_five() {
        let universe = parse_universe("A:A,B:B,C:C,D:D,E:E,F:F,G:G").unwrap();
        let mut port = MockDataPort::new();
        for t in ["A", "B", "C", "D", "E", "F", "G"] {
            port = port.with_closes(t, &[1.0, 2.0]);
        }

        let outcome = run_screen(&port, &universe, request(90));
        let ranking = outcome.ranking.unwrap();

        assert_eq!(ranking.len(), 5);
        assert_eq!(ranking.candidates(), 7);
    }

    #[test]
    fn ranking_length_is_survivor_count_when_below_five() {
        let universe = Universe::reference();
        let port = MockDataPort::new()
            .with_closes("005930.KS", &[100.0, 110.0])
            .with_closes("035720.KS", &downtrend_closes())
            .with_closes("051910.KS", &[100.0]);

        let outcome = run_screen(&port, &universe, request(90));

        assert_eq!(tickers(&outcome), vec!["005930.KS", "035720.KS"]);
        assert_eq!(outcome.skipped.len(), 4);
    }

    #[test]
    fn custom_top_n() {
        let universe = parse_universe("A:A,B:B,C:C").unwrap();
        let port = MockDataPort::new()
            .with_closes("A", &[1.0, 2.0])
            .with_closes("B", &[1.0, 2.0])
            .with_closes("C", &[1.0, 2.0]);
        let mut req = request(90);
        req.top_n = 2;

        let outcome = run_screen(&port, &universe, req);

        assert_eq!(tickers(&outcome), vec!["A", "B"]);
    }
}

mod skips {
    use super::*;

    #[test]
    fn skip_reasons_are_recorded_in_order() {
        let universe = parse_universe("Ok:OK,Bad:BAD,Short:SHORT,Empty:EMPTY").unwrap();
        let port = MockDataPort::new()
            .with_closes("OK", &[1.0, 2.0])
            .with_error("BAD", "HTTP 404")
            .with_closes("SHORT", &[1.0]);

        let outcome = run_screen(&port, &universe, request(90));

        let reasons: Vec<_> = outcome
            .skipped
            .iter()
            .map(|s| (s.symbol.ticker.as_str(), s.reason.clone()))
            .collect();
        assert_eq!(reasons.len(), 3);
        assert_eq!(reasons[0].0, "BAD");
        assert!(matches!(&reasons[0].1, SkipReason::FetchFailed { reason } if reason.contains("HTTP 404")));
        assert_eq!(reasons[1], ("SHORT", SkipReason::InsufficientData { rows: 1 }));
        assert_eq!(reasons[2], ("EMPTY", SkipReason::InsufficientData { rows: 0 }));
        assert_eq!(tickers(&outcome), vec!["OK"]);
    }

    #[test]
    fn empty_iff_no_survivors() {
        let universe = parse_universe("A:A,B:B").unwrap();

        let none = MockDataPort::new().with_closes("A", &[1.0]);
        assert!(run_screen(&none, &universe, request(90)).ranking.is_err());

        let one = MockDataPort::new().with_closes("A", &[1.0]).with_closes("B", &[1.0, 1.0]);
        assert!(run_screen(&one, &universe, request(90)).ranking.is_ok());
    }
}
