//! Tests for cli module

use super::*;
use crate::error::Error;
use crate::pagination::PaginationState;
use crate::source::BoundsPolicy;
use clap::Parser;
use pretty_assertions::assert_eq;
use std::io::Write;

// ============================================================================
// Argument Parsing Tests
// ============================================================================

#[test]
fn test_parse_run_defaults() {
    let cli = Cli::try_parse_from(["pagefeed", "run"]).unwrap();
    assert_eq!(cli.format, OutputFormat::Text);
    assert!(!cli.verbose);
    match cli.command {
        Commands::Run {
            total,
            page_size,
            loads,
            start,
            delay_ms,
            fail_at,
            strict,
        } => {
            assert_eq!((total, page_size, loads, start, delay_ms), (100, 10, 3, 0, 0));
            assert!(fail_at.is_none());
            assert!(!strict);
        }
        Commands::Scenario { .. } => panic!("Expected Run"),
    }
}

#[test]
fn test_parse_scenario_with_global_flags() {
    let cli =
        Cli::try_parse_from(["pagefeed", "scenario", "feed.yaml", "--format", "json", "-v"])
            .unwrap();
    assert_eq!(cli.format, OutputFormat::Json);
    assert!(cli.verbose);
    assert!(matches!(cli.command, Commands::Scenario { ref path } if path.ends_with("feed.yaml")));
}

// ============================================================================
// Scenario Tests
// ============================================================================

#[test]
fn test_scenario_from_yaml() {
    let yaml = r"
total: 100
page_size: 70
loads: 1
bounds: strict
engine:
  label: boundary
";
    let scenario = Scenario::from_yaml_str(yaml).unwrap();
    assert_eq!(scenario.total, 100);
    assert_eq!(scenario.page_size, 70);
    assert_eq!(scenario.loads, 1);
    assert_eq!(scenario.bounds, BoundsPolicy::Strict);
    assert_eq!(scenario.engine.label, "boundary");
    assert_eq!(scenario.start, 0);
}

#[test]
fn test_scenario_rejects_unknown_fields() {
    let err = Scenario::from_yaml_str("pages: 3").unwrap_err();
    assert!(matches!(err, Error::YamlParse(_)));
}

#[test]
fn test_scenario_validation() {
    let err = Scenario::from_yaml_str("page_size: 0").unwrap_err();
    assert_eq!(err, Error::invalid_value("page_size", "must be at least 1"));

    let err = Scenario::from_yaml_str("total: 10\nstart: 11").unwrap_err();
    assert!(matches!(err, Error::InvalidConfigValue { ref field, .. } if field == "start"));
}

#[test]
fn test_scenario_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "total: 20\npage_size: 5").unwrap();

    let scenario = Scenario::from_file(file.path()).unwrap();
    assert_eq!(scenario.total, 20);
    assert_eq!(scenario.page_size, 5);
}

#[test]
fn test_scenario_missing_file() {
    let err = Scenario::from_file("/nonexistent/scenario.yaml").unwrap_err();
    assert!(matches!(err, Error::Config { .. }));
}

// ============================================================================
// Execution Tests
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_execute_spends_loads() {
    let scenario = Scenario {
        total: 100,
        page_size: 5,
        loads: 2,
        ..Scenario::default()
    };
    let states = execute(&scenario).await.unwrap();

    let summary: Vec<String> = states.iter().map(describe).collect();
    assert_eq!(
        summary,
        vec![
            "loading@0 elements=0",
            "idle@5 elements=5",
            "loading@5 elements=5",
            "idle@10 elements=10",
            "loading@10 elements=10",
            "idle@15 elements=15",
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn test_execute_stops_when_exhausted() {
    let scenario = Scenario {
        total: 12,
        page_size: 5,
        loads: 10,
        delay_ms: 50,
        ..Scenario::default()
    };
    let states = execute(&scenario).await.unwrap();

    let last = states.last().unwrap();
    assert!(last.is_exhausted());
    assert_eq!(last.elements, (1..=12).collect::<Vec<u64>>());
    assert_eq!(states.len(), 6);
}

#[tokio::test(start_paused = true)]
async fn test_execute_reports_boundary_failure() {
    let scenario = Scenario::from_yaml_str("page_size: 70\nloads: 1\nbounds: strict").unwrap();
    let states = execute(&scenario).await.unwrap();

    assert_eq!(
        states.last(),
        Some(&PaginationState {
            is_loading: false,
            next_cursor: Some(70),
            elements: (1..=70).collect(),
            error: Some(Error::out_of_bounds(140, 100)),
        })
    );
}

#[test]
fn test_describe_with_error() {
    let state: PaginationState<usize, u64> = PaginationState {
        is_loading: false,
        next_cursor: None,
        elements: vec![1, 2],
        error: Some(Error::fetch("boom")),
    };
    assert_eq!(
        describe(&state),
        "idle@end elements=2 error=\"Page fetch failed: boom\""
    );
}

#[tokio::test]
async fn test_runner_runs_scenario_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "total: 10\npage_size: 5\nloads: 1").unwrap();
    let path = file.path().to_string_lossy().into_owned();

    let cli = Cli::try_parse_from(["pagefeed", "--format", "json", "scenario", &path]).unwrap();
    Runner::new(cli).run().await.unwrap();
}
