//! Unit tests for explore input parsing and the event-driven session.

use std::sync::Arc;

use geotherm_core::test_support::StubScoringService;
use geotherm_core::{Coordinate, CoordinateError, ScoreResult};
use geotherm_view::MapEvent;
use geotherm_view::map::{MapConfig, ScreenPoint};
use rstest::rstest;

use super::helpers::output_lines;
use super::*;
use crate::explore::{ExploreInput, explore, parse_input};

#[rstest]
#[case("click 400 200", MapEvent::ClickAt(ScreenPoint::new(400.0, 200.0)))]
#[case("select 38.5 -122.5", MapEvent::Select(Coordinate::new(38.5, -122.5)))]
#[case("  pan   -25.5 10  ", MapEvent::Pan { dx: -25.5, dy: 10.0 })]
#[case("zoom in", MapEvent::ZoomIn)]
#[case("zoom out", MapEvent::ZoomOut)]
#[case("zoom 7", MapEvent::SetZoom(7))]
fn parses_map_events(#[case] line: &str, #[case] expected: MapEvent) {
    assert_eq!(
        parse_input(line),
        Ok(Some(ExploreInput::Event(expected)))
    );
}

#[rstest]
#[case("")]
#[case("   ")]
#[case("# a comment")]
fn skips_blank_and_comment_lines(#[case] line: &str) {
    assert_eq!(parse_input(line), Ok(None));
}

#[rstest]
fn parses_quit() {
    assert_eq!(parse_input("quit"), Ok(Some(ExploreInput::Quit)));
}

#[rstest]
#[case("jump 1 2", EventParseError::UnknownCommand("jump".to_owned()))]
#[case(
    "click 400",
    EventParseError::MissingArgument { command: "click", expected: "<x> <y>" }
)]
#[case(
    "pan east 3",
    EventParseError::InvalidNumber { command: "pan", value: "east".to_owned() }
)]
#[case(
    "click NaN 3",
    EventParseError::InvalidNumber { command: "click", value: "NaN".to_owned() }
)]
#[case(
    "zoom 300",
    EventParseError::InvalidNumber { command: "zoom", value: "300".to_owned() }
)]
#[case(
    "select 1 2 3",
    EventParseError::TrailingInput { command: "select", rest: "3".to_owned() }
)]
#[case(
    "select 95 0",
    EventParseError::InvalidCoordinate(CoordinateError::LatitudeOutOfRange(95.0))
)]
fn rejects_malformed_lines(#[case] line: &str, #[case] expected: EventParseError) {
    assert_eq!(parse_input(line), Err(expected));
}

#[rstest]
fn explore_prints_each_response_and_stops_at_quit() {
    let service = Arc::new(StubScoringService::with_result(ScoreResult::new(
        85.0, "High",
    )));
    let input = b"select 38.5 -122.5\nbogus\nquit\nselect 0 0\n";
    let mut buffer = Vec::new();

    let stats = block_on(explore(
        &input[..],
        MapConfig::default(),
        Arc::clone(&service),
        &mut buffer,
    ))
    .expect("runtime starts")
    .expect("session succeeds");

    assert_eq!(stats.events, 1);
    assert_eq!(stats.requests, 1);
    assert_eq!(stats.responses, 1);
    assert_eq!(service.requests(), vec![Coordinate::new(38.5, -122.5)]);

    let lines = output_lines(&buffer);
    for expected in [
        "Score: 85",
        "High geothermal potential (70–100)",
        "Feasibility: High",
        "High feasibility: favorable conditions",
        "ignored: unknown command \"bogus\"",
    ] {
        assert!(lines.iter().any(|line| line == expected), "{lines:?}");
    }
}

#[rstest]
fn explore_reports_failures_and_keeps_going() {
    let service = Arc::new(StubScoringService::unreachable());
    let input = b"click 400 200\npan 10 0\nclick 100 100\n";
    let mut buffer = Vec::new();

    let stats = block_on(explore(
        &input[..],
        MapConfig::default(),
        Arc::clone(&service),
        &mut buffer,
    ))
    .expect("runtime starts")
    .expect("session succeeds");

    assert_eq!(stats.events, 3);
    assert_eq!(stats.requests, 2);
    assert_eq!(stats.responses, 2);
    assert_eq!(
        output_lines(&buffer),
        vec![
            "Error fetching data".to_owned(),
            "Error fetching data".to_owned()
        ]
    );
}

#[rstest]
fn explore_without_clicks_prints_nothing() {
    let service = Arc::new(StubScoringService::with_result(ScoreResult::new(
        10.0, "Low",
    )));
    let mut buffer = Vec::new();

    let stats = block_on(explore(
        &b"zoom in\npan 5 5\n"[..],
        MapConfig::default(),
        Arc::clone(&service),
        &mut buffer,
    ))
    .expect("runtime starts")
    .expect("session succeeds");

    assert_eq!(stats.events, 2);
    assert_eq!(stats.requests, 0);
    assert!(buffer.is_empty());
    assert!(service.requests().is_empty());
}
