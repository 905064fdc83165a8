//! Explore command: an interactive map session driven by text events.
//!
//! Each input line is one map event:
//!
//! ```text
//! click <x> <y>        click at a screen pixel
//! select <lat> <lon>   click at a coordinate
//! pan <dx> <dy>        drag the map by a pixel offset
//! zoom in|out|<level>  change the zoom level
//! quit                 stop reading input
//! ```
//!
//! Blank lines and lines starting with `#` are skipped. Malformed lines are
//! reported and skipped. The view is printed each time a scoring request
//! finishes.

use std::cell::RefCell;
use std::io::Write;
use std::str::SplitWhitespace;

use camino::Utf8PathBuf;
use clap::Parser;
use futures_util::stream;
use geotherm_client::HttpScoringClientConfig;
use geotherm_core::{Coordinate, ScoringService};
use geotherm_view::map::{MapConfig, ScreenPoint};
use geotherm_view::{MapEvent, RenderedView, Session, SessionStats};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

use crate::config::{MapOverrides, ServiceOverrides};
use crate::score::{HttpServiceBuilder, ServiceBuilder};
use crate::{
    ARG_BASE_URL, ARG_CENTER_LAT, ARG_CENTER_LON, ARG_EVENTS, ARG_HEIGHT, ARG_SCORE_PATH,
    ARG_TILE_URL, ARG_TIMEOUT_SECS, ARG_USER_AGENT, ARG_WIDTH, ARG_ZOOM, CliError,
    EventParseError, block_on,
};

/// CLI arguments for the `explore` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Open a map session and feed it events read from standard \
                 input or a file, one per line. Every click sends a scoring \
                 request; the score and feasibility panels are printed as \
                 responses arrive.",
    about = "Explore the map interactively"
)]
#[ortho_config(prefix = "GEOTHERM")]
pub(crate) struct ExploreArgs {
    /// Read events from this file instead of standard input.
    #[arg(long = ARG_EVENTS, value_name = "path")]
    #[serde(default)]
    pub(crate) events: Option<Utf8PathBuf>,
    /// Latitude of the initial map centre.
    #[arg(long = ARG_CENTER_LAT, value_name = "degrees", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) center_lat: Option<f64>,
    /// Longitude of the initial map centre.
    #[arg(long = ARG_CENTER_LON, value_name = "degrees", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) center_lon: Option<f64>,
    /// Initial zoom level (0-19).
    #[arg(long = ARG_ZOOM, value_name = "level")]
    #[serde(default)]
    pub(crate) zoom: Option<u8>,
    /// Viewport width in pixels.
    #[arg(long = ARG_WIDTH, value_name = "pixels")]
    #[serde(default)]
    pub(crate) width: Option<f64>,
    /// Viewport height in pixels.
    #[arg(long = ARG_HEIGHT, value_name = "pixels")]
    #[serde(default)]
    pub(crate) height: Option<f64>,
    /// Tile URL template with {s}, {z}, {x} and {y} placeholders.
    #[arg(long = ARG_TILE_URL, value_name = "template")]
    #[serde(default)]
    pub(crate) tile_url: Option<String>,
    /// Base URL of the scoring service (e.g. "http://localhost:5001").
    #[arg(long = ARG_BASE_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) base_url: Option<String>,
    /// Path of the scoring endpoint relative to the base URL.
    #[arg(long = ARG_SCORE_PATH, value_name = "path")]
    #[serde(default)]
    pub(crate) score_path: Option<String>,
    /// Give up on each request after this many seconds.
    #[arg(long = ARG_TIMEOUT_SECS, value_name = "seconds")]
    #[serde(default)]
    pub(crate) timeout_secs: Option<u64>,
    /// User agent sent with scoring requests.
    #[arg(long = ARG_USER_AGENT, value_name = "agent")]
    #[serde(default)]
    pub(crate) user_agent: Option<String>,
}

impl ExploreArgs {
    pub(crate) fn into_config(self) -> Result<ExploreConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        ExploreConfig::try_from(merged)
    }
}

/// Resolved `explore` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ExploreConfig {
    /// Events file; standard input when absent.
    pub(crate) events: Option<Utf8PathBuf>,
    /// Initial map view.
    pub(crate) map: MapConfig,
    /// Scoring endpoint settings.
    pub(crate) client: HttpScoringClientConfig,
}

impl TryFrom<ExploreArgs> for ExploreConfig {
    type Error = CliError;

    fn try_from(args: ExploreArgs) -> Result<Self, Self::Error> {
        let map = MapOverrides {
            center_lat: args.center_lat,
            center_lon: args.center_lon,
            zoom: args.zoom,
            width: args.width,
            height: args.height,
            tile_url: args.tile_url,
        }
        .into_map_config()?;
        let client = ServiceOverrides {
            base_url: args.base_url,
            score_path: args.score_path,
            timeout_secs: args.timeout_secs,
            user_agent: args.user_agent,
        }
        .into_client_config()?;
        Ok(Self {
            events: args.events,
            map,
            client,
        })
    }
}

/// One parsed input line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum ExploreInput {
    Event(MapEvent),
    Quit,
}

/// Parse one input line; blank lines and comments yield `None`.
pub(crate) fn parse_input(line: &str) -> Result<Option<ExploreInput>, EventParseError> {
    let mut words = line.split_whitespace();
    let Some(command) = words.next() else {
        return Ok(None);
    };
    if command.starts_with('#') {
        return Ok(None);
    }
    let input = match command {
        "click" => {
            let mut args = Args::new("click", "<x> <y>", words);
            let point = ScreenPoint::new(args.number()?, args.number()?);
            args.finish()?;
            ExploreInput::Event(MapEvent::ClickAt(point))
        }
        "select" => {
            let mut args = Args::new("select", "<lat> <lon>", words);
            let coordinate = Coordinate::try_new(args.number()?, args.number()?)?;
            args.finish()?;
            ExploreInput::Event(MapEvent::Select(coordinate))
        }
        "pan" => {
            let mut args = Args::new("pan", "<dx> <dy>", words);
            let (dx, dy) = (args.number()?, args.number()?);
            args.finish()?;
            ExploreInput::Event(MapEvent::Pan { dx, dy })
        }
        "zoom" => {
            let mut args = Args::new("zoom", "in, out, or a level", words);
            let event = match args.word()? {
                "in" => MapEvent::ZoomIn,
                "out" => MapEvent::ZoomOut,
                level => MapEvent::SetZoom(level.parse().map_err(|_| {
                    EventParseError::InvalidNumber {
                        command: "zoom",
                        value: level.to_owned(),
                    }
                })?),
            };
            args.finish()?;
            ExploreInput::Event(event)
        }
        "quit" => {
            Args::new("quit", "no arguments", words).finish()?;
            ExploreInput::Quit
        }
        other => return Err(EventParseError::UnknownCommand(other.to_owned())),
    };
    Ok(Some(input))
}

/// Remaining words of a command line.
struct Args<'a> {
    command: &'static str,
    expected: &'static str,
    words: SplitWhitespace<'a>,
}

impl<'a> Args<'a> {
    const fn new(command: &'static str, expected: &'static str, words: SplitWhitespace<'a>) -> Self {
        Self {
            command,
            expected,
            words,
        }
    }

    fn word(&mut self) -> Result<&'a str, EventParseError> {
        self.words.next().ok_or(EventParseError::MissingArgument {
            command: self.command,
            expected: self.expected,
        })
    }

    fn number(&mut self) -> Result<f64, EventParseError> {
        let word = self.word()?;
        word.parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .ok_or_else(|| EventParseError::InvalidNumber {
                command: self.command,
                value: word.to_owned(),
            })
    }

    fn finish(self) -> Result<(), EventParseError> {
        let rest = self.words.collect::<Vec<_>>();
        if rest.is_empty() {
            Ok(())
        } else {
            Err(EventParseError::TrailingInput {
                command: self.command,
                rest: rest.join(" "),
            })
        }
    }
}

pub(crate) fn run_explore(args: ExploreArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_explore_with(args, &HttpServiceBuilder, &mut stdout)
}

pub(crate) fn run_explore_with(
    args: ExploreArgs,
    builder: &dyn ServiceBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    let service = builder.build(&config.client)?;
    let stats = block_on(async {
        match &config.events {
            Some(path) => {
                let file = tokio::fs::File::open(path)
                    .await
                    .map_err(|source| CliError::OpenEvents {
                        path: path.clone(),
                        source,
                    })?;
                explore(BufReader::new(file), config.map, service, writer).await
            }
            None => {
                let stdin = BufReader::new(tokio::io::stdin());
                explore(stdin, config.map, service, writer).await
            }
        }
    })??;
    log::info!(
        "explore finished: {} event(s), {} request(s), {} response(s)",
        stats.events,
        stats.requests,
        stats.responses
    );
    Ok(())
}

/// Run a map session over the events in `reader`, printing each render.
pub(crate) async fn explore<R, S>(
    reader: R,
    map: MapConfig,
    service: S,
    writer: &mut dyn Write,
) -> Result<SessionStats, CliError>
where
    R: AsyncBufRead + Unpin,
    S: ScoringService,
{
    let output = Output {
        writer: RefCell::new(writer),
        failure: RefCell::new(None),
    };
    let shared = &output;
    let events = stream::unfold(reader.lines(), move |mut lines| async move {
        loop {
            let line = match lines.next_line().await {
                Ok(Some(line)) => line,
                Ok(None) => return None,
                Err(err) => {
                    shared.fail(CliError::ReadEvents(err));
                    return None;
                }
            };
            match parse_input(&line) {
                Ok(Some(ExploreInput::Event(event))) => return Some((event, lines)),
                Ok(Some(ExploreInput::Quit)) => return None,
                Ok(None) => {}
                Err(err) => {
                    log::warn!("skipping {line:?}: {err}");
                    shared.print(&format!("ignored: {err}"));
                }
            }
        }
    });
    let events = std::pin::pin!(events);

    let mut session = Session::new(map, service);
    let stats = session
        .run(events, |view: &RenderedView| {
            for line in view.lines() {
                shared.print(&line);
            }
        })
        .await;

    let failure = output.failure.borrow_mut().take();
    match failure {
        Some(err) => Err(err),
        None => Ok(stats),
    }
}

/// Output shared between the input reader and the render callback.
struct Output<'w> {
    writer: RefCell<&'w mut dyn Write>,
    failure: RefCell<Option<CliError>>,
}

impl Output<'_> {
    fn print(&self, line: &str) {
        let mut writer = self.writer.borrow_mut();
        if let Err(err) = writeln!(writer, "{line}") {
            self.fail(CliError::WriteOutput(err));
        }
    }

    /// Keep the first failure only.
    fn fail(&self, err: CliError) {
        let mut failure = self.failure.borrow_mut();
        if failure.is_none() {
            *failure = Some(err);
        }
    }
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<ExploreConfig, CliError> {
    let merged = ExploreArgs::merge_from_layers(layers).map_err(CliError::from)?;
    ExploreConfig::try_from(merged)
}
