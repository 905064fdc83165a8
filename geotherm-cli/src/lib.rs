//! Command-line interface for exploring geothermal feasibility scores.
#![forbid(unsafe_code)]

use std::future::Future;
use std::io::Write;

use clap::{Parser, Subcommand};
use geotherm_view::RenderedView;

mod config;
mod error;
mod evaluate;
mod explore;
mod score;
mod tiles;

pub use error::{CliError, EventParseError};

use evaluate::EvaluateArgs;
use explore::ExploreArgs;
use score::ScoreArgs;
use tiles::TilesArgs;

const ARG_LAT: &str = "lat";
const ARG_LON: &str = "lon";
const ARG_BASE_URL: &str = "base-url";
const ARG_SCORE_PATH: &str = "score-path";
const ARG_TIMEOUT_SECS: &str = "timeout-secs";
const ARG_USER_AGENT: &str = "user-agent";
const ARG_CENTER_LAT: &str = "center-lat";
const ARG_CENTER_LON: &str = "center-lon";
const ARG_ZOOM: &str = "zoom";
const ARG_WIDTH: &str = "width";
const ARG_HEIGHT: &str = "height";
const ARG_TILE_URL: &str = "tile-url";
const ARG_EVENTS: &str = "events";
const ARG_SEED: &str = "seed";
const ENV_SCORE_LAT: &str = "GEOTHERM_CMDS_SCORE_LAT";
const ENV_SCORE_LON: &str = "GEOTHERM_CMDS_SCORE_LON";
const ENV_EVALUATE_LAT: &str = "GEOTHERM_CMDS_EVALUATE_LAT";
const ENV_EVALUATE_LON: &str = "GEOTHERM_CMDS_EVALUATE_LON";

/// Run the geotherm CLI with the current process arguments and environment.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Score(args) => score::run_score(args),
        Command::Explore(args) => explore::run_explore(args),
        Command::Tiles(args) => tiles::run_tiles(args),
        Command::Evaluate(args) => evaluate::run_evaluate(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "geotherm",
    about = "Query geothermal feasibility scores for map locations",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Ask the scoring service about one location.
    Score(ScoreArgs),
    /// Drive an interactive map session from a script of map events.
    Explore(ExploreArgs),
    /// List the map tiles covering the initial view.
    Tiles(TilesArgs),
    /// Score a location offline with the reference site model.
    Evaluate(EvaluateArgs),
}

/// Run `future` to completion on a fresh single-threaded runtime.
fn block_on<F: Future>(future: F) -> Result<F::Output, CliError> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(CliError::Runtime)?;
    Ok(runtime.block_on(future))
}

fn write_view(writer: &mut dyn Write, view: &RenderedView) -> Result<(), CliError> {
    for line in view.lines() {
        writeln!(writer, "{line}").map_err(CliError::WriteOutput)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests;
