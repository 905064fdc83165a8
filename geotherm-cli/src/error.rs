//! Error types emitted by the geotherm CLI.
//!
//! Keep this error type reasonably small, as most command helpers return
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use geotherm_client::ClientBuildError;
use geotherm_core::CoordinateError;
use geotherm_scorer::SiteModelError;
use thiserror::Error;

/// Errors emitted by the geotherm CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        /// Long flag name of the option.
        field: &'static str,
        /// Environment variable that can supply it.
        env: &'static str,
    },
    /// The requested latitude or longitude is out of range.
    #[error("invalid coordinate: {0}")]
    InvalidCoordinate(#[from] CoordinateError),
    /// An option is outside its accepted range.
    #[error("invalid {field}: {reason}")]
    InvalidOption {
        /// Long flag name of the option.
        field: &'static str,
        /// What was wrong with the value.
        reason: &'static str,
    },
    /// Building the HTTP scoring client failed.
    #[error("failed to build scoring client: {0}")]
    BuildClient(#[from] ClientBuildError),
    /// Starting the async runtime failed.
    #[error("failed to start async runtime: {0}")]
    Runtime(#[source] std::io::Error),
    /// The scoring request failed; details are logged.
    #[error("scoring request failed")]
    RequestFailed,
    /// The reference model could not score the site.
    #[error("failed to evaluate site: {0}")]
    Evaluate(#[from] SiteModelError),
    /// Opening the events file failed.
    #[error("failed to open events file {path:?}: {source}")]
    OpenEvents {
        /// Requested events path.
        path: Utf8PathBuf,
        /// Source error from std I/O.
        #[source]
        source: std::io::Error,
    },
    /// Reading map events failed.
    #[error("failed to read map events: {0}")]
    ReadEvents(#[source] std::io::Error),
    /// Writing command output failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
}

/// Reasons an `explore` input line is rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EventParseError {
    /// The first word is not a known command.
    #[error("unknown command {0:?}")]
    UnknownCommand(String),
    /// The command needs more arguments.
    #[error("{command} expects {expected}")]
    MissingArgument {
        /// Command word.
        command: &'static str,
        /// Description of the expected arguments.
        expected: &'static str,
    },
    /// An argument did not parse as a number.
    #[error("{command}: {value:?} is not a number")]
    InvalidNumber {
        /// Command word.
        command: &'static str,
        /// Offending argument.
        value: String,
    },
    /// A `select` command named an out-of-range coordinate.
    #[error("select: {0}")]
    InvalidCoordinate(#[from] CoordinateError),
    /// Extra words followed a complete command.
    #[error("{command}: unexpected trailing input {rest:?}")]
    TrailingInput {
        /// Command word.
        command: &'static str,
        /// Unconsumed words.
        rest: String,
    },
}
