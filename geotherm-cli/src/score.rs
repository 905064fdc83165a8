//! Score command implementation for the geotherm CLI.

use std::io::Write;

use clap::Parser;
use geotherm_client::{HttpScoringClient, HttpScoringClientConfig};
use geotherm_core::{Coordinate, ScoringService};
use geotherm_view::HostView;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::config::ServiceOverrides;
use crate::{
    ARG_BASE_URL, ARG_LAT, ARG_LON, ARG_SCORE_PATH, ARG_TIMEOUT_SECS, ARG_USER_AGENT, CliError,
    ENV_SCORE_LAT, ENV_SCORE_LON, block_on, write_view,
};

/// CLI arguments for the `score` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Send one location to the scoring service and print the \
                 score and feasibility labels the map view would show. The \
                 service endpoint can come from CLI flags, configuration \
                 files, or environment variables.",
    about = "Score a single location"
)]
#[ortho_config(prefix = "GEOTHERM")]
pub(crate) struct ScoreArgs {
    /// Latitude in degrees north.
    #[arg(long = ARG_LAT, value_name = "degrees", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) lat: Option<f64>,
    /// Longitude in degrees east.
    #[arg(long = ARG_LON, value_name = "degrees", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) lon: Option<f64>,
    /// Base URL of the scoring service (e.g. "http://localhost:5001").
    #[arg(long = ARG_BASE_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) base_url: Option<String>,
    /// Path of the scoring endpoint relative to the base URL.
    #[arg(long = ARG_SCORE_PATH, value_name = "path")]
    #[serde(default)]
    pub(crate) score_path: Option<String>,
    /// Give up on the request after this many seconds.
    #[arg(long = ARG_TIMEOUT_SECS, value_name = "seconds")]
    #[serde(default)]
    pub(crate) timeout_secs: Option<u64>,
    /// User agent sent with scoring requests.
    #[arg(long = ARG_USER_AGENT, value_name = "agent")]
    #[serde(default)]
    pub(crate) user_agent: Option<String>,
}

impl ScoreArgs {
    pub(crate) fn into_config(self) -> Result<ScoreConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        ScoreConfig::try_from(merged)
    }
}

/// Resolved `score` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ScoreConfig {
    /// Location to score.
    pub(crate) coordinate: Coordinate,
    /// Scoring endpoint settings.
    pub(crate) client: HttpScoringClientConfig,
}

impl TryFrom<ScoreArgs> for ScoreConfig {
    type Error = CliError;

    fn try_from(args: ScoreArgs) -> Result<Self, Self::Error> {
        let lat = args.lat.ok_or(CliError::MissingArgument {
            field: ARG_LAT,
            env: ENV_SCORE_LAT,
        })?;
        let lon = args.lon.ok_or(CliError::MissingArgument {
            field: ARG_LON,
            env: ENV_SCORE_LON,
        })?;
        let coordinate = Coordinate::try_new(lat, lon)?;
        let client = ServiceOverrides {
            base_url: args.base_url,
            score_path: args.score_path,
            timeout_secs: args.timeout_secs,
            user_agent: args.user_agent,
        }
        .into_client_config()?;
        Ok(Self { coordinate, client })
    }
}

/// Builds the scoring service for the current invocation.
pub(crate) trait ServiceBuilder {
    fn build(&self, config: &HttpScoringClientConfig)
    -> Result<Box<dyn ScoringService>, CliError>;
}

pub(crate) struct HttpServiceBuilder;

impl ServiceBuilder for HttpServiceBuilder {
    fn build(
        &self,
        config: &HttpScoringClientConfig,
    ) -> Result<Box<dyn ScoringService>, CliError> {
        let client = HttpScoringClient::with_config(config.clone())?;
        log::debug!("scoring requests go to {}", client.endpoint());
        Ok(Box::new(client))
    }
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_score_with(args, &HttpServiceBuilder, &mut stdout)
}

pub(crate) fn run_score_with(
    args: ScoreArgs,
    builder: &dyn ServiceBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    let view = HostView::new(builder.build(&config.client)?);
    block_on(view.handle_select(config.coordinate))?;
    write_view(writer, &view.render())?;
    if view.state().error.is_some() {
        return Err(CliError::RequestFailed);
    }
    Ok(())
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<ScoreConfig, CliError> {
    let merged = ScoreArgs::merge_from_layers(layers).map_err(CliError::from)?;
    ScoreConfig::try_from(merged)
}
