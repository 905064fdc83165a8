//! Evaluate command: score a location with the reference site model.

use std::io::Write;

use clap::Parser;
use geotherm_core::Coordinate;
use geotherm_scorer::{SiteEvaluation, SiteModel};
use geotherm_view::ViewState;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::{
    ARG_LAT, ARG_LON, ARG_SEED, CliError, ENV_EVALUATE_LAT, ENV_EVALUATE_LON, write_view,
};

/// Seed used for the mock rasters when none is configured.
pub(crate) const DEFAULT_SEED: u64 = 42;

/// CLI arguments for the `evaluate` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Score a location without a scoring service, using the \
                 reference model over seeded mock heat flow and temperature \
                 rasters. Prints the sampled inputs followed by the labels \
                 the map view would show.",
    about = "Score a location offline"
)]
#[ortho_config(prefix = "GEOTHERM")]
pub(crate) struct EvaluateArgs {
    /// Latitude in degrees north.
    #[arg(long = ARG_LAT, value_name = "degrees", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) lat: Option<f64>,
    /// Longitude in degrees east.
    #[arg(long = ARG_LON, value_name = "degrees", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) lon: Option<f64>,
    /// Seed for the mock rasters.
    #[arg(long = ARG_SEED, value_name = "n")]
    #[serde(default)]
    pub(crate) seed: Option<u64>,
}

impl EvaluateArgs {
    pub(crate) fn into_config(self) -> Result<EvaluateConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        EvaluateConfig::try_from(merged)
    }
}

/// Resolved `evaluate` command configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct EvaluateConfig {
    pub(crate) coordinate: Coordinate,
    pub(crate) seed: u64,
}

impl TryFrom<EvaluateArgs> for EvaluateConfig {
    type Error = CliError;

    fn try_from(args: EvaluateArgs) -> Result<Self, Self::Error> {
        let lat = args.lat.ok_or(CliError::MissingArgument {
            field: ARG_LAT,
            env: ENV_EVALUATE_LAT,
        })?;
        let lon = args.lon.ok_or(CliError::MissingArgument {
            field: ARG_LON,
            env: ENV_EVALUATE_LON,
        })?;
        Ok(Self {
            coordinate: Coordinate::try_new(lat, lon)?,
            seed: args.seed.unwrap_or(DEFAULT_SEED),
        })
    }
}

pub(crate) fn run_evaluate(args: EvaluateArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_evaluate_with(args, &mut stdout)
}

pub(crate) fn run_evaluate_with(args: EvaluateArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    let model = SiteModel::mock(config.seed);
    let evaluation = model.evaluate(config.coordinate)?;
    write_breakdown(writer, &evaluation)?;
    let state = ViewState {
        result: Some(evaluation.to_result()),
        error: None,
    };
    write_view(writer, &state.render())
}

fn write_breakdown(writer: &mut dyn Write, evaluation: &SiteEvaluation) -> Result<(), CliError> {
    let fault = if evaluation.in_fault_zone { "yes" } else { "no" };
    writeln!(writer, "Location: {}", evaluation.coordinate)
        .and_then(|()| writeln!(writer, "Heat flow: {:.1} mW/m²", evaluation.heatflow))
        .and_then(|()| writeln!(writer, "Temperature: {:.1} °C", evaluation.temperature))
        .and_then(|()| writeln!(writer, "Fault zone: {fault}"))
        .map_err(CliError::WriteOutput)
}
