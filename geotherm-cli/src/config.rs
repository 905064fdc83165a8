//! Settings shared by several subcommands once layered configuration has
//! been merged.

use std::time::Duration;

use geotherm_client::HttpScoringClientConfig;
use geotherm_core::Coordinate;
use geotherm_view::map::{MAX_VIEWPORT_PIXELS, MAX_ZOOM, MapConfig};

use crate::{
    ARG_HEIGHT, ARG_TILE_URL, ARG_TIMEOUT_SECS, ARG_WIDTH, ARG_ZOOM, CliError,
};

/// Scoring endpoint options left unset fall back to the client defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct ServiceOverrides {
    pub(crate) base_url: Option<String>,
    pub(crate) score_path: Option<String>,
    pub(crate) timeout_secs: Option<u64>,
    pub(crate) user_agent: Option<String>,
}

impl ServiceOverrides {
    pub(crate) fn into_client_config(self) -> Result<HttpScoringClientConfig, CliError> {
        let mut config = HttpScoringClientConfig::default();
        if let Some(base_url) = self.base_url {
            config.base_url = base_url;
        }
        if let Some(score_path) = self.score_path {
            config = config.with_score_path(score_path);
        }
        if let Some(user_agent) = self.user_agent {
            config = config.with_user_agent(user_agent);
        }
        match self.timeout_secs {
            Some(0) => {
                return Err(CliError::InvalidOption {
                    field: ARG_TIMEOUT_SECS,
                    reason: "must be at least one second",
                });
            }
            Some(secs) => config = config.with_timeout(Duration::from_secs(secs)),
            None => {}
        }
        Ok(config)
    }
}

/// Initial map view options left unset fall back to [`MapConfig::default`].
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct MapOverrides {
    pub(crate) center_lat: Option<f64>,
    pub(crate) center_lon: Option<f64>,
    pub(crate) zoom: Option<u8>,
    pub(crate) width: Option<f64>,
    pub(crate) height: Option<f64>,
    pub(crate) tile_url: Option<String>,
}

impl MapOverrides {
    pub(crate) fn into_map_config(self) -> Result<MapConfig, CliError> {
        let defaults = MapConfig::default();
        let center = Coordinate::try_new(
            self.center_lat.unwrap_or(defaults.center.latitude),
            self.center_lon.unwrap_or(defaults.center.longitude),
        )?;
        let zoom = self.zoom.unwrap_or(defaults.zoom);
        if zoom > MAX_ZOOM {
            return Err(CliError::InvalidOption {
                field: ARG_ZOOM,
                reason: "must be between 0 and 19",
            });
        }
        let width = pixels(self.width.unwrap_or(defaults.width), ARG_WIDTH)?;
        let height = pixels(self.height.unwrap_or(defaults.height), ARG_HEIGHT)?;
        let tile_url = self.tile_url.unwrap_or(defaults.tile_url);
        if ["{z}", "{x}", "{y}"]
            .iter()
            .any(|placeholder| !tile_url.contains(placeholder))
        {
            return Err(CliError::InvalidOption {
                field: ARG_TILE_URL,
                reason: "must contain {z}, {x} and {y}",
            });
        }
        Ok(MapConfig {
            center,
            zoom,
            width,
            height,
            tile_url,
        })
    }
}

fn pixels(value: f64, field: &'static str) -> Result<f64, CliError> {
    if value > 0.0 && value <= MAX_VIEWPORT_PIXELS {
        Ok(value)
    } else {
        Err(CliError::InvalidOption {
            field,
            reason: "must be positive and at most 16384 pixels",
        })
    }
}
