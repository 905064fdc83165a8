//! Tiles command: list the tiles covering the initial map view.

use std::io::Write;

use clap::Parser;
use geotherm_view::map::{MapConfig, PlacedTile, Viewport};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::config::MapOverrides;
use crate::{
    ARG_CENTER_LAT, ARG_CENTER_LON, ARG_HEIGHT, ARG_TILE_URL, ARG_WIDTH, ARG_ZOOM, CliError,
};

/// CLI arguments for the `tiles` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Print every tile the map would fetch for its initial view, \
                 one per line as `z/x/y left top url`, where left and top \
                 are the screen offsets of the tile's corner.",
    about = "List tiles for the initial map view"
)]
#[ortho_config(prefix = "GEOTHERM")]
pub(crate) struct TilesArgs {
    /// Latitude of the map centre.
    #[arg(long = ARG_CENTER_LAT, value_name = "degrees", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) center_lat: Option<f64>,
    /// Longitude of the map centre.
    #[arg(long = ARG_CENTER_LON, value_name = "degrees", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) center_lon: Option<f64>,
    /// Zoom level (0-19).
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
}

impl TilesArgs {
    pub(crate) fn into_config(self) -> Result<MapConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        MapOverrides::from(merged).into_map_config()
    }
}

impl From<TilesArgs> for MapOverrides {
    fn from(args: TilesArgs) -> Self {
        Self {
            center_lat: args.center_lat,
            center_lon: args.center_lon,
            zoom: args.zoom,
            width: args.width,
            height: args.height,
            tile_url: args.tile_url,
        }
    }
}

pub(crate) fn run_tiles(args: TilesArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_tiles_with(args, &mut stdout)
}

pub(crate) fn run_tiles_with(args: TilesArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    let viewport = Viewport::new(config.center, config.zoom, config.width, config.height);
    for placed in viewport.visible_tiles() {
        write_tile(writer, &placed, &config.tile_url)?;
    }
    Ok(())
}

fn write_tile(writer: &mut dyn Write, placed: &PlacedTile, template: &str) -> Result<(), CliError> {
    writeln!(
        writer,
        "{} {} {} {}",
        placed.tile,
        placed.left,
        placed.top,
        placed.tile.url(template)
    )
    .map_err(CliError::WriteOutput)
}
