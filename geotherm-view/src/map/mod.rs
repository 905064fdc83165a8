//! The map surface: viewport, projection, tiles, and click selection.
//!
//! [`MapSurface`] is the interactive part. It converts clicks into
//! coordinates, keeps a single marker at the last click, and forwards each
//! click to its [`SelectListener`].

mod projection;
mod surface;
mod tiles;
mod viewport;

pub use projection::{
    MAX_MERCATOR_LATITUDE, TILE_SIZE, WorldPoint, clamp_latitude, project, unproject,
    world_size, wrap_longitude,
};
pub use surface::{MapConfig, MapSurface, SelectListener};
pub use tiles::{DEFAULT_TILE_URL, PlacedTile, TileRef};
pub use viewport::{MAX_VIEWPORT_PIXELS, MAX_ZOOM, MIN_ZOOM, ScreenPoint, Viewport};
