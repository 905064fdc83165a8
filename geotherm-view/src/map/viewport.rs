//! The visible window onto the world map.

use geotherm_core::Coordinate;

use super::projection::{TILE_SIZE, WorldPoint, project, unproject, world_size};
use super::tiles::{PlacedTile, TileRef};

/// Lowest zoom level served by the tile server.
pub const MIN_ZOOM: u8 = 0;

/// Highest zoom level served by the tile server.
pub const MAX_ZOOM: u8 = 19;

/// Largest viewport edge, in pixels, accepted from configuration.
pub const MAX_VIEWPORT_PIXELS: f64 = 16_384.0;

/// A position in screen pixels, relative to the viewport's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    /// Pixels to the right of the left edge.
    pub x: f64,
    /// Pixels below the top edge.
    pub y: f64,
}

impl ScreenPoint {
    /// Construct a screen point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Centre, zoom, and pixel size of the map view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Coordinate shown at the middle of the viewport.
    pub center: Coordinate,
    /// Current zoom level, `MIN_ZOOM..=MAX_ZOOM`.
    pub zoom: u8,
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl Viewport {
    /// Build a viewport, clamping `zoom` into the served range.
    #[must_use]
    pub fn new(center: Coordinate, zoom: u8, width: f64, height: f64) -> Self {
        Self {
            center,
            zoom: zoom.clamp(MIN_ZOOM, MAX_ZOOM),
            width,
            height,
        }
    }

    #[expect(clippy::float_arithmetic, reason = "pixel offsets are float maths")]
    fn top_left(&self) -> WorldPoint {
        let centre = project(self.center, self.zoom);
        WorldPoint {
            x: centre.x - self.width / 2.0,
            y: centre.y - self.height / 2.0,
        }
    }

    /// Geographic coordinate under a screen pixel.
    #[must_use]
    #[expect(clippy::float_arithmetic, reason = "pixel offsets are float maths")]
    pub fn coordinate_at(&self, point: ScreenPoint) -> Coordinate {
        let origin = self.top_left();
        unproject(
            WorldPoint {
                x: origin.x + point.x,
                y: origin.y + point.y,
            },
            self.zoom,
        )
    }

    /// Screen position of `coordinate`, using the world copy nearest the centre.
    #[must_use]
    #[expect(clippy::float_arithmetic, reason = "pixel offsets are float maths")]
    pub fn screen_position(&self, coordinate: Coordinate) -> ScreenPoint {
        let size = world_size(self.zoom);
        let centre = project(self.center, self.zoom);
        let point = project(coordinate, self.zoom);
        let dx = (point.x - centre.x + size / 2.0).rem_euclid(size) - size / 2.0;
        ScreenPoint {
            x: self.width / 2.0 + dx,
            y: self.height / 2.0 + point.y - centre.y,
        }
    }

    /// Move the centre by a screen-pixel offset.
    ///
    /// Positive `dx` moves the view east, positive `dy` moves it south.
    #[expect(clippy::float_arithmetic, reason = "pixel offsets are float maths")]
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        let centre = project(self.center, self.zoom);
        self.center = unproject(
            WorldPoint {
                x: centre.x + dx,
                y: centre.y + dy,
            },
            self.zoom,
        );
    }

    /// Change the zoom level around the current centre.
    pub fn set_zoom(&mut self, zoom: u8) {
        self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
    }

    /// Tiles intersecting the viewport, row by row from the top-left.
    ///
    /// Columns wrap around the antimeridian and each tile is listed at most
    /// once per row, however wide the viewport. Rows beyond the poles are
    /// omitted.
    #[must_use]
    #[expect(clippy::float_arithmetic, reason = "tile bounds are float maths")]
    #[expect(
        clippy::cast_possible_truncation,
        reason = "tile indices are bounded by 2^MAX_ZOOM"
    )]
    #[expect(
        clippy::cast_precision_loss,
        reason = "tile indices are bounded by 2^MAX_ZOOM"
    )]
    pub fn visible_tiles(&self) -> Vec<PlacedTile> {
        let origin = self.top_left();
        let tiles_per_side = 1_i64 << self.zoom;
        let first_col = (origin.x / TILE_SIZE).floor() as i64;
        let last_col = (((origin.x + self.width) / TILE_SIZE).ceil() as i64 - 1)
            .min(first_col.saturating_add(tiles_per_side - 1));
        let first_row = ((origin.y / TILE_SIZE).floor() as i64).max(0);
        let last_row = (((origin.y + self.height) / TILE_SIZE).ceil() as i64 - 1)
            .min(tiles_per_side - 1);

        let mut tiles = Vec::new();
        for row in first_row..=last_row {
            for col in first_col..=last_col {
                let Ok(x) = u32::try_from(col.rem_euclid(tiles_per_side)) else {
                    continue;
                };
                let Ok(y) = u32::try_from(row) else {
                    continue;
                };
                tiles.push(PlacedTile {
                    tile: TileRef {
                        z: self.zoom,
                        x,
                        y,
                    },
                    left: col as f64 * TILE_SIZE - origin.x,
                    top: row as f64 * TILE_SIZE - origin.y,
                });
            }
        }
        tiles
    }
}
