//! Interactive map with a single selection marker.

use geotherm_core::Coordinate;

use super::tiles::{DEFAULT_TILE_URL, PlacedTile};
use super::viewport::{ScreenPoint, Viewport};

/// Receives the coordinate of every map click.
pub trait SelectListener {
    /// Called once per click, before the marker moves.
    fn on_select(&mut self, coordinate: Coordinate);
}

impl<F> SelectListener for F
where
    F: FnMut(Coordinate),
{
    fn on_select(&mut self, coordinate: Coordinate) {
        self(coordinate);
    }
}

/// Initial view and tile source for a [`MapSurface`].
#[derive(Debug, Clone, PartialEq)]
pub struct MapConfig {
    /// Initial centre.
    pub center: Coordinate,
    /// Initial zoom level.
    pub zoom: u8,
    /// Viewport width in pixels.
    pub width: f64,
    /// Viewport height in pixels.
    pub height: f64,
    /// Tile URL template with `{s}`, `{z}`, `{x}`, `{y}` placeholders.
    pub tile_url: String,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            center: Coordinate::new(0.0, 0.0),
            zoom: 2,
            width: 800.0,
            height: 400.0,
            tile_url: DEFAULT_TILE_URL.to_owned(),
        }
    }
}

/// A pannable, zoomable tile map tracking the most recent click.
///
/// No marker exists until the first click. Each click replaces the marker
/// and notifies the listener; panning and zooming leave the marker alone.
///
/// # Examples
///
/// ```
/// use geotherm_core::Coordinate;
/// use geotherm_view::map::{MapConfig, MapSurface, ScreenPoint};
///
/// let mut clicks = Vec::new();
/// let mut surface = MapSurface::new(MapConfig::default(), |c: Coordinate| clicks.push(c));
/// assert!(surface.marker().is_none());
///
/// let clicked = surface.click_at(ScreenPoint::new(400.0, 200.0));
/// assert_eq!(surface.marker(), Some(clicked));
/// drop(surface);
/// assert_eq!(clicks.len(), 1);
/// ```
#[derive(Debug)]
pub struct MapSurface<L> {
    viewport: Viewport,
    tile_url: String,
    marker: Option<Coordinate>,
    listener: L,
}

impl<L> MapSurface<L> {
    /// Current viewport.
    #[must_use]
    pub const fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Position of the selection marker, if any click has happened.
    #[must_use]
    pub const fn marker(&self) -> Option<Coordinate> {
        self.marker
    }

    /// Screen position of the marker within the current viewport.
    #[must_use]
    pub fn marker_position(&self) -> Option<ScreenPoint> {
        self.marker
            .map(|coordinate| self.viewport.screen_position(coordinate))
    }

    /// Tiles to draw for the current viewport.
    #[must_use]
    pub fn visible_tiles(&self) -> Vec<PlacedTile> {
        self.viewport.visible_tiles()
    }

    /// URLs of the tiles to draw, in the order of [`Self::visible_tiles`].
    #[must_use]
    pub fn tile_urls(&self) -> Vec<String> {
        self.visible_tiles()
            .iter()
            .map(|placed| placed.tile.url(&self.tile_url))
            .collect()
    }

    /// Move the view by a screen-pixel offset.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.viewport.pan_by(dx, dy);
        log::debug!("panned to {} at zoom {}", self.viewport.center, self.viewport.zoom);
    }

    /// Set the zoom level, clamped to the served range.
    pub fn set_zoom(&mut self, zoom: u8) {
        self.viewport.set_zoom(zoom);
        log::debug!("zoom set to {}", self.viewport.zoom);
    }

    /// Zoom in one level.
    pub fn zoom_in(&mut self) {
        self.set_zoom(self.viewport.zoom.saturating_add(1));
    }

    /// Zoom out one level.
    pub fn zoom_out(&mut self) {
        self.set_zoom(self.viewport.zoom.saturating_sub(1));
    }
}

impl<L: SelectListener> MapSurface<L> {
    /// Create a surface showing `config`'s initial view.
    #[must_use]
    pub fn new(config: MapConfig, listener: L) -> Self {
        Self {
            viewport: Viewport::new(config.center, config.zoom, config.width, config.height),
            tile_url: config.tile_url,
            marker: None,
            listener,
        }
    }

    /// Handle a click at a screen pixel and return the clicked coordinate.
    pub fn click_at(&mut self, point: ScreenPoint) -> Coordinate {
        let coordinate = self.viewport.coordinate_at(point);
        self.select(coordinate);
        coordinate
    }

    /// Handle a click at a known coordinate.
    pub fn select(&mut self, coordinate: Coordinate) {
        self.listener.on_select(coordinate);
        self.marker = Some(coordinate);
    }
}
