//! Slippy-map tile addressing.

use std::fmt;

/// Default OpenStreetMap raster tile template.
pub const DEFAULT_TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";

/// Subdomains substituted for `{s}`.
const SUBDOMAINS: [&str; 3] = ["a", "b", "c"];

/// Address of one 256×256 tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileRef {
    /// Zoom level.
    pub z: u8,
    /// Column, `0..2^z`.
    pub x: u32,
    /// Row, `0..2^z`.
    pub y: u32,
}

impl TileRef {
    /// Subdomain serving this tile, chosen by `(x + y) mod 3`.
    #[must_use]
    #[expect(
        clippy::integer_division_remainder_used,
        reason = "subdomains rotate cyclically"
    )]
    pub fn subdomain(&self) -> &'static str {
        let index = (u64::from(self.x) + u64::from(self.y)) % 3;
        match index {
            0 => SUBDOMAINS[0],
            1 => SUBDOMAINS[1],
            _ => SUBDOMAINS[2],
        }
    }

    /// Expand a `{s}`/`{z}`/`{x}`/`{y}` template for this tile.
    ///
    /// # Examples
    ///
    /// ```
    /// use geotherm_view::map::{DEFAULT_TILE_URL, TileRef};
    ///
    /// let tile = TileRef { z: 2, x: 1, y: 1 };
    /// assert_eq!(tile.url(DEFAULT_TILE_URL), "https://c.tile.openstreetmap.org/2/1/1.png");
    /// ```
    #[must_use]
    pub fn url(&self, template: &str) -> String {
        template
            .replace("{s}", self.subdomain())
            .replace("{z}", &self.z.to_string())
            .replace("{x}", &self.x.to_string())
            .replace("{y}", &self.y.to_string())
    }
}

impl fmt::Display for TileRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.z, self.x, self.y)
    }
}

/// A tile together with the screen offset of its top-left corner.
///
/// When the viewport is wider than the world, the same tile appears more
/// than once at different offsets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedTile {
    /// Tile address.
    pub tile: TileRef,
    /// Screen x of the tile's left edge.
    pub left: f64,
    /// Screen y of the tile's top edge.
    pub top: f64,
}
