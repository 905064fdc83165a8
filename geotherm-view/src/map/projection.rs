//! Spherical Web Mercator (EPSG:3857) in world-pixel space.
//!
//! World pixels run from `(0, 0)` at the north-west corner to
//! `(256 * 2^zoom, 256 * 2^zoom)` at the south-east corner, matching the
//! slippy-map tile scheme used by OpenStreetMap.

use std::f64::consts::PI;

use geotherm_core::Coordinate;

/// Edge length of a map tile in pixels.
pub const TILE_SIZE: f64 = 256.0;

/// Latitude at which Web Mercator is cut off, in degrees.
pub const MAX_MERCATOR_LATITUDE: f64 = 85.051_128_779_806_59;

/// A position in world pixels at some zoom level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldPoint {
    /// Pixels east of the antimeridian.
    pub x: f64,
    /// Pixels south of the northern cut-off.
    pub y: f64,
}

/// Width and height of the world at `zoom`, in pixels.
#[must_use]
#[expect(clippy::float_arithmetic, reason = "tile scaling is float maths")]
pub fn world_size(zoom: u8) -> f64 {
    TILE_SIZE * f64::from(zoom).exp2()
}

/// Wrap a longitude into `[-180, 180)`.
#[must_use]
#[expect(clippy::float_arithmetic, reason = "longitude wrapping is float maths")]
pub fn wrap_longitude(longitude: f64) -> f64 {
    (longitude + 180.0).rem_euclid(360.0) - 180.0
}

/// Clamp a latitude to the Web Mercator limits.
#[must_use]
#[expect(clippy::float_arithmetic, reason = "the southern limit is a negation")]
pub fn clamp_latitude(latitude: f64) -> f64 {
    latitude.clamp(-MAX_MERCATOR_LATITUDE, MAX_MERCATOR_LATITUDE)
}

/// Project a coordinate to world pixels.
#[must_use]
#[expect(clippy::float_arithmetic, reason = "projection is float maths")]
pub fn project(coordinate: Coordinate, zoom: u8) -> WorldPoint {
    let size = world_size(zoom);
    let sin_lat = clamp_latitude(coordinate.latitude).to_radians().sin();
    let x = (coordinate.longitude + 180.0) / 360.0 * size;
    let y = (0.5 - ((1.0 + sin_lat) / (1.0 - sin_lat)).ln() / (4.0 * PI)) * size;
    WorldPoint { x, y }
}

/// Convert world pixels back to a coordinate.
///
/// `y` is clamped to the world's extent and the longitude is wrapped, so the
/// result is always a valid coordinate.
#[must_use]
#[expect(clippy::float_arithmetic, reason = "projection is float maths")]
pub fn unproject(point: WorldPoint, zoom: u8) -> Coordinate {
    let size = world_size(zoom);
    let y = point.y.clamp(0.0, size);
    let longitude = wrap_longitude(point.x / size * 360.0 - 180.0);
    let n = PI - 2.0 * PI * y / size;
    let latitude = clamp_latitude(n.sinh().atan().to_degrees());
    Coordinate::new(latitude, longitude)
}
