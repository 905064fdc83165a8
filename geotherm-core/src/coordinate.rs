//! Geographic coordinates captured from map clicks.

use std::fmt;

use geo::{Coord, Point};
use thiserror::Error;

/// Largest valid absolute latitude in degrees.
pub const MAX_LATITUDE: f64 = 90.0;

/// Largest valid absolute longitude in degrees.
pub const MAX_LONGITUDE: f64 = 180.0;

/// A latitude/longitude pair in WGS84 degrees.
///
/// Conversions to and from [`geo`] types follow the `x = longitude`,
/// `y = latitude` convention.
///
/// # Examples
///
/// ```
/// use geo::Coord;
/// use geotherm_core::Coordinate;
///
/// let coordinate = Coordinate::new(12.5, 77.2);
/// let coord: Coord = coordinate.into();
/// assert_eq!(coord.x, 77.2);
/// assert_eq!(coord.y, 12.5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coordinate {
    /// Degrees north of the equator, `-90.0..=90.0`.
    pub latitude: f64,
    /// Degrees east of the prime meridian, `-180.0..=180.0`.
    pub longitude: f64,
}

/// Errors returned by [`Coordinate::try_new`].
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum CoordinateError {
    /// One of the components was NaN or infinite.
    #[error("coordinate components must be finite")]
    NotFinite,
    /// Latitude fell outside `-90.0..=90.0`.
    #[error("latitude {0} is outside -90..=90")]
    LatitudeOutOfRange(f64),
    /// Longitude fell outside `-180.0..=180.0`.
    #[error("longitude {0} is outside -180..=180")]
    LongitudeOutOfRange(f64),
}

impl Coordinate {
    /// Build a coordinate without validation.
    ///
    /// Map clicks always yield in-range values, so the hot path skips the
    /// checks performed by [`Coordinate::try_new`].
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Validate and construct a coordinate.
    ///
    /// # Errors
    ///
    /// Returns [`CoordinateError`] when either component is not finite or
    /// lies outside its valid range.
    pub fn try_new(latitude: f64, longitude: f64) -> Result<Self, CoordinateError> {
        if !latitude.is_finite() || !longitude.is_finite() {
            return Err(CoordinateError::NotFinite);
        }
        if latitude.abs() > MAX_LATITUDE {
            return Err(CoordinateError::LatitudeOutOfRange(latitude));
        }
        if longitude.abs() > MAX_LONGITUDE {
            return Err(CoordinateError::LongitudeOutOfRange(longitude));
        }
        Ok(Self::new(latitude, longitude))
    }

    /// Whether both components lie within their valid ranges.
    #[must_use]
    pub fn is_in_range(&self) -> bool {
        Self::try_new(self.latitude, self.longitude).is_ok()
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.latitude, self.longitude)
    }
}

impl From<Coordinate> for Coord<f64> {
    fn from(value: Coordinate) -> Self {
        Self {
            x: value.longitude,
            y: value.latitude,
        }
    }
}

impl From<Coord<f64>> for Coordinate {
    fn from(value: Coord<f64>) -> Self {
        Self::new(value.y, value.x)
    }
}

impl From<Coordinate> for Point<f64> {
    fn from(value: Coordinate) -> Self {
        Self::from(Coord::from(value))
    }
}
