//! Errors raised by the reference site model.
#![forbid(unsafe_code)]

use geotherm_core::Coordinate;
use thiserror::Error;

/// Errors raised while building rasters or evaluating a site.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SiteModelError {
    /// A raster has no usable value at the requested location.
    #[error("no valid {layer} data at {coordinate}")]
    NoData {
        /// Raster that was sampled.
        layer: &'static str,
        /// Location that was requested.
        coordinate: Coordinate,
    },
    /// Raster values do not fill the declared grid.
    #[error("raster of {width}x{height} cells needs {expected} values, got {actual}")]
    InvalidDimensions {
        /// Columns in the grid.
        width: usize,
        /// Rows in the grid.
        height: usize,
        /// Number of values the grid requires.
        expected: usize,
        /// Number of values supplied.
        actual: usize,
    },
    /// Pixel size is zero, negative, or not finite.
    #[error("raster pixel size {0} must be positive and finite")]
    InvalidPixelSize(f64),
}
