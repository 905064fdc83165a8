//! North-up geographic rasters sampled by longitude and latitude.
#![forbid(unsafe_code)]

use std::ops::Range;

use geotherm_core::Coordinate;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::SiteModelError;

/// Placement and size of a raster grid in WGS84 degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridGeometry {
    /// Longitude of the grid's western edge.
    pub origin_lon: f64,
    /// Latitude of the grid's northern edge.
    pub origin_lat: f64,
    /// Edge length of one cell in degrees.
    pub pixel_size: f64,
    /// Number of columns.
    pub width: usize,
    /// Number of rows.
    pub height: usize,
}

impl GridGeometry {
    /// Whole-world grid of half-degree cells anchored at (-180, 90).
    pub const GLOBAL_HALF_DEGREE: Self = Self {
        origin_lon: -180.0,
        origin_lat: 90.0,
        pixel_size: 0.5,
        width: 720,
        height: 360,
    };

    /// Total number of cells.
    #[must_use]
    pub const fn cell_count(&self) -> usize {
        self.width.saturating_mul(self.height)
    }

    /// Row-major cell index containing `coordinate`.
    ///
    /// Cells include their north and west edges, so a point on the grid's
    /// southern or eastern boundary falls outside.
    #[must_use]
    #[expect(clippy::float_arithmetic, reason = "cell lookup is float maths")]
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "values are floored, non-negative, and bounds-checked below"
    )]
    pub fn cell_index(&self, coordinate: Coordinate) -> Option<usize> {
        let col = ((coordinate.longitude - self.origin_lon) / self.pixel_size).floor();
        let row = ((self.origin_lat - coordinate.latitude) / self.pixel_size).floor();
        if !col.is_finite() || !row.is_finite() || col < 0.0 || row < 0.0 {
            return None;
        }
        let (col_index, row_index) = (col as usize, row as usize);
        if col_index >= self.width || row_index >= self.height {
            return None;
        }
        row_index.checked_mul(self.width)?.checked_add(col_index)
    }
}

/// Single-band raster of `f32` cells.
///
/// # Examples
///
/// ```
/// use geotherm_core::Coordinate;
/// use geotherm_scorer::{GridGeometry, RasterGrid};
///
/// let geometry = GridGeometry {
///     origin_lon: 0.0,
///     origin_lat: 2.0,
///     pixel_size: 1.0,
///     width: 2,
///     height: 2,
/// };
/// let grid = RasterGrid::new(geometry, vec![1.0, 2.0, 3.0, 4.0], None)?;
/// assert_eq!(grid.sample(Coordinate::new(0.5, 1.5)), Some(4.0));
/// assert_eq!(grid.sample(Coordinate::new(5.0, 5.0)), None);
/// # Ok::<(), geotherm_scorer::SiteModelError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RasterGrid {
    geometry: GridGeometry,
    values: Vec<f32>,
    nodata: Option<f32>,
}

impl RasterGrid {
    /// Build a raster from row-major `values`, north row first.
    ///
    /// # Errors
    ///
    /// Returns [`SiteModelError::InvalidPixelSize`] for a non-positive pixel
    /// size and [`SiteModelError::InvalidDimensions`] when `values` does not
    /// fill the grid exactly.
    pub fn new(
        geometry: GridGeometry,
        values: Vec<f32>,
        nodata: Option<f32>,
    ) -> Result<Self, SiteModelError> {
        if !geometry.pixel_size.is_finite() || geometry.pixel_size <= 0.0 {
            return Err(SiteModelError::InvalidPixelSize(geometry.pixel_size));
        }
        let expected = geometry.cell_count();
        if values.len() != expected {
            return Err(SiteModelError::InvalidDimensions {
                width: geometry.width,
                height: geometry.height,
                expected,
                actual: values.len(),
            });
        }
        Ok(Self {
            geometry,
            values,
            nodata,
        })
    }

    /// Global half-degree raster of uniform random values in `range`.
    ///
    /// The same `seed` always yields the same raster.
    ///
    /// # Panics
    ///
    /// Panics if `range` is empty.
    #[must_use]
    pub fn mock(seed: u64, range: Range<f32>) -> Self {
        let geometry = GridGeometry::GLOBAL_HALF_DEGREE;
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let values = (0..geometry.cell_count())
            .map(|_| rng.gen_range(range.clone()))
            .collect();
        Self {
            geometry,
            values,
            nodata: None,
        }
    }

    /// Grid placement and size.
    #[must_use]
    pub const fn geometry(&self) -> &GridGeometry {
        &self.geometry
    }

    /// Value at `coordinate`, or `None` outside the grid, on a nodata cell,
    /// or on a non-finite cell.
    #[must_use]
    #[expect(clippy::float_cmp, reason = "nodata sentinels match exactly")]
    pub fn sample(&self, coordinate: Coordinate) -> Option<f64> {
        let index = self.geometry.cell_index(coordinate)?;
        let value = *self.values.get(index)?;
        if self.nodata == Some(value) || !value.is_finite() {
            return None;
        }
        Some(f64::from(value))
    }
}
