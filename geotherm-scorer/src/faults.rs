//! Tectonic fault zones used as a bonus signal.
#![forbid(unsafe_code)]

use geo::{Intersects, MultiPolygon, Point, Polygon, Rect, coord};
use geotherm_core::Coordinate;

/// Areas treated as lying on an active tectonic fault.
#[derive(Debug, Clone, PartialEq)]
pub struct FaultZones {
    zones: MultiPolygon<f64>,
}

impl Default for FaultZones {
    fn default() -> Self {
        Self::new(MultiPolygon::new(Vec::new()))
    }
}

impl FaultZones {
    /// Wrap polygons in `(longitude, latitude)` order.
    #[must_use]
    pub const fn new(zones: MultiPolygon<f64>) -> Self {
        Self { zones }
    }

    /// The single square zone spanning 10°W–0° and 0°–10°N.
    #[must_use]
    pub fn mock() -> Self {
        let square = Rect::new(coord! { x: -10.0, y: 0.0 }, coord! { x: 0.0, y: 10.0 });
        Self::from(vec![square.to_polygon()])
    }

    /// Whether `coordinate` lies inside or on the edge of any zone.
    ///
    /// ```
    /// use geotherm_core::Coordinate;
    /// use geotherm_scorer::FaultZones;
    ///
    /// let zones = FaultZones::mock();
    /// assert!(zones.contains(Coordinate::new(5.0, -5.0)));
    /// assert!(zones.contains(Coordinate::new(10.0, 0.0)));
    /// assert!(!zones.contains(Coordinate::new(-1.3, 36.8)));
    /// ```
    #[must_use]
    pub fn contains(&self, coordinate: Coordinate) -> bool {
        self.zones.intersects(&Point::from(coordinate))
    }

    /// Number of polygons.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.zones.0.len()
    }

    /// Whether there are no zones at all.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.zones.0.is_empty()
    }
}

impl From<Vec<Polygon<f64>>> for FaultZones {
    fn from(polygons: Vec<Polygon<f64>>) -> Self {
        Self::new(MultiPolygon::new(polygons))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Coordinate::new(5.0, -5.0), true)]
    #[case(Coordinate::new(0.0, -10.0), true)]
    #[case(Coordinate::new(0.0, 0.0), true)]
    #[case(Coordinate::new(10.0, -5.0), true)]
    #[case(Coordinate::new(10.1, -5.0), false)]
    #[case(Coordinate::new(5.0, 0.1), false)]
    #[case(Coordinate::new(35.7, 139.7), false)]
    fn mock_zone_includes_its_boundary(#[case] coordinate: Coordinate, #[case] inside: bool) {
        assert_eq!(FaultZones::mock().contains(coordinate), inside);
    }

    #[rstest]
    fn default_has_no_zones() {
        let zones = FaultZones::default();
        assert!(zones.is_empty());
        assert!(!zones.contains(Coordinate::new(5.0, -5.0)));
        assert_eq!(FaultZones::mock().len(), 1);
    }
}
