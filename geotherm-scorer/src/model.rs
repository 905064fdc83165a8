//! Weighted geothermal site score from heat flow, temperature, and faults.
#![forbid(unsafe_code)]

use geotherm_core::{Coordinate, Feasibility, ScoreResult};

use crate::{FaultZones, RasterGrid, SiteModelError};

/// Scores below this are [`Feasibility::Low`].
pub const MEDIUM_THRESHOLD: f64 = 40.0;

/// Scores at or above this are [`Feasibility::High`].
pub const HIGH_THRESHOLD: f64 = 70.0;

/// Heat flow of 40–120 mW/m² maps onto `0..=1`.
pub const HEATFLOW_SCALE: Normalisation = Normalisation {
    floor: 40.0,
    span: 80.0,
};

/// Temperature of 5–30 °C maps onto `0..=1`.
pub const TEMPERATURE_SCALE: Normalisation = Normalisation {
    floor: 5.0,
    span: 25.0,
};

/// Linear rescaling of a raw measurement into `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normalisation {
    /// Raw value mapped to zero.
    pub floor: f64,
    /// Distance above `floor` mapped to one.
    pub span: f64,
}

impl Normalisation {
    /// Rescale `raw` and clamp the result to `0.0..=1.0`.
    #[must_use]
    #[expect(clippy::float_arithmetic, reason = "normalisation is float maths")]
    pub fn apply(self, raw: f64) -> f64 {
        ((raw - self.floor) / self.span).clamp(0.0, 1.0)
    }
}

/// Points contributed by each signal at full strength.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreWeights {
    /// Weight of normalised heat flow.
    pub heatflow: f64,
    /// Weight of normalised temperature.
    pub temperature: f64,
    /// Bonus for lying in a fault zone.
    pub fault: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            heatflow: 50.0,
            temperature: 40.0,
            fault: 10.0,
        }
    }
}

/// Feasibility level for an unrounded score.
///
/// ```
/// use geotherm_core::Feasibility;
/// use geotherm_scorer::classify;
///
/// assert_eq!(classify(39.99), Feasibility::Low);
/// assert_eq!(classify(40.0), Feasibility::Medium);
/// assert_eq!(classify(70.0), Feasibility::High);
/// ```
#[must_use]
pub fn classify(score: f64) -> Feasibility {
    if score < MEDIUM_THRESHOLD {
        Feasibility::Low
    } else if score < HIGH_THRESHOLD {
        Feasibility::Medium
    } else {
        Feasibility::High
    }
}

/// Round to two decimals, sending ties to the even neighbour.
#[expect(clippy::float_arithmetic, reason = "rounding is float maths")]
fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

/// Everything the model worked out for one location.
#[derive(Debug, Clone, PartialEq)]
pub struct SiteEvaluation {
    /// Location evaluated.
    pub coordinate: Coordinate,
    /// Sampled heat flow in mW/m².
    pub heatflow: f64,
    /// Sampled temperature in °C.
    pub temperature: f64,
    /// Whether the location lies in a fault zone.
    pub in_fault_zone: bool,
    /// Weighted score rounded to two decimals.
    pub score: f64,
    /// Level derived from the unrounded score.
    pub feasibility: Feasibility,
}

impl SiteEvaluation {
    /// The score and feasibility as the scoring endpoint reports them.
    #[must_use]
    pub fn to_result(&self) -> ScoreResult {
        ScoreResult::from((self.score, self.feasibility))
    }
}

/// Reference model combining two rasters and a set of fault zones.
#[derive(Debug, Clone, PartialEq)]
pub struct SiteModel {
    heatflow: RasterGrid,
    temperature: RasterGrid,
    faults: FaultZones,
    weights: ScoreWeights,
}

impl SiteModel {
    /// Build a model with the default weights.
    #[must_use]
    pub fn new(heatflow: RasterGrid, temperature: RasterGrid, faults: FaultZones) -> Self {
        Self {
            heatflow,
            temperature,
            faults,
            weights: ScoreWeights::default(),
        }
    }

    /// Global mock data: heat flow of 50–150 mW/m², temperature of 10–35 °C,
    /// and the single mock fault square.
    #[must_use]
    pub fn mock(seed: u64) -> Self {
        Self::new(
            RasterGrid::mock(seed, 50.0..150.0),
            RasterGrid::mock(seed.wrapping_add(1), 10.0..35.0),
            FaultZones::mock(),
        )
    }

    /// Replace the signal weights.
    #[must_use]
    pub const fn with_weights(mut self, weights: ScoreWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Weights in use.
    #[must_use]
    pub const fn weights(&self) -> ScoreWeights {
        self.weights
    }

    /// Score the site at `coordinate`.
    ///
    /// # Errors
    ///
    /// Returns [`SiteModelError::NoData`] when either raster has no value
    /// at the location.
    #[expect(clippy::float_arithmetic, reason = "weighted sum is float maths")]
    pub fn evaluate(&self, coordinate: Coordinate) -> Result<SiteEvaluation, SiteModelError> {
        let heatflow = self
            .heatflow
            .sample(coordinate)
            .ok_or(SiteModelError::NoData {
                layer: "heat flow",
                coordinate,
            })?;
        let temperature = self
            .temperature
            .sample(coordinate)
            .ok_or(SiteModelError::NoData {
                layer: "temperature",
                coordinate,
            })?;
        let in_fault_zone = self.faults.contains(coordinate);

        let fault_score = if in_fault_zone { 1.0 } else { 0.0 };
        let raw = HEATFLOW_SCALE.apply(heatflow) * self.weights.heatflow
            + TEMPERATURE_SCALE.apply(temperature) * self.weights.temperature
            + fault_score * self.weights.fault;
        let feasibility = classify(raw);
        log::debug!(
            "site {coordinate}: heat flow {heatflow}, temperature {temperature}, \
             fault zone {in_fault_zone}, score {raw} ({feasibility})"
        );

        Ok(SiteEvaluation {
            coordinate,
            heatflow,
            temperature,
            in_fault_zone,
            score: round_to_hundredths(raw),
            feasibility,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GridGeometry;
    use rstest::rstest;

    /// 40°×40° grid around the origin holding a single value.
    fn uniform(value: f32) -> RasterGrid {
        let geometry = GridGeometry {
            origin_lon: -20.0,
            origin_lat: 20.0,
            pixel_size: 1.0,
            width: 40,
            height: 40,
        };
        RasterGrid::new(geometry, vec![value; geometry.cell_count()], None).expect("valid grid")
    }

    fn model(heatflow: f32, temperature: f32) -> SiteModel {
        SiteModel::new(uniform(heatflow), uniform(temperature), FaultZones::mock())
    }

    const IN_FAULT: Coordinate = Coordinate::new(5.0, -5.0);
    const OUTSIDE_FAULT: Coordinate = Coordinate::new(5.0, 5.0);

    #[rstest]
    #[case(120.0, 30.0, IN_FAULT, 100.0, Feasibility::High)]
    #[case(80.0, 17.5, OUTSIDE_FAULT, 45.0, Feasibility::Medium)]
    #[case(40.0, 5.0, IN_FAULT, 10.0, Feasibility::Low)]
    #[case(200.0, -3.0, OUTSIDE_FAULT, 50.0, Feasibility::Medium)]
    #[case(61.25, 5.0, OUTSIDE_FAULT, 13.28, Feasibility::Low)]
    #[case(120.0, 20.0, OUTSIDE_FAULT, 74.0, Feasibility::High)]
    fn weighted_score(
        #[case] heatflow: f32,
        #[case] temperature: f32,
        #[case] coordinate: Coordinate,
        #[case] score: f64,
        #[case] feasibility: Feasibility,
    ) {
        let evaluation = model(heatflow, temperature)
            .evaluate(coordinate)
            .expect("data available");
        assert!(
            (evaluation.score - score).abs() < 1e-9,
            "expected {score}, got {}",
            evaluation.score
        );
        assert_eq!(evaluation.feasibility, feasibility);
        assert_eq!(evaluation.in_fault_zone, coordinate == IN_FAULT);
    }

    #[rstest]
    fn classification_uses_unrounded_score() {
        // 39.995 rounds up to 40.0 for display but is still Low.
        assert_eq!(classify(39.995), Feasibility::Low);
        assert!((round_to_hundredths(39.995_1) - 40.0).abs() < 1e-9);
    }

    #[rstest]
    #[case(0.125, 0.12)]
    #[case(0.375, 0.38)]
    #[case(72.345_01, 72.35)]
    #[case(-0.125, -0.12)]
    fn hundredths_ties_round_to_even(#[case] value: f64, #[case] expected: f64) {
        assert!(
            (round_to_hundredths(value) - expected).abs() < 1e-9,
            "{value} rounded to {}",
            round_to_hundredths(value)
        );
    }

    #[rstest]
    fn missing_heatflow_is_no_data() {
        let err = model(80.0, 20.0)
            .evaluate(Coordinate::new(45.0, 5.0))
            .expect_err("outside grid");
        assert_eq!(
            err,
            SiteModelError::NoData {
                layer: "heat flow",
                coordinate: Coordinate::new(45.0, 5.0),
            }
        );
    }

    #[rstest]
    fn custom_weights_apply() {
        let weights = ScoreWeights {
            heatflow: 0.0,
            temperature: 0.0,
            fault: 100.0,
        };
        let evaluation = model(120.0, 30.0)
            .with_weights(weights)
            .evaluate(IN_FAULT)
            .expect("data available");
        assert!((evaluation.score - 100.0).abs() < 1e-9);
        assert_eq!(
            evaluation.to_result(),
            ScoreResult::new(100.0, "High")
        );
    }

    #[rstest]
    fn mock_model_covers_the_globe() {
        let model = SiteModel::mock(42);
        let evaluation = model
            .evaluate(Coordinate::new(-1.3, 36.8))
            .expect("mock rasters cover the globe");
        assert!((50.0..150.0).contains(&evaluation.heatflow));
        assert!((10.0..35.0).contains(&evaluation.temperature));
        assert!((0.0..=100.0).contains(&evaluation.score));
        assert!(!evaluation.in_fault_zone);
    }
}
