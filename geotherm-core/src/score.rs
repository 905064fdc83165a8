//! Scores returned by the scoring service and the view-level error marker.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Categorical judgement of whether conditions favour geothermal development.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Feasibility {
    /// Conditions are not favourable.
    Low,
    /// Conditions are partially favourable.
    Medium,
    /// Conditions are favourable.
    High,
}

/// Returned when a string does not name a [`Feasibility`] level.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown feasibility level {0:?}")]
pub struct ParseFeasibilityError(pub String);

impl Feasibility {
    /// Wire name of the level, as sent by the scoring service.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }

    /// Human-readable sentence describing the level.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Low => "Low feasibility: not favorable conditions",
            Self::Medium => "Medium feasibility: partially favorable conditions",
            Self::High => "High feasibility: favorable conditions",
        }
    }
}

impl fmt::Display for Feasibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Feasibility {
    type Err = ParseFeasibilityError;

    /// Matching is exact and case-sensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Low" => Ok(Self::Low),
            "Medium" => Ok(Self::Medium),
            "High" => Ok(Self::High),
            other => Err(ParseFeasibilityError(other.to_owned())),
        }
    }
}

/// Score and feasibility for a single location.
///
/// `feasible` keeps the raw string returned by the service. Values outside the
/// `Low`/`Medium`/`High` taxonomy are retained so the view can still show them,
/// with an empty description.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoreResult {
    /// Geothermal potential, nominally `0..=100`. Not range-checked.
    pub score: f64,
    /// Feasibility level as reported by the service.
    pub feasible: String,
}

impl ScoreResult {
    /// Construct a result from a score and a raw feasibility string.
    #[must_use]
    pub fn new(score: f64, feasible: impl Into<String>) -> Self {
        Self {
            score,
            feasible: feasible.into(),
        }
    }

    /// Parsed feasibility level, or `None` for out-of-taxonomy values.
    #[must_use]
    pub fn feasibility(&self) -> Option<Feasibility> {
        self.feasible.parse().ok()
    }
}

impl From<(f64, Feasibility)> for ScoreResult {
    fn from((score, feasibility): (f64, Feasibility)) -> Self {
        Self::new(score, feasibility.as_str())
    }
}

/// Marker recorded by the view when a scoring request fails.
///
/// The marker carries no detail: network failures, HTTP errors, and
/// malformed bodies all surface as the same message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Error)]
#[error("Error fetching data")]
pub struct RequestError;
