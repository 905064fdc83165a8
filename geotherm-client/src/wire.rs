//! JSON bodies exchanged with the `/api/score` endpoint.
//!
//! Requests carry `{"lat": <f64>, "lon": <f64>}`. Successful responses carry
//! `{"score": <number>, "feasible": <string>}`; any other fields are ignored.
//! Failed responses from the reference backend carry `{"error": <string>}`.

use geotherm_core::{Coordinate, ScoreResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of a scoring request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreRequest {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lon: f64,
}

impl From<Coordinate> for ScoreRequest {
    fn from(value: Coordinate) -> Self {
        Self {
            lat: value.latitude,
            lon: value.longitude,
        }
    }
}

/// Body of a successful scoring response.
///
/// `feasible` is decoded leniently. An absent or `null` value becomes an
/// empty string and any other non-string JSON value becomes its JSON text,
/// so unexpected payloads degrade to an empty description instead of an
/// error.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ScoreResponse {
    /// Numeric score. A missing or non-numeric score fails decoding.
    pub score: f64,
    /// Raw feasibility value.
    #[serde(default)]
    pub feasible: Option<Value>,
}

impl ScoreResponse {
    /// Convert the wire payload into the domain result.
    #[must_use]
    pub fn into_result(self) -> ScoreResult {
        let feasible = match self.feasible {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(text)) => text,
            Some(other) => other.to_string(),
        };
        ScoreResult::new(self.score, feasible)
    }
}

/// Body returned alongside a non-success status.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ErrorBody {
    /// Human-readable reason.
    pub error: String,
}
