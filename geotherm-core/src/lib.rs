//! Core domain types for the geothermal feasibility explorer.
//!
//! The crate models the two values that travel between the map and the
//! scoring service: a clicked [`Coordinate`] and the [`ScoreResult`] that
//! comes back. It also owns the pure label formatting used when the result
//! is displayed, and the [`ScoringService`] seam that the HTTP client and the
//! local reference model both implement.
//!
//! # Examples
//!
//! ```
//! use geotherm_core::{Coordinate, ScoreResult, feasibility_label, score_band};
//!
//! let clicked = Coordinate::new(12.5, 77.2);
//! assert_eq!(clicked.latitude, 12.5);
//!
//! let result = ScoreResult::new(85.0, "High");
//! assert_eq!(score_band(result.score).label(), "High geothermal potential (70–100)");
//! assert_eq!(feasibility_label(&result.feasible), "High feasibility: favorable conditions");
//! ```

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod coordinate;
pub mod labels;
mod score;
pub mod service;

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use coordinate::{Coordinate, CoordinateError, MAX_LATITUDE, MAX_LONGITUDE};
pub use labels::{ScoreBand, feasibility_label, format_score, score_band};
pub use score::{Feasibility, ParseFeasibilityError, RequestError, ScoreResult};
pub use service::{ScoreError, ScoringService};
