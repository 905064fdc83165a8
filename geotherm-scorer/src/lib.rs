//! Reference geothermal site model.
//!
//! The model scores a location from three signals:
//! - **heat flow** sampled from a [`RasterGrid`] and rescaled from
//!   40–120 mW/m² onto `0..=1`;
//! - **temperature** sampled from a second raster and rescaled from 5–30 °C;
//! - membership of a tectonic [`FaultZones`] polygon.
//!
//! The weighted sum (50, 40, and 10 points by default) is rounded to two
//! decimals and classified as `Low` below 40, `Medium` below 70, and `High`
//! otherwise. [`LocalScoringService`] exposes the model through
//! [`ScoringService`](geotherm_core::ScoringService) so the host view can run
//! without a scoring server.
//!
//! # Examples
//!
//! ```
//! use geotherm_core::Coordinate;
//! use geotherm_scorer::SiteModel;
//!
//! let model = SiteModel::mock(42);
//! let evaluation = model.evaluate(Coordinate::new(5.0, -5.0))?;
//! assert!(evaluation.in_fault_zone);
//! assert!(evaluation.score >= 10.0);
//! # Ok::<(), geotherm_scorer::SiteModelError>(())
//! ```

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod error;
mod faults;
mod model;
mod raster;
mod service;

pub use error::SiteModelError;
pub use faults::FaultZones;
pub use model::{
    HEATFLOW_SCALE, HIGH_THRESHOLD, MEDIUM_THRESHOLD, Normalisation, ScoreWeights,
    SiteEvaluation, SiteModel, TEMPERATURE_SCALE, classify,
};
pub use raster::{GridGeometry, RasterGrid};
pub use service::LocalScoringService;
