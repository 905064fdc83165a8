//! Facade crate for the geothermal feasibility explorer.
//!
//! This crate re-exports the core domain types and the map view, and exposes
//! the HTTP scoring client and the reference site model behind feature flags.

#![forbid(unsafe_code)]

pub use geotherm_core::{
    Coordinate, CoordinateError, Feasibility, RequestError, ScoreBand, ScoreError, ScoreResult,
    ScoringService, feasibility_label, format_score, score_band,
};
pub use geotherm_view::map;
pub use geotherm_view::{
    HostView, MapEvent, RenderedView, Session, SessionStats, ViewState,
};

#[cfg(feature = "http-client")]
pub use geotherm_client::{HttpScoringClient, HttpScoringClientConfig};

#[cfg(feature = "reference-model")]
pub use geotherm_scorer::{LocalScoringService, SiteModel};
