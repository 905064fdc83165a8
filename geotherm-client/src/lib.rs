//! HTTP client for the geothermal scoring service.
//!
//! This crate provides [`HttpScoringClient`], an implementation of
//! [`geotherm_core::ScoringService`] that posts a clicked coordinate to the
//! scoring endpoint and decodes the score and feasibility it returns.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use geotherm_client::{HttpScoringClient, HttpScoringClientConfig};
//!
//! let config = HttpScoringClientConfig::new("http://localhost:5001")
//!     .with_timeout(Duration::from_secs(10))
//!     .with_user_agent("my-app/1.0");
//! let client = HttpScoringClient::with_config(config)?;
//! assert_eq!(client.endpoint().path(), "/api/score");
//! # Ok::<(), geotherm_client::ClientBuildError>(())
//! ```

#![forbid(unsafe_code)]

mod client;
pub mod wire;

pub use client::{
    ClientBuildError, DEFAULT_BASE_URL, DEFAULT_SCORE_PATH, DEFAULT_USER_AGENT, HttpScoringClient,
    HttpScoringClientConfig,
};
