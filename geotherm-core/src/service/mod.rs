//! Fetch geothermal scores for a clicked location.
//!
//! The [`ScoringService`] trait abstracts the call the host view makes after
//! every click. The HTTP client and the local reference model both implement
//! it, and tests substitute the doubles in [`crate::test_support`].
//!
//! Implementations report detailed [`ScoreError`] values. The view collapses
//! them into a single generic marker for display.

mod error;
mod provider;

pub use error::ScoreError;
pub use provider::ScoringService;
