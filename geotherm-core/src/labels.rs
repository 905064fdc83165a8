//! Pure label formatting for displayed scores.
//!
//! Every function here is stateless and recomputed on each render from the
//! current [`ScoreResult`](crate::ScoreResult); nothing is cached.

use std::fmt;

use crate::Feasibility;

/// Upper bound (exclusive) of the low band.
pub const MODERATE_THRESHOLD: f64 = 40.0;

/// Upper bound (exclusive) of the moderate band.
pub const HIGH_THRESHOLD: f64 = 70.0;

/// Display band a score falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScoreBand {
    /// Scores below 40.
    Low,
    /// Scores from 40 up to, but excluding, 70.
    Moderate,
    /// Scores of 70 and above.
    High,
}

impl ScoreBand {
    /// Descriptive label shown under the score.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "Low geothermal potential (0–39)",
            Self::Moderate => "Moderate geothermal potential (40–69)",
            Self::High => "High geothermal potential (70–100)",
        }
    }
}

impl fmt::Display for ScoreBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classify a score into its display band.
///
/// Comparisons are strict, so 40 and 70 belong to the next band up. Values
/// for which no comparison holds (NaN) land in [`ScoreBand::High`].
///
/// # Examples
///
/// ```
/// use geotherm_core::{ScoreBand, score_band};
///
/// assert_eq!(score_band(39.0), ScoreBand::Low);
/// assert_eq!(score_band(40.0), ScoreBand::Moderate);
/// assert_eq!(score_band(70.0), ScoreBand::High);
/// ```
#[must_use]
pub fn score_band(score: f64) -> ScoreBand {
    if score < MODERATE_THRESHOLD {
        ScoreBand::Low
    } else if score < HIGH_THRESHOLD {
        ScoreBand::Moderate
    } else {
        ScoreBand::High
    }
}

/// Describe a raw feasibility string.
///
/// Returns an empty string for anything outside the `Low`/`Medium`/`High`
/// taxonomy; no error is raised.
#[must_use]
pub fn feasibility_label(raw: &str) -> &'static str {
    raw.parse::<Feasibility>()
        .map_or("", Feasibility::description)
}

/// Render a score the way the view prints it.
///
/// Whole numbers print without a fractional part (`85`), others keep their
/// shortest exact representation (`72.35`).
#[must_use]
pub fn format_score(score: f64) -> String {
    score.to_string()
}
