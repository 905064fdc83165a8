//! [`ScoringService`] backed by the local site model.
#![forbid(unsafe_code)]

use async_trait::async_trait;
use geotherm_core::{Coordinate, ScoreError, ScoreResult, ScoringService};

use crate::SiteModel;

/// Answers scoring requests from a [`SiteModel`] without any network.
///
/// A location without raster data fails with [`ScoreError::Unavailable`],
/// which the view shows as a failed request.
///
/// # Examples
///
/// ```
/// use geotherm_core::{Coordinate, ScoringService};
/// use geotherm_scorer::{LocalScoringService, SiteModel};
///
/// let service = LocalScoringService::new(SiteModel::mock(42));
/// # let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
/// let result = runtime.block_on(service.score(Coordinate::new(38.5, -122.5)))?;
/// assert!(["Low", "Medium", "High"].contains(&result.feasible.as_str()));
/// # Ok::<(), geotherm_core::ScoreError>(())
/// ```
#[derive(Debug, Clone)]
pub struct LocalScoringService {
    model: SiteModel,
}

impl LocalScoringService {
    /// Serve scores from `model`.
    #[must_use]
    pub const fn new(model: SiteModel) -> Self {
        Self { model }
    }

    /// The underlying model.
    #[must_use]
    pub const fn model(&self) -> &SiteModel {
        &self.model
    }
}

#[async_trait]
impl ScoringService for LocalScoringService {
    async fn score(&self, coordinate: Coordinate) -> Result<ScoreResult, ScoreError> {
        self.model
            .evaluate(coordinate)
            .map(|evaluation| evaluation.to_result())
            .map_err(|err| {
                log::debug!("local model has no score for {coordinate}: {err}");
                ScoreError::Unavailable {
                    location: coordinate.to_string(),
                    message: err.to_string(),
                }
            })
    }
}
