//! Scoring service trait and its blanket implementations.

use std::sync::Arc;

use async_trait::async_trait;

use crate::{Coordinate, ScoreResult};

use super::error::ScoreError;

/// Score a single location.
///
/// Each call corresponds to exactly one request; implementations must not
/// retry, batch, or cache. Calls may overlap, and callers must not assume
/// that responses resolve in the order they were issued.
///
/// # Examples
///
/// ```rust
/// use async_trait::async_trait;
/// use geotherm_core::{Coordinate, ScoreError, ScoreResult, ScoringService};
///
/// struct Flat;
///
/// #[async_trait]
/// impl ScoringService for Flat {
///     async fn score(&self, _coordinate: Coordinate) -> Result<ScoreResult, ScoreError> {
///         Ok(ScoreResult::new(50.0, "Medium"))
///     }
/// }
///
/// # let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
/// let result = runtime.block_on(Flat.score(Coordinate::new(0.0, 0.0)))?;
/// assert_eq!(result.feasible, "Medium");
/// # Ok::<(), ScoreError>(())
/// ```
#[async_trait]
pub trait ScoringService: Send + Sync {
    /// Return the score for `coordinate`.
    async fn score(&self, coordinate: Coordinate) -> Result<ScoreResult, ScoreError>;
}

#[async_trait]
impl<T> ScoringService for Arc<T>
where
    T: ScoringService + ?Sized,
{
    async fn score(&self, coordinate: Coordinate) -> Result<ScoreResult, ScoreError> {
        (**self).score(coordinate).await
    }
}

#[async_trait]
impl<T> ScoringService for Box<T>
where
    T: ScoringService + ?Sized,
{
    async fn score(&self, coordinate: Coordinate) -> Result<ScoreResult, ScoreError> {
        (**self).score(coordinate).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    use crate::test_support::StubScoringService;

    fn block_on<F: std::future::Future>(future: F) -> F::Output {
        tokio::runtime::Builder::new_current_thread()
            .build()
            .expect("runtime should build")
            .block_on(future)
    }

    #[rstest]
    fn arc_forwards_to_inner_service() {
        let stub = Arc::new(StubScoringService::with_result(ScoreResult::new(
            61.0, "Medium",
        )));
        let shared: Arc<dyn ScoringService> = stub.clone();

        let result = block_on(shared.score(Coordinate::new(1.0, 2.0))).expect("stub result");

        assert_eq!(result, ScoreResult::new(61.0, "Medium"));
        assert_eq!(stub.requests(), vec![Coordinate::new(1.0, 2.0)]);
    }

    #[rstest]
    fn boxed_service_propagates_errors() {
        let boxed: Box<dyn ScoringService> = Box::new(StubScoringService::with_error(
            ScoreError::Parse {
                message: "expected value".to_owned(),
            },
        ));

        let err = block_on(boxed.score(Coordinate::new(0.0, 0.0))).expect_err("stub error");

        assert!(matches!(err, ScoreError::Parse { .. }));
    }
}
