//! Test doubles for [`ScoringService`] used by unit and behaviour tests.
//!
//! [`StubScoringService`] answers immediately with a scripted outcome.
//! [`DeferredScoringService`] parks every call until the test resolves it,
//! which lets tests control the order in which overlapping requests finish.

use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use tokio::sync::oneshot;

use crate::{Coordinate, ScoreError, ScoreResult, ScoringService};

type Outcome = Result<ScoreResult, ScoreError>;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Stub `ScoringService` returning a fixed outcome and recording requests.
///
/// # Example
///
/// ```
/// use geotherm_core::test_support::StubScoringService;
/// use geotherm_core::{Coordinate, ScoreResult, ScoringService};
///
/// let stub = StubScoringService::with_result(ScoreResult::new(85.0, "High"));
/// # let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
/// let result = runtime.block_on(stub.score(Coordinate::new(12.5, 77.2)));
/// assert!(result.is_ok());
/// assert_eq!(stub.requests(), vec![Coordinate::new(12.5, 77.2)]);
/// ```
#[derive(Debug)]
pub struct StubScoringService {
    outcome: Mutex<Outcome>,
    requests: Mutex<Vec<Coordinate>>,
}

impl StubScoringService {
    /// Create a service that succeeds with `result` for every call.
    #[must_use]
    pub const fn with_result(result: ScoreResult) -> Self {
        Self::with_outcome(Ok(result))
    }

    /// Create a service that fails with `error` for every call.
    #[must_use]
    pub const fn with_error(error: ScoreError) -> Self {
        Self::with_outcome(Err(error))
    }

    /// Create a service failing with a connection-refused network error.
    #[must_use]
    pub fn unreachable() -> Self {
        Self::with_error(ScoreError::Network {
            url: "http://localhost:5001/api/score".to_owned(),
            message: "connection refused".to_owned(),
        })
    }

    const fn with_outcome(outcome: Outcome) -> Self {
        Self {
            outcome: Mutex::new(outcome),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Replace the outcome returned by subsequent calls.
    pub fn set_outcome(&self, outcome: Result<ScoreResult, ScoreError>) {
        *lock(&self.outcome) = outcome;
    }

    /// Coordinates received so far, in call order.
    #[must_use]
    pub fn requests(&self) -> Vec<Coordinate> {
        lock(&self.requests).clone()
    }
}

#[async_trait]
impl ScoringService for StubScoringService {
    async fn score(&self, coordinate: Coordinate) -> Result<ScoreResult, ScoreError> {
        lock(&self.requests).push(coordinate);
        lock(&self.outcome).clone()
    }
}

#[derive(Debug)]
struct PendingCall {
    coordinate: Coordinate,
    reply: Option<oneshot::Sender<Outcome>>,
}

/// `ScoringService` whose calls stay in flight until explicitly resolved.
///
/// Calls are numbered from zero in the order they start. A call whose reply
/// handle is dropped without being resolved fails with a network error.
#[derive(Debug, Default)]
pub struct DeferredScoringService {
    calls: Mutex<Vec<PendingCall>>,
}

impl DeferredScoringService {
    /// Create a service with no calls in flight.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of calls started so far.
    #[must_use]
    pub fn started(&self) -> usize {
        lock(&self.calls).len()
    }

    /// Coordinates received so far, in call order.
    #[must_use]
    pub fn requests(&self) -> Vec<Coordinate> {
        lock(&self.calls).iter().map(|call| call.coordinate).collect()
    }

    /// Complete call `index` with `outcome`.
    ///
    /// Returns `false` when the call does not exist, was already resolved, or
    /// its caller has gone away.
    pub fn resolve(&self, index: usize, outcome: Result<ScoreResult, ScoreError>) -> bool {
        let reply = lock(&self.calls)
            .get_mut(index)
            .and_then(|call| call.reply.take());
        reply.is_some_and(|sender| sender.send(outcome).is_ok())
    }
}

#[async_trait]
impl ScoringService for DeferredScoringService {
    async fn score(&self, coordinate: Coordinate) -> Result<ScoreResult, ScoreError> {
        let (sender, receiver) = oneshot::channel();
        lock(&self.calls).push(PendingCall {
            coordinate,
            reply: Some(sender),
        });
        receiver.await.unwrap_or_else(|_| {
            Err(ScoreError::Network {
                url: "deferred://score".to_owned(),
                message: "request abandoned".to_owned(),
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn runtime() -> tokio::runtime::Runtime {
        tokio::runtime::Builder::new_current_thread()
            .build()
            .expect("runtime should build")
    }

    #[rstest]
    fn stub_records_every_request() {
        let stub = StubScoringService::unreachable();
        let rt = runtime();

        let first = rt.block_on(stub.score(Coordinate::new(1.0, 1.0)));
        let second = rt.block_on(stub.score(Coordinate::new(2.0, 2.0)));

        assert!(matches!(first, Err(ScoreError::Network { .. })));
        assert!(second.is_err());
        assert_eq!(
            stub.requests(),
            vec![Coordinate::new(1.0, 1.0), Coordinate::new(2.0, 2.0)]
        );
    }

    #[rstest]
    fn stub_outcome_can_be_replaced() {
        let stub = StubScoringService::unreachable();
        stub.set_outcome(Ok(ScoreResult::new(10.0, "Low")));

        let result = runtime()
            .block_on(stub.score(Coordinate::new(0.0, 0.0)))
            .expect("replaced outcome");

        assert_eq!(result, ScoreResult::new(10.0, "Low"));
    }

    #[rstest]
    fn deferred_calls_resolve_out_of_order() {
        let service = DeferredScoringService::new();
        let rt = runtime();

        let (first, second) = rt.block_on(async {
            let first = service.score(Coordinate::new(1.0, 0.0));
            let second = service.score(Coordinate::new(2.0, 0.0));
            let resolver = async {
                tokio::task::yield_now().await;
                assert_eq!(service.started(), 2);
                assert!(service.resolve(1, Ok(ScoreResult::new(20.0, "Low"))));
                assert!(service.resolve(0, Ok(ScoreResult::new(80.0, "High"))));
            };
            let (first, second, ()) = tokio::join!(first, second, resolver);
            (first, second)
        });

        assert_eq!(first, Ok(ScoreResult::new(80.0, "High")));
        assert_eq!(second, Ok(ScoreResult::new(20.0, "Low")));
    }

    #[rstest]
    fn resolving_unknown_call_is_rejected() {
        let service = DeferredScoringService::new();
        assert!(!service.resolve(0, Ok(ScoreResult::new(1.0, "Low"))));
    }
}
