//! The Host View: one scoring request per click and the labels it renders.

use std::cell::{Ref, RefCell};
use std::fmt;

use geotherm_core::{
    Coordinate, RequestError, ScoreBand, ScoreResult, ScoringService, feasibility_label,
    format_score, score_band,
};

/// State owned by a [`HostView`].
///
/// The result and the error are independent: a failed request sets the error
/// without clearing a result from an earlier success, so both may be shown.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    /// Most recent successful response.
    pub result: Option<ScoreResult>,
    /// Set when the most recently finished request failed.
    pub error: Option<RequestError>,
}

impl ViewState {
    /// Derive the display from this state.
    #[must_use]
    pub fn render(&self) -> RenderedView {
        RenderedView {
            score: self.result.as_ref().map(|result| ScorePanel {
                value: format_score(result.score),
                band: score_band(result.score),
            }),
            feasibility: self.result.as_ref().map(|result| FeasibilityPanel {
                raw: result.feasible.clone(),
                description: feasibility_label(&result.feasible),
            }),
            error: self.error,
        }
    }
}

/// Score heading and its band label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScorePanel {
    /// Score as printed after `Score: `.
    pub value: String,
    /// Band the score falls into.
    pub band: ScoreBand,
}

impl ScorePanel {
    /// `Score: {value}`.
    #[must_use]
    pub fn heading(&self) -> String {
        format!("Score: {}", self.value)
    }
}

/// Feasibility heading and its description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeasibilityPanel {
    /// Feasibility string as returned by the service.
    pub raw: String,
    /// Description, empty for values outside `Low`/`Medium`/`High`.
    pub description: &'static str,
}

impl FeasibilityPanel {
    /// `Feasibility: {raw}`.
    #[must_use]
    pub fn heading(&self) -> String {
        format!("Feasibility: {}", self.raw)
    }
}

/// Text display of a [`ViewState`].
///
/// # Examples
///
/// ```
/// use geotherm_core::ScoreResult;
/// use geotherm_view::ViewState;
///
/// let state = ViewState {
///     result: Some(ScoreResult::new(85.0, "High")),
///     error: None,
/// };
/// assert_eq!(
///     state.render().lines(),
///     vec![
///         "Score: 85",
///         "High geothermal potential (70–100)",
///         "Feasibility: High",
///         "High feasibility: favorable conditions",
///     ]
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedView {
    /// Present once a request has succeeded.
    pub score: Option<ScorePanel>,
    /// Present once a request has succeeded.
    pub feasibility: Option<FeasibilityPanel>,
    /// Present while the last finished request is a failure.
    pub error: Option<RequestError>,
}

impl RenderedView {
    /// Display lines in page order. Empty descriptions are omitted.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        if let Some(score) = &self.score {
            lines.push(score.heading());
            lines.push(score.band.label().to_owned());
        }
        if let Some(feasibility) = &self.feasibility {
            lines.push(feasibility.heading());
            if !feasibility.description.is_empty() {
                lines.push(feasibility.description.to_owned());
            }
        }
        if let Some(error) = self.error {
            lines.push(error.to_string());
        }
        lines
    }

    /// Whether nothing would be displayed.
    #[must_use]
    pub const fn is_blank(&self) -> bool {
        self.score.is_none() && self.feasibility.is_none() && self.error.is_none()
    }
}

impl fmt::Display for RenderedView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.lines().join("\n"))
    }
}

/// Runs one scoring request per selected coordinate and keeps the outcome.
///
/// State sits in a [`RefCell`] that is never borrowed across an await, so
/// several [`handle_select`](Self::handle_select) futures may be in flight on
/// one thread. They are not cancelled or ordered: whichever finishes last
/// determines what is shown.
#[derive(Debug)]
pub struct HostView<S> {
    service: S,
    state: RefCell<ViewState>,
}

impl<S: ScoringService> HostView<S> {
    /// Create a view with no result and no error.
    #[must_use]
    pub fn new(service: S) -> Self {
        Self {
            service,
            state: RefCell::new(ViewState::default()),
        }
    }

    /// Score `coordinate` and record the outcome.
    ///
    /// Any displayed error is cleared before the request starts. A success
    /// replaces the result; a failure sets the error and leaves the previous
    /// result in place.
    pub async fn handle_select(&self, coordinate: Coordinate) {
        self.state.borrow_mut().error = None;
        log::debug!("scoring {coordinate}");
        let outcome = self.service.score(coordinate).await;

        let mut state = self.state.borrow_mut();
        match outcome {
            Ok(result) => {
                log::debug!("score for {coordinate}: {} ({})", result.score, result.feasible);
                state.result = Some(result);
            }
            Err(error) => {
                log::warn!("scoring {coordinate} failed: {error}");
                state.error = Some(RequestError);
            }
        }
    }
}

impl<S> HostView<S> {
    /// Borrow the current state.
    ///
    /// # Panics
    ///
    /// Panics if called while the view is updating its own state, which
    /// cannot happen from outside this module.
    #[must_use]
    pub fn state(&self) -> Ref<'_, ViewState> {
        self.state.borrow()
    }

    /// Derive the display from the current state.
    #[must_use]
    pub fn render(&self) -> RenderedView {
        self.state.borrow().render()
    }

    /// The scoring service used for requests.
    #[must_use]
    pub const fn service(&self) -> &S {
        &self.service
    }
}
