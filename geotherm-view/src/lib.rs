//! Map surface, host view, and the session loop for the geothermal explorer.
//!
//! - [`map`] turns screen clicks into coordinates on a Web Mercator tile map
//!   and keeps a single selection marker.
//! - [`HostView`] sends one scoring request per selection and renders the
//!   score and feasibility labels.
//! - [`Session`] feeds [`MapEvent`]s to the map and polls the view's requests
//!   on the same task.
//!
//! # Examples
//!
//! ```
//! use geotherm_core::test_support::StubScoringService;
//! use geotherm_core::{Coordinate, ScoreResult};
//! use geotherm_view::HostView;
//!
//! let view = HostView::new(StubScoringService::with_result(ScoreResult::new(85.0, "High")));
//! # let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
//! runtime.block_on(view.handle_select(Coordinate::new(12.5, 77.2)));
//! assert_eq!(view.render().lines()[0], "Score: 85");
//! ```

#![forbid(unsafe_code)]

mod host;
pub mod map;
mod session;

pub use host::{FeasibilityPanel, HostView, RenderedView, ScorePanel, ViewState};
pub use session::{ChannelListener, MapEvent, Session, SessionStats};
