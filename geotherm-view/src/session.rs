//! Event loop joining a [`MapSurface`] to a [`HostView`].
//!
//! Map events and scoring responses are handled on one task. Each selection
//! starts a [`HostView::handle_select`] future that is polled alongside event
//! intake, so input keeps flowing while requests are in flight and view state
//! never crosses a thread.

use futures_util::future::{FutureExt, LocalBoxFuture};
use futures_util::stream::{FuturesUnordered, Stream, StreamExt};
use geotherm_core::{Coordinate, ScoringService};
use tokio::sync::mpsc;

use crate::host::{HostView, RenderedView};
use crate::map::{MapConfig, MapSurface, ScreenPoint, SelectListener};

/// Input accepted by a [`Session`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MapEvent {
    /// Click at a screen pixel.
    ClickAt(ScreenPoint),
    /// Click at a known coordinate.
    Select(Coordinate),
    /// Drag the map by a screen-pixel offset.
    Pan {
        /// Horizontal offset; positive moves east.
        dx: f64,
        /// Vertical offset; positive moves south.
        dy: f64,
    },
    /// Zoom in one level.
    ZoomIn,
    /// Zoom out one level.
    ZoomOut,
    /// Jump to a zoom level.
    SetZoom(u8),
}

/// Forwards map selections into the session's queue.
#[derive(Debug)]
pub struct ChannelListener {
    sender: mpsc::UnboundedSender<Coordinate>,
}

impl SelectListener for ChannelListener {
    fn on_select(&mut self, coordinate: Coordinate) {
        if self.sender.send(coordinate).is_err() {
            log::debug!("selection {coordinate} dropped: session closed");
        }
    }
}

/// Counters reported when [`Session::run`] finishes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    /// Map events consumed.
    pub events: usize,
    /// Scoring requests started.
    pub requests: usize,
    /// Scoring requests finished, successfully or not.
    pub responses: usize,
}

/// One map and one view driven by a stream of [`MapEvent`]s.
#[derive(Debug)]
pub struct Session<S> {
    surface: MapSurface<ChannelListener>,
    selections: mpsc::UnboundedReceiver<Coordinate>,
    view: HostView<S>,
}

impl<S: ScoringService> Session<S> {
    /// Create a session showing `config` and scoring with `service`.
    #[must_use]
    pub fn new(config: MapConfig, service: S) -> Self {
        let (sender, selections) = mpsc::unbounded_channel();
        Self {
            surface: MapSurface::new(config, ChannelListener { sender }),
            selections,
            view: HostView::new(service),
        }
    }

    /// The map surface.
    #[must_use]
    pub const fn surface(&self) -> &MapSurface<ChannelListener> {
        &self.surface
    }

    /// The host view.
    #[must_use]
    pub const fn view(&self) -> &HostView<S> {
        &self.view
    }

    /// Consume `events` until the stream ends and every request has finished.
    ///
    /// `on_render` receives the view after each finished request. Requests
    /// are never cancelled, and responses update the view in the order they
    /// arrive rather than the order of the clicks that caused them.
    pub async fn run<E, R>(&mut self, mut events: E, mut on_render: R) -> SessionStats
    where
        E: Stream<Item = MapEvent> + Unpin,
        R: FnMut(&RenderedView),
    {
        let Self {
            surface,
            selections,
            view: host,
        } = self;
        let view: &HostView<S> = host;
        let mut in_flight: FuturesUnordered<LocalBoxFuture<'_, ()>> = FuturesUnordered::new();
        let mut stats = SessionStats::default();
        let mut input_open = true;

        loop {
            tokio::select! {
                next = events.next(), if input_open => match next {
                    Some(event) => {
                        stats.events += 1;
                        apply(surface, event);
                        while let Ok(coordinate) = selections.try_recv() {
                            stats.requests += 1;
                            in_flight.push(view.handle_select(coordinate).boxed_local());
                        }
                    }
                    None => {
                        log::debug!("input closed with {} request(s) in flight", in_flight.len());
                        input_open = false;
                    }
                },
                Some(()) = in_flight.next(), if !in_flight.is_empty() => {
                    stats.responses += 1;
                    on_render(&view.render());
                }
                else => break,
            }
        }
        stats
    }
}

fn apply(surface: &mut MapSurface<ChannelListener>, event: MapEvent) {
    match event {
        MapEvent::ClickAt(point) => {
            surface.click_at(point);
        }
        MapEvent::Select(coordinate) => surface.select(coordinate),
        MapEvent::Pan { dx, dy } => surface.pan_by(dx, dy),
        MapEvent::ZoomIn => surface.zoom_in(),
        MapEvent::ZoomOut => surface.zoom_out(),
        MapEvent::SetZoom(zoom) => surface.set_zoom(zoom),
    }
}
