//! Event types and sinks for observing fills.
//!
//! [`FillEvent`]s are emitted by [`crate::fill::session::FillSession`] while it places and
//! removes copies. Pass any [`EventSink`] to the `*_with_events` methods to collect,
//! forward or filter them.
use glam::Vec2;

use crate::fill::config::FillConfig;
use crate::fill::ledger::RemovalSummary;
use crate::fill::session::FillReport;
use crate::host::Bounds;

/// Why a candidate pose was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// The sampled center is outside the region.
    Outside,
    /// The footprint collides with an earlier placement.
    Overlap,
    /// A probe point around the candidate is outside the region.
    Boundary,
    /// The host failed to instantiate the copy.
    HostFailure,
}

/// Describes events emitted by fill operations.
#[non_exhaustive]
#[derive(Debug, Clone)]
pub enum FillEvent {
    /// Emitted once sampling is about to start.
    FillStarted {
        /// The configuration used.
        config: FillConfig,
        /// Bounding box of the region.
        bounds: Bounds,
        /// Number of templates cycled through.
        template_count: usize,
    },

    /// Emitted once copies are about to be placed along a path.
    PathStarted {
        /// Arc length of the path.
        length: f32,
        /// Distance between consecutive copies.
        step: f32,
        /// Number of positions that will be tried.
        copies: usize,
    },

    /// Emitted for each rejected attempt.
    AttemptRejected {
        /// 1-based attempt number.
        attempt: usize,
        /// Candidate center.
        position: Vec2,
        reason: RejectReason,
    },

    /// Emitted after a copy was instantiated and recorded.
    ElementPlaced {
        /// Ledger index of the new record.
        index: usize,
        /// Index of the template that was copied.
        template_index: usize,
        position: Vec2,
        rotation_deg: f32,
    },

    /// Emitted after a density reduction.
    ElementsRemoved {
        summary: RemovalSummary,
        /// Records left in the ledger.
        remaining: usize,
    },

    /// Non-fatal problem, e.g. a failed undo-group call.
    Warning {
        /// Context string (e.g. the host call that failed).
        context: String,
        /// Human-readable message.
        message: String,
    },

    /// Emitted when the placement loop has ended.
    FillFinished { report: FillReport },
}

/// Discriminant of [`FillEvent`] used for filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FillEventKind {
    FillStarted,
    PathStarted,
    AttemptRejected,
    ElementPlaced,
    ElementsRemoved,
    Warning,
    FillFinished,
}

impl FillEvent {
    pub fn kind(&self) -> FillEventKind {
        match self {
            FillEvent::FillStarted { .. } => FillEventKind::FillStarted,
            FillEvent::PathStarted { .. } => FillEventKind::PathStarted,
            FillEvent::AttemptRejected { .. } => FillEventKind::AttemptRejected,
            FillEvent::ElementPlaced { .. } => FillEventKind::ElementPlaced,
            FillEvent::ElementsRemoved { .. } => FillEventKind::ElementsRemoved,
            FillEvent::Warning { .. } => FillEventKind::Warning,
            FillEvent::FillFinished { .. } => FillEventKind::FillFinished,
        }
    }
}

/// A generic event sink that accepts [`FillEvent`]s.
pub trait EventSink {
    fn send(&mut self, event: FillEvent);

    /// Whether events of `kind` should be built and sent at all.
    #[inline]
    fn wants(&self, _kind: FillEventKind) -> bool {
        true
    }
}

/// A no-op event sink.
impl EventSink for () {
    #[inline]
    fn send(&mut self, _event: FillEvent) {}

    #[inline]
    fn wants(&self, _kind: FillEventKind) -> bool {
        false
    }
}

/// An event sink that forwards to a user-provided closure.
pub struct FnSink<F>
where
    F: FnMut(FillEvent),
{
    f: F,
}

impl<F> FnSink<F>
where
    F: FnMut(FillEvent),
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> EventSink for FnSink<F>
where
    F: FnMut(FillEvent),
{
    #[inline]
    fn send(&mut self, event: FillEvent) {
        (self.f)(event);
    }
}

/// An event sink that collects events in a `Vec`, optionally skipping some kinds.
#[derive(Default)]
pub struct VecSink {
    events: Vec<FillEvent>,
    skip: Vec<FillEventKind>,
}

impl VecSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Do not record events of `kind`.
    pub fn without(mut self, kind: FillEventKind) -> Self {
        self.skip.push(kind);
        self
    }

    pub fn into_inner(self) -> Vec<FillEvent> {
        self.events
    }

    pub fn as_slice(&self) -> &[FillEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn count(&self, kind: FillEventKind) -> usize {
        self.events.iter().filter(|e| e.kind() == kind).count()
    }
}

impl EventSink for VecSink {
    #[inline]
    fn send(&mut self, event: FillEvent) {
        self.events.push(event);
    }

    fn wants(&self, kind: FillEventKind) -> bool {
        !self.skip.contains(&kind)
    }
}

/// Fan-out sink that forwards each event to every contained sink that wants it.
pub struct MultiSink<S: EventSink> {
    pub(crate) sinks: Vec<S>,
}

impl<S: EventSink> MultiSink<S> {
    pub fn with_sinks(sinks: Vec<S>) -> Self {
        Self { sinks }
    }

    pub fn into_inner(self) -> Vec<S> {
        self.sinks
    }
}

impl<S: EventSink> EventSink for MultiSink<S> {
    fn send(&mut self, event: FillEvent) {
        let kind = event.kind();
        for sink in self.sinks.iter_mut().filter(|s| s.wants(kind)) {
            sink.send(event.clone());
        }
    }

    fn wants(&self, kind: FillEventKind) -> bool {
        self.sinks.iter().any(|s| s.wants(kind))
    }
}
