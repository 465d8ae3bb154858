//! Event types and sinks for observing compositing runs.
//!
//! This module defines [`CompositeEvent`] and a set of sinks and adapters to emit,
//! collect, or forward events while compositing via
//! [`crate::composite::composite_asset`] or [`crate::piece::Piece::composite`].
use std::path::PathBuf;

use tracing::{debug, info, warn};

use crate::attribute::KindId;
use crate::geometry::Rect;

/// Describes events emitted by compositing.
#[non_exhaustive]
#[derive(Debug, Clone)]
pub enum CompositeEvent {
    /// Emitted when a piece starts compositing.
    PieceStarted {
        /// Piece identifier.
        id: u64,
        /// Number of top-level regions.
        region_count: usize,
    },

    /// Emitted when a piece finishes compositing.
    PieceFinished {
        /// Piece identifier.
        id: u64,
        /// Final bounds of the piece canvas.
        bounds: Rect,
        /// Number of top-level regions that produced a composite.
        composited: usize,
    },

    /// Emitted after an asset and all of its descendants were flattened.
    SubtreeComposited {
        /// Depth of the asset; top-level regions of a piece are depth 1.
        depth: usize,
        /// Asset kind, if any.
        kind: Option<KindId>,
        /// Asset source path.
        path: PathBuf,
        /// Bounds of the flattened result.
        bounds: Rect,
    },

    /// Emitted when a working canvas had to grow to fit a child.
    CanvasGrown {
        /// Depth of the canvas owner.
        depth: usize,
        /// Bounds before growing.
        from: Rect,
        /// Bounds after growing.
        to: Rect,
    },

    /// Emitted when a region had nothing to draw.
    RegionSkipped {
        /// Depth of the region's parent.
        depth: usize,
        /// Index of the region among its siblings.
        index: usize,
    },

    /// Non-fatal warning generated during compositing.
    Warning {
        /// Context string (e.g. asset path).
        context: String,
        /// Human-readable message.
        message: String,
    },
}

/// Discriminant of [`CompositeEvent`], used by sinks to filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompositeEventKind {
    PieceStarted,
    PieceFinished,
    SubtreeComposited,
    CanvasGrown,
    RegionSkipped,
    Warning,
}

impl CompositeEvent {
    pub fn kind(&self) -> CompositeEventKind {
        match self {
            CompositeEvent::PieceStarted { .. } => CompositeEventKind::PieceStarted,
            CompositeEvent::PieceFinished { .. } => CompositeEventKind::PieceFinished,
            CompositeEvent::SubtreeComposited { .. } => CompositeEventKind::SubtreeComposited,
            CompositeEvent::CanvasGrown { .. } => CompositeEventKind::CanvasGrown,
            CompositeEvent::RegionSkipped { .. } => CompositeEventKind::RegionSkipped,
            CompositeEvent::Warning { .. } => CompositeEventKind::Warning,
        }
    }
}

/// A generic event sink that accepts [`CompositeEvent`]s.
pub trait EventSink {
    fn send(&mut self, event: CompositeEvent);

    /// Whether events of `kind` should be built and sent at all.
    #[inline]
    fn wants(&self, _kind: CompositeEventKind) -> bool {
        true
    }

    fn send_many<I>(&mut self, events: I)
    where
        Self: Sized,
        I: IntoIterator<Item = CompositeEvent>,
    {
        for e in events {
            self.send(e);
        }
    }
}

/// A no-op event sink.
impl EventSink for () {
    #[inline]
    fn send(&mut self, _event: CompositeEvent) {}

    #[inline]
    fn wants(&self, _kind: CompositeEventKind) -> bool {
        false
    }
}

/// An event sink that forwards to a user-provided closure.
pub struct FnSink<F>
where
    F: FnMut(CompositeEvent),
{
    f: F,
}

impl<F> FnSink<F>
where
    F: FnMut(CompositeEvent),
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> EventSink for FnSink<F>
where
    F: FnMut(CompositeEvent),
{
    #[inline]
    fn send(&mut self, event: CompositeEvent) {
        (self.f)(event);
    }
}

/// An event sink that collects all events in a `Vec`.
#[derive(Default)]
pub struct VecSink {
    events: Vec<CompositeEvent>,
}

impl VecSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn into_inner(self) -> Vec<CompositeEvent> {
        self.events
    }

    pub fn as_slice(&self) -> &[CompositeEvent] {
        &self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of collected events of `kind`.
    pub fn count(&self, kind: CompositeEventKind) -> usize {
        self.events.iter().filter(|e| e.kind() == kind).count()
    }
}

impl EventSink for VecSink {
    #[inline]
    fn send(&mut self, event: CompositeEvent) {
        self.events.push(event);
    }
}

/// Fan-out sink that forwards each event to all contained sinks.
pub struct MultiSink<S: EventSink> {
    pub(crate) sinks: Vec<S>,
}

impl<S: EventSink> MultiSink<S> {
    pub fn new() -> Self {
        Self { sinks: Vec::new() }
    }

    pub fn with_sinks(sinks: Vec<S>) -> Self {
        Self { sinks }
    }

    pub fn push(&mut self, sink: S) {
        self.sinks.push(sink);
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }
}

impl<S: EventSink> Default for MultiSink<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: EventSink> EventSink for MultiSink<S> {
    fn send(&mut self, event: CompositeEvent) {
        let kind = event.kind();
        let interested: Vec<usize> = (0..self.sinks.len())
            .filter(|&i| self.sinks[i].wants(kind))
            .collect();
        let Some((&last, rest)) = interested.split_last() else {
            return;
        };
        for &i in rest {
            self.sinks[i].send(event.clone());
        }
        self.sinks[last].send(event);
    }

    fn wants(&self, kind: CompositeEventKind) -> bool {
        self.sinks.iter().any(|s| s.wants(kind))
    }
}

/// Forwards events to `tracing`: piece-level events at info, warnings at warn, the
/// rest at debug.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn send(&mut self, event: CompositeEvent) {
        match event {
            CompositeEvent::PieceStarted { id, region_count } => {
                info!("Piece {}: compositing {} regions.", id, region_count);
            }
            CompositeEvent::PieceFinished {
                id,
                bounds,
                composited,
            } => {
                info!(
                    "Piece {}: composited {} regions into {}x{}.",
                    id,
                    composited,
                    bounds.width(),
                    bounds.height()
                );
            }
            CompositeEvent::SubtreeComposited {
                depth, path, bounds, ..
            } => {
                debug!(
                    "Depth {}: flattened '{}' to {:?}.",
                    depth,
                    path.display(),
                    bounds
                );
            }
            CompositeEvent::CanvasGrown { depth, from, to } => {
                debug!("Depth {}: canvas grew from {:?} to {:?}.", depth, from, to);
            }
            CompositeEvent::RegionSkipped { depth, index } => {
                debug!("Depth {}: region {} has nothing to draw.", depth, index);
            }
            CompositeEvent::Warning { context, message } => {
                warn!("{}: {}", context, message);
            }
        }
    }
}

/// Minimal adapter trait for types that can expose an [`EventSink`].
pub trait AsEventSink {
    fn as_event_sink(&mut self) -> &mut dyn EventSink;
}

impl<S: EventSink> AsEventSink for S {
    fn as_event_sink(&mut self) -> &mut dyn EventSink {
        self
    }
}
