#![forbid(unsafe_code)]
//! smart_fill: randomized scatter fill of closed 2D regions with template shapes.
//!
//! Modules:
//! - host: the [`host::ShapeHost`] boundary to the application owning the geometry, an
//!   in-memory reference host, and selection splitting
//! - fill: configuration, the placement loop, path filling, the ledger of placed copies,
//!   coverage statistics, density reduction, events and cancellation
//!
//! The engine never computes exact geometry. Containment is delegated to the host and
//! collisions use axis-aligned footprints, so results are a best-effort stochastic fill.
pub mod error;
pub mod fill;
pub mod host;
pub(crate) mod sampling;

/// Convenient re-exports for common types. Import with `use smart_fill::prelude::*;`.
pub mod prelude {
    pub use crate::error::{Error, HostError, Result};
    pub use crate::fill::cancel::CancelToken;
    pub use crate::fill::config::{FillConfig, PathFillConfig, RotationPolicy};
    pub use crate::fill::coverage::{coverage_percent, FillStatistics};
    pub use crate::fill::events::{
        EventSink, FillEvent, FillEventKind, FnSink, MultiSink, RejectReason, VecSink,
    };
    pub use crate::fill::ledger::{footprints_collide, Ledger, PlacedElement, RemovalSummary};
    pub use crate::fill::session::{FillReport, FillSession};
    pub use crate::fill::Template;
    pub use crate::host::{
        Bounds, HostCallCounts, HostResult, MemoryHost, RegionId, RegionShape, SelectedShape,
        Selection, ShapeHost, ShapeId,
    };
}
