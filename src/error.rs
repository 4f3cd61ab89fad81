//! Error types for the segmentation engine.
//!
//! Two layers of errors mirror the two layers of the crate: [`FlowError`]
//! covers the flow network and the max-flow solver, [`SegmentationError`]
//! covers raster and seed validation in the segmentation builder and wraps
//! flow failures via `#[from]`. All errors implement `std::error::Error`
//! through `thiserror` and surface immediately; nothing is retried or
//! silently degraded.

use crate::network::{Capacity, VertexId};
use crate::raster::{PixelIndex, SeedLabel};

/// Crate-wide result alias, defaulting to [`SegmentationError`].
pub type Result<T, E = SegmentationError> = std::result::Result<T, E>;

/// Errors raised by the flow network and the max-flow solver.
#[derive(Debug, thiserror::Error)]
pub enum FlowError {
    /// An operation referred to a vertex that never appeared as an endpoint
    /// of any added edge.
    #[error("vertex {vertex} is not in the network")]
    UnknownVertex {
        /// The unknown vertex.
        vertex: VertexId,
    },

    /// An edge operation was given a vertex that is neither endpoint.
    #[error("vertex {vertex} is not an endpoint of edge {edge_source} -> {target}")]
    EndpointMismatch {
        /// The offending vertex.
        vertex: VertexId,
        /// Source endpoint of the edge.
        edge_source: VertexId,
        /// Target endpoint of the edge.
        target: VertexId,
    },

    /// An augmentation would drive an edge's flow outside `[0, capacity]`.
    #[error(
        "delta {delta} would drive flow on edge {edge_source} -> {target} outside [0, {capacity}] (current flow {flow})"
    )]
    InfeasibleDelta {
        /// Requested flow change.
        delta: Capacity,
        /// Flow on the edge before the change.
        flow: Capacity,
        /// Capacity of the edge.
        capacity: Capacity,
        /// Source endpoint of the edge.
        edge_source: VertexId,
        /// Target endpoint of the edge.
        target: VertexId,
    },

    /// The solver was invoked with identical source and sink terminals.
    #[error("source equals sink ({vertex})")]
    SourceEqualsSink {
        /// The terminal passed as both source and sink.
        vertex: VertexId,
    },

    /// The flow already on the network violates a solver precondition.
    #[error("initial flow is infeasible: {detail}")]
    InitialFlowInfeasible {
        /// Human-readable explanation of the violated precondition.
        detail: String,
    },
}

/// Errors raised while validating segmentation inputs.
///
/// These are raised eagerly, before the flow network is built, so callers get
/// clear diagnostics rather than a mysterious cut.
#[derive(Debug, thiserror::Error)]
pub enum SegmentationError {
    /// The raster has zero rows, zero columns, or ragged rows.
    #[error("invalid raster dimensions: {width}x{height}")]
    InvalidRaster {
        /// Column count of the offending raster.
        width: usize,
        /// Row count of the offending raster.
        height: usize,
    },

    /// A seed set contains no pixels.
    #[error("{label} seed set is empty")]
    EmptySeeds {
        /// Which seed set was empty.
        label: SeedLabel,
    },

    /// A pixel index lies outside the raster.
    #[error("index {index} is outside a {width}x{height} raster")]
    IndexOutOfRange {
        /// The out-of-range index.
        index: PixelIndex,
        /// Raster width.
        width: usize,
        /// Raster height.
        height: usize,
    },

    /// The underlying flow computation failed.
    #[error("flow computation failed: {0}")]
    Flow(#[from] FlowError),
}
