//! Capacitated flow network with residual-capacity semantics.
//!
//! The network is a directed multigraph: self-loops and parallel edges are
//! permitted and nothing is ever deduplicated or deleted. Edges live in an
//! arena (`Vec<FlowEdge>`) and are addressed by [`EdgeId`]; every vertex
//! keeps insertion-ordered lists of outgoing and incoming edge ids, so each
//! edge is referenced from both endpoints while the arena slot remains the
//! single source of truth for its flow.
//!
//! Incidence order is part of the contract: the solver's breadth-first
//! search visits `out_edges` then `in_edges`, each in insertion order, and
//! the specific minimum cut returned on ambiguous instances depends on that
//! order.
//!
//! All operations take constant amortized time except iterating the edges
//! incident to a vertex, which is linear in their number.

use std::collections::HashMap;
use std::fmt;
use std::ops::{Index, IndexMut};

use crate::error::FlowError;

/// Unique vertex identifier.
pub type VertexId = u64;

/// Index of an edge in the network's arena, handed out by
/// [`FlowNetwork::add_edge`].
pub type EdgeId = usize;

/// Edge capacity (and flow) type.
pub type Capacity = u32;

/// A directed edge with a capacity and a current flow.
///
/// Flow is only mutable through [`add_residual_flow`](FlowEdge::add_residual_flow),
/// which keeps `0 <= flow <= capacity` at all times.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlowEdge {
    source: VertexId,
    target: VertexId,
    capacity: Capacity,
    flow: Capacity,
}

impl FlowEdge {
    /// Create an edge from `source` to `target` with the given capacity and
    /// zero flow.
    pub fn new(source: VertexId, target: VertexId, capacity: Capacity) -> Self {
        Self {
            source,
            target,
            capacity,
            flow: 0,
        }
    }

    /// Source endpoint.
    pub fn source(&self) -> VertexId {
        self.source
    }

    /// Target endpoint.
    pub fn target(&self) -> VertexId {
        self.target
    }

    /// Maximum flow the edge can carry.
    pub fn capacity(&self) -> Capacity {
        self.capacity
    }

    /// Flow currently routed through the edge.
    pub fn flow(&self) -> Capacity {
        self.flow
    }

    /// Residual capacity of the edge in the direction of `vertex`.
    ///
    /// Toward the target this is `capacity - flow`; toward the source it is
    /// the flow that could be cancelled. On a self-loop the source
    /// interpretation wins.
    pub fn residual_capacity(&self, vertex: VertexId) -> Result<Capacity, FlowError> {
        if vertex == self.source {
            Ok(self.flow)
        } else if vertex == self.target {
            Ok(self.capacity - self.flow)
        } else {
            Err(self.endpoint_mismatch(vertex))
        }
    }

    /// Push `delta` units of residual flow toward `vertex`: flow increases
    /// when `vertex` is the target and decreases when it is the source.
    ///
    /// Fails with `InfeasibleDelta` if the change would leave
    /// `[0, capacity]`, in which case the edge is unmodified.
    pub fn add_residual_flow(
        &mut self,
        vertex: VertexId,
        delta: Capacity,
    ) -> Result<(), FlowError> {
        if vertex == self.source {
            if delta > self.flow {
                return Err(self.infeasible_delta(delta));
            }
            self.flow -= delta;
        } else if vertex == self.target {
            if delta > self.capacity - self.flow {
                return Err(self.infeasible_delta(delta));
            }
            self.flow += delta;
        } else {
            return Err(self.endpoint_mismatch(vertex));
        }
        Ok(())
    }

    /// The endpoint opposite `vertex`; for a self-loop, `vertex` itself.
    pub fn other(&self, vertex: VertexId) -> Result<VertexId, FlowError> {
        if vertex == self.source {
            Ok(self.target)
        } else if vertex == self.target {
            Ok(self.source)
        } else {
            Err(self.endpoint_mismatch(vertex))
        }
    }

    fn endpoint_mismatch(&self, vertex: VertexId) -> FlowError {
        FlowError::EndpointMismatch {
            vertex,
            edge_source: self.source,
            target: self.target,
        }
    }

    fn infeasible_delta(&self, delta: Capacity) -> FlowError {
        FlowError::InfeasibleDelta {
            delta,
            flow: self.flow,
            capacity: self.capacity,
            edge_source: self.source,
            target: self.target,
        }
    }
}

impl fmt::Display for FlowEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({} -> {}, {}/{})",
            self.source, self.target, self.flow, self.capacity
        )
    }
}

#[derive(Debug, Default, Clone)]
struct Incidence {
    out: Vec<EdgeId>,
    inc: Vec<EdgeId>,
}

/// A capacitated multigraph over [`VertexId`]s.
///
/// The vertex set is implicit: a vertex exists once it has appeared as an
/// endpoint of an added edge.
#[derive(Debug, Default, Clone)]
pub struct FlowNetwork {
    edges: Vec<FlowEdge>,
    incidence: HashMap<VertexId, Incidence>,
}

impl FlowNetwork {
    /// Create an empty network.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty network with capacity hints.
    pub fn with_capacity(vertices: usize, edges: usize) -> Self {
        Self {
            edges: Vec::with_capacity(edges),
            incidence: HashMap::with_capacity(vertices),
        }
    }

    /// Append `edge` to the network, registering both endpoints on first
    /// sight, and return its arena id.
    pub fn add_edge(&mut self, edge: FlowEdge) -> EdgeId {
        let id = self.edges.len();
        self.incidence.entry(edge.source).or_default().out.push(id);
        self.incidence.entry(edge.target).or_default().inc.push(id);
        self.edges.push(edge);
        id
    }

    /// The edge with arena id `id`, or `None` for an id this network never
    /// handed out.
    pub fn edge(&self, id: EdgeId) -> Option<&FlowEdge> {
        self.edges.get(id)
    }

    /// Ids of the edges pointing out of `vertex`, in insertion order.
    pub fn out_edges(&self, vertex: VertexId) -> Result<&[EdgeId], FlowError> {
        self.incidence
            .get(&vertex)
            .map(|entry| entry.out.as_slice())
            .ok_or(FlowError::UnknownVertex { vertex })
    }

    /// Ids of the edges pointing into `vertex`, in insertion order.
    pub fn in_edges(&self, vertex: VertexId) -> Result<&[EdgeId], FlowError> {
        self.incidence
            .get(&vertex)
            .map(|entry| entry.inc.as_slice())
            .ok_or(FlowError::UnknownVertex { vertex })
    }

    /// Ids of all edges incident on `vertex`: outgoing first, then incoming,
    /// each in insertion order. The solver relies on this order.
    pub fn neighbors(
        &self,
        vertex: VertexId,
    ) -> Result<impl Iterator<Item = EdgeId> + '_, FlowError> {
        let entry = self
            .incidence
            .get(&vertex)
            .ok_or(FlowError::UnknownVertex { vertex })?;
        Ok(entry.out.iter().chain(entry.inc.iter()).copied())
    }

    /// All known vertices, in no particular order.
    pub fn vertices(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.incidence.keys().copied()
    }

    /// Whether `vertex` has appeared as an endpoint of any added edge.
    pub fn contains(&self, vertex: VertexId) -> bool {
        self.incidence.contains_key(&vertex)
    }

    /// All edges in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = &FlowEdge> {
        self.edges.iter()
    }

    /// Number of known vertices.
    pub fn num_vertices(&self) -> usize {
        self.incidence.len()
    }

    /// Number of added edges.
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }
}

impl Index<EdgeId> for FlowNetwork {
    type Output = FlowEdge;

    /// Access an edge by the id returned from [`FlowNetwork::add_edge`].
    ///
    /// Panics if `id` was never handed out by this network.
    fn index(&self, id: EdgeId) -> &FlowEdge {
        &self.edges[id]
    }
}

impl IndexMut<EdgeId> for FlowNetwork {
    fn index_mut(&mut self, id: EdgeId) -> &mut FlowEdge {
        &mut self.edges[id]
    }
}

impl fmt::Display for FlowNetwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "flow network ({} vertices, {} edges)",
            self.num_vertices(),
            self.num_edges()
        )?;
        let mut vertices: Vec<VertexId> = self.vertices().collect();
        vertices.sort_unstable();
        for v in vertices {
            write!(f, "{v} -->")?;
            if let Ok(out) = self.out_edges(v) {
                for &id in out {
                    write!(f, " {}", self.edges[id])?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
