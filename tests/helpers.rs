//! Shared helpers for the seedcut integration test suite.
//!
//! Provides scenario network builders, raster builders, and flow property
//! checkers used across the test modules.

#![allow(dead_code)]

use std::collections::HashSet;

use seedcut::maxflow::MinCutSolution;
use seedcut::network::{Capacity, FlowEdge, FlowNetwork, VertexId};
use seedcut::raster::{PixelIndex, Raster, Rgb};

/// Source terminal used by hand-built scenario networks.
pub const S: VertexId = 100;

/// Sink terminal used by hand-built scenario networks.
pub const T: VertexId = 101;

/// Build a network from `(source, target, capacity)` triples, preserving
/// insertion order.
pub fn network_from(edges: &[(VertexId, VertexId, Capacity)]) -> FlowNetwork {
    let mut network = FlowNetwork::new();
    for &(u, v, c) in edges {
        network.add_edge(FlowEdge::new(u, v, c));
    }
    network
}

/// Net flow into `vertex` computed from the public edge accessors.
pub fn excess(network: &FlowNetwork, vertex: VertexId) -> i64 {
    let mut excess = 0i64;
    for &id in network.in_edges(vertex).unwrap() {
        excess += i64::from(network[id].flow());
    }
    for &id in network.out_edges(vertex).unwrap() {
        excess -= i64::from(network[id].flow());
    }
    excess
}

/// Total capacity of the edges leaving the solution's source side.
pub fn cut_capacity(network: &FlowNetwork, solution: &MinCutSolution) -> u64 {
    network
        .edges()
        .filter(|e| solution.in_cut(e.source()) && !solution.in_cut(e.target()))
        .map(|e| u64::from(e.capacity()))
        .sum()
}

/// Assert every flow property a finished solve must satisfy: capacity
/// bounds and the residual law on every edge, conservation at every
/// non-terminal vertex, terminals on opposite cut sides, and cut capacity
/// equal to the max-flow value.
pub fn assert_max_flow_properties(
    network: &FlowNetwork,
    source: VertexId,
    sink: VertexId,
    solution: &MinCutSolution,
) {
    for edge in network.edges() {
        assert!(edge.flow() <= edge.capacity(), "edge {edge} over capacity");
        let forward = edge.residual_capacity(edge.target()).unwrap();
        let reverse = edge.residual_capacity(edge.source()).unwrap();
        assert_eq!(forward + reverse, edge.capacity(), "residual law on {edge}");
    }
    for v in network.vertices() {
        if v != source && v != sink {
            assert_eq!(excess(network, v), 0, "conservation at vertex {v}");
        }
    }
    assert!(solution.in_cut(source), "source missing from cut");
    assert!(!solution.in_cut(sink), "sink on source side of cut");
    assert_eq!(
        cut_capacity(network, solution),
        solution.max_flow(),
        "cut capacity does not certify the flow value"
    );
}

/// Build a `HashSet<PixelIndex>` from `(i, j)` pairs.
pub fn indices(list: &[(usize, usize)]) -> HashSet<PixelIndex> {
    list.iter().map(|&(i, j)| PixelIndex::new(i, j)).collect()
}

/// A white raster of the given dimensions.
pub fn white_raster(width: usize, height: usize) -> Raster {
    Raster::filled(width, height, Rgb::WHITE).unwrap()
}
