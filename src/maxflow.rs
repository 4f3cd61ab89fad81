//! Maximum s-t flow and minimum s-t cut via shortest augmenting paths.
//!
//! Implements the Edmonds–Karp refinement of Ford–Fulkerson: each round runs
//! a breadth-first search over the implicit residual graph, augments along
//! the discovered path by its bottleneck residual capacity, and stops when
//! the sink is no longer reachable. The vertices reached by the final search
//! are the source side of a minimum cut.
//!
//! Worst-case complexity is `O(V * E^2)`: `O(V * E)` augmentation rounds of
//! `O(V + E)` each. In practice far fewer rounds are needed.
//!
//! The search visits the edges incident on a vertex in the order
//! [`FlowNetwork::neighbors`] yields them, and the first discovery of a
//! vertex wins. This makes the augmenting path, and therefore the specific
//! minimum cut reported on ambiguous instances, deterministic.
//!
//! # Example
//!
//! ```rust
//! use seedcut::maxflow;
//! use seedcut::network::{FlowEdge, FlowNetwork};
//!
//! let mut network = FlowNetwork::new();
//! network.add_edge(FlowEdge::new(0, 1, 1));
//! network.add_edge(FlowEdge::new(1, 2, 2));
//!
//! let solution = maxflow::solve(&mut network, 0, 2).unwrap();
//! assert_eq!(solution.max_flow(), 1);
//! assert!(solution.in_cut(0));
//! assert!(!solution.in_cut(1));
//! ```

use std::collections::{HashMap, HashSet, VecDeque};

use tracing::{debug, trace};

use crate::error::FlowError;
use crate::network::{Capacity, EdgeId, FlowNetwork, VertexId};

/// Result of a max-flow computation: the flow value and the source side of a
/// minimum cut.
#[derive(Debug, Clone)]
pub struct MinCutSolution {
    value: u64,
    marked: HashSet<VertexId>,
}

impl MinCutSolution {
    /// Value of the maximum flow.
    pub fn max_flow(&self) -> u64 {
        self.value
    }

    /// The source side of the minimum cut: every vertex still reachable from
    /// the source in the residual graph of the maximum flow.
    pub fn min_cut(&self) -> &HashSet<VertexId> {
        &self.marked
    }

    /// Whether `vertex` is on the source side of the minimum cut.
    pub fn in_cut(&self, vertex: VertexId) -> bool {
        self.marked.contains(&vertex)
    }
}

/// Compute a maximum flow from `source` to `sink` and the accompanying
/// minimum cut.
///
/// The network's edge flows are mutated in place; on success they describe a
/// maximum feasible flow. Preconditions: both terminals are in the network,
/// `source != sink`, and the initial flow is feasible (every edge within its
/// capacity, zero net flow at every non-terminal vertex, non-negative net
/// flow into the sink).
pub fn solve(
    network: &mut FlowNetwork,
    source: VertexId,
    sink: VertexId,
) -> Result<MinCutSolution, FlowError> {
    if !network.contains(source) {
        return Err(FlowError::UnknownVertex { vertex: source });
    }
    if !network.contains(sink) {
        return Err(FlowError::UnknownVertex { vertex: sink });
    }
    if source == sink {
        return Err(FlowError::SourceEqualsSink { vertex: source });
    }
    check_initial_flow(network, source, sink)?;

    let mut value = excess(network, sink)? as u64;
    let mut marked: HashSet<VertexId> = HashSet::new();
    let mut parent: HashMap<VertexId, EdgeId> = HashMap::new();
    let mut queue: VecDeque<VertexId> = VecDeque::new();
    let mut rounds = 0u64;

    while has_augmenting_path(network, source, sink, &mut marked, &mut parent, &mut queue)? {
        // bottleneck: minimum residual capacity along the recorded path
        let mut bottleneck = Capacity::MAX;
        let mut current = sink;
        while current != source {
            let edge = &network[parent[&current]];
            bottleneck = bottleneck.min(edge.residual_capacity(current)?);
            current = edge.other(current)?;
        }

        // augment: push the bottleneck along the path, forward or backward
        // as each edge's orientation requires
        let mut current = sink;
        while current != source {
            let id = parent[&current];
            let next = network[id].other(current)?;
            network[id].add_residual_flow(current, bottleneck)?;
            current = next;
        }

        value += u64::from(bottleneck);
        rounds += 1;
        trace!(bottleneck, value, "augmented along shortest residual path");
    }

    debug!(rounds, value, "sink unreachable in residual graph; flow is maximum");
    let solution = MinCutSolution { value, marked };
    debug_assert!(certify(network, source, sink, &solution));
    Ok(solution)
}

// Breadth-first search over the residual graph. On return `marked` holds
// every vertex reachable from the source and `parent` the edge used to reach
// it; the result says whether the sink was among them. The scratch
// collections are cleared and reused across rounds.
fn has_augmenting_path(
    network: &FlowNetwork,
    source: VertexId,
    sink: VertexId,
    marked: &mut HashSet<VertexId>,
    parent: &mut HashMap<VertexId, EdgeId>,
    queue: &mut VecDeque<VertexId>,
) -> Result<bool, FlowError> {
    marked.clear();
    parent.clear();
    queue.clear();

    queue.push_back(source);
    marked.insert(source);
    while let Some(v) = queue.pop_front() {
        if marked.contains(&sink) {
            break;
        }
        for id in network.neighbors(v)? {
            let edge = &network[id];
            let w = edge.other(v)?;
            if edge.residual_capacity(w)? > 0 && !marked.contains(&w) {
                parent.insert(w, id);
                marked.insert(w);
                queue.push_back(w);
            }
        }
    }
    Ok(marked.contains(&sink))
}

// Net flow into `vertex`: inflow minus outflow.
fn excess(network: &FlowNetwork, vertex: VertexId) -> Result<i64, FlowError> {
    let mut excess = 0i64;
    for &id in network.in_edges(vertex)? {
        excess += i64::from(network[id].flow());
    }
    for &id in network.out_edges(vertex)? {
        excess -= i64::from(network[id].flow());
    }
    Ok(excess)
}

// Solver precondition: the flow already on the network must be feasible.
fn check_initial_flow(
    network: &FlowNetwork,
    source: VertexId,
    sink: VertexId,
) -> Result<(), FlowError> {
    for edge in network.edges() {
        if edge.flow() > edge.capacity() {
            return Err(FlowError::InitialFlowInfeasible {
                detail: format!("edge {edge} exceeds its capacity"),
            });
        }
    }
    for v in network.vertices() {
        if v == source || v == sink {
            continue;
        }
        let e = excess(network, v)?;
        if e != 0 {
            return Err(FlowError::InitialFlowInfeasible {
                detail: format!("net flow {e} at non-terminal vertex {v}"),
            });
        }
    }
    if excess(network, sink)? < 0 {
        return Err(FlowError::InitialFlowInfeasible {
            detail: "negative net flow into the sink".to_string(),
        });
    }
    Ok(())
}

// Optimality certificate, checked in debug builds: the flow is feasible, the
// terminals sit on opposite sides of the cut, and the cut's capacity equals
// the flow value.
fn certify(
    network: &FlowNetwork,
    source: VertexId,
    sink: VertexId,
    solution: &MinCutSolution,
) -> bool {
    if check_initial_flow(network, source, sink).is_err() {
        return false;
    }
    if !solution.in_cut(source) || solution.in_cut(sink) {
        return false;
    }
    let cut_capacity: u64 = network
        .edges()
        .filter(|e| solution.in_cut(e.source()) && !solution.in_cut(e.target()))
        .map(|e| u64::from(e.capacity()))
        .sum();
    cut_capacity == solution.value
}
