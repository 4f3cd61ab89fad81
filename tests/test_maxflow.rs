//! Integration tests for the max-flow / min-cut solver.
//!
//! Covers the canonical scenario networks (trivial bottleneck, parallel
//! paths, branching, the CLRS example, a disconnected sink), the quantified
//! flow properties, precondition failures, and determinism of the reported
//! cut.

mod helpers;

use std::collections::HashSet;

use seedcut::error::FlowError;
use seedcut::maxflow;
use seedcut::network::{Capacity, EdgeId, FlowNetwork, VertexId};

use helpers::{assert_max_flow_properties, cut_capacity, network_from, S, T};

// ---------------------------------------------------------------------------
// Scenario networks
// ---------------------------------------------------------------------------

fn trivial_bottleneck() -> Vec<(VertexId, VertexId, Capacity)> {
    vec![(S, 0, 1), (0, T, 2)]
}

fn parallel_path() -> Vec<(VertexId, VertexId, Capacity)> {
    vec![(S, 0, 2), (0, T, 1), (S, T, 3)]
}

fn branching() -> Vec<(VertexId, VertexId, Capacity)> {
    vec![(S, 0, 2), (S, 1, 1), (0, 1, 3), (0, T, 1), (1, T, 2)]
}

fn clrs() -> Vec<(VertexId, VertexId, Capacity)> {
    vec![
        (S, 0, 16),
        (S, 1, 13),
        (0, 1, 10),
        (1, 0, 4),
        (0, 2, 12),
        (2, 1, 9),
        (1, 3, 14),
        (3, 2, 7),
        (2, T, 20),
        (3, T, 4),
    ]
}

fn layered() -> Vec<(VertexId, VertexId, Capacity)> {
    vec![
        (S, 0, 10),
        (S, 1, 10),
        (0, 1, 2),
        (0, 2, 4),
        (0, 3, 8),
        (1, 3, 9),
        (3, 2, 6),
        (2, T, 10),
        (3, T, 10),
    ]
}

fn disconnected_sink() -> Vec<(VertexId, VertexId, Capacity)> {
    vec![(S, 0, 10), (T, 0, 10)]
}

fn solve_scenario(
    edges: &[(VertexId, VertexId, Capacity)],
) -> (FlowNetwork, maxflow::MinCutSolution) {
    let mut network = network_from(edges);
    let solution = maxflow::solve(&mut network, S, T).unwrap();
    (network, solution)
}

// ---------------------------------------------------------------------------
// Expected values per scenario
// ---------------------------------------------------------------------------

#[test]
fn test_trivial_bottleneck() {
    let (_, solution) = solve_scenario(&trivial_bottleneck());
    assert_eq!(solution.max_flow(), 1);
    assert_eq!(solution.min_cut(), &HashSet::from([S]));
}

#[test]
fn test_parallel_path() {
    let (_, solution) = solve_scenario(&parallel_path());
    assert_eq!(solution.max_flow(), 4);
    assert_eq!(solution.min_cut(), &HashSet::from([S, 0]));
}

#[test]
fn test_branching() {
    let (_, solution) = solve_scenario(&branching());
    assert_eq!(solution.max_flow(), 3);
    assert_eq!(solution.min_cut(), &HashSet::from([S]));
}

#[test]
fn test_clrs_example() {
    let (_, solution) = solve_scenario(&clrs());
    assert_eq!(solution.max_flow(), 23);
    assert_eq!(solution.min_cut(), &HashSet::from([S, 0, 1, 3]));
}

#[test]
fn test_layered_network() {
    let (_, solution) = solve_scenario(&layered());
    assert_eq!(solution.max_flow(), 19);
    assert_eq!(solution.min_cut(), &HashSet::from([S, 1]));
}

#[test]
fn test_disconnected_sink() {
    let (_, solution) = solve_scenario(&disconnected_sink());
    assert_eq!(solution.max_flow(), 0);
    assert_eq!(solution.min_cut(), &HashSet::from([S, 0]));
}

#[test]
fn test_parallel_and_self_loop_edges() {
    // two parallel s->t edges plus a self-loop that can never carry net flow
    let (network, solution) =
        solve_scenario(&[(S, 0, 1), (0, 0, 5), (0, T, 1), (S, T, 2), (S, T, 1)]);
    assert_eq!(solution.max_flow(), 4);
    assert_eq!(solution.min_cut(), &HashSet::from([S]));
    assert_max_flow_properties(&network, S, T, &solution);
}

// ---------------------------------------------------------------------------
// Quantified flow properties
// ---------------------------------------------------------------------------

#[test]
fn test_flow_properties_hold_on_all_scenarios() {
    for edges in [
        trivial_bottleneck(),
        parallel_path(),
        branching(),
        clrs(),
        layered(),
        disconnected_sink(),
    ] {
        let (network, solution) = solve_scenario(&edges);
        assert_max_flow_properties(&network, S, T, &solution);
    }
}

#[test]
fn test_removing_a_cut_edge_reduces_the_max_flow() {
    let edges = clrs();
    let (network, solution) = solve_scenario(&edges);

    // identify the cut edges by position in the insertion order
    let cut_positions: Vec<usize> = edges
        .iter()
        .enumerate()
        .filter(|(_, &(u, v, _))| solution.in_cut(u) && !solution.in_cut(v))
        .map(|(pos, _)| pos)
        .collect();
    assert!(!cut_positions.is_empty());
    assert_eq!(cut_capacity(&network, &solution), solution.max_flow());

    for position in cut_positions {
        let mut reduced = edges.clone();
        reduced.remove(position);
        let mut network = network_from(&reduced);
        let smaller = maxflow::solve(&mut network, S, T).unwrap();
        assert!(
            smaller.max_flow() < solution.max_flow(),
            "dropping cut edge {position} did not reduce the max flow"
        );
    }
}

#[test]
fn test_deterministic_cut() {
    let (_, first) = solve_scenario(&clrs());
    let (_, second) = solve_scenario(&clrs());
    assert_eq!(first.max_flow(), second.max_flow());
    assert_eq!(first.min_cut(), second.min_cut());
}

// ---------------------------------------------------------------------------
// Precondition failures
// ---------------------------------------------------------------------------

#[test]
fn test_unknown_source_rejected() {
    let mut network = network_from(&trivial_bottleneck());
    let err = maxflow::solve(&mut network, 77, T).unwrap_err();
    assert!(matches!(err, FlowError::UnknownVertex { vertex: 77 }));
}

#[test]
fn test_unknown_sink_rejected() {
    let mut network = network_from(&trivial_bottleneck());
    let err = maxflow::solve(&mut network, S, 88).unwrap_err();
    assert!(matches!(err, FlowError::UnknownVertex { vertex: 88 }));
}

#[test]
fn test_source_equals_sink_rejected() {
    let mut network = network_from(&trivial_bottleneck());
    let err = maxflow::solve(&mut network, S, S).unwrap_err();
    assert!(matches!(err, FlowError::SourceEqualsSink { vertex: S }));
}

#[test]
fn test_infeasible_initial_flow_rejected() {
    let mut network = network_from(&trivial_bottleneck());
    // saturate s -> v0 without balancing v0 -> t
    let first: EdgeId = 0;
    network[first].add_residual_flow(0, 1).unwrap();
    let err = maxflow::solve(&mut network, S, T).unwrap_err();
    assert!(matches!(err, FlowError::InitialFlowInfeasible { .. }));
}

#[test]
fn test_solver_leaves_feasible_flow_behind() {
    let (mut network, solution) = solve_scenario(&layered());
    // solving an already-maximum flow finds no augmenting path and reports
    // the same value and cut
    let again = maxflow::solve(&mut network, S, T).unwrap();
    assert_eq!(again.max_flow(), solution.max_flow());
    assert_eq!(again.min_cut(), solution.min_cut());
}

#[test]
fn test_edge_capacity_zero_blocks_flow() {
    let (_, solution) = solve_scenario(&[(S, 0, 0), (0, T, 5)]);
    assert_eq!(solution.max_flow(), 0);
    assert_eq!(solution.min_cut(), &HashSet::from([S]));
}

#[test]
fn test_backward_residual_reroutes_flow() {
    // the first shortest path runs S -> 0 -> 1 -> T; the second must cancel
    // the flow on (0, 1) to free 1 for S -> 2 -> 1 -> T while 0 drains
    // through 3 instead
    let edges = vec![
        (S, 0, 1),
        (0, 1, 1),
        (1, T, 1),
        (S, 2, 1),
        (2, 1, 1),
        (0, 3, 1),
        (3, T, 1),
    ];
    let mut network = network_from(&edges);
    let solution = maxflow::solve(&mut network, S, T).unwrap();
    assert_eq!(solution.max_flow(), 2);
    assert_eq!(solution.min_cut(), &HashSet::from([S]));
    // the rerouted middle edge carries no net flow in the end
    assert_eq!(network[1].flow(), 0);
    assert_max_flow_properties(&network, S, T, &solution);
}
