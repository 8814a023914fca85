//! Max-flow regression test
//!
//! Cross-checks the Dinic solver against an exhaustive minimum-cut search
//! on random small graphs. By max-flow/min-cut duality the two values must
//! agree, and the reported partition must realize the same cut value.

use lidarseg_graph::{DinicSolver, FlowGraph, MaxFlowSolver, Side};
use rand::rngs::StdRng;
use rand::{Rng, RngExt, SeedableRng};

/// Cut value of a given partition: terminal links crossing the cut plus
/// neighbor edges with endpoints on opposite sides.
fn cut_value(graph: &FlowGraph, source_side: impl Fn(u32) -> bool) -> f64 {
    let mut value = 0.0;
    for node in 0..graph.num_nodes() {
        let (s_cap, t_cap) = graph.terminal_caps(node).unwrap();
        if source_side(node) {
            value += t_cap;
        } else {
            value += s_cap;
        }
    }
    for edge in graph.edges() {
        if source_side(edge.a) != source_side(edge.b) {
            value += edge.capacity;
        }
    }
    value
}

/// Exhaustive minimum cut over all 2^n partitions
fn brute_force_min_cut(graph: &FlowGraph) -> f64 {
    let n = graph.num_nodes();
    assert!(n <= 16, "brute force only feasible for tiny graphs");
    let mut best = f64::INFINITY;
    for mask in 0u32..(1 << n) {
        let value = cut_value(graph, |node| mask & (1 << node) != 0);
        if value < best {
            best = value;
        }
    }
    best
}

fn random_graph(rng: &mut StdRng, num_nodes: u32) -> FlowGraph {
    let mut graph = FlowGraph::new(num_nodes);
    for node in 0..num_nodes {
        let s: f64 = rng.random_range(0.0..4.0);
        let t: f64 = rng.random_range(0.0..4.0);
        graph.set_terminal_caps(node, s, t).unwrap();
    }
    for a in 0..num_nodes {
        for b in (a + 1)..num_nodes {
            if rng.random_range(0.0..1.0) < 0.5 {
                let cap: f64 = rng.random_range(0.0..2.0);
                graph.add_edge(a, b, cap).unwrap();
            }
        }
    }
    graph
}

#[test]
fn maxflow_matches_brute_force_min_cut() {
    let mut rng = StdRng::seed_from_u64(0x11da5);
    let solver = DinicSolver::new();

    for round in 0..50 {
        let num_nodes = rng.random_range(2..=8);
        let graph = random_graph(&mut rng, num_nodes);

        let outcome = solver.max_flow(&graph, None).unwrap();
        let expected = brute_force_min_cut(&graph);
        assert!(
            (outcome.flow - expected).abs() < 1e-9,
            "round {round}: flow {} != min cut {expected}",
            outcome.flow
        );

        // the reported partition must itself be a minimum cut
        let realized = cut_value(&graph, |node| outcome.sides[node as usize] == Side::Source);
        assert!(
            (realized - expected).abs() < 1e-9,
            "round {round}: partition realizes {realized}, min cut is {expected}"
        );
    }
}

#[test]
fn grid_with_seeds_cuts_at_weak_column() {
    // 4x3 grid, row-major indexing; strong horizontal edges except one
    // weak column, seeds at opposite corners
    let (w, h) = (4u32, 3u32);
    let mut graph = FlowGraph::new(w * h);
    let idx = |x: u32, y: u32| y * w + x;

    let k = 100.0;
    graph.set_terminal_caps(idx(0, 0), k, 0.0).unwrap();
    graph.set_terminal_caps(idx(3, 2), 0.0, k).unwrap();

    for y in 0..h {
        for x in 0..w {
            if x + 1 < w {
                // crossing from x=1 to x=2 is cheap everywhere
                let cap = if x == 1 { 0.01 } else { 10.0 };
                graph.add_edge(idx(x, y), idx(x + 1, y), cap).unwrap();
            }
            if y + 1 < h {
                graph.add_edge(idx(x, y), idx(x, y + 1), 10.0).unwrap();
            }
        }
    }

    let outcome = DinicSolver::new().max_flow(&graph, None).unwrap();
    assert!((outcome.flow - 0.03).abs() < 1e-9);
    for y in 0..h {
        for x in 0..w {
            let expected = if x <= 1 { Side::Source } else { Side::Sink };
            assert_eq!(
                outcome.sides[idx(x, y) as usize],
                expected,
                "pixel ({x}, {y})"
            );
        }
    }
}
