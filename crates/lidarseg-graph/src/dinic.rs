//! Dinic's max-flow algorithm
//!
//! Default [`MaxFlowSolver`] implementation: repeated BFS level graphs with
//! blocking-flow augmentation. The search is iterative throughout, so graph
//! size is bounded by memory, not stack depth. Arcs live in per-node
//! adjacency lists keyed by plain indices.

use crate::cancel::CancelToken;
use crate::error::{GraphError, GraphResult};
use crate::graph::FlowGraph;
use crate::solver::{MaxFlowOutcome, MaxFlowSolver, Side};
use std::collections::VecDeque;
use tracing::debug;

/// Residual capacities at or below this are treated as saturated
const FLOW_EPSILON: f64 = 1e-12;

/// Dinic max-flow solver
#[derive(Debug, Clone, Copy, Default)]
pub struct DinicSolver;

impl DinicSolver {
    /// Create a solver
    pub fn new() -> Self {
        Self
    }
}

impl MaxFlowSolver for DinicSolver {
    fn max_flow(
        &self,
        graph: &FlowGraph,
        cancel: Option<&CancelToken>,
    ) -> GraphResult<MaxFlowOutcome> {
        let mut network = ResidualNetwork::build(graph);
        let flow = network.run(cancel)?;
        let sides = network.cut_sides();
        debug!(flow, nodes = graph.num_nodes(), "max-flow complete");
        Ok(MaxFlowOutcome { flow, sides })
    }
}

/// A directed arc in the residual network
///
/// `rev` indexes the paired reverse arc inside `adjacency[to]`.
#[derive(Debug, Clone, Copy)]
struct ResidualArc {
    to: u32,
    rev: u32,
    cap: f64,
}

/// Adjacency-list residual network with explicit source/sink nodes
///
/// Pixel nodes keep their graph indices; the source is node `n` and the
/// sink is node `n + 1`.
struct ResidualNetwork {
    adjacency: Vec<Vec<ResidualArc>>,
    source: usize,
    sink: usize,
    levels: Vec<u32>,
}

const UNREACHED: u32 = u32::MAX;

impl ResidualNetwork {
    fn build(graph: &FlowGraph) -> Self {
        let n = graph.num_nodes() as usize;
        let source = n;
        let sink = n + 1;
        let mut network = Self {
            adjacency: vec![Vec::new(); n + 2],
            source,
            sink,
            levels: vec![UNREACHED; n + 2],
        };

        for (node, &cap) in graph.source_caps().iter().enumerate() {
            if cap > 0.0 {
                network.add_arc(source, node, cap, 0.0);
            }
        }
        for (node, &cap) in graph.sink_caps().iter().enumerate() {
            if cap > 0.0 {
                network.add_arc(node, sink, cap, 0.0);
            }
        }
        for edge in graph.edges() {
            if edge.capacity > 0.0 {
                network.add_arc(edge.a as usize, edge.b as usize, edge.capacity, edge.capacity);
            }
        }
        network
    }

    fn add_arc(&mut self, from: usize, to: usize, cap_forward: f64, cap_backward: f64) {
        let rev_in_to = self.adjacency[to].len() as u32;
        let rev_in_from = self.adjacency[from].len() as u32;
        self.adjacency[from].push(ResidualArc {
            to: to as u32,
            rev: rev_in_to,
            cap: cap_forward,
        });
        self.adjacency[to].push(ResidualArc {
            to: from as u32,
            rev: rev_in_from,
            cap: cap_backward,
        });
    }

    fn run(&mut self, cancel: Option<&CancelToken>) -> GraphResult<f64> {
        let mut total_flow = 0.0;
        let mut phase = 0u32;
        while self.assign_levels() {
            if let Some(token) = cancel
                && token.is_cancelled()
            {
                return Err(GraphError::Cancelled);
            }
            phase += 1;
            total_flow += self.blocking_flow();
        }
        debug!(phases = phase, "augmentation finished");
        Ok(total_flow)
    }

    /// BFS from the source over residual arcs; returns whether the sink is
    /// still reachable
    fn assign_levels(&mut self) -> bool {
        self.levels.fill(UNREACHED);
        self.levels[self.source] = 0;
        let mut queue = VecDeque::new();
        queue.push_back(self.source);
        while let Some(v) = queue.pop_front() {
            let level = self.levels[v];
            for arc in &self.adjacency[v] {
                if arc.cap > FLOW_EPSILON && self.levels[arc.to as usize] == UNREACHED {
                    self.levels[arc.to as usize] = level + 1;
                    queue.push_back(arc.to as usize);
                }
            }
        }
        self.levels[self.sink] != UNREACHED
    }

    /// Saturate the current level graph with an iterative path search
    fn blocking_flow(&mut self) -> f64 {
        let mut flow = 0.0;
        // next arc to try per node; arcs before it are saturated or useless
        let mut iters = vec![0usize; self.adjacency.len()];
        // stack of (node, arc index) pairs forming the current path
        let mut path: Vec<(usize, usize)> = Vec::new();
        let mut v = self.source;

        loop {
            if v == self.sink {
                flow += self.augment(&mut path);
                v = match path.last() {
                    Some(&(u, ai)) => self.adjacency[u][ai].to as usize,
                    None => self.source,
                };
                continue;
            }

            let mut advanced = false;
            while iters[v] < self.adjacency[v].len() {
                let ai = iters[v];
                let arc = self.adjacency[v][ai];
                if arc.cap > FLOW_EPSILON
                    && self.levels[arc.to as usize] == self.levels[v] + 1
                {
                    path.push((v, ai));
                    v = arc.to as usize;
                    advanced = true;
                    break;
                }
                iters[v] += 1;
            }

            if advanced {
                continue;
            }
            if v == self.source {
                break;
            }
            // dead end: remove the node from the level graph and retreat
            self.levels[v] = UNREACHED;
            let (u, _) = path.pop().unwrap_or((self.source, 0));
            iters[u] += 1;
            v = u;
        }
        flow
    }

    /// Push the bottleneck along the current source→sink path, then cut the
    /// path back to just before the first saturated arc
    fn augment(&mut self, path: &mut Vec<(usize, usize)>) -> f64 {
        let mut bottleneck = f64::INFINITY;
        for &(u, ai) in path.iter() {
            bottleneck = bottleneck.min(self.adjacency[u][ai].cap);
        }

        let mut first_saturated = path.len();
        for (i, &(u, ai)) in path.iter().enumerate() {
            let (to, rev) = {
                let arc = &self.adjacency[u][ai];
                (arc.to as usize, arc.rev as usize)
            };
            self.adjacency[u][ai].cap -= bottleneck;
            self.adjacency[to][rev].cap += bottleneck;
            if self.adjacency[u][ai].cap <= FLOW_EPSILON && i < first_saturated {
                first_saturated = i;
            }
        }
        path.truncate(first_saturated);
        bottleneck
    }

    /// Partition nodes by residual reachability from the source
    fn cut_sides(&self) -> Vec<Side> {
        let mut reached = vec![false; self.adjacency.len()];
        reached[self.source] = true;
        let mut queue = VecDeque::new();
        queue.push_back(self.source);
        while let Some(v) = queue.pop_front() {
            for arc in &self.adjacency[v] {
                if arc.cap > FLOW_EPSILON && !reached[arc.to as usize] {
                    reached[arc.to as usize] = true;
                    queue.push_back(arc.to as usize);
                }
            }
        }
        reached[..self.source]
            .iter()
            .map(|&r| if r { Side::Source } else { Side::Sink })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solve(graph: &FlowGraph) -> MaxFlowOutcome {
        DinicSolver::new().max_flow(graph, None).unwrap()
    }

    #[test]
    fn test_series_bottleneck() {
        // S -3-> 0 -1-> 1 -5-> T : flow limited by the middle edge
        let mut g = FlowGraph::new(2);
        g.set_terminal_caps(0, 3.0, 0.0).unwrap();
        g.set_terminal_caps(1, 0.0, 5.0).unwrap();
        g.add_edge(0, 1, 1.0).unwrap();
        let outcome = solve(&g);
        assert!((outcome.flow - 1.0).abs() < 1e-9);
        assert_eq!(outcome.sides, vec![Side::Source, Side::Sink]);
    }

    #[test]
    fn test_hard_constraints_decide_sides() {
        let k = 1000.0;
        let mut g = FlowGraph::new(3);
        g.set_terminal_caps(0, k, 0.0).unwrap();
        g.set_terminal_caps(2, 0.0, k).unwrap();
        g.add_edge(0, 1, 0.5).unwrap();
        g.add_edge(1, 2, 0.1).unwrap();
        let outcome = solve(&g);
        assert!((outcome.flow - 0.1).abs() < 1e-9);
        assert_eq!(outcome.sides[0], Side::Source);
        assert_eq!(outcome.sides[1], Side::Source);
        assert_eq!(outcome.sides[2], Side::Sink);
    }

    #[test]
    fn test_no_edges_no_flow() {
        let mut g = FlowGraph::new(2);
        g.set_terminal_caps(0, 4.0, 0.0).unwrap();
        g.set_terminal_caps(1, 0.0, 4.0).unwrap();
        let outcome = solve(&g);
        assert_eq!(outcome.flow, 0.0);
        assert_eq!(outcome.sides, vec![Side::Source, Side::Sink]);
    }

    #[test]
    fn test_neighbor_edge_works_both_ways() {
        // flow must route T-ward through node 1 regardless of which
        // endpoint the edge was declared from
        let mut g = FlowGraph::new(2);
        g.set_terminal_caps(1, 2.0, 0.0).unwrap();
        g.set_terminal_caps(0, 0.0, 2.0).unwrap();
        g.add_edge(0, 1, 1.5).unwrap();
        let outcome = solve(&g);
        assert!((outcome.flow - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_empty_graph() {
        let g = FlowGraph::new(0);
        let outcome = solve(&g);
        assert_eq!(outcome.flow, 0.0);
        assert!(outcome.sides.is_empty());
    }

    #[test]
    fn test_cancelled_token() {
        let mut g = FlowGraph::new(2);
        g.set_terminal_caps(0, 1.0, 0.0).unwrap();
        g.set_terminal_caps(1, 0.0, 1.0).unwrap();
        g.add_edge(0, 1, 1.0).unwrap();
        let token = CancelToken::new();
        token.cancel();
        let err = DinicSolver::new().max_flow(&g, Some(&token)).unwrap_err();
        assert!(matches!(err, GraphError::Cancelled));
    }

    #[test]
    fn test_determinism() {
        let mut g = FlowGraph::new(4);
        g.set_terminal_caps(0, 2.5, 0.1).unwrap();
        g.set_terminal_caps(1, 1.0, 0.7).unwrap();
        g.set_terminal_caps(2, 0.3, 1.9).unwrap();
        g.set_terminal_caps(3, 0.0, 2.2).unwrap();
        g.add_edge(0, 1, 0.8).unwrap();
        g.add_edge(1, 2, 0.4).unwrap();
        g.add_edge(2, 3, 0.9).unwrap();
        g.add_edge(0, 3, 0.2).unwrap();
        let a = solve(&g);
        let b = solve(&g);
        assert_eq!(a.flow, b.flow);
        assert_eq!(a.sides, b.sides);
    }
}
