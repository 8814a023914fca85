//! FlowGraph - the capacitated s-t graph handed to a max-flow solver
//!
//! Nodes are plain `u32` indices (pixel nodes in row-major order when built
//! from an image); the source and sink terminals are implicit. Terminal
//! capacities live in two per-node arrays so that a node can never end up
//! with more than one terminal edge per side; neighbor edges are an edge
//! list with a single capacity each, interpreted as a symmetric pair.

use crate::error::{GraphError, GraphResult};

/// A neighbor (n-link) edge between two non-terminal nodes
///
/// Carries one capacity, used in both directions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NeighborEdge {
    pub a: u32,
    pub b: u32,
    pub capacity: f64,
}

/// Capacitated graph over `num_nodes` pixel nodes plus implicit terminals
#[derive(Debug, Clone)]
pub struct FlowGraph {
    num_nodes: u32,
    source_caps: Vec<f64>,
    sink_caps: Vec<f64>,
    edges: Vec<NeighborEdge>,
}

impl FlowGraph {
    /// Create a graph with `num_nodes` nodes and no edges
    pub fn new(num_nodes: u32) -> Self {
        Self {
            num_nodes,
            source_caps: vec![0.0; num_nodes as usize],
            sink_caps: vec![0.0; num_nodes as usize],
            edges: Vec::new(),
        }
    }

    /// Number of non-terminal nodes
    #[inline]
    pub fn num_nodes(&self) -> u32 {
        self.num_nodes
    }

    /// Terminal capacities (source→node, node→sink) of a node
    pub fn terminal_caps(&self, node: u32) -> Option<(f64, f64)> {
        let i = node as usize;
        Some((*self.source_caps.get(i)?, *self.sink_caps.get(i)?))
    }

    /// Set the terminal capacities of a node
    ///
    /// Overwrites any previous assignment: each node has exactly one
    /// source-link and one sink-link, so repeated seeds cannot stack hard
    /// constraints.
    ///
    /// # Errors
    ///
    /// Returns an error if the node is out of range or a capacity is
    /// negative or non-finite.
    pub fn set_terminal_caps(&mut self, node: u32, source_cap: f64, sink_cap: f64) -> GraphResult<()> {
        self.check_node(node)?;
        check_capacity(source_cap, || format!("S->{node}"))?;
        check_capacity(sink_cap, || format!("{node}->T"))?;
        self.source_caps[node as usize] = source_cap;
        self.sink_caps[node as usize] = sink_cap;
        Ok(())
    }

    /// Add a symmetric neighbor edge between two nodes
    ///
    /// # Errors
    ///
    /// Returns an error if either node is out of range, the endpoints are
    /// equal, or the capacity is negative or non-finite.
    pub fn add_edge(&mut self, a: u32, b: u32, capacity: f64) -> GraphResult<()> {
        self.check_node(a)?;
        self.check_node(b)?;
        if a == b {
            return Err(GraphError::InvalidCapacity {
                capacity,
                context: format!("self-loop on node {a}"),
            });
        }
        check_capacity(capacity, || format!("{a}<->{b}"))?;
        self.edges.push(NeighborEdge { a, b, capacity });
        Ok(())
    }

    /// Per-node source-link capacities
    #[inline]
    pub fn source_caps(&self) -> &[f64] {
        &self.source_caps
    }

    /// Per-node sink-link capacities
    #[inline]
    pub fn sink_caps(&self) -> &[f64] {
        &self.sink_caps
    }

    /// Neighbor edge list
    #[inline]
    pub fn edges(&self) -> &[NeighborEdge] {
        &self.edges
    }

    fn check_node(&self, node: u32) -> GraphResult<()> {
        if node >= self.num_nodes {
            return Err(GraphError::NodeOutOfRange {
                node,
                num_nodes: self.num_nodes,
            });
        }
        Ok(())
    }
}

fn check_capacity(capacity: f64, context: impl Fn() -> String) -> GraphResult<()> {
    if !capacity.is_finite() || capacity < 0.0 {
        return Err(GraphError::InvalidCapacity {
            capacity,
            context: context(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_caps_overwrite() {
        let mut g = FlowGraph::new(3);
        g.set_terminal_caps(1, 2.0, 0.5).unwrap();
        g.set_terminal_caps(1, 7.0, 0.0).unwrap();
        assert_eq!(g.terminal_caps(1), Some((7.0, 0.0)));
    }

    #[test]
    fn test_rejects_bad_capacity() {
        let mut g = FlowGraph::new(2);
        assert!(g.set_terminal_caps(0, -1.0, 0.0).is_err());
        assert!(g.set_terminal_caps(0, f64::NAN, 0.0).is_err());
        assert!(g.add_edge(0, 1, f64::INFINITY).is_err());
    }

    #[test]
    fn test_rejects_out_of_range() {
        let mut g = FlowGraph::new(2);
        assert!(g.set_terminal_caps(2, 1.0, 1.0).is_err());
        assert!(g.add_edge(0, 2, 1.0).is_err());
    }

    #[test]
    fn test_rejects_self_loop() {
        let mut g = FlowGraph::new(2);
        assert!(g.add_edge(1, 1, 1.0).is_err());
    }
}
