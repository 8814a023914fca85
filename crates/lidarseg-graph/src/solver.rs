//! MaxFlowSolver - the seam between graph construction and the cut
//!
//! The segmentation pipeline consumes any implementation of this trait; the
//! workspace ships [`DinicSolver`](crate::DinicSolver) as the default. A
//! solver receives the graph by reference for the duration of the call and
//! must not retain it.

use crate::cancel::CancelToken;
use crate::error::GraphResult;
use crate::graph::FlowGraph;

/// Which side of the minimum cut a node ended up on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Reachable from the source in the residual graph (foreground)
    Source,
    /// Everything else (background)
    Sink,
}

/// Result of a max-flow computation
#[derive(Debug, Clone)]
pub struct MaxFlowOutcome {
    /// Total flow pushed from source to sink; equals the cut value
    pub flow: f64,
    /// Cut side of every node, indexed like the graph's nodes
    pub sides: Vec<Side>,
}

/// A maximum-flow / minimum-cut solver
///
/// Implementations must be deterministic for identical inputs and must
/// honor the cancellation token if one is supplied, returning
/// [`GraphError::Cancelled`](crate::GraphError::Cancelled) promptly after
/// it trips.
pub trait MaxFlowSolver {
    /// Compute the maximum flow and the induced minimum-cut partition
    fn max_flow(&self, graph: &FlowGraph, cancel: Option<&CancelToken>)
    -> GraphResult<MaxFlowOutcome>;
}
