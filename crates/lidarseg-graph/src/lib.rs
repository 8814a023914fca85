//! lidarseg-graph - Capacitated s-t graphs and max-flow solving
//!
//! This crate provides the graph side of the segmentation energy
//! minimization:
//!
//! - [`FlowGraph`] - pixel nodes with per-node terminal capacities and a
//!   symmetric neighbor edge list
//! - [`MaxFlowSolver`] - the capability the pipeline consumes; swap in any
//!   min-cut implementation
//! - [`DinicSolver`] - the default solver (BFS level graphs + iterative
//!   blocking flow)
//! - [`CancelToken`] - cooperative cancellation polled at phase boundaries

pub mod cancel;
pub mod dinic;
pub mod error;
pub mod graph;
pub mod solver;

pub use cancel::CancelToken;
pub use dinic::DinicSolver;
pub use error::{GraphError, GraphResult};
pub use graph::{FlowGraph, NeighborEdge};
pub use solver::{MaxFlowOutcome, MaxFlowSolver, Side};
