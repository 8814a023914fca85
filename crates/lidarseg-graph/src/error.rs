//! Error types for lidarseg-graph

use thiserror::Error;

/// Errors that can occur while building or cutting a flow graph
#[derive(Debug, Error)]
pub enum GraphError {
    /// Node index outside the graph
    #[error("node out of range: {node} >= {num_nodes}")]
    NodeOutOfRange { node: u32, num_nodes: u32 },

    /// Capacity that is negative, NaN, or infinite
    #[error("invalid capacity {capacity} on edge {context}")]
    InvalidCapacity { capacity: f64, context: String },

    /// The solver reported an internal failure
    #[error("max-flow solver failure: {0}")]
    SolverFailure(String),

    /// A cancellation token tripped mid-run
    #[error("max-flow computation cancelled")]
    Cancelled,
}

/// Result type for graph operations
pub type GraphResult<T> = Result<T, GraphError>;
