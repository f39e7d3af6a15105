use std::error::Error;

use thiserror::Error;

/// Trait for checking invariants in datastructures
pub trait InvariantCheck<E: Error> {
    fn is_correct(&self) -> Result<(), E>;
}

/// Errors reported by the exact TSP solvers
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TspError {
    #[error("solver can only handle graphs with up to {max} vertices, got {found}")]
    CapacityExceeded { found: usize, max: usize },

    #[error("invalid graph: {0}")]
    InvalidGraph(String),

    #[error("unknown start vertex {0}")]
    UnknownVertex(String),

    #[error("no hamiltonian cycle through the start vertex")]
    NoSolution,
}

/// Structural violations detected by [`InvariantCheck`] on adjacency list graphs
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("edge between {from} and {to} references a vertex that is not part of the graph")]
    DanglingEdge { from: String, to: String },
}
