use thiserror::Error;

use crate::graph::TopologyError;

/// Errors that can occur while building a `SpringSystem`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    /// The node or edge records did not resolve
    #[error(transparent)]
    Topology(#[from] TopologyError),

    /// `with_positions` was given the wrong number of positions
    #[error("expected {expected} initial positions, got {actual}")]
    LayoutLength { expected: usize, actual: usize },

    /// The pair list for this many nodes cannot be addressed
    #[error("{count} nodes need more pair storage than can be addressed")]
    TooManyPairs { count: usize },

    /// A tuning parameter is outside its valid range
    #[error("invalid config: {field} must be {expected}, got {value}")]
    InvalidConfig {
        field: &'static str,
        expected: &'static str,
        value: f32,
    },
}

/// Result type for simulation construction
pub type SimulationResult<T> = Result<T, SimulationError>;
