use thiserror::Error;

/// Precondition failures reported by the public entry points of the trees and the harness
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum TreeError {
    /// The element type of a `GenericTree` occupies no memory
    #[error("size of tree element must be greater than zero")]
    ZeroSizedElement,

    /// A bulk operation was given nothing to work with
    #[error("batch passed to {operation} is empty")]
    EmptyBatch {
        operation: &'static str,
    },

    /// A destination buffer cannot hold one slot per element of the tree
    #[error("destination holds {available} slots but the tree has {needed} elements")]
    BufferTooSmall {
        needed: usize,
        available: usize,
    },

    /// A measurement was configured with values it cannot run with
    #[error("invalid harness configuration: {reason}")]
    InvalidConfig {
        reason: String,
    },
}
