//! Error types for transform math and composite evaluation.

use crate::float_types::Real;
use thiserror::Error;

/// Everything that can go wrong while building or querying a composite shape.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CsgError {
    /// The fast inverse was requested for a matrix whose homogeneous row is not `(0, 0, 0, 1)`.
    #[error("matrix is not a transformation matrix: homogeneous row is {homogeneous_row:?}")]
    NotRigidTransform {
        /// The offending row, read as `(m30, m31, m32, m33)`.
        homogeneous_row: [Real; 4],
    },

    /// A root or operator child reference points past the end of the node arena.
    #[error("node reference {node} is out of range for {len} nodes")]
    NodeOutOfRange { node: usize, len: usize },

    /// A leaf references a primitive that was never stored.
    #[error("shape reference {shape} is out of range for {len} shapes")]
    ShapeOutOfRange { shape: usize, len: usize },

    /// A node is its own ancestor, so the tree loops back on itself.
    #[error("composite tree contains a cycle through node {node}")]
    CyclicTree { node: usize },

    /// A node is reachable through more than one parent, or was offered as an
    /// operand after already being one.
    #[error("node {node} is already used as an operand elsewhere in the tree")]
    SharedNode { node: usize },

    /// An operator found fewer than two operands on the evaluation stack.
    #[error("evaluation stack underflow at instruction {position}")]
    StackUnderflow { position: usize },

    /// Evaluation did not reduce to a single boolean.
    #[error("invalid number of results on the evaluation stack: {remaining}")]
    UnbalancedStack { remaining: usize },

    /// The registry has no shape under this id.
    #[error("no composite shape registered under id {id}")]
    UnknownShape { id: u32 },

    /// Voxel edge length must be finite and strictly positive.
    #[error("invalid voxel size {size}")]
    InvalidVoxelSize { size: Real },

    /// The requested sample grid does not fit in memory addressing.
    #[error("voxel grid of {counts:?} samples is too large")]
    GridTooLarge { counts: [Real; 3] },
}

impl CsgError {
    /// Assertion-class failures additionally trigger the diagnostic break hook.
    pub fn is_assertion(&self) -> bool {
        matches!(self, CsgError::NotRigidTransform { .. })
    }

    /// True for the failures that mean the boolean tree itself is inconsistent.
    pub fn is_malformed_tree(&self) -> bool {
        matches!(
            self,
            CsgError::NodeOutOfRange { .. }
                | CsgError::ShapeOutOfRange { .. }
                | CsgError::CyclicTree { .. }
                | CsgError::SharedNode { .. }
                | CsgError::StackUnderflow { .. }
                | CsgError::UnbalancedStack { .. }
        )
    }
}

/// Result type used throughout the crate.
pub type CsgResult<T> = Result<T, CsgError>;
