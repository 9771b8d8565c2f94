use crate::{Handle, Operation};

/// The errors that can occur while building trees or configuring costs.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// The [Handle] was not issued by this [TreeBuilder][crate::TreeBuilder].
    #[error("node {0} does not belong to this builder")]
    UnknownNode(Handle),

    /// The child is already attached somewhere else.
    #[error("node {child} already has parent {parent}")]
    MultipleParents { child: Handle, parent: Handle },

    /// The child is the parent itself or one of its ancestors.
    #[error("attaching {child} under {parent} would create a cycle")]
    Cycle { parent: Handle, child: Handle },

    /// A node of a [Tree][crate::Tree] is its own descendant, identified by its position in
    /// pre-order.
    #[error("node #{0} in pre-order is its own descendant")]
    CyclicNode(usize),

    /// A node of a [Tree][crate::Tree] is the child of more than one node, identified by its
    /// position in pre-order.
    #[error("node #{0} in pre-order is reachable along more than one path")]
    SharedNode(usize),

    /// Only a node without a parent can root a tree.
    #[error("node {0} has a parent and cannot be the root")]
    NotARoot(Handle),

    /// Costs must be finite and non-negative.
    #[error("{operation} cost must be finite and non-negative, got {value}")]
    InvalidCost { operation: Operation, value: f64 },
}

pub type Result<T> = std::result::Result<T, Error>;
