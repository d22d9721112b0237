use crate::NodeId;

/// Structural errors raised by [`crate::Graph`] mutations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    #[error("cannot set parent of `{node}`: graph is not compound")]
    NotCompound { node: String },

    #[error("setting the parent of `{node}` to `{parent}` would create a cycle")]
    ParentCycle { node: String, parent: String },

    #[error("edge `{v}` -> `{w}` is named `{name}` but the graph is not a multigraph")]
    NamedEdgeInSimpleGraph { v: String, w: String, name: String },

    #[error("edge arena is full")]
    EdgeCapacity,

    #[error("{0} does not refer to a live node")]
    MissingNode(NodeId),
}

pub type Result<T> = std::result::Result<T, GraphError>;
