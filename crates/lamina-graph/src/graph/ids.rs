use std::fmt;

/// Handle to a node slot. Slots are tombstoned on removal and never reused, so a graph holds at
/// most `NodeId::MAX_INDEX + 1` node insertions over its lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    pub const MAX_INDEX: usize = u32::MAX as usize;

    /// Handle for arena slot `index`, or `None` past [`NodeId::MAX_INDEX`].
    pub fn try_from_index(index: usize) -> Option<Self> {
        u32::try_from(index).ok().map(NodeId)
    }

    /// Arena index, stable for the lifetime of the graph.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node#{}", self.0)
    }
}

/// Handle to an edge slot. Same lifetime bound as [`NodeId`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId(pub(crate) u32);

impl EdgeId {
    pub const MAX_INDEX: usize = u32::MAX as usize;

    pub fn try_from_index(index: usize) -> Option<Self> {
        u32::try_from(index).ok().map(EdgeId)
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "edge#{}", self.0)
    }
}
