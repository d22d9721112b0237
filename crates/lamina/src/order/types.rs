use lamina_graph::NodeId;

/// Barycenter of one movable node (or subgraph) with respect to the fixed neighbor layer.
/// `barycenter` is `None` when the node has no weighted neighbors.
#[derive(Debug, Clone, PartialEq)]
pub struct BarycenterEntry {
    pub v: NodeId,
    pub barycenter: Option<f64>,
    pub weight: f64,
}

/// A run of nodes that must stay contiguous, with its original position `i`.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedEntry {
    pub vs: Vec<NodeId>,
    pub i: usize,
    pub barycenter: Option<f64>,
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SortResult {
    pub vs: Vec<NodeId>,
    pub barycenter: Option<f64>,
    pub weight: f64,
}
