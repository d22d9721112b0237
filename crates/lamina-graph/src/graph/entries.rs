use super::{EdgeId, EdgeKey, NodeId};
use indexmap::{IndexMap, IndexSet};
use rustc_hash::FxBuildHasher;

pub(super) type OrderedSet<T> = IndexSet<T, FxBuildHasher>;
pub(super) type Multiplicity = IndexMap<NodeId, usize, FxBuildHasher>;

#[derive(Debug, Clone)]
pub(super) struct NodeSlot<N> {
    pub(super) key: String,
    pub(super) label: N,
    pub(super) parent: Option<NodeId>,
    pub(super) children: OrderedSet<NodeId>,
    pub(super) in_edges: OrderedSet<EdgeId>,
    pub(super) out_edges: OrderedSet<EdgeId>,
    // Neighbor -> number of parallel edges, so removing one of several parallel edges keeps
    // the neighbor listed.
    pub(super) preds: Multiplicity,
    pub(super) succs: Multiplicity,
}

impl<N> NodeSlot<N> {
    pub(super) fn new(key: String, label: N) -> Self {
        Self {
            key,
            label,
            parent: None,
            children: OrderedSet::default(),
            in_edges: OrderedSet::default(),
            out_edges: OrderedSet::default(),
            preds: Multiplicity::default(),
            succs: Multiplicity::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub(super) struct EdgeSlot<E> {
    pub(super) key: EdgeKey,
    pub(super) label: E,
}

pub(super) fn bump(counts: &mut Multiplicity, node: NodeId) {
    *counts.entry(node).or_insert(0) += 1;
}

pub(super) fn drop_one(counts: &mut Multiplicity, node: NodeId) {
    if let Some(n) = counts.get_mut(&node) {
        *n -= 1;
        if *n == 0 {
            counts.shift_remove(&node);
        }
    }
}
