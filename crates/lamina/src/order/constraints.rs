use crate::model::LayoutGraph;
use indexmap::IndexSet;
use lamina_graph::NodeId;
use rustc_hash::{FxBuildHasher, FxHashMap};

/// Left-to-right constraints between sibling subgraphs, accumulated over one sweep.
#[derive(Debug, Clone, Default)]
pub struct ConstraintGraph {
    edges: IndexSet<(NodeId, NodeId), FxBuildHasher>,
}

impl ConstraintGraph {
    pub fn add(&mut self, left: NodeId, right: NodeId) {
        self.edges.insert((left, right));
    }

    pub fn edges(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.edges.iter().copied()
    }

    pub fn contains(&self, left: NodeId, right: NodeId) -> bool {
        self.edges.contains(&(left, right))
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

/// Records, for the layer just ordered as `vs`, which sibling subgraph came first at each level
/// of the hierarchy, so later layers keep the same relative order.
pub fn add_subgraph_constraints(g: &LayoutGraph, cg: &mut ConstraintGraph, vs: &[NodeId]) {
    let mut prev: FxHashMap<NodeId, NodeId> = FxHashMap::default();
    let mut root_prev: Option<NodeId> = None;

    for &v in vs {
        let mut child = g.parent(v);
        while let Some(c) = child {
            let parent = g.parent(c);
            let prev_child = match parent {
                Some(p) => prev.insert(p, c),
                None => root_prev.replace(c),
            };
            if let Some(pc) = prev_child {
                if pc != c {
                    cg.add(pc, c);
                    break;
                }
            }
            child = parent;
        }
    }
}
