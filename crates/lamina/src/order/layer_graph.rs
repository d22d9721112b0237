//! Per-rank view of the working graph used by one sweep step.

use crate::error::Result;
use crate::model::LayoutGraph;
use crate::util;
use lamina_graph::NodeId;
use rustc_hash::FxHashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relationship {
    /// Neighbors on the rank above (downward sweep).
    InEdges,
    /// Neighbors on the rank below (upward sweep).
    OutEdges,
}

/// Nodes of one rank with their compound hierarchy, and for every node the summed edge weight
/// to each neighbor on the fixed adjacent rank. Subgraphs spanning the rank appear with their
/// left and right border nodes for this rank.
#[derive(Debug, Clone, Default)]
pub struct LayerGraph {
    pub rank: i32,
    children: FxHashMap<Option<NodeId>, Vec<NodeId>>,
    neighbors: FxHashMap<NodeId, Vec<(NodeId, f64)>>,
    borders: FxHashMap<NodeId, (NodeId, NodeId)>,
}

impl LayerGraph {
    /// Members directly under `parent` (`None` = top level), in working-graph order.
    pub fn children(&self, parent: Option<NodeId>) -> &[NodeId] {
        self.children.get(&parent).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn has_children(&self, v: NodeId) -> bool {
        !self.children(Some(v)).is_empty()
    }

    /// Adjacent-rank neighbors of `v` with merged weights.
    pub fn neighbors(&self, v: NodeId) -> &[(NodeId, f64)] {
        self.neighbors.get(&v).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn borders(&self, v: NodeId) -> Option<(NodeId, NodeId)> {
        self.borders.get(&v).copied()
    }
}

pub fn build_layer_graph(g: &LayoutGraph, rank: i32, relationship: Relationship) -> Result<LayerGraph> {
    let mut lg = LayerGraph {
        rank,
        ..Default::default()
    };

    for &v in g.nodes() {
        let node = util::node(g, v)?;
        let spans = match (node.min_rank, node.max_rank) {
            (Some(lo), Some(hi)) => lo <= rank && rank <= hi,
            _ => false,
        };
        if node.rank != Some(rank) && !spans {
            continue;
        }

        lg.children.entry(g.parent(v)).or_default().push(v);

        let edges = match relationship {
            Relationship::InEdges => g.in_edges(v),
            Relationship::OutEdges => g.out_edges(v),
        };
        let mut merged: Vec<(NodeId, f64)> = Vec::with_capacity(edges.len());
        for e in edges {
            let (Some((a, b)), Some(label)) = (g.endpoints(e), g.edge(e)) else {
                continue;
            };
            let u = if a == v { b } else { a };
            match merged.iter_mut().find(|(w, _)| *w == u) {
                Some((_, weight)) => *weight += label.weight,
                None => merged.push((u, label.weight)),
            }
        }
        if !merged.is_empty() {
            lg.neighbors.insert(v, merged);
        }

        if node.min_rank.is_some() {
            let at = usize::try_from(rank).ok();
            let left = at.and_then(|r| node.border_left.get(r).copied().flatten());
            let right = at.and_then(|r| node.border_right.get(r).copied().flatten());
            if let (Some(left), Some(right)) = (left, right) {
                lg.borders.insert(v, (left, right));
            }
        }
    }
    Ok(lg)
}
