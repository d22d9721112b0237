//! Long-edge normalization.
//!
//! Every edge spanning more than one rank is replaced by a chain of unit-length segments
//! through dummy nodes, one per intermediate rank. The dummy on the edge's label rank takes the
//! label's size. `undo` collapses the chains back into the original edges, turning dummy
//! positions into bend points.

use crate::error::Result;
use crate::model::{Dummy, LayoutEdge, LayoutGraph, LayoutNode, Point};
use crate::util;

pub fn run(g: &mut LayoutGraph) -> Result<()> {
    g.graph_mut().dummy_chains.clear();
    let edges = g.edges().to_vec();
    let mut chains = 0usize;

    for e in edges {
        let (Some(key), Some((v, w))) = (g.edge_key(e).cloned(), g.endpoints(e)) else {
            continue;
        };
        let v_rank = util::rank(g, v)?;
        let w_rank = util::rank(g, w)?;
        if w_rank <= v_rank + 1 {
            continue;
        }
        let Some(mut label) = g.remove_edge(e) else {
            continue;
        };
        label.points.clear();
        let weight = label.weight;

        let mut prev = v;
        let mut first = None;
        for rank in v_rank + 1..w_rank {
            let mut node = LayoutNode {
                rank: Some(rank),
                edge: Some(key.clone()),
                ..LayoutNode::default()
            };
            let kind = if label.label_rank == Some(rank) {
                node.width = label.width;
                node.height = label.height;
                node.labelpos = Some(label.labelpos);
                Dummy::EdgeLabel
            } else {
                Dummy::Edge
            };
            let dummy = util::add_dummy_node(g, kind, node, "_d");
            g.set_edge_named(prev, dummy, key.name.as_deref(), LayoutEdge::new(weight, 1))?;
            if first.is_none() {
                first = Some(dummy);
            }
            prev = dummy;
        }
        g.set_edge_named(prev, w, key.name.as_deref(), LayoutEdge::new(weight, 1))?;

        if let Some(first) = first {
            util::node_mut(g, first)?.edge_label = Some(Box::new(label));
            g.graph_mut().dummy_chains.push(first);
            chains += 1;
        }
    }
    tracing::trace!(chains, "normalize");
    Ok(())
}

/// Restores every chain's original edge, collecting the chain's dummy positions as points and
/// the label dummy's position as the label position.
pub fn undo(g: &mut LayoutGraph) -> Result<()> {
    let chains = std::mem::take(&mut g.graph_mut().dummy_chains);
    for start in chains {
        let node = util::node_mut(g, start)?;
        let (Some(key), Some(label)) = (node.edge.clone(), node.edge_label.take()) else {
            continue;
        };
        let mut label = *label;

        let mut v = start;
        loop {
            let node = util::node(g, v)?;
            if !node.is_dummy() {
                break;
            }
            label.points.push(Point::new(node.x, node.y));
            if node.dummy == Some(Dummy::EdgeLabel) {
                label.x = Some(node.x);
                label.y = Some(node.y);
                label.width = node.width;
                label.height = node.height;
            }
            let next = g.first_successor(v);
            g.remove_node(v);
            match next {
                Some(w) => v = w,
                None => break,
            }
        }
        g.set_edge_named(key.v, key.w, key.name.as_deref(), label)?;
    }
    Ok(())
}
