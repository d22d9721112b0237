//! Self-loops are taken out before ranking, stood in for by a dummy next to their node during
//! positioning, and finally routed as a small loop on the node's right side.

use crate::error::Result;
use crate::model::{DetachedEdge, Dummy, LayoutGraph, LayoutNode, Point};
use crate::util;

/// Detaches every self-loop and parks it on its node.
pub fn remove_self_edges(g: &mut LayoutGraph) -> Result<()> {
    let edges = g.edges().to_vec();
    for e in edges {
        let Some(key) = g.edge_key(e).cloned() else {
            continue;
        };
        if key.v != key.w {
            continue;
        }
        if let Some(label) = g.remove_edge(e) {
            util::node_mut(g, key.v)?
                .self_edges
                .push(DetachedEdge { key, label });
        }
    }
    Ok(())
}

/// Inserts one dummy per parked self-loop directly right of its node, shifting the rest of the
/// layer over.
pub fn insert_self_edges(g: &mut LayoutGraph) -> Result<()> {
    for layer in util::build_layer_matrix(g)? {
        let mut shift = 0;
        for (i, v) in layer.into_iter().enumerate() {
            let node = util::node_mut(g, v)?;
            node.order = Some(i + shift);
            let rank = node.rank;
            let parked = std::mem::take(&mut node.self_edges);
            for DetachedEdge { key, label } in parked {
                shift += 1;
                let dummy = LayoutNode {
                    width: label.width,
                    height: label.height,
                    rank,
                    order: Some(i + shift),
                    edge: Some(key),
                    edge_label: Some(Box::new(label)),
                    ..LayoutNode::default()
                };
                util::add_dummy_node(g, Dummy::SelfEdge, dummy, "_se");
            }
        }
    }
    Ok(())
}

/// Replaces each self-loop dummy with the restored edge, routed through five points that bulge
/// out to the dummy's position.
pub fn position_self_edges(g: &mut LayoutGraph) -> Result<()> {
    let nodes = g.nodes().to_vec();
    for v in nodes {
        if util::node(g, v)?.dummy != Some(Dummy::SelfEdge) {
            continue;
        }
        let Some(dummy) = g.remove_node(v) else {
            continue;
        };
        let (Some(key), Some(label)) = (dummy.edge, dummy.edge_label) else {
            continue;
        };
        let mut label = *label;

        let owner = util::node(g, key.v)?;
        let x = owner.x + owner.width / 2.0;
        let y = owner.y;
        let dx = dummy.x - x;
        let dy = owner.height / 2.0;
        label.points = vec![
            Point::new(x + 2.0 * dx / 3.0, y - dy),
            Point::new(x + 5.0 * dx / 6.0, y - dy),
            Point::new(x + dx, y),
            Point::new(x + 5.0 * dx / 6.0, y + dy),
            Point::new(x + 2.0 * dx / 3.0, y + dy),
        ];
        label.x = Some(dummy.x);
        label.y = Some(dummy.y);
        g.set_edge_named(key.v, key.w, key.name.as_deref(), label)?;
    }
    Ok(())
}
