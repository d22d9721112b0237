//! Room for edge labels.
//!
//! Ranks are doubled so every edge gets an intermediate rank that can hold its label, and the
//! label offset is folded into the label's size. A temporary proxy node marks the middle rank
//! of each labelled edge so rank compaction keeps it; the proxy's final rank becomes the edge's
//! label rank.

use crate::error::Result;
use crate::model::{Dummy, LabelPos, LayoutGraph, LayoutNode};
use crate::util;

pub fn make_space_for_edge_labels(g: &mut LayoutGraph) {
    let config = &mut g.graph_mut().config;
    config.ranksep /= 2.0;
    let horizontal = config.rankdir.is_horizontal();

    for e in g.edges().to_vec() {
        let Some(edge) = g.edge_mut(e) else { continue };
        edge.minlen *= 2;
        if edge.labelpos != LabelPos::C {
            if horizontal {
                edge.height += edge.labeloffset;
            } else {
                edge.width += edge.labeloffset;
            }
        }
    }
}

pub fn inject_edge_label_proxies(g: &mut LayoutGraph) -> Result<()> {
    for e in g.edges().to_vec() {
        let (Some(key), Some(edge)) = (g.edge_key(e), g.edge(e)) else {
            continue;
        };
        if !edge.has_label() {
            continue;
        }
        let key = key.clone();
        let v_rank = util::rank(g, key.v)?;
        let w_rank = util::rank(g, key.w)?;
        let proxy = LayoutNode {
            rank: Some(v_rank + (w_rank - v_rank) / 2),
            edge: Some(key),
            ..LayoutNode::default()
        };
        util::add_dummy_node(g, Dummy::EdgeProxy, proxy, "_ep");
    }
    Ok(())
}

pub fn remove_edge_label_proxies(g: &mut LayoutGraph) -> Result<()> {
    for v in g.nodes().to_vec() {
        let node = util::node(g, v)?;
        if node.dummy != Some(Dummy::EdgeProxy) {
            continue;
        }
        let rank = node.rank;
        if let Some(key) = node.edge.clone() {
            if let Some(edge) = g
                .find_edge(key.v, key.w, key.name.as_deref())
                .and_then(|e| g.edge_mut(e))
            {
                edge.label_rank = rank;
            }
        }
        g.remove_node(v);
    }
    Ok(())
}

/// Moves side labels off the edge by half their width plus the offset, and gives back the
/// offset that was added to their width.
pub fn fixup_edge_label_coords(g: &mut LayoutGraph) {
    for e in g.edges().to_vec() {
        let Some(edge) = g.edge_mut(e) else { continue };
        let Some(x) = edge.x.as_mut() else { continue };
        match edge.labelpos {
            LabelPos::L => {
                edge.width -= edge.labeloffset;
                *x -= edge.width / 2.0 + edge.labeloffset;
            }
            LabelPos::R => {
                edge.width -= edge.labeloffset;
                *x += edge.width / 2.0 + edge.labeloffset;
            }
            LabelPos::C => {}
        }
    }
}
