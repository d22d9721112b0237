//! Copying between the caller's graph and the working graph.

use crate::error::{LayoutError, Result};
use crate::model::{InputGraph, LayoutEdge, LayoutGraph, LayoutNode, LayoutSummary, layout_graph};
use crate::util;
use lamina_graph::NodeId;

/// Builds the working graph: same node keys, same edge keys, internal records. Edges touching
/// a compound node are rejected.
pub fn build_layout_graph(input: &InputGraph) -> Result<LayoutGraph> {
    let mut g = layout_graph(input.graph().clone());

    let mut ids = vec![None; input.node_bound()];
    for &v in input.nodes() {
        let (Some(key), Some(label)) = (input.key(v), input.node(v)) else {
            continue;
        };
        ids[v.index()] = Some(g.set_node(key, LayoutNode::new(label.width, label.height)));
    }
    let mapped = |v: NodeId| ids[v.index()].ok_or_else(|| LayoutError::MissingNode(util::name(input, v)));

    if input.is_compound() {
        for &v in input.nodes() {
            if let Some(parent) = input.parent(v) {
                g.set_parent(mapped(v)?, Some(mapped(parent)?))?;
            }
        }
    }

    for &e in input.edges() {
        let (Some(key), Some(label)) = (input.edge_key(e), input.edge(e)) else {
            continue;
        };
        for end in [key.v, key.w] {
            if input.is_compound() && input.has_children(end) {
                return Err(LayoutError::EdgeOnCompoundNode {
                    v: util::name(input, key.v),
                    w: util::name(input, key.w),
                    node: util::name(input, end),
                });
            }
        }
        let edge = LayoutEdge {
            width: label.width,
            height: label.height,
            labelpos: label.labelpos,
            labeloffset: label.labeloffset,
            ..LayoutEdge::new(label.weight, i32::try_from(label.minlen).unwrap_or(i32::MAX))
        };
        g.set_edge_named(mapped(key.v)?, mapped(key.w)?, key.name.as_deref(), edge)?;
    }
    Ok(g)
}

/// Copies coordinates, compound sizes, edge routes and label positions back to the caller.
pub fn update_input_graph(input: &mut InputGraph, g: &LayoutGraph) -> Result<LayoutSummary> {
    for v in input.nodes().to_vec() {
        let Some(key) = input.key(v) else { continue };
        let lv = g
            .node_id(key)
            .ok_or_else(|| LayoutError::MissingNode(key.to_string()))?;
        let layout = util::node(g, lv)?;
        let is_compound = g.has_children(lv);
        if let Some(label) = input.node_mut(v) {
            label.x = Some(layout.x);
            label.y = Some(layout.y);
            if is_compound {
                label.width = layout.width;
                label.height = layout.height;
            }
        }
    }

    for e in input.edges().to_vec() {
        let Some(key) = input.edge_key(e) else { continue };
        let (Some(v), Some(w)) = (input.key(key.v), input.key(key.w)) else {
            continue;
        };
        let (Some(lv), Some(lw)) = (g.node_id(v), g.node_id(w)) else {
            continue;
        };
        let layout = g
            .edge_between(lv, lw, key.name.as_deref())
            .ok_or(LayoutError::MissingEdge(e))?;
        if let Some(label) = input.edge_mut(e) {
            label.points = layout.points.clone();
            label.x = layout.x;
            label.y = layout.y;
        }
    }

    Ok(LayoutSummary {
        width: g.graph().width,
        height: g.graph().height,
    })
}
