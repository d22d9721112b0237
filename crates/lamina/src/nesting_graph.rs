//! Nesting graph for compound layouts.
//!
//! Every compound node gets a top and a bottom border dummy, and weighted constraint edges
//! from the top border down to each child and from each child down to the bottom border. A
//! synthetic root is linked to every top-level entry so the whole graph is connected. Original
//! edge lengths are multiplied by `2 * height + 1` so there is room for the border ranks; that
//! factor is recorded as `node_rank_factor` so empty-rank removal keeps those rows.

use crate::error::Result;
use crate::model::{Dummy, LayoutEdge, LayoutGraph, LayoutNode};
use crate::util;
use lamina_graph::NodeId;

enum Step {
    Enter(NodeId),
    Link { parent: NodeId, child: NodeId },
    Anchor(NodeId),
}

pub fn run(g: &mut LayoutGraph) -> Result<()> {
    let root = util::add_dummy_node(g, Dummy::Root, LayoutNode::default(), "_root");
    let depths = tree_depths(g);
    let height = depths.iter().copied().max().unwrap_or(1).max(1) - 1;
    let node_sep = 2 * height + 1;
    g.graph_mut().nesting_root = Some(root);

    let edges = g.edges().to_vec();
    let mut total_weight = 0.0;
    for e in edges {
        if let Some(label) = g.edge_mut(e) {
            label.minlen *= node_sep;
            total_weight += label.weight;
        }
    }
    let weight = total_weight + 1.0;

    let mut stack: Vec<Step> = g
        .root_children()
        .into_iter()
        .rev()
        .map(Step::Enter)
        .collect();
    while let Some(step) = stack.pop() {
        match step {
            Step::Enter(v) => {
                let children = g.children(v);
                if children.is_empty() {
                    if v != root {
                        g.set_edge(root, v, LayoutEdge::new(0.0, node_sep))?;
                    }
                    continue;
                }

                let top = util::add_dummy_node(g, Dummy::Border, LayoutNode::default(), "_bt");
                let bottom = util::add_dummy_node(g, Dummy::Border, LayoutNode::default(), "_bb");
                g.set_parent(top, Some(v))?;
                g.set_parent(bottom, Some(v))?;
                let label = util::node_mut(g, v)?;
                label.border_top = Some(top);
                label.border_bottom = Some(bottom);

                if g.parent(v).is_none() {
                    stack.push(Step::Anchor(v));
                }
                for &child in children.iter().rev() {
                    stack.push(Step::Link { parent: v, child });
                    stack.push(Step::Enter(child));
                }
            }
            Step::Link { parent, child } => {
                let parent_label = util::node(g, parent)?;
                let (Some(top), Some(bottom)) = (parent_label.border_top, parent_label.border_bottom)
                else {
                    continue;
                };
                let child_label = util::node(g, child)?;
                let child_top = child_label.border_top.unwrap_or(child);
                let child_bottom = child_label.border_bottom.unwrap_or(child);
                let this_weight = if child_label.border_top.is_some() {
                    weight
                } else {
                    2.0 * weight
                };
                let minlen = if child_top != child_bottom {
                    1
                } else {
                    height - depths[parent.index()] + 1
                };
                let nesting = LayoutEdge {
                    nesting: true,
                    ..LayoutEdge::new(this_weight, minlen)
                };
                g.set_edge(top, child_top, nesting.clone())?;
                g.set_edge(child_bottom, bottom, nesting)?;
            }
            Step::Anchor(v) => {
                if let Some(top) = util::node(g, v)?.border_top {
                    let minlen = height + depths[v.index()];
                    g.set_edge(root, top, LayoutEdge::new(0.0, minlen))?;
                }
            }
        }
    }

    g.graph_mut().node_rank_factor = node_sep;
    Ok(())
}

/// Removes the nesting root and every nesting edge. Border dummies stay.
pub fn cleanup(g: &mut LayoutGraph) {
    if let Some(root) = g.graph_mut().nesting_root.take() {
        g.remove_node(root);
    }
    let edges = g.edges().to_vec();
    for e in edges {
        if g.edge(e).is_some_and(|label| label.nesting) {
            g.remove_edge(e);
        }
    }
}

/// Depth of each node in the compound hierarchy; top-level nodes have depth 1.
fn tree_depths(g: &LayoutGraph) -> Vec<i32> {
    let mut depths = vec![0; g.node_bound()];
    let mut stack: Vec<(NodeId, i32)> = g.root_children().into_iter().map(|v| (v, 1)).collect();
    while let Some((v, depth)) = stack.pop() {
        depths[v.index()] = depth;
        stack.extend(g.children(v).into_iter().map(|c| (c, depth + 1)));
    }
    depths
}
