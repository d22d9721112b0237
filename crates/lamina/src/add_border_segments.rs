//! Left and right border chains for compound nodes: one dummy per rank the compound node spans
//! on each side, linked top to bottom.

use crate::error::Result;
use crate::model::{BorderSide, Dummy, LayoutEdge, LayoutGraph, LayoutNode};
use crate::util;
use lamina_graph::NodeId;

pub fn add_border_segments(g: &mut LayoutGraph) -> Result<()> {
    for v in util::hierarchy_postorder(g) {
        let node = util::node(g, v)?;
        let (Some(min_rank), Some(max_rank)) = (node.min_rank, node.max_rank) else {
            continue;
        };
        let len = usize::try_from(max_rank + 1).unwrap_or(0);
        let mut left: Vec<Option<NodeId>> = vec![None; len];
        let mut right: Vec<Option<NodeId>> = vec![None; len];
        for rank in min_rank..=max_rank {
            add_border_node(g, v, &mut left, BorderSide::Left, rank)?;
            add_border_node(g, v, &mut right, BorderSide::Right, rank)?;
        }
        let node = util::node_mut(g, v)?;
        node.border_left = left;
        node.border_right = right;
    }
    Ok(())
}

fn add_border_node(
    g: &mut LayoutGraph,
    subgraph: NodeId,
    segment: &mut [Option<NodeId>],
    side: BorderSide,
    rank: i32,
) -> Result<()> {
    let prefix = match side {
        BorderSide::Left => "_bl",
        BorderSide::Right => "_br",
    };
    let label = LayoutNode {
        rank: Some(rank),
        border_side: Some(side),
        ..LayoutNode::default()
    };
    let curr = util::add_dummy_node(g, Dummy::Border, label, prefix);
    g.set_parent(curr, Some(subgraph))?;

    let Ok(i) = usize::try_from(rank) else {
        return Ok(());
    };
    let prev = i.checked_sub(1).and_then(|p| segment.get(p).copied().flatten());
    if let Some(slot) = segment.get_mut(i) {
        *slot = Some(curr);
    }
    if let Some(prev) = prev {
        g.set_edge(prev, curr, LayoutEdge::new(1.0, 1))?;
    }
    Ok(())
}
