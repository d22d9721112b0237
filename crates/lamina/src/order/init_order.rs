use crate::error::Result;
use crate::model::LayoutGraph;
use crate::util;
use lamina_graph::{NodeId, alg};

/// Initial layering: a depth-first walk from the leaf nodes in rank order, appending each node
/// to its rank's layer as it is first reached. Nodes reached together end up near each other,
/// which gives the sweeps a much better start than arbitrary order.
pub fn init_order(g: &LayoutGraph) -> Result<Vec<Vec<NodeId>>> {
    let mut simple: Vec<(i32, NodeId)> = Vec::new();
    for &v in g.nodes() {
        if g.has_children(v) {
            continue;
        }
        if let Some(r) = util::node(g, v)?.rank {
            simple.push((r, v));
        }
    }
    simple.sort_by_key(|&(r, _)| r);
    let max_rank = simple.last().map_or(0, |&(r, _)| r.max(0) as usize);
    let roots: Vec<NodeId> = simple.into_iter().map(|(_, v)| v).collect();

    let mut layers: Vec<Vec<NodeId>> = vec![Vec::new(); max_rank + 1];
    for v in alg::preorder(g, &roots) {
        let Some(r) = util::node(g, v)?.rank else {
            continue;
        };
        if let Some(layer) = usize::try_from(r).ok().and_then(|r| layers.get_mut(r)) {
            layer.push(v);
        }
    }
    Ok(layers)
}
