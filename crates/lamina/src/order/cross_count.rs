use crate::error::Result;
use crate::model::LayoutGraph;
use lamina_graph::NodeId;

/// Weighted number of edge crossings of a layering: for every pair of adjacent layers, the sum
/// over crossing edge pairs of the product of their weights.
pub fn cross_count(g: &LayoutGraph, layering: &[Vec<NodeId>]) -> Result<f64> {
    let mut position = vec![usize::MAX; g.node_bound()];
    let mut cc = 0.0;
    for pair in layering.windows(2) {
        cc += two_layer_cross_count(g, &pair[0], &pair[1], &mut position);
    }
    Ok(cc)
}

/// Accumulator tree method (Barth, Juenger & Mutzel, "Simple and Efficient Bilayer Cross
/// Counting").
fn two_layer_cross_count(g: &LayoutGraph, north: &[NodeId], south: &[NodeId], position: &mut [usize]) -> f64 {
    for (i, v) in south.iter().enumerate() {
        position[v.index()] = i;
    }

    let mut entries: Vec<(usize, f64)> = Vec::new();
    for &v in north {
        let start = entries.len();
        for e in g.out_edges(v) {
            let (Some((_, w)), Some(label)) = (g.endpoints(e), g.edge(e)) else {
                continue;
            };
            let pos = position[w.index()];
            if pos != usize::MAX && south.get(pos) == Some(&w) {
                entries.push((pos, label.weight));
            }
        }
        entries[start..].sort_by_key(|&(pos, _)| pos);
    }

    let mut first_index = 1usize;
    while first_index < south.len() {
        first_index <<= 1;
    }
    let mut tree = vec![0.0; 2 * first_index - 1];
    first_index -= 1;

    let mut cc = 0.0;
    for (pos, weight) in entries {
        let mut index = pos + first_index;
        tree[index] += weight;
        let mut weight_sum = 0.0;
        while index > 0 {
            if index % 2 == 1 {
                weight_sum += tree[index + 1];
            }
            index = (index - 1) >> 1;
            tree[index] += weight;
        }
        cc += weight * weight_sum;
    }
    cc
}
