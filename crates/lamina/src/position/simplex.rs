//! Horizontal coordinates as a network-simplex problem (Gansner et al., section 4.2).
//!
//! Every edge `u -> w` gets an auxiliary node `n` with constraints `n -> u` and `n -> w`, so the
//! optimum minimizes `omega * weight * |x(u) - x(w)|`. Neighbors in a layer are kept apart by
//! their separation. Used when Brandes-Koepf fails or is switched off.

use super::bk::sep;
use crate::error::Result;
use crate::model::LayoutGraph;
use crate::rank::network_simplex;
use crate::rank::problem::RankProblem;
use crate::util;
use lamina_graph::NodeId;

/// Edge straightness factor by number of dummy endpoints: long-edge segments pull harder.
fn omega(dummies: usize) -> f64 {
    match dummies {
        0 => 1.0,
        1 => 2.0,
        _ => 8.0,
    }
}

pub fn position_x(g: &LayoutGraph) -> Result<Vec<(NodeId, f64)>> {
    let layering = util::build_layer_matrix(g)?;
    let nodes: Vec<NodeId> = layering.iter().flatten().copied().collect();
    let mut dense = vec![usize::MAX; g.node_bound()];
    for (i, v) in nodes.iter().enumerate() {
        dense[v.index()] = i;
    }

    let edges: Vec<(usize, usize, f64)> = g
        .edges()
        .iter()
        .filter_map(|&e| {
            let (v, w) = g.endpoints(e)?;
            let weight = g.edge(e)?.weight;
            let (a, b) = (dense[v.index()], dense[w.index()]);
            (a != usize::MAX && b != usize::MAX && a != b).then_some((a, b, weight))
        })
        .collect();

    let mut problem = RankProblem::new(nodes.len() + edges.len());
    for (i, &(a, b, weight)) in edges.iter().enumerate() {
        let aux = nodes.len() + i;
        let dummies = [a, b]
            .iter()
            .filter(|&&j| g.node(nodes[j]).is_some_and(|n| n.is_dummy()))
            .count();
        let weight = omega(dummies) * weight;
        problem.constrain(aux, a, 0, weight);
        problem.constrain(aux, b, 0, weight);
    }
    for layer in &layering {
        for pair in layer.windows(2) {
            let (left, right) = (pair[0], pair[1]);
            let gap = sep(g, right, left, false)?.ceil() as i32;
            problem.constrain(dense[left.index()], dense[right.index()], gap, 0.0);
        }
    }

    let xs = network_simplex(&problem);
    tracing::debug!(nodes = nodes.len(), edges = edges.len(), "network simplex positioning");
    Ok(nodes
        .into_iter()
        .zip(xs)
        .map(|(v, x)| (v, f64::from(x)))
        .collect())
}
