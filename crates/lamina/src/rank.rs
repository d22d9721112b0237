//! Rank assignment.
//!
//! Ranks are computed on the leaf nodes of the working graph only; compound nodes get their
//! rank span later from their border nodes.

pub mod feasible_tree;
pub mod longest_path;
pub mod network_simplex;
pub mod problem;
pub mod tree;

use crate::error::Result;
use crate::model::{LayoutGraph, Ranker};
use crate::util;
use lamina_graph::NodeId;
use problem::RankProblem;

pub use feasible_tree::feasible_tree;
pub use longest_path::longest_path;
pub use network_simplex::network_simplex;

/// Assigns `rank` to every leaf node of `g` with the configured ranker. Ranks are left
/// unnormalized.
pub fn rank(g: &mut LayoutGraph) -> Result<()> {
    let (problem, nodes) = build_problem(g);
    let ranks = match g.graph().config.ranker {
        Ranker::NetworkSimplex => network_simplex(&problem),
        Ranker::TightTree => {
            let mut ranks = longest_path(&problem);
            feasible_tree(&problem, &mut ranks);
            ranks
        }
        Ranker::LongestPath => longest_path(&problem),
    };
    for (v, r) in nodes.into_iter().zip(ranks) {
        util::node_mut(g, v)?.rank = Some(r);
    }
    Ok(())
}

/// Constraint problem over the leaf nodes of `g`: one constraint per edge, `minlen` and
/// `weight` from the edge label.
pub fn build_problem(g: &LayoutGraph) -> (RankProblem, Vec<NodeId>) {
    let nodes: Vec<NodeId> = g
        .nodes()
        .iter()
        .copied()
        .filter(|&v| !g.has_children(v))
        .collect();
    let mut dense = vec![usize::MAX; g.node_bound()];
    for (i, v) in nodes.iter().enumerate() {
        dense[v.index()] = i;
    }

    let mut problem = RankProblem::new(nodes.len());
    for &e in g.edges() {
        let (Some((v, w)), Some(label)) = (g.endpoints(e), g.edge(e)) else {
            continue;
        };
        let (tail, head) = (dense[v.index()], dense[w.index()]);
        if tail == usize::MAX || head == usize::MAX {
            continue;
        }
        problem.constrain(tail, head, label.minlen, label.weight);
    }
    (problem, nodes)
}
