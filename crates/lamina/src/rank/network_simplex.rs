//! Network simplex ranking (Gansner et al., "A Technique for Drawing Directed Graphs").
//!
//! Start from a longest-path ranking, grow a feasible tight spanning tree, then repeatedly swap a
//! tree edge with negative cut value for the non-tree edge of minimum slack that reconnects the
//! two halves. The loop ends when every cut value is non-negative, which makes the total weighted
//! edge length minimal.

use super::feasible_tree::feasible_tree;
use super::longest_path::longest_path;
use super::problem::RankProblem;
use super::tree::SpanningTree;

const CUT_EPSILON: f64 = 1e-9;

/// Solves `p` and returns one rank per problem node. Ranks are not normalized.
pub fn network_simplex(p: &RankProblem) -> Vec<i32> {
    let mut ranks = longest_path(p);
    if p.is_empty() {
        return ranks;
    }
    let mut tree = feasible_tree(p, &mut ranks);
    tree.init_low_lim();
    tree.init_cut_values(p);

    // Every intermediate ranking is feasible, so the cap only costs optimality.
    let limit = 64 * (p.len() + p.constraints().len()).max(64);
    let mut pivots = 0usize;
    while let Some(child) = leave_edge(&tree) {
        let Some(entering) = enter_edge(&tree, p, &ranks, child) else {
            break;
        };
        exchange_edges(&mut tree, p, &mut ranks, child, entering);
        pivots += 1;
        if pivots >= limit {
            tracing::warn!(pivots, "network simplex stopped at the pivot limit");
            break;
        }
    }
    tracing::trace!(pivots, nodes = p.len(), "network simplex");
    ranks
}

/// A tree edge, named by its child endpoint, whose cut value is negative.
pub fn leave_edge(tree: &SpanningTree) -> Option<usize> {
    tree.postorder()
        .iter()
        .copied()
        .find(|&v| tree.parent[v].is_some() && tree.cut[v] < -CUT_EPSILON)
}

/// Minimum-slack constraint crossing the cut made by removing the tree edge above `child`, in the
/// direction opposite to that tree edge.
pub fn enter_edge(
    tree: &SpanningTree,
    p: &RankProblem,
    ranks: &[i32],
    child: usize,
) -> Option<usize> {
    let parent = tree.parent[child]?;
    // The tree edge points from parent to child in the constraint graph.
    let flip = p.find(child, parent).is_none();
    (0..p.constraints().len())
        .filter(|&ci| {
            let c = p.constraint(ci);
            flip == tree.is_descendant(c.tail, child) && flip != tree.is_descendant(c.head, child)
        })
        .min_by_key(|&ci| p.slack(ranks, ci))
}

pub fn exchange_edges(
    tree: &mut SpanningTree,
    p: &RankProblem,
    ranks: &mut [i32],
    child: usize,
    entering: usize,
) {
    if let Some(parent) = tree.parent[child] {
        tree.remove_edge(child, parent);
    }
    let c = p.constraint(entering);
    tree.add_edge(c.tail, c.head);
    tree.init_low_lim();
    tree.init_cut_values(p);
    update_ranks(tree, p, ranks);
}

/// Re-derives ranks from each root so every tree edge is tight.
fn update_ranks(tree: &SpanningTree, p: &RankProblem, ranks: &mut [i32]) {
    for &v in tree.postorder().iter().rev() {
        let Some(parent) = tree.parent[v] else {
            continue;
        };
        if let Some(ci) = p.find(v, parent) {
            ranks[v] = ranks[parent] - p.constraint(ci).minlen;
        } else if let Some(ci) = p.find(parent, v) {
            ranks[v] = ranks[parent] + p.constraint(ci).minlen;
        }
    }
}
