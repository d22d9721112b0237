use lamina::graph::NodeId;
use lamina::model::{LayoutConfig, LayoutEdge, LayoutGraph, LayoutNode, Ranker, layout_graph};
use lamina::rank::problem::RankProblem;
use lamina::rank::{feasible_tree, longest_path, network_simplex, rank};

fn problem(len: usize, constraints: &[(usize, usize, i32, f64)]) -> RankProblem {
    let mut p = RankProblem::new(len);
    for &(tail, head, minlen, weight) in constraints {
        p.constrain(tail, head, minlen, weight);
    }
    p
}

fn assert_feasible(p: &RankProblem, ranks: &[i32]) {
    for i in 0..p.constraints().len() {
        assert!(p.slack(ranks, i) >= 0, "constraint {i} violated: {ranks:?}");
    }
}

fn cost(p: &RankProblem, ranks: &[i32]) -> f64 {
    p.constraints()
        .iter()
        .map(|c| c.weight * f64::from(ranks[c.head] - ranks[c.tail]))
        .sum()
}

fn normalized(ranks: &[i32]) -> Vec<i32> {
    let min = ranks.iter().copied().min().unwrap_or(0);
    ranks.iter().map(|r| r - min).collect()
}

#[test]
fn constrain_merges_parallel_constraints() {
    let p = problem(2, &[(0, 1, 1, 1.0), (0, 1, 3, 2.0), (1, 1, 1, 1.0)]);
    assert_eq!(p.constraints().len(), 1);
    let c = p.constraint(0);
    assert_eq!(c.minlen, 3);
    assert_eq!(c.weight, 3.0);
}

#[test]
fn longest_path_puts_sinks_at_zero() {
    let p = problem(4, &[(0, 1, 1, 1.0), (1, 2, 2, 1.0), (0, 3, 1, 1.0)]);
    let ranks = longest_path(&p);
    assert_eq!(ranks, vec![-3, -2, 0, 0]);
    assert_feasible(&p, &ranks);
}

#[test]
fn feasible_tree_spans_a_connected_problem_with_tight_edges() {
    let p = problem(4, &[(0, 1, 1, 1.0), (1, 2, 1, 1.0), (0, 3, 1, 1.0), (3, 2, 1, 1.0)]);
    let mut ranks = longest_path(&p);
    let tree = feasible_tree(&p, &mut ranks);
    assert_eq!(tree.size(), 4);
    assert_eq!(tree.edge_count(), 3);
    assert_feasible(&p, &ranks);
}

#[test]
fn network_simplex_ranks_a_diamond() {
    let p = problem(4, &[(0, 1, 1, 1.0), (0, 2, 1, 1.0), (1, 3, 1, 1.0), (2, 3, 1, 1.0)]);
    let ranks = normalized(&network_simplex(&p));
    assert_eq!(ranks, vec![0, 1, 1, 2]);
}

#[test]
fn network_simplex_shortens_edges_longest_path_leaves_long() {
    // s -> a -> b -> c plus s -> d: longest path pins d at the bottom.
    let p = problem(
        5,
        &[(0, 1, 1, 1.0), (1, 2, 1, 1.0), (2, 3, 1, 1.0), (0, 4, 1, 1.0)],
    );
    let initial = longest_path(&p);
    assert_eq!(cost(&p, &initial), 6.0);

    let ranks = network_simplex(&p);
    assert_feasible(&p, &ranks);
    assert_eq!(cost(&p, &ranks), 4.0);
}

#[test]
fn network_simplex_respects_minlen_and_weights() {
    let p = problem(
        4,
        &[(0, 1, 2, 1.0), (1, 2, 1, 1.0), (0, 3, 1, 5.0), (3, 2, 1, 5.0)],
    );
    let ranks = network_simplex(&p);
    assert_feasible(&p, &ranks);
    // Both paths end up spanning the three ranks the light path needs.
    assert_eq!(ranks[2] - ranks[0], 3);
    assert_eq!(cost(&p, &ranks), 3.0 + 15.0);
}

#[test]
fn network_simplex_handles_disconnected_components() {
    let p = problem(5, &[(0, 1, 1, 1.0), (2, 3, 2, 1.0)]);
    let ranks = network_simplex(&p);
    assert_feasible(&p, &ranks);
    assert_eq!(ranks[1] - ranks[0], 1);
    assert_eq!(ranks[3] - ranks[2], 2);
}

#[test]
fn network_simplex_on_an_empty_problem() {
    assert!(network_simplex(&RankProblem::new(0)).is_empty());
}

fn ranked_graph(ranker: Ranker) -> (LayoutGraph, Vec<NodeId>) {
    let mut g = layout_graph(LayoutConfig {
        ranker,
        ..LayoutConfig::default()
    });
    let n: Vec<NodeId> = ["a", "b", "c", "d", "e"]
        .iter()
        .map(|k| g.set_node(*k, LayoutNode::default()))
        .collect();
    g.set_edge(n[0], n[1], LayoutEdge::new(1.0, 1)).unwrap();
    g.set_edge(n[1], n[2], LayoutEdge::new(1.0, 1)).unwrap();
    g.set_edge(n[2], n[3], LayoutEdge::new(1.0, 1)).unwrap();
    g.set_edge(n[0], n[4], LayoutEdge::new(1.0, 2)).unwrap();
    (g, n)
}

#[test]
fn rank_respects_minlen_with_every_ranker() {
    for ranker in [Ranker::NetworkSimplex, Ranker::TightTree, Ranker::LongestPath] {
        let (mut g, _) = ranked_graph(ranker);
        rank(&mut g).unwrap();
        for &e in g.edges() {
            let (v, w) = g.endpoints(e).unwrap();
            let minlen = g.edge(e).unwrap().minlen;
            let rv = g.node(v).unwrap().rank.unwrap();
            let rw = g.node(w).unwrap().rank.unwrap();
            assert!(rw - rv >= minlen, "{ranker:?}: {v} -> {w}");
        }
    }
}

#[test]
fn rank_with_network_simplex_pulls_short_branches_up() {
    let (mut g, n) = ranked_graph(Ranker::NetworkSimplex);
    rank(&mut g).unwrap();
    let r = |v: NodeId| g.node(v).unwrap().rank.unwrap();
    assert_eq!(r(n[4]) - r(n[0]), 2);
    assert_eq!(r(n[3]) - r(n[0]), 3);
}

#[test]
fn rank_skips_compound_nodes() {
    let mut g = layout_graph(LayoutConfig::default());
    let a = g.set_node("a", LayoutNode::default());
    let b = g.set_node("b", LayoutNode::default());
    let sg = g.set_node("sg", LayoutNode::default());
    g.set_parent(a, Some(sg)).unwrap();
    g.set_edge(a, b, LayoutEdge::new(1.0, 1)).unwrap();
    rank(&mut g).unwrap();

    assert!(g.node(sg).unwrap().rank.is_none());
    let ra = g.node(a).unwrap().rank.unwrap();
    let rb = g.node(b).unwrap().rank.unwrap();
    assert_eq!(rb - ra, 1);
}
