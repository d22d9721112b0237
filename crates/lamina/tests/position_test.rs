use lamina::graph::NodeId;
use lamina::model::{Dummy, LayoutConfig, LayoutEdge, LayoutGraph, LayoutNode, layout_graph};
use lamina::position::bk::compaction::Xs;
use lamina::position::{bk_or_simplex, position_x, simplex, straighten::straighten};
use lamina::LayoutError;

fn place(g: &mut LayoutGraph, key: &str, rank: i32, order: usize, width: f64) -> NodeId {
    g.set_node(
        key,
        LayoutNode {
            width,
            rank: Some(rank),
            order: Some(order),
            ..LayoutNode::default()
        },
    )
}

fn chain_dummy(g: &mut LayoutGraph, key: &str, rank: i32) -> NodeId {
    g.set_node(
        key,
        LayoutNode {
            rank: Some(rank),
            order: Some(0),
            dummy: Some(Dummy::Edge),
            ..LayoutNode::default()
        },
    )
}

const EPS: f64 = 1e-9;

fn assert_near(actual: f64, expected: f64) {
    assert!((actual - expected).abs() < EPS, "{actual} != {expected}");
}

fn simplex_xs(g: &LayoutGraph) -> Xs {
    simplex::position_x(g).unwrap().into_iter().collect()
}

/// `t -> d1 -> d2 -> h` spanning ranks 0..=3, with `n` right of `d1` on rank 1.
struct LongEdge {
    g: LayoutGraph,
    t: NodeId,
    d1: NodeId,
    d2: NodeId,
    h: NodeId,
    n: NodeId,
}

fn long_edge() -> LongEdge {
    let mut g = layout_graph(LayoutConfig::default());
    let t = place(&mut g, "t", 0, 0, 10.0);
    let d1 = chain_dummy(&mut g, "d1", 1);
    let n = place(&mut g, "n", 1, 1, 10.0);
    let d2 = chain_dummy(&mut g, "d2", 2);
    let h = place(&mut g, "h", 3, 0, 10.0);
    g.set_path(&[t, d1, d2, h], LayoutEdge::default()).unwrap();
    g.graph_mut().dummy_chains.push(d1);
    LongEdge { g, t, d1, d2, h, n }
}

fn unstraightened(le: &LongEdge) -> Xs {
    [(le.t, 0.0), (le.d1, 0.0), (le.n, 40.0), (le.d2, 0.0), (le.h, 90.0)]
        .into_iter()
        .collect()
}

#[test]
fn straighten_puts_dummies_on_the_endpoint_line() {
    let le = long_edge();
    let mut xs = unstraightened(&le);
    straighten(&le.g, &mut xs, 1.0).unwrap();

    assert_near(xs[&le.d1], 30.0);
    assert_near(xs[&le.d2], 60.0);
    assert_eq!(xs[&le.t], 0.0);
    assert_eq!(xs[&le.h], 90.0);
}

#[test]
fn straighten_moves_dummies_closer_than_without_it() {
    let le = long_edge();
    let before = unstraightened(&le);
    let mut after = before.clone();
    straighten(&le.g, &mut after, 0.5).unwrap();

    for (d, target) in [(le.d1, 30.0), (le.d2, 60.0)] {
        let off: f64 = before[&d] - target;
        let on: f64 = after[&d] - target;
        assert!(on.abs() < off.abs());
    }
    assert_near(after[&le.d1], 15.0);
    assert_near(after[&le.d2], 30.0);
}

#[test]
fn straighten_restores_layer_separation() {
    let le = long_edge();
    let mut xs = unstraightened(&le);
    straighten(&le.g, &mut xs, 1.0).unwrap();

    // width 10 node beside a zero-width dummy: 5 + nodesep / 2 + edgesep / 2.
    assert!(xs[&le.n] - xs[&le.d1] >= 40.0 - EPS);
    assert_near(xs[&le.n], 70.0);
}

#[test]
fn straighten_rejects_strength_outside_unit_interval() {
    let le = long_edge();
    for strength in [0.0, -0.5, 1.5, f64::NAN] {
        let mut xs = unstraightened(&le);
        assert!(matches!(
            straighten(&le.g, &mut xs, strength),
            Err(LayoutError::InvalidStraighten(_))
        ));
    }
}

#[test]
fn position_x_falls_back_to_simplex_when_brandes_koepf_fails() {
    let mut g = layout_graph(LayoutConfig::default());
    let a = place(&mut g, "a", 0, 0, 10.0);
    let b = place(&mut g, "b", 1, 0, 10.0);
    // Unranked predecessor: Brandes-Koepf needs its order, network simplex ignores it.
    let z = g.set_node("z", LayoutNode::default());
    g.set_edge(a, b, LayoutEdge::default()).unwrap();
    g.set_edge(z, b, LayoutEdge::default()).unwrap();

    assert!(lamina::position::bk::position_x(&g).is_err());
    let xs = position_x(&g).unwrap();
    assert_eq!(xs, simplex_xs(&g));
    assert_eq!(xs[&a], xs[&b]);
    assert!(!xs.contains_key(&z));
}

#[test]
fn bk_or_simplex_replaces_non_finite_coordinates() {
    let mut g = layout_graph(LayoutConfig::default());
    let a = place(&mut g, "a", 0, 0, 10.0);
    let b = place(&mut g, "b", 0, 1, 10.0);

    let xs: Xs = bk_or_simplex(&g, Ok(vec![(a, 0.0), (b, f64::INFINITY)]))
        .unwrap()
        .into_iter()
        .collect();
    assert_eq!(xs, simplex_xs(&g));
    assert!(xs[&b] - xs[&a] >= 60.0);
}

#[test]
fn bk_or_simplex_keeps_finite_coordinates() {
    let mut g = layout_graph(LayoutConfig::default());
    let a = place(&mut g, "a", 0, 0, 10.0);
    let b = place(&mut g, "b", 0, 1, 10.0);

    let kept = bk_or_simplex(&g, Ok(vec![(a, 0.0), (b, 60.0)])).unwrap();
    assert_eq!(kept, vec![(a, 0.0), (b, 60.0)]);
}

#[test]
fn bk_or_simplex_recovers_from_an_error() {
    let mut g = layout_graph(LayoutConfig::default());
    let a = place(&mut g, "a", 0, 0, 10.0);
    let b = place(&mut g, "b", 0, 1, 10.0);

    let xs: Xs = bk_or_simplex(&g, Err(LayoutError::MissingOrder("a".into())))
        .unwrap()
        .into_iter()
        .collect();
    assert_eq!(xs, simplex_xs(&g));
    assert!(xs[&b] - xs[&a] >= 60.0);
}
