use lamina::graph::NodeId;
use lamina::{
    EdgeLabel, InputGraph, LayoutConfig, LayoutError, NodeLabel, Point, Positioner, RankDir,
    Stage, input_graph, input_graph_with, layout, layout_with_progress,
};

const EPS: f64 = 1e-6;

fn center(g: &InputGraph, v: NodeId) -> (f64, f64) {
    let label = g.node(v).unwrap();
    (label.x.unwrap(), label.y.unwrap())
}

fn points(g: &InputGraph, v: NodeId, w: NodeId) -> Vec<Point> {
    g.edge_between(v, w, None).unwrap().points.clone()
}

fn chain(config: LayoutConfig) -> (InputGraph, NodeId, NodeId) {
    let mut g = input_graph_with(config);
    let a = g.set_node("a", NodeLabel::new(80.0, 40.0));
    let b = g.set_node("b", NodeLabel::new(80.0, 40.0));
    g.set_edge(a, b, EdgeLabel::default()).unwrap();
    (g, a, b)
}

#[test]
fn layout_of_an_empty_graph_is_empty() {
    let mut g = input_graph();
    let summary = layout(&mut g).unwrap();
    assert_eq!(summary.width, 0.0);
    assert_eq!(summary.height, 0.0);
}

#[test]
fn layout_places_a_single_node_at_its_half_size() {
    let mut g = input_graph();
    let a = g.set_node("a", NodeLabel::new(50.0, 100.0));
    let summary = layout(&mut g).unwrap();
    assert_eq!(center(&g, a), (25.0, 50.0));
    assert_eq!((summary.width, summary.height), (50.0, 100.0));
}

#[test]
fn layout_adds_margins() {
    let mut g = input_graph_with(LayoutConfig {
        marginx: 10.0,
        marginy: 20.0,
        ..LayoutConfig::default()
    });
    let a = g.set_node("a", NodeLabel::new(50.0, 100.0));
    let summary = layout(&mut g).unwrap();
    assert_eq!(center(&g, a), (35.0, 70.0));
    assert_eq!((summary.width, summary.height), (70.0, 140.0));
}

#[test]
fn layout_separates_ranks_by_ranksep() {
    let (mut g, a, b) = chain(LayoutConfig::default());
    let summary = layout(&mut g).unwrap();

    assert_eq!(center(&g, a), (40.0, 20.0));
    assert_eq!(center(&g, b), (40.0, 110.0));
    assert_eq!((summary.width, summary.height), (80.0, 130.0));
    assert_eq!(
        points(&g, a, b),
        vec![Point::new(40.0, 40.0), Point::new(40.0, 65.0), Point::new(40.0, 90.0)]
    );
}

#[test]
fn layout_left_to_right_swaps_axes() {
    let (mut g, a, b) = chain(LayoutConfig {
        rankdir: RankDir::LR,
        ..LayoutConfig::default()
    });
    let summary = layout(&mut g).unwrap();

    assert_eq!(center(&g, a), (40.0, 20.0));
    assert_eq!(center(&g, b), (170.0, 20.0));
    assert_eq!((summary.width, summary.height), (210.0, 40.0));
}

#[test]
fn layout_bottom_to_top_and_right_to_left_mirror() {
    let (mut g, a, b) = chain(LayoutConfig {
        rankdir: RankDir::BT,
        ..LayoutConfig::default()
    });
    layout(&mut g).unwrap();
    assert!(center(&g, a).1 > center(&g, b).1);
    assert_eq!(center(&g, a).0, center(&g, b).0);

    let (mut g, a, b) = chain(LayoutConfig {
        rankdir: RankDir::RL,
        ..LayoutConfig::default()
    });
    layout(&mut g).unwrap();
    assert!(center(&g, a).0 > center(&g, b).0);
    assert_eq!(center(&g, a).1, center(&g, b).1);
}

#[test]
fn layout_centers_a_diamond_symmetrically() {
    let mut g = input_graph();
    let n: Vec<NodeId> = ["a", "b", "c", "d"]
        .iter()
        .map(|k| g.set_node(*k, NodeLabel::new(50.0, 50.0)))
        .collect();
    g.set_edge(n[0], n[1], EdgeLabel::default()).unwrap();
    g.set_edge(n[0], n[2], EdgeLabel::default()).unwrap();
    g.set_edge(n[1], n[3], EdgeLabel::default()).unwrap();
    g.set_edge(n[2], n[3], EdgeLabel::default()).unwrap();
    layout(&mut g).unwrap();

    let (a, b, c, d) = (center(&g, n[0]), center(&g, n[1]), center(&g, n[2]), center(&g, n[3]));
    assert_eq!(b.1, c.1);
    assert!(a.1 < b.1 && b.1 < d.1);
    assert!((a.0 - d.0).abs() < EPS);
    assert!(((b.0 + c.0) / 2.0 - a.0).abs() < EPS);
    assert!((b.0 - c.0).abs() >= 100.0 - EPS);
}

#[test]
fn layout_routes_long_edges_through_every_rank() {
    let mut g = input_graph();
    let a = g.set_node("a", NodeLabel::new(40.0, 40.0));
    let b = g.set_node("b", NodeLabel::new(40.0, 40.0));
    let c = g.set_node("c", NodeLabel::new(40.0, 40.0));
    g.set_edge(a, b, EdgeLabel::default()).unwrap();
    g.set_edge(b, c, EdgeLabel::default()).unwrap();
    g.set_edge(a, c, EdgeLabel::default()).unwrap();
    layout(&mut g).unwrap();

    assert_eq!(points(&g, a, b).len(), 3);
    assert_eq!(points(&g, a, c).len(), 5);
    let ys: Vec<f64> = points(&g, a, c).iter().map(|p| p.y).collect();
    assert!(ys.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn layout_places_edge_labels_on_their_own_rank() {
    let mut g = input_graph();
    let a = g.set_node("a", NodeLabel::new(80.0, 40.0));
    let b = g.set_node("b", NodeLabel::new(80.0, 40.0));
    g.set_edge(a, b, EdgeLabel::with_label(60.0, 20.0)).unwrap();
    let summary = layout(&mut g).unwrap();

    let edge = g.edge_between(a, b, None).unwrap();
    assert_eq!(center(&g, a), (40.0, 20.0));
    assert_eq!(center(&g, b), (40.0, 130.0));
    assert_eq!(edge.x, Some(80.0));
    assert_eq!(edge.y, Some(75.0));
    assert_eq!(edge.points[1], Point::new(40.0, 75.0));
    assert_eq!((summary.width, summary.height), (110.0, 150.0));
}

#[test]
fn layout_routes_self_loops_around_the_right_side() {
    let mut g = input_graph();
    let a = g.set_node("a", NodeLabel::new(80.0, 40.0));
    g.set_edge(a, a, EdgeLabel::default()).unwrap();
    layout(&mut g).unwrap();

    let (ax, _) = center(&g, a);
    let route = points(&g, a, a);
    assert_eq!(route.len(), 7);
    assert!(route.iter().all(|p| p.x >= ax - EPS));
    assert!(g.edge_between(a, a, None).unwrap().x.is_some());
}

#[test]
fn layout_keeps_reversed_edges_in_their_original_direction() {
    let mut g = input_graph();
    let a = g.set_node("a", NodeLabel::new(40.0, 40.0));
    let b = g.set_node("b", NodeLabel::new(40.0, 40.0));
    g.set_edge(a, b, EdgeLabel::default()).unwrap();
    g.set_edge(b, a, EdgeLabel::default()).unwrap();
    layout(&mut g).unwrap();

    assert_eq!(g.edge_count(), 2);
    let back = points(&g, b, a);
    let dist = |p: Point, v: NodeId| {
        let (x, y) = center(&g, v);
        ((p.x - x).powi(2) + (p.y - y).powi(2)).sqrt()
    };
    assert!(dist(back[0], b) < dist(back[0], a));
    assert!(dist(back[back.len() - 1], a) < dist(back[back.len() - 1], b));
}

#[test]
fn layout_sizes_compound_nodes_around_their_children() {
    let mut g = input_graph();
    let p = g.set_node("p", NodeLabel::default());
    let a = g.set_node("a", NodeLabel::new(80.0, 40.0));
    let b = g.set_node("b", NodeLabel::new(80.0, 40.0));
    let c = g.set_node("c", NodeLabel::new(80.0, 40.0));
    g.set_parent(a, Some(p)).unwrap();
    g.set_parent(b, Some(p)).unwrap();
    g.set_edge(a, b, EdgeLabel::default()).unwrap();
    g.set_edge(c, a, EdgeLabel::default()).unwrap();
    layout(&mut g).unwrap();

    let parent = g.node(p).unwrap().clone();
    let (px, py) = (parent.x.unwrap(), parent.y.unwrap());
    assert!(parent.width > 0.0 && parent.height > 0.0);
    for v in [a, b] {
        let (x, y) = center(&g, v);
        assert!(px - parent.width / 2.0 <= x - 40.0 + EPS);
        assert!(px + parent.width / 2.0 >= x + 40.0 - EPS);
        assert!(py - parent.height / 2.0 <= y - 20.0 + EPS);
        assert!(py + parent.height / 2.0 >= y + 20.0 - EPS);
    }
    let (_, cy) = center(&g, c);
    assert!(cy < center(&g, a).1);
}

#[test]
fn layout_rejects_edges_on_compound_nodes() {
    let mut g = input_graph();
    let p = g.set_node("p", NodeLabel::default());
    let a = g.set_node("a", NodeLabel::new(10.0, 10.0));
    let b = g.set_node("b", NodeLabel::new(10.0, 10.0));
    g.set_parent(a, Some(p)).unwrap();
    g.set_edge(p, b, EdgeLabel::default()).unwrap();
    let err = layout(&mut g).unwrap_err();
    assert!(matches!(err, LayoutError::EdgeOnCompoundNode { ref node, .. } if node == "p"));
}

#[test]
fn layout_is_deterministic() {
    let build = || {
        let mut g = input_graph();
        let n: Vec<NodeId> = (0..8)
            .map(|i| g.set_node(format!("n{i}"), NodeLabel::new(30.0 + i as f64, 20.0)))
            .collect();
        for (v, w) in [(0, 1), (0, 2), (1, 3), (2, 3), (3, 4), (4, 5), (2, 6), (6, 7), (7, 1), (5, 0)] {
            g.set_edge(n[v], n[w], EdgeLabel::default()).unwrap();
        }
        g
    };
    let mut first = build();
    let mut second = build();
    let s1 = layout(&mut first).unwrap();
    let s2 = layout(&mut second).unwrap();
    assert_eq!(s1, s2);
    for &v in first.nodes() {
        assert_eq!(first.node(v), second.node(v));
    }
    for &e in first.edges() {
        assert_eq!(first.edge(e), second.edge(e));
    }
}

#[test]
fn layout_reports_every_stage_in_order() {
    let (mut g, _, _) = chain(LayoutConfig::default());
    let mut stages = Vec::new();
    layout_with_progress(&mut g, |stage| stages.push(stage)).unwrap();

    assert_eq!(stages.first(), Some(&Stage::BuildGraph));
    assert_eq!(stages.last(), Some(&Stage::UpdateInputGraph));
    assert_eq!(stages.len(), 29);
    let rank = stages.iter().position(|&s| s == Stage::Rank).unwrap();
    let order = stages.iter().position(|&s| s == Stage::Order).unwrap();
    let position = stages.iter().position(|&s| s == Stage::Position).unwrap();
    assert!(rank < order && order < position);
}

#[test]
fn layout_with_the_simplex_positioner_straightens_a_chain() {
    let mut g = input_graph_with(LayoutConfig {
        positioner: Positioner::NetworkSimplex,
        ..LayoutConfig::default()
    });
    let a = g.set_node("a", NodeLabel::new(80.0, 40.0));
    let b = g.set_node("b", NodeLabel::new(40.0, 40.0));
    let c = g.set_node("c", NodeLabel::new(80.0, 40.0));
    g.set_edge(a, b, EdgeLabel::default()).unwrap();
    g.set_edge(b, c, EdgeLabel::default()).unwrap();
    layout(&mut g).unwrap();

    assert_eq!(center(&g, a).0, center(&g, b).0);
    assert_eq!(center(&g, b).0, center(&g, c).0);
}

#[test]
fn layout_with_the_simplex_positioner_keeps_siblings_apart() {
    let mut g = input_graph_with(LayoutConfig {
        positioner: Positioner::NetworkSimplex,
        ..LayoutConfig::default()
    });
    let a = g.set_node("a", NodeLabel::new(50.0, 50.0));
    let b = g.set_node("b", NodeLabel::new(50.0, 50.0));
    let c = g.set_node("c", NodeLabel::new(50.0, 50.0));
    g.set_edge(a, b, EdgeLabel::default()).unwrap();
    g.set_edge(a, c, EdgeLabel::default()).unwrap();
    layout(&mut g).unwrap();

    assert!((center(&g, b).0 - center(&g, c).0).abs() >= 100.0);
}

#[test]
fn layout_rejects_out_of_range_straighten_strength() {
    let (mut g, _, _) = chain(LayoutConfig {
        straighten: Some(0.0),
        ..LayoutConfig::default()
    });
    assert!(matches!(
        layout(&mut g),
        Err(LayoutError::InvalidStraighten(s)) if s == 0.0
    ));
}

#[test]
fn layout_straightening_keeps_long_edges_clear_of_nodes() {
    for straighten in [None, Some(0.5), Some(1.0)] {
        let mut g = input_graph_with(LayoutConfig {
            straighten,
            ..LayoutConfig::default()
        });
        let a = g.set_node("a", NodeLabel::new(40.0, 40.0));
        let b = g.set_node("b", NodeLabel::new(40.0, 40.0));
        let c = g.set_node("c", NodeLabel::new(40.0, 40.0));
        g.set_edge(a, b, EdgeLabel::default()).unwrap();
        g.set_edge(b, c, EdgeLabel::default()).unwrap();
        g.set_edge(a, c, EdgeLabel::default()).unwrap();
        layout(&mut g).unwrap();

        let (bx, by) = center(&g, b);
        let route = points(&g, a, c);
        assert_eq!(route.len(), 5);
        for p in &route[1..route.len() - 1] {
            assert!(p.x.is_finite() && p.y.is_finite());
            if (p.y - by).abs() < EPS {
                // half of b, plus half of nodesep and edgesep
                assert!((p.x - bx).abs() >= 55.0 - EPS);
            }
        }
    }
}
