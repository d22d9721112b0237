use lamina::graph::NodeId;
use lamina::model::{
    Align, Dummy, LabelPos, LayoutConfig, LayoutEdge, LayoutGraph, LayoutNode, layout_graph,
};
use lamina::position::bk::compaction::Xs;
use lamina::position::bk::conflicts::{find_type1_conflicts, has_conflict};
use lamina::position::bk::{
    align_coordinates, balance, find_smallest_width_alignment, position_x, sep,
};
use lamina::util;

fn place(g: &mut LayoutGraph, key: &str, rank: i32, order: usize, dummy: bool) -> NodeId {
    g.set_node(
        key,
        LayoutNode {
            rank: Some(rank),
            order: Some(order),
            dummy: dummy.then_some(Dummy::Edge),
            ..LayoutNode::default()
        },
    )
}

fn sized(g: &mut LayoutGraph, key: &str, width: f64) -> NodeId {
    g.set_node(key, LayoutNode::new(width, 10.0))
}

fn xs(pairs: &[(NodeId, f64)]) -> Xs {
    pairs.iter().copied().collect()
}

#[test]
fn type1_conflicts_ignore_edges_that_do_not_cross() {
    let mut g = layout_graph(LayoutConfig::default());
    let a = place(&mut g, "a", 0, 0, false);
    let b = place(&mut g, "b", 0, 1, true);
    let c = place(&mut g, "c", 1, 0, true);
    let d = place(&mut g, "d", 1, 1, false);
    g.set_edge(a, d, LayoutEdge::default()).unwrap();
    g.set_edge(b, c, LayoutEdge::default()).unwrap();
    let layering = util::build_layer_matrix(&g).unwrap();

    g.remove_edge(g.find_edge(a, d, None).unwrap());
    g.remove_edge(g.find_edge(b, c, None).unwrap());
    g.set_edge(a, c, LayoutEdge::default()).unwrap();
    g.set_edge(b, d, LayoutEdge::default()).unwrap();

    let conflicts = find_type1_conflicts(&g, &layering).unwrap();
    assert!(conflicts.is_empty());
}

#[test]
fn type1_conflicts_mark_the_segment_crossing_an_inner_segment() {
    let mut g = layout_graph(LayoutConfig::default());
    let a = place(&mut g, "a", 0, 0, false);
    let b = place(&mut g, "b", 0, 1, true);
    let c = place(&mut g, "c", 1, 0, true);
    let d = place(&mut g, "d", 1, 1, false);
    g.set_edge(a, d, LayoutEdge::default()).unwrap();
    g.set_edge(b, c, LayoutEdge::default()).unwrap();
    let layering = util::build_layer_matrix(&g).unwrap();

    let conflicts = find_type1_conflicts(&g, &layering).unwrap();
    assert!(has_conflict(&conflicts, a, d));
    assert!(has_conflict(&conflicts, d, a));
    assert!(!has_conflict(&conflicts, b, c));
}

#[test]
fn type1_conflicts_ignore_two_crossing_inner_segments() {
    let mut g = layout_graph(LayoutConfig::default());
    let a = place(&mut g, "a", 0, 0, true);
    let b = place(&mut g, "b", 0, 1, true);
    let c = place(&mut g, "c", 1, 0, true);
    let d = place(&mut g, "d", 1, 1, true);
    g.set_edge(a, d, LayoutEdge::default()).unwrap();
    g.set_edge(b, c, LayoutEdge::default()).unwrap();
    let layering = util::build_layer_matrix(&g).unwrap();

    let conflicts = find_type1_conflicts(&g, &layering).unwrap();
    assert!(!has_conflict(&conflicts, a, d));
    assert!(!has_conflict(&conflicts, b, c));
}

#[test]
fn sep_adds_half_widths_and_node_separation() {
    let mut g = layout_graph(LayoutConfig::default());
    let a = sized(&mut g, "a", 100.0);
    let b = sized(&mut g, "b", 50.0);
    assert_eq!(sep(&g, a, b, false).unwrap(), 50.0 + 25.0 + 25.0 + 25.0);
}

#[test]
fn sep_uses_edge_separation_for_dummies() {
    let mut g = layout_graph(LayoutConfig::default());
    let a = g.set_node("a", LayoutNode::dummy(Dummy::Edge, 0.0, 0.0));
    let b = g.set_node("b", LayoutNode::dummy(Dummy::Edge, 0.0, 0.0));
    assert_eq!(sep(&g, a, b, false).unwrap(), 20.0);
}

#[test]
fn sep_shifts_for_side_labels() {
    let mut g = layout_graph(LayoutConfig::default());
    let v = g.set_node(
        "v",
        LayoutNode {
            labelpos: Some(LabelPos::L),
            ..LayoutNode::dummy(Dummy::EdgeLabel, 40.0, 10.0)
        },
    );
    let w = sized(&mut g, "w", 0.0);
    assert_eq!(sep(&g, v, w, false).unwrap(), 20.0 + 20.0 + 10.0 + 25.0);
    assert_eq!(sep(&g, v, w, true).unwrap(), 20.0 - 20.0 + 10.0 + 25.0);
}

#[test]
fn smallest_width_alignment_counts_node_widths_and_prefers_the_first() {
    let mut g = layout_graph(LayoutConfig::default());
    let a = sized(&mut g, "a", 10.0);
    let b = sized(&mut g, "b", 10.0);
    let xss = vec![
        xs(&[(a, 0.0), (b, 100.0)]),
        xs(&[(a, 0.0), (b, 50.0)]),
        xs(&[(a, 0.0), (b, 50.0)]),
        xs(&[(a, 0.0), (b, 200.0)]),
    ];
    assert_eq!(find_smallest_width_alignment(&g, &xss).unwrap(), 1);
}

#[test]
fn align_coordinates_matches_left_minimums_and_right_maximums() {
    let mut g = layout_graph(LayoutConfig::default());
    let a = sized(&mut g, "a", 10.0);
    let b = sized(&mut g, "b", 10.0);
    let mut xss = vec![
        xs(&[(a, 0.0), (b, 100.0)]),
        xs(&[(a, -50.0), (b, 50.0)]),
        xs(&[(a, 10.0), (b, 20.0)]),
        xs(&[(a, -100.0), (b, -30.0)]),
    ];
    align_coordinates(&mut xss, 0);
    assert_eq!(xss[0], xs(&[(a, 0.0), (b, 100.0)]));
    assert_eq!(xss[1], xs(&[(a, 0.0), (b, 100.0)]));
    assert_eq!(xss[2], xs(&[(a, 0.0), (b, 10.0)]));
    assert_eq!(xss[3], xs(&[(a, 30.0), (b, 100.0)]));
}

#[test]
fn balance_takes_the_mean_of_the_median_candidates() {
    let mut g = layout_graph(LayoutConfig::default());
    let a = sized(&mut g, "a", 10.0);
    let xss = vec![
        xs(&[(a, 0.0)]),
        xs(&[(a, 10.0)]),
        xs(&[(a, 20.0)]),
        xs(&[(a, 30.0)]),
    ];
    let layering = vec![vec![a]];
    assert_eq!(balance(&g, &layering, &xss, None).unwrap(), vec![(a, 15.0)]);
    assert_eq!(
        balance(&g, &layering, &xss, Some(Align::DL)).unwrap(),
        vec![(a, 20.0)]
    );
}

#[test]
fn position_x_centers_a_parent_over_two_children() {
    let mut g = layout_graph(LayoutConfig::default());
    let a = g.set_node(
        "a",
        LayoutNode {
            rank: Some(0),
            order: Some(0),
            ..LayoutNode::new(50.0, 50.0)
        },
    );
    let b = g.set_node(
        "b",
        LayoutNode {
            rank: Some(1),
            order: Some(0),
            ..LayoutNode::new(50.0, 50.0)
        },
    );
    let c = g.set_node(
        "c",
        LayoutNode {
            rank: Some(1),
            order: Some(1),
            ..LayoutNode::new(50.0, 50.0)
        },
    );
    g.set_edge(a, b, LayoutEdge::default()).unwrap();
    g.set_edge(a, c, LayoutEdge::default()).unwrap();

    let xs: Xs = position_x(&g).unwrap().into_iter().collect();
    assert_eq!(xs[&c] - xs[&b], 100.0);
    assert_eq!(xs[&a], (xs[&b] + xs[&c]) / 2.0);
}
