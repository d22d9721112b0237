use lamina::document::{GraphDocument, layout_json};
use lamina::{Align, LabelPos, LayoutError, Positioner, RankDir, Ranker};

#[test]
fn graph_document_reads_camel_case_config() {
    let doc = GraphDocument::from_json(
        r#"{
            "config": {
                "rankdir": "LR",
                "nodesep": 30,
                "ranker": "longest-path",
                "positioner": "network-simplex",
                "align": "DR",
                "straighten": 0.5
            }
        }"#,
    )
    .unwrap();
    assert_eq!(doc.config.rankdir, RankDir::LR);
    assert_eq!(doc.config.nodesep, 30.0);
    assert_eq!(doc.config.ranksep, 50.0);
    assert_eq!(doc.config.ranker, Ranker::LongestPath);
    assert_eq!(doc.config.positioner, Positioner::NetworkSimplex);
    assert_eq!(doc.config.align, Some(Align::DR));
    assert_eq!(doc.config.straighten, Some(0.5));
    assert!(doc.nodes.is_empty() && doc.edges.is_empty());
}

#[test]
fn graph_document_fills_edge_defaults() {
    let doc = GraphDocument::from_json(
        r#"{ "nodes": [{ "id": "a" }, { "id": "b" }], "edges": [{ "v": "a", "w": "b", "labelpos": "c" }] }"#,
    )
    .unwrap();
    let edge = &doc.edges[0];
    assert_eq!(edge.weight, 1.0);
    assert_eq!(edge.minlen, 1);
    assert_eq!(edge.labeloffset, 10.0);
    assert_eq!(edge.labelpos, LabelPos::C);
}

#[test]
fn graph_document_builds_a_compound_graph() {
    let g = GraphDocument::from_json(
        r#"{
            "nodes": [
                { "id": "a", "width": 10, "height": 10, "parent": "p" },
                { "id": "p" }
            ],
            "edges": [{ "v": "a", "w": "a", "name": "loop" }]
        }"#,
    )
    .unwrap()
    .into_graph()
    .unwrap();
    let a = g.node_id("a").unwrap();
    let p = g.node_id("p").unwrap();
    assert_eq!(g.parent(a), Some(p));
    assert!(g.has_edge(a, a, Some("loop")));
}

#[test]
fn graph_document_rejects_unknown_nodes() {
    let err = GraphDocument::from_json(r#"{ "nodes": [{ "id": "a" }], "edges": [{ "v": "a", "w": "b" }] }"#)
        .unwrap()
        .into_graph()
        .unwrap_err();
    assert!(matches!(err, LayoutError::UnknownNode(ref id) if id == "b"));

    let err = GraphDocument::from_json(r#"{ "nodes": [{ "id": "a", "parent": "q" }] }"#)
        .unwrap()
        .into_graph()
        .unwrap_err();
    assert!(matches!(err, LayoutError::UnknownNode(ref id) if id == "q"));
}

#[test]
fn graph_document_rejects_duplicate_nodes() {
    let err = GraphDocument::from_json(r#"{ "nodes": [{ "id": "a" }, { "id": "a" }] }"#)
        .unwrap()
        .into_graph()
        .unwrap_err();
    assert!(matches!(err, LayoutError::DuplicateNode(ref id) if id == "a"));
}

#[test]
fn graph_document_reports_malformed_json() {
    assert!(matches!(GraphDocument::from_json("{"), Err(LayoutError::Json(_))));
}

#[test]
fn layout_json_returns_placed_nodes_and_routes() {
    let out = layout_json(
        r#"{
            "nodes": [
                { "id": "a", "width": 80, "height": 40 },
                { "id": "b", "width": 80, "height": 40 }
            ],
            "edges": [{ "v": "a", "w": "b", "width": 60, "height": 20 }]
        }"#,
    )
    .unwrap();

    assert_eq!((out.width, out.height), (110.0, 150.0));
    let ids: Vec<&str> = out.nodes.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, ["a", "b"]);
    assert_eq!((out.nodes[0].x, out.nodes[0].y), (40.0, 20.0));
    assert_eq!((out.nodes[1].x, out.nodes[1].y), (40.0, 130.0));

    let edge = &out.edges[0];
    assert_eq!((edge.v.as_str(), edge.w.as_str()), ("a", "b"));
    assert_eq!(edge.points.len(), 3);
    assert_eq!((edge.x, edge.y), (Some(80.0), Some(75.0)));

    let json = serde_json::to_value(&out).unwrap();
    assert!(json["edges"][0].get("name").is_none());
}
