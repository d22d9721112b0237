use lamina_graph::{Graph, GraphOptions, NodeId, alg};

fn path_graph(keys: &[&str]) -> (Graph<(), ()>, Vec<NodeId>) {
    let mut g = Graph::new(GraphOptions::default());
    let ids: Vec<NodeId> = keys.iter().map(|k| g.set_node(*k, ())).collect();
    (g, ids)
}

#[test]
fn preorder_visits_each_node_once_depth_first() {
    let (mut g, ids) = path_graph(&["a", "b", "c", "d"]);
    let [a, b, c, d] = [ids[0], ids[1], ids[2], ids[3]];
    g.set_edge(a, b, ()).unwrap();
    g.set_edge(a, c, ()).unwrap();
    g.set_edge(b, d, ()).unwrap();
    g.set_edge(c, d, ()).unwrap();
    assert_eq!(alg::preorder(&g, &[a]), vec![a, b, d, c]);
    assert_eq!(alg::preorder(&g, &[c, a]), vec![c, d, a, b]);
}

#[test]
fn preorder_handles_long_chains_without_recursion() {
    let mut g: Graph<(), ()> = Graph::new(GraphOptions::default());
    let ids: Vec<NodeId> = (0..50_000).map(|i| g.set_node(format!("n{i}"), ())).collect();
    g.set_path(&ids, ()).unwrap();
    assert_eq!(alg::preorder(&g, &ids[..1]).len(), ids.len());
}

#[test]
fn find_cycles_reports_strongly_connected_components_and_self_loops() {
    let (mut g, ids) = path_graph(&["a", "b", "c", "d"]);
    let [a, b, c, d] = [ids[0], ids[1], ids[2], ids[3]];
    g.set_edge(a, b, ()).unwrap();
    g.set_edge(b, a, ()).unwrap();
    g.set_edge(c, c, ()).unwrap();
    g.set_edge(b, d, ()).unwrap();

    let mut cycles: Vec<Vec<NodeId>> = alg::find_cycles(&g)
        .into_iter()
        .map(|mut c| {
            c.sort();
            c
        })
        .collect();
    cycles.sort();
    assert_eq!(cycles, vec![vec![a, b], vec![c]]);
    assert!(!alg::is_acyclic(&g));
}

#[test]
fn dag_has_no_cycles() {
    let (mut g, ids) = path_graph(&["a", "b", "c"]);
    g.set_path(&ids, ()).unwrap();
    assert!(alg::is_acyclic(&g));
}
