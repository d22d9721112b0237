//! Cycle breaking by edge reversal.
//!
//! `run` reverses a feedback arc set so the working graph becomes a DAG; reversed edges are
//! flagged and remember their original name so `undo` can restore them exactly.

use crate::error::Result;
use crate::greedy_fas::greedy_fas;
use crate::model::{Acyclicer, LayoutGraph};
use lamina_graph::{EdgeId, Graph, NodeId};

pub fn run(g: &mut LayoutGraph) -> Result<()> {
    let fas = match g.graph().config.acyclicer {
        Acyclicer::Greedy => greedy_fas(g, |e| e.weight),
        Acyclicer::Dfs => dfs_fas(g),
    };

    let mut seq = 0usize;
    for e in fas {
        let Some(key) = g.edge_key(e).cloned() else {
            continue;
        };
        if key.v == key.w {
            continue;
        }
        let Some(mut label) = g.remove_edge(e) else {
            continue;
        };
        label.forward_name = key.name;
        label.reversed = true;

        let rev_name = loop {
            seq += 1;
            let candidate = format!("rev{seq}");
            if !g.has_edge(key.w, key.v, Some(&candidate)) {
                break candidate;
            }
        };
        g.set_edge_named(key.w, key.v, Some(&rev_name), label)?;
    }
    tracing::trace!(reversed = seq, "acyclic");
    Ok(())
}

/// Restores every edge reversed by [`run`] to its original direction and name.
pub fn undo(g: &mut LayoutGraph) -> Result<()> {
    let edges = g.edges().to_vec();
    for e in edges {
        if !g.edge(e).is_some_and(|label| label.reversed) {
            continue;
        }
        let Some((v, w)) = g.endpoints(e) else {
            continue;
        };
        let Some(mut label) = g.remove_edge(e) else {
            continue;
        };
        label.reversed = false;
        let name = label.forward_name.take();
        g.set_edge_named(w, v, name.as_deref(), label)?;
    }
    Ok(())
}

/// Back edges of a depth-first search over out-edges, visiting roots in node order.
pub fn dfs_fas<N, E, G>(g: &Graph<N, E, G>) -> Vec<EdgeId> {
    struct Frame {
        edges: Vec<EdgeId>,
        next: usize,
        v: NodeId,
    }

    let bound = g.node_bound();
    let mut visited = vec![false; bound];
    let mut on_stack = vec![false; bound];
    let mut fas = Vec::new();

    for &root in g.nodes() {
        if visited[root.index()] {
            continue;
        }
        visited[root.index()] = true;
        on_stack[root.index()] = true;
        let mut frames = vec![Frame {
            edges: g.out_edges(root),
            next: 0,
            v: root,
        }];

        while let Some(frame) = frames.last_mut() {
            let Some(&e) = frame.edges.get(frame.next) else {
                on_stack[frame.v.index()] = false;
                frames.pop();
                continue;
            };
            frame.next += 1;
            let Some((_, w)) = g.endpoints(e) else {
                continue;
            };
            if on_stack[w.index()] {
                fas.push(e);
            } else if !visited[w.index()] {
                visited[w.index()] = true;
                on_stack[w.index()] = true;
                frames.push(Frame {
                    edges: g.out_edges(w),
                    next: 0,
                    v: w,
                });
            }
        }
    }
    fas
}
