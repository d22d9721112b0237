//! Moves each long-edge dummy into the compound node it passes through.
//!
//! A chain climbs from its tail toward the lowest common ancestor of its endpoints and then
//! descends toward the head; each dummy is parented to the deepest compound node on that path
//! whose rank span covers the dummy's rank.

use crate::error::Result;
use crate::model::LayoutGraph;
use crate::util;
use lamina_graph::NodeId;

#[derive(Debug, Clone, Copy, Default)]
struct Span {
    low: usize,
    lim: usize,
}

/// Postorder numbering of the compound hierarchy: each node's `lim` is its postorder index and
/// `low` the smallest index in its subtree.
fn postorder_spans(g: &LayoutGraph) -> Vec<Span> {
    let mut spans = vec![Span::default(); g.node_bound()];
    let mut lim = 0;
    let mut stack: Vec<(NodeId, usize, bool)> = g
        .root_children()
        .into_iter()
        .rev()
        .map(|v| (v, 0, false))
        .collect();
    while let Some((v, low, expanded)) = stack.pop() {
        if expanded {
            spans[v.index()] = Span { low, lim };
            lim += 1;
            continue;
        }
        stack.push((v, lim, true));
        stack.extend(g.children(v).into_iter().rev().map(|c| (c, 0, false)));
    }
    spans
}

/// Compound ancestors from `v` up to (and including) the lowest common ancestor, then down
/// toward `w`. `None` stands for the root.
fn find_path(
    g: &LayoutGraph,
    spans: &[Span],
    v: NodeId,
    w: NodeId,
) -> (Vec<Option<NodeId>>, Option<NodeId>) {
    let low = spans[v.index()].low.min(spans[w.index()].low);
    let lim = spans[v.index()].lim.max(spans[w.index()].lim);

    let mut path = Vec::new();
    let mut parent = Some(v);
    loop {
        parent = parent.and_then(|p| g.parent(p));
        path.push(parent);
        match parent {
            Some(p) if spans[p.index()].low > low || lim > spans[p.index()].lim => {}
            _ => break,
        }
    }
    let lca = parent;

    let mut descending = Vec::new();
    let mut parent = g.parent(w);
    while parent != lca {
        descending.push(parent);
        parent = parent.and_then(|p| g.parent(p));
    }
    path.extend(descending.into_iter().rev());
    (path, lca)
}

pub fn parent_dummy_chains(g: &mut LayoutGraph) -> Result<()> {
    let spans = postorder_spans(g);
    let chains = g.graph().dummy_chains.clone();

    for start in chains {
        let Some(key) = util::node(g, start)?.edge.clone() else {
            continue;
        };
        let (path, lca) = find_path(g, &spans, key.v, key.w);
        let max_rank = |g: &LayoutGraph, p: Option<NodeId>| {
            p.and_then(|p| g.node(p)).and_then(|n| n.max_rank)
        };
        let min_rank = |g: &LayoutGraph, p: Option<NodeId>| {
            p.and_then(|p| g.node(p)).and_then(|n| n.min_rank)
        };

        let mut idx = 0;
        let mut ascending = true;
        let mut v = start;
        while v != key.w {
            let rank = util::rank(g, v)?;
            if ascending {
                while idx < path.len()
                    && path[idx] != lca
                    && max_rank(g, path[idx]).is_some_and(|r| r < rank)
                {
                    idx += 1;
                }
                if path.get(idx).copied().flatten() == lca {
                    ascending = false;
                }
            }
            if !ascending {
                while idx + 1 < path.len() && min_rank(g, path[idx + 1]).is_some_and(|r| r <= rank) {
                    idx += 1;
                }
            }
            g.set_parent(v, path.get(idx).copied().flatten())?;
            match g.first_successor(v) {
                Some(w) => v = w,
                None => break,
            }
        }
    }
    Ok(())
}
