//! Vertical alignment into blocks and horizontal compaction of blocks.

use super::conflicts::{Conflicts, has_conflict};
use crate::error::{LayoutError, Result};
use crate::model::{BorderSide, LabelPos, LayoutGraph};
use crate::util;
use lamina_graph::NodeId;
use rustc_hash::FxHashMap;

pub type Xs = FxHashMap<NodeId, f64>;

/// Blocks of vertically aligned nodes: `root` maps every node to the top of its block, `align`
/// links each node to the next one down (the last links back to the root).
#[derive(Debug, Clone, Default)]
pub struct Alignment {
    pub root: FxHashMap<NodeId, NodeId>,
    pub align: FxHashMap<NodeId, NodeId>,
}

fn lookup<T: Copy>(map: &FxHashMap<NodeId, T>, g: &LayoutGraph, v: NodeId) -> Result<T> {
    map.get(&v)
        .copied()
        .ok_or_else(|| LayoutError::AlignmentLookup(util::name(g, v)))
}

/// Aligns each node with the median of its neighbors (from `neighbors`) on the previous layer,
/// skipping conflicting segments and never crossing an alignment made earlier in the layer.
pub fn vertical_alignment(
    g: &LayoutGraph,
    layering: &[Vec<NodeId>],
    conflicts: &Conflicts,
    neighbors: impl Fn(NodeId) -> Vec<NodeId>,
) -> Result<Alignment> {
    let mut alignment = Alignment::default();
    let mut pos: FxHashMap<NodeId, usize> = FxHashMap::default();
    for layer in layering {
        for (order, &v) in layer.iter().enumerate() {
            alignment.root.insert(v, v);
            alignment.align.insert(v, v);
            pos.insert(v, order);
        }
    }

    for layer in layering {
        let mut prev_idx: Option<usize> = None;
        for &v in layer {
            let mut ws = neighbors(v)
                .into_iter()
                .map(|w| Ok((lookup(&pos, g, w)?, w)))
                .collect::<Result<Vec<(usize, NodeId)>>>()?;
            if ws.is_empty() {
                continue;
            }
            ws.sort_by_key(|&(p, _)| p);

            let lo = (ws.len() - 1) / 2;
            let hi = ws.len() / 2;
            for &(w_pos, w) in &ws[lo..=hi] {
                if lookup(&alignment.align, g, v)? == v
                    && prev_idx.is_none_or(|p| p < w_pos)
                    && !has_conflict(conflicts, v, w)
                {
                    let w_root = lookup(&alignment.root, g, w)?;
                    alignment.align.insert(w, v);
                    alignment.align.insert(v, w_root);
                    alignment.root.insert(v, w_root);
                    prev_idx = Some(w_pos);
                }
            }
        }
    }
    Ok(alignment)
}

/// Minimum center distance between `v` and its left neighbor `w`.
///
/// Dummies only need half the edge separation, and an edge label sitting left or right of its
/// edge shifts the effective center of its dummy.
pub fn sep(g: &LayoutGraph, v: NodeId, w: NodeId, reverse: bool) -> Result<f64> {
    let config = &g.graph().config;
    let v_label = util::node(g, v)?;
    let w_label = util::node(g, w)?;

    let mut sum = v_label.width / 2.0;
    let delta = match v_label.labelpos {
        Some(LabelPos::L) => -v_label.width / 2.0,
        Some(LabelPos::R) => v_label.width / 2.0,
        _ => 0.0,
    };
    sum += if reverse { delta } else { -delta };

    sum += if v_label.is_dummy() { config.edgesep } else { config.nodesep } / 2.0;
    sum += if w_label.is_dummy() { config.edgesep } else { config.nodesep } / 2.0;

    sum += w_label.width / 2.0;
    let delta = match w_label.labelpos {
        Some(LabelPos::L) => w_label.width / 2.0,
        Some(LabelPos::R) => -w_label.width / 2.0,
        _ => 0.0,
    };
    sum += if reverse { delta } else { -delta };
    Ok(sum)
}

struct BlockGraph {
    nodes: Vec<NodeId>,
    index: FxHashMap<NodeId, usize>,
    ins: Vec<Vec<(usize, f64)>>,
    outs: Vec<Vec<(usize, f64)>>,
}

impl BlockGraph {
    fn node(&mut self, v: NodeId) -> usize {
        if let Some(&i) = self.index.get(&v) {
            return i;
        }
        let i = self.nodes.len();
        self.nodes.push(v);
        self.index.insert(v, i);
        self.ins.push(Vec::new());
        self.outs.push(Vec::new());
        i
    }

    fn set_edge_max(&mut self, u: usize, v: usize, weight: f64) {
        match self.outs[u].iter_mut().find(|(w, _)| *w == v) {
            Some((_, existing)) => {
                *existing = existing.max(weight);
                if let Some((_, back)) = self.ins[v].iter_mut().find(|(w, _)| *w == u) {
                    *back = *existing;
                }
            }
            None => {
                let weight = weight.max(0.0);
                self.outs[u].push((v, weight));
                self.ins[v].push((u, weight));
            }
        }
    }
}

fn build_block_graph(
    g: &LayoutGraph,
    layering: &[Vec<NodeId>],
    root: &FxHashMap<NodeId, NodeId>,
    reverse: bool,
) -> Result<BlockGraph> {
    let mut bg = BlockGraph {
        nodes: Vec::new(),
        index: FxHashMap::default(),
        ins: Vec::new(),
        outs: Vec::new(),
    };
    for layer in layering {
        let mut prev: Option<NodeId> = None;
        for &v in layer {
            let v_root = lookup(root, g, v)?;
            let vi = bg.node(v_root);
            if let Some(u) = prev {
                let ui = bg.node(lookup(root, g, u)?);
                bg.set_edge_max(ui, vi, sep(g, v, u, reverse)?);
            }
            prev = Some(v);
        }
    }
    Ok(bg)
}

/// Places every block as far left as its separation constraints allow, then pulls blocks right
/// toward their successors where that frees space. Blocks rooted at a border on the compaction
/// side stay put.
pub fn horizontal_compaction(
    g: &LayoutGraph,
    layering: &[Vec<NodeId>],
    alignment: &Alignment,
    reverse: bool,
) -> Result<Xs> {
    let bg = build_block_graph(g, layering, &alignment.root, reverse)?;
    let n = bg.nodes.len();
    let mut xs = vec![0.0f64; n];

    // Pass 1: longest path from the left.
    for elem in dependency_order(n, |i| bg.ins[i].iter().map(|&(u, _)| u).collect()) {
        xs[elem] = bg.ins[elem]
            .iter()
            .fold(0.0f64, |acc, &(u, w)| acc.max(xs[u] + w));
    }

    // Pass 2: pull right toward successors.
    let border_side = if reverse {
        BorderSide::Left
    } else {
        BorderSide::Right
    };
    for elem in dependency_order(n, |i| bg.outs[i].iter().map(|&(w, _)| w).collect()) {
        let min = bg.outs[elem]
            .iter()
            .fold(f64::INFINITY, |acc, &(w, sep)| acc.min(xs[w] - sep));
        let side = util::node(g, bg.nodes[elem])?.border_side;
        if min.is_finite() && side != Some(border_side) {
            xs[elem] = xs[elem].max(min);
        }
    }

    let mut out = Xs::default();
    for layer in layering {
        for &v in layer {
            let r = lookup(&alignment.root, g, v)?;
            let i = bg.index.get(&r).copied().ok_or_else(|| LayoutError::AlignmentLookup(util::name(g, r)))?;
            out.insert(v, xs[i]);
        }
    }
    Ok(out)
}

/// Every block after all of `deps(block)`, visiting blocks from the last one down.
fn dependency_order(n: usize, deps: impl Fn(usize) -> Vec<usize>) -> Vec<usize> {
    let mut out = Vec::with_capacity(n);
    let mut visited = vec![false; n];
    let mut stack: Vec<usize> = (0..n).collect();
    while let Some(elem) = stack.pop() {
        if visited[elem] {
            out.push(elem);
        } else {
            visited[elem] = true;
            stack.push(elem);
            stack.extend(deps(elem));
        }
    }
    out
}
