//! Merges barycenter entries that violate subgraph ordering constraints (Forster, "A Fast and
//! Simple Heuristic for Constrained Two-Level Crossing Reduction").
//!
//! Entries are visited in topological order of the constraint graph. When a constrained
//! predecessor would otherwise sort after its successor, the two are fused into one entry whose
//! barycenter is their weighted mean.

use super::constraints::ConstraintGraph;
use super::types::{BarycenterEntry, ResolvedEntry};
use lamina_graph::NodeId;
use rustc_hash::FxHashMap;

struct Work {
    vs: Vec<NodeId>,
    i: usize,
    barycenter: Option<f64>,
    weight: f64,
    indegree: usize,
    ins: Vec<usize>,
    outs: Vec<usize>,
    merged: bool,
}

pub fn resolve_conflicts(entries: &[BarycenterEntry], cg: &ConstraintGraph) -> Vec<ResolvedEntry> {
    let mut work: Vec<Work> = entries
        .iter()
        .enumerate()
        .map(|(i, entry)| Work {
            vs: vec![entry.v],
            i,
            barycenter: entry.barycenter,
            weight: if entry.barycenter.is_some() {
                entry.weight
            } else {
                0.0
            },
            indegree: 0,
            ins: Vec::new(),
            outs: Vec::new(),
            merged: false,
        })
        .collect();
    let index: FxHashMap<NodeId, usize> = entries.iter().enumerate().map(|(i, e)| (e.v, i)).collect();

    for (v, w) in cg.edges() {
        if let (Some(&a), Some(&b)) = (index.get(&v), index.get(&w)) {
            work[b].indegree += 1;
            work[a].outs.push(b);
        }
    }

    let mut sources: Vec<usize> = (0..work.len()).filter(|&i| work[i].indegree == 0).collect();
    let mut visited: Vec<usize> = Vec::with_capacity(work.len());
    while let Some(v) = sources.pop() {
        visited.push(v);

        let ins = std::mem::take(&mut work[v].ins);
        for u in ins.into_iter().rev() {
            if work[u].merged {
                continue;
            }
            let fuse = match (work[u].barycenter, work[v].barycenter) {
                (Some(bu), Some(bv)) => bu >= bv,
                _ => true,
            };
            if fuse {
                merge_entries(&mut work, v, u);
            }
        }

        let outs = work[v].outs.clone();
        for w in outs {
            work[w].ins.push(v);
            work[w].indegree -= 1;
            if work[w].indegree == 0 {
                sources.push(w);
            }
        }
    }

    visited
        .into_iter()
        .filter_map(|i| {
            let w = &mut work[i];
            (!w.merged).then(|| ResolvedEntry {
                vs: std::mem::take(&mut w.vs),
                i: w.i,
                barycenter: w.barycenter,
                weight: w.weight,
            })
        })
        .collect()
}

fn merge_entries(work: &mut [Work], target: usize, source: usize) {
    let mut sum = 0.0;
    let mut weight = 0.0;
    for k in [target, source] {
        if let Some(b) = work[k].barycenter {
            if work[k].weight > 0.0 {
                sum += b * work[k].weight;
                weight += work[k].weight;
            }
        }
    }

    let mut vs = std::mem::take(&mut work[source].vs);
    vs.append(&mut work[target].vs);
    let source_i = work[source].i;
    work[source].merged = true;

    let t = &mut work[target];
    t.vs = vs;
    t.barycenter = if weight > 0.0 { Some(sum / weight) } else { None };
    t.weight = weight;
    t.i = t.i.min(source_i);
}
