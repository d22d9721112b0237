use super::barycenter::barycenter;
use super::constraints::ConstraintGraph;
use super::layer_graph::LayerGraph;
use super::resolve_conflicts::resolve_conflicts;
use super::sort::sort;
use super::types::{BarycenterEntry, SortResult};
use crate::error::Result;
use crate::model::LayoutGraph;
use crate::util;
use lamina_graph::NodeId;
use rustc_hash::FxHashMap;

/// Orders the members of one layer. Each subgraph is sorted as a unit: its members are ordered
/// among themselves, framed by its border nodes, and the subgraph then competes with its
/// siblings using the combined barycenter.
///
/// `root` is the subgraph to sort (`None` for the whole layer).
pub fn sort_subgraph(
    g: &LayoutGraph,
    lg: &LayerGraph,
    root: Option<NodeId>,
    cg: &ConstraintGraph,
    bias_right: bool,
) -> Result<SortResult> {
    let mut results: FxHashMap<Option<NodeId>, SortResult> = FxHashMap::default();
    for v in subgraph_postorder(lg, root) {
        let result = sort_one(g, lg, v, cg, bias_right, &mut results)?;
        results.insert(v, result);
    }
    Ok(results.remove(&root).unwrap_or_default())
}

/// Subgraphs of the layer below `root` (inclusive), children before parents.
fn subgraph_postorder(lg: &LayerGraph, root: Option<NodeId>) -> Vec<Option<NodeId>> {
    let mut out = Vec::new();
    let mut stack: Vec<(Option<NodeId>, bool)> = vec![(root, false)];
    while let Some((v, expanded)) = stack.pop() {
        if expanded {
            out.push(v);
            continue;
        }
        stack.push((v, true));
        for &child in lg.children(v).iter().rev() {
            if lg.has_children(child) {
                stack.push((Some(child), false));
            }
        }
    }
    out
}

fn sort_one(
    g: &LayoutGraph,
    lg: &LayerGraph,
    v: Option<NodeId>,
    cg: &ConstraintGraph,
    bias_right: bool,
    done: &mut FxHashMap<Option<NodeId>, SortResult>,
) -> Result<SortResult> {
    let borders = v.and_then(|v| lg.borders(v));
    let movable: Vec<NodeId> = lg
        .children(v)
        .iter()
        .copied()
        .filter(|&w| borders.is_none_or(|(bl, br)| w != bl && w != br))
        .collect();

    let mut entries = barycenter(g, lg, &movable)?;
    let mut subgraphs: FxHashMap<NodeId, Vec<NodeId>> = FxHashMap::default();
    for entry in &mut entries {
        if !lg.has_children(entry.v) {
            continue;
        }
        if let Some(sub) = done.remove(&Some(entry.v)) {
            if sub.barycenter.is_some() {
                merge_barycenters(entry, &sub);
            }
            subgraphs.insert(entry.v, sub.vs);
        }
    }

    let mut resolved = resolve_conflicts(&entries, cg);
    for entry in &mut resolved {
        entry.vs = entry
            .vs
            .iter()
            .flat_map(|w| match subgraphs.get(w) {
                Some(expanded) => expanded.clone(),
                None => vec![*w],
            })
            .collect();
    }

    let mut result = sort(resolved, bias_right);
    if let Some((bl, br)) = borders {
        let mut framed = Vec::with_capacity(result.vs.len() + 2);
        framed.push(bl);
        framed.append(&mut result.vs);
        framed.push(br);
        result.vs = framed;

        let bl_pred = lg.neighbors(bl).first().map(|&(u, _)| u);
        let br_pred = lg.neighbors(br).first().map(|&(u, _)| u);
        if let (Some(lp), Some(rp)) = (bl_pred, br_pred) {
            let (center, weight) = match result.barycenter {
                Some(b) => (b, result.weight),
                None => (0.0, 0.0),
            };
            let lo = util::order(g, lp)? as f64;
            let ro = util::order(g, rp)? as f64;
            result.barycenter = Some((center * weight + lo + ro) / (weight + 2.0));
            result.weight = weight + 2.0;
        }
    }
    Ok(result)
}

fn merge_barycenters(target: &mut BarycenterEntry, other: &SortResult) {
    let Some(ob) = other.barycenter else {
        return;
    };
    match target.barycenter {
        Some(tb) => {
            let weight = target.weight + other.weight;
            target.barycenter = Some((tb * target.weight + ob * other.weight) / weight);
            target.weight = weight;
        }
        None => {
            target.barycenter = Some(ob);
            target.weight = other.weight;
        }
    }
}
