//! Type-1 and type-2 segment conflicts.
//!
//! An inner segment joins two dummy nodes on adjacent ranks. A type-1 conflict is a non-inner
//! segment crossing an inner one; the inner segment wins. A type-2 conflict is two inner
//! segments crossing, which can only happen across compound borders.

use crate::error::Result;
use crate::model::{Dummy, LayoutGraph};
use crate::util;
use lamina_graph::NodeId;
use rustc_hash::FxHashSet;

pub type Conflicts = FxHashSet<(NodeId, NodeId)>;

pub fn add_conflict(conflicts: &mut Conflicts, v: NodeId, w: NodeId) {
    conflicts.insert(if v <= w { (v, w) } else { (w, v) });
}

pub fn has_conflict(conflicts: &Conflicts, v: NodeId, w: NodeId) -> bool {
    conflicts.contains(&if v <= w { (v, w) } else { (w, v) })
}

fn is_dummy(g: &LayoutGraph, v: NodeId) -> Result<bool> {
    Ok(util::node(g, v)?.is_dummy())
}

/// The upper end of the inner segment ending at `v`, if there is one.
fn other_inner_segment_node(g: &LayoutGraph, v: NodeId) -> Result<Option<NodeId>> {
    if !is_dummy(g, v)? {
        return Ok(None);
    }
    for u in g.predecessors(v) {
        if is_dummy(g, u)? {
            return Ok(Some(u));
        }
    }
    Ok(None)
}

pub fn find_type1_conflicts(g: &LayoutGraph, layering: &[Vec<NodeId>]) -> Result<Conflicts> {
    let mut conflicts = Conflicts::default();
    for pair in layering.windows(2) {
        let (prev_layer, layer) = (&pair[0], &pair[1]);
        let mut k0 = 0usize;
        let mut scan_pos = 0usize;
        let last = layer.len().saturating_sub(1);

        for (i, &v) in layer.iter().enumerate() {
            let w = other_inner_segment_node(g, v)?;
            let k1 = match w {
                Some(w) => util::order(g, w)?,
                None => prev_layer.len(),
            };
            if w.is_none() && i != last {
                continue;
            }
            for &scan in &layer[scan_pos..=i] {
                let scan_dummy = is_dummy(g, scan)?;
                for u in g.predecessors(scan) {
                    let u_label = util::node(g, u)?;
                    let u_pos = util::order(g, u)?;
                    if (u_pos < k0 || k1 < u_pos) && !(u_label.is_dummy() && scan_dummy) {
                        add_conflict(&mut conflicts, u, scan);
                    }
                }
            }
            scan_pos = i + 1;
            k0 = k1;
        }
    }
    Ok(conflicts)
}

pub fn find_type2_conflicts(g: &LayoutGraph, layering: &[Vec<NodeId>], conflicts: &mut Conflicts) -> Result<()> {
    for pair in layering.windows(2) {
        let (north, south) = (&pair[0], &pair[1]);
        let mut prev_north: i64 = -1;
        let mut next_north: Option<i64> = None;
        let mut south_pos = 0usize;

        for (lookahead, &v) in south.iter().enumerate() {
            if util::node(g, v)?.dummy == Some(Dummy::Border) {
                if let Some(first) = g.first_predecessor(v) {
                    let nn = util::order(g, first)? as i64;
                    next_north = Some(nn);
                    scan(g, south, south_pos, lookahead, prev_north, nn, conflicts)?;
                    south_pos = lookahead;
                    prev_north = nn;
                }
            }
            if let Some(nn) = next_north {
                scan(g, south, south_pos, south.len(), nn, north.len() as i64, conflicts)?;
            }
        }
    }
    Ok(())
}

fn scan(
    g: &LayoutGraph,
    south: &[NodeId],
    from: usize,
    to: usize,
    prev_north_border: i64,
    next_north_border: i64,
    conflicts: &mut Conflicts,
) -> Result<()> {
    for &v in &south[from..to] {
        if !is_dummy(g, v)? {
            continue;
        }
        for u in g.predecessors(v) {
            let u_label = util::node(g, u)?;
            let u_order = util::order(g, u)? as i64;
            if u_label.is_dummy() && (u_order < prev_north_border || u_order > next_north_border) {
                add_conflict(conflicts, u, v);
            }
        }
    }
    Ok(())
}
