//! Horizontal coordinates after Brandes and Koepf, "Fast and Simple Horizontal Coordinate
//! Assignment", with the block-graph compaction used for compound borders.
//!
//! Four alignments are built (up/down sweep, left/right bias). Each one is compacted
//! independently, all four are shifted onto the narrowest one, and the final coordinate of a
//! node is the mean of its two median candidates (or the coordinate from a fixed alignment).

pub mod compaction;
pub mod conflicts;

use crate::error::{LayoutError, Result};
use crate::model::{Align, LayoutGraph};
use crate::util;
use compaction::{Xs, horizontal_compaction, vertical_alignment};
use conflicts::{Conflicts, find_type1_conflicts, find_type2_conflicts};
use lamina_graph::NodeId;

pub use compaction::sep;

/// All node conflicts of a layering.
pub fn find_conflicts(g: &LayoutGraph, layering: &[Vec<NodeId>]) -> Result<Conflicts> {
    let mut conflicts = find_type1_conflicts(g, layering)?;
    find_type2_conflicts(g, layering, &mut conflicts)?;
    Ok(conflicts)
}

/// Coordinates of a single alignment, already mirrored back for right-biased ones.
pub fn align_layering(
    g: &LayoutGraph,
    layering: &[Vec<NodeId>],
    conflicts: &Conflicts,
    align: Align,
) -> Result<Xs> {
    let mut adjusted: Vec<Vec<NodeId>> = if align.is_up() {
        layering.to_vec()
    } else {
        layering.iter().rev().cloned().collect()
    };
    if align.is_right() {
        for layer in &mut adjusted {
            layer.reverse();
        }
    }

    let alignment = if align.is_up() {
        vertical_alignment(g, &adjusted, conflicts, |v| g.predecessors(v))?
    } else {
        vertical_alignment(g, &adjusted, conflicts, |v| g.successors(v))?
    };
    let mut xs = horizontal_compaction(g, &adjusted, &alignment, align.is_right())?;
    if align.is_right() {
        for x in xs.values_mut() {
            *x = -*x;
        }
    }
    tracing::trace!(?align, nodes = xs.len(), "bk alignment");
    Ok(xs)
}

#[cfg(feature = "parallel")]
fn all_alignments(g: &LayoutGraph, layering: &[Vec<NodeId>], conflicts: &Conflicts) -> Result<Vec<Xs>> {
    use rayon::prelude::*;

    Align::ALL
        .par_iter()
        .map(|&align| align_layering(g, layering, conflicts, align))
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn all_alignments(g: &LayoutGraph, layering: &[Vec<NodeId>], conflicts: &Conflicts) -> Result<Vec<Xs>> {
    Align::ALL
        .iter()
        .map(|&align| align_layering(g, layering, conflicts, align))
        .collect()
}

/// Index (into [`Align::ALL`] order) of the alignment with the smallest total width. Ties go to
/// the earlier alignment.
pub fn find_smallest_width_alignment(g: &LayoutGraph, xss: &[Xs]) -> Result<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, xs) in xss.iter().enumerate() {
        let mut max = f64::NEG_INFINITY;
        let mut min = f64::INFINITY;
        for (&v, &x) in xs {
            let half = util::node(g, v)?.width / 2.0;
            max = max.max(x + half);
            min = min.min(x - half);
        }
        let width = max - min;
        if best.is_none_or(|(_, w)| width < w) {
            best = Some((i, width));
        }
    }
    Ok(best.map_or(0, |(i, _)| i))
}

fn extent(xs: &Xs) -> (f64, f64) {
    xs.values().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &x| {
        (lo.min(x), hi.max(x))
    })
}

/// Shifts every alignment onto `xss[align_to]`: left-biased ones share its minimum, right-biased
/// ones its maximum.
pub fn align_coordinates(xss: &mut [Xs], align_to: usize) {
    let Some(target) = xss.get(align_to) else {
        return;
    };
    let (to_min, to_max) = extent(target);
    for (i, xs) in xss.iter_mut().enumerate() {
        if i == align_to || xs.is_empty() {
            continue;
        }
        let (min, max) = extent(xs);
        let delta = if Align::ALL[i].is_right() {
            to_max - max
        } else {
            to_min - min
        };
        if delta != 0.0 {
            for x in xs.values_mut() {
                *x += delta;
            }
        }
    }
}

/// Final coordinates: the mean of the two middle candidates, or the fixed alignment's value.
/// Nodes are listed in `layering` order.
pub fn balance(
    g: &LayoutGraph,
    layering: &[Vec<NodeId>],
    xss: &[Xs],
    align: Option<Align>,
) -> Result<Vec<(NodeId, f64)>> {
    let value = |xs: &Xs, v: NodeId| {
        xs.get(&v)
            .copied()
            .ok_or_else(|| LayoutError::AlignmentLookup(util::name(g, v)))
    };
    let mut out = Vec::new();
    for &v in layering.iter().flatten() {
        let x = match align {
            Some(a) => {
                let i = Align::ALL.iter().position(|&b| b == a).unwrap_or(0);
                value(&xss[i], v)?
            }
            None => {
                let mut candidates = xss
                    .iter()
                    .map(|xs| value(xs, v))
                    .collect::<Result<Vec<f64>>>()?;
                candidates.sort_by(f64::total_cmp);
                (candidates[1] + candidates[2]) / 2.0
            }
        };
        out.push((v, x));
    }
    Ok(out)
}

/// Brandes-Koepf x coordinates for every ranked node.
pub fn position_x(g: &LayoutGraph) -> Result<Vec<(NodeId, f64)>> {
    let layering = util::build_layer_matrix(g)?;
    let conflicts = find_conflicts(g, &layering)?;
    let mut xss = all_alignments(g, &layering, &conflicts)?;
    let smallest = find_smallest_width_alignment(g, &xss)?;
    align_coordinates(&mut xss, smallest);
    balance(g, &layering, &xss, g.graph().config.align)
}
