//! Coordinate assignment: `y` from the layer heights, `x` from Brandes-Koepf (or network
//! simplex when that fails or is selected).

pub mod bk;
pub mod simplex;
pub mod straighten;

use crate::error::Result;
use crate::model::{LayoutGraph, Positioner};
use crate::util;
use lamina_graph::NodeId;
use rustc_hash::FxHashMap;

pub fn position(g: &mut LayoutGraph) -> Result<()> {
    position_y(g)?;

    let xs = position_x(g)?;
    for (v, x) in xs {
        util::node_mut(g, v)?.x = x;
    }
    Ok(())
}

/// Stacks layers top to bottom, `ranksep` apart, each node centered on its layer's mid line.
pub fn position_y(g: &mut LayoutGraph) -> Result<()> {
    let ranksep = g.graph().config.ranksep;
    let mut prev_y = 0.0;
    for layer in util::build_layer_matrix(g)? {
        let mut max_height = 0.0f64;
        for &v in &layer {
            max_height = max_height.max(util::node(g, v)?.height);
        }
        for &v in &layer {
            util::node_mut(g, v)?.y = prev_y + max_height / 2.0;
        }
        prev_y += max_height + ranksep;
    }
    Ok(())
}

/// Horizontal coordinates of every ranked node, straightened when configured.
pub fn position_x(g: &LayoutGraph) -> Result<FxHashMap<NodeId, f64>> {
    let config = &g.graph().config;
    let pairs = match config.positioner {
        Positioner::NetworkSimplex => simplex::position_x(g)?,
        Positioner::BrandesKoepf => bk_or_simplex(g, bk::position_x(g))?,
    };

    let mut xs: FxHashMap<NodeId, f64> = pairs.into_iter().collect();
    if let Some(strength) = config.straighten {
        straighten::straighten(g, &mut xs, strength)?;
    }
    Ok(xs)
}

/// Keeps a Brandes-Koepf result when every coordinate is finite, otherwise solves x with network
/// simplex.
pub fn bk_or_simplex(
    g: &LayoutGraph,
    bk: Result<Vec<(NodeId, f64)>>,
) -> Result<Vec<(NodeId, f64)>> {
    match bk {
        Ok(xs) if xs.iter().all(|(_, x)| x.is_finite()) => Ok(xs),
        Ok(_) => {
            tracing::warn!("brandes-koepf produced non-finite coordinates; using network simplex");
            simplex::position_x(g)
        }
        Err(err) => {
            tracing::warn!(%err, "brandes-koepf failed; using network simplex");
            simplex::position_x(g)
        }
    }
}
