use super::layer_graph::LayerGraph;
use super::types::BarycenterEntry;
use crate::error::Result;
use crate::model::LayoutGraph;
use crate::util;
use lamina_graph::NodeId;

/// Weighted mean order of each movable node's neighbors on the fixed rank.
///
/// A node without neighbors, or whose neighbor weights sum to zero, has no barycenter.
pub fn barycenter(g: &LayoutGraph, lg: &LayerGraph, movable: &[NodeId]) -> Result<Vec<BarycenterEntry>> {
    movable
        .iter()
        .map(|&v| {
            let mut sum = 0.0;
            let mut weight = 0.0;
            for &(u, w) in lg.neighbors(v) {
                sum += w * util::order(g, u)? as f64;
                weight += w;
            }
            Ok(if weight > 0.0 {
                BarycenterEntry {
                    v,
                    barycenter: Some(sum / weight),
                    weight,
                }
            } else {
                BarycenterEntry {
                    v,
                    barycenter: None,
                    weight: 0.0,
                }
            })
        })
        .collect()
}
