//! Crossing minimization.
//!
//! Starting from a depth-first initial order, alternate downward and upward layer-by-layer
//! sweeps, each placing nodes by the barycenter of their neighbors on the previous layer while
//! keeping subgraphs contiguous. The best layering seen is kept; the loop stops after four
//! consecutive sweeps without improvement.

pub mod barycenter;
pub mod constraints;
pub mod cross_count;
pub mod init_order;
pub mod layer_graph;
pub mod resolve_conflicts;
pub mod sort;
pub mod sort_subgraph;
pub mod types;

use crate::error::Result;
use crate::model::LayoutGraph;
use crate::util;
use constraints::{ConstraintGraph, add_subgraph_constraints};
use cross_count::cross_count;
use init_order::init_order;
use layer_graph::{LayerGraph, Relationship, build_layer_graph};
use lamina_graph::NodeId;
use sort_subgraph::sort_subgraph;

pub fn order(g: &mut LayoutGraph) -> Result<()> {
    let max_rank = util::max_rank(g);
    let down = (1..=max_rank)
        .map(|r| build_layer_graph(g, r, Relationship::InEdges))
        .collect::<Result<Vec<_>>>()?;
    let up = (0..max_rank)
        .rev()
        .map(|r| build_layer_graph(g, r, Relationship::OutEdges))
        .collect::<Result<Vec<_>>>()?;

    let layering = init_order(g)?;
    assign_order(g, &layering)?;

    let mut best = layering;
    let mut best_cc = f64::INFINITY;
    let mut since_best = 0;
    let mut i = 0usize;
    while since_best < 4 {
        let layer_graphs = if i % 2 == 1 { &down } else { &up };
        sweep_layer_graphs(g, layer_graphs, i % 4 >= 2)?;

        let layering = util::build_layer_matrix(g)?;
        let cc = cross_count(g, &layering)?;
        tracing::trace!(iteration = i, crossings = cc, "order sweep");
        if cc < best_cc {
            since_best = 0;
            best_cc = cc;
            best = layering;
        }
        i += 1;
        since_best += 1;
    }

    assign_order(g, &best)
}

fn sweep_layer_graphs(g: &mut LayoutGraph, layer_graphs: &[LayerGraph], bias_right: bool) -> Result<()> {
    let mut cg = ConstraintGraph::default();
    for lg in layer_graphs {
        let sorted = sort_subgraph(g, lg, None, &cg, bias_right)?;
        for (i, &v) in sorted.vs.iter().enumerate() {
            util::node_mut(g, v)?.order = Some(i);
        }
        add_subgraph_constraints(g, &mut cg, &sorted.vs);
    }
    Ok(())
}

pub fn assign_order(g: &mut LayoutGraph, layering: &[Vec<NodeId>]) -> Result<()> {
    for layer in layering {
        for (i, &v) in layer.iter().enumerate() {
            util::node_mut(g, v)?.order = Some(i);
        }
    }
    Ok(())
}
