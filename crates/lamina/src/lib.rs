//! Layered (Sugiyama-style) layout for directed graphs, including compound graphs, edge labels
//! and self-loops.
//!
//! Build an [`InputGraph`], give every node a size, and call [`layout`]. Nodes come back with
//! center coordinates, compound nodes with the size of their children's bounding box, and
//! edges with a polyline route clipped to the node boundaries.

pub use lamina_graph as graph;

pub mod acyclic;
pub mod add_border_segments;
pub mod coordinate_system;
pub mod document;
pub mod edge_labels;
mod error;
pub mod greedy_fas;
pub mod model;
pub mod nesting_graph;
pub mod normalize;
pub mod order;
pub mod parent_dummy_chains;
pub mod pipeline;
pub mod position;
pub mod rank;
pub mod self_edges;
pub mod util;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use error::{LayoutError, Result};
pub use model::{
    Acyclicer, Align, EdgeLabel, InputGraph, LabelPos, LayoutConfig, LayoutSummary, NodeLabel,
    Point, Positioner, RankDir, Ranker, input_graph, input_graph_with,
};
pub use pipeline::{Stage, layout, layout_with_progress};
