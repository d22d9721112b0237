//! The layout entry points and the ordered pass list they run.

mod convert;
pub mod geometry;

use crate::error::Result;
use crate::model::{InputGraph, LayoutGraph, LayoutSummary};
use crate::{
    acyclic, add_border_segments, coordinate_system, edge_labels, nesting_graph, normalize, order,
    parent_dummy_chains, position, rank, self_edges, util,
};
use std::fmt;

pub use convert::{build_layout_graph, update_input_graph};

/// A pass of the layout pipeline, reported to progress callbacks in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    BuildGraph,
    MakeSpaceForEdgeLabels,
    RemoveSelfEdges,
    Acyclic,
    NestingGraph,
    Rank,
    InjectEdgeLabelProxies,
    RemoveEmptyRanks,
    NestingCleanup,
    NormalizeRanks,
    AssignRankMinMax,
    RemoveEdgeLabelProxies,
    Normalize,
    ParentDummyChains,
    AddBorderSegments,
    Order,
    InsertSelfEdges,
    AdjustCoordinateSystem,
    Position,
    PositionSelfEdges,
    RemoveBorderNodes,
    DenormalizeEdges,
    FixupEdgeLabelCoords,
    UndoCoordinateSystem,
    TranslateGraph,
    AssignNodeIntersects,
    ReversePoints,
    RestoreReversedEdges,
    UpdateInputGraph,
}

impl Stage {
    pub fn name(self) -> &'static str {
        match self {
            Stage::BuildGraph => "build-graph",
            Stage::MakeSpaceForEdgeLabels => "make-space-for-edge-labels",
            Stage::RemoveSelfEdges => "remove-self-edges",
            Stage::Acyclic => "acyclic",
            Stage::NestingGraph => "nesting-graph",
            Stage::Rank => "rank",
            Stage::InjectEdgeLabelProxies => "inject-edge-label-proxies",
            Stage::RemoveEmptyRanks => "remove-empty-ranks",
            Stage::NestingCleanup => "nesting-cleanup",
            Stage::NormalizeRanks => "normalize-ranks",
            Stage::AssignRankMinMax => "assign-rank-min-max",
            Stage::RemoveEdgeLabelProxies => "remove-edge-label-proxies",
            Stage::Normalize => "normalize",
            Stage::ParentDummyChains => "parent-dummy-chains",
            Stage::AddBorderSegments => "add-border-segments",
            Stage::Order => "order",
            Stage::InsertSelfEdges => "insert-self-edges",
            Stage::AdjustCoordinateSystem => "adjust-coordinate-system",
            Stage::Position => "position",
            Stage::PositionSelfEdges => "position-self-edges",
            Stage::RemoveBorderNodes => "remove-border-nodes",
            Stage::DenormalizeEdges => "denormalize-edges",
            Stage::FixupEdgeLabelCoords => "fixup-edge-label-coords",
            Stage::UndoCoordinateSystem => "undo-coordinate-system",
            Stage::TranslateGraph => "translate-graph",
            Stage::AssignNodeIntersects => "assign-node-intersects",
            Stage::ReversePoints => "reverse-points",
            Stage::RestoreReversedEdges => "restore-reversed-edges",
            Stage::UpdateInputGraph => "update-input-graph",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Lays out `g` in place: every node gets `x`/`y`, compound nodes get a size, and every edge
/// gets its route. Returns the size of the drawing.
pub fn layout(g: &mut InputGraph) -> Result<LayoutSummary> {
    layout_with_progress(g, |_| {})
}

/// [`layout`], calling `progress` as each stage starts.
pub fn layout_with_progress(
    g: &mut InputGraph,
    mut progress: impl FnMut(Stage),
) -> Result<LayoutSummary> {
    let span = tracing::debug_span!("layout", nodes = g.node_count(), edges = g.edge_count());
    let _guard = span.enter();

    enter(Stage::BuildGraph, &mut progress);
    let mut working = build_layout_graph(g)?;
    run_layout(&mut working, &mut progress)?;

    enter(Stage::UpdateInputGraph, &mut progress);
    let summary = update_input_graph(g, &working)?;
    tracing::debug!(width = summary.width, height = summary.height, "layout finished");
    Ok(summary)
}

fn enter(stage: Stage, progress: &mut impl FnMut(Stage)) {
    tracing::debug!(stage = stage.name(), "layout stage");
    progress(stage);
}

/// Runs every pass on a working graph.
pub fn run_layout(g: &mut LayoutGraph, progress: &mut impl FnMut(Stage)) -> Result<()> {
    enter(Stage::MakeSpaceForEdgeLabels, progress);
    edge_labels::make_space_for_edge_labels(g);

    enter(Stage::RemoveSelfEdges, progress);
    self_edges::remove_self_edges(g)?;

    enter(Stage::Acyclic, progress);
    acyclic::run(g)?;

    enter(Stage::NestingGraph, progress);
    nesting_graph::run(g)?;

    enter(Stage::Rank, progress);
    rank::rank(g)?;

    enter(Stage::InjectEdgeLabelProxies, progress);
    edge_labels::inject_edge_label_proxies(g)?;

    enter(Stage::RemoveEmptyRanks, progress);
    util::remove_empty_ranks(g);

    enter(Stage::NestingCleanup, progress);
    nesting_graph::cleanup(g);

    enter(Stage::NormalizeRanks, progress);
    util::normalize_ranks(g);

    enter(Stage::AssignRankMinMax, progress);
    geometry::assign_rank_min_max(g)?;

    enter(Stage::RemoveEdgeLabelProxies, progress);
    edge_labels::remove_edge_label_proxies(g)?;

    enter(Stage::Normalize, progress);
    normalize::run(g)?;

    enter(Stage::ParentDummyChains, progress);
    parent_dummy_chains::parent_dummy_chains(g)?;

    enter(Stage::AddBorderSegments, progress);
    add_border_segments::add_border_segments(g)?;

    enter(Stage::Order, progress);
    order::order(g)?;

    enter(Stage::InsertSelfEdges, progress);
    self_edges::insert_self_edges(g)?;

    enter(Stage::AdjustCoordinateSystem, progress);
    coordinate_system::adjust(g);

    enter(Stage::Position, progress);
    position::position(g)?;

    enter(Stage::PositionSelfEdges, progress);
    self_edges::position_self_edges(g)?;

    enter(Stage::RemoveBorderNodes, progress);
    geometry::remove_border_nodes(g)?;

    enter(Stage::DenormalizeEdges, progress);
    normalize::undo(g)?;

    enter(Stage::FixupEdgeLabelCoords, progress);
    edge_labels::fixup_edge_label_coords(g);

    enter(Stage::UndoCoordinateSystem, progress);
    coordinate_system::undo(g);

    enter(Stage::TranslateGraph, progress);
    geometry::translate_graph(g);

    enter(Stage::AssignNodeIntersects, progress);
    geometry::assign_node_intersects(g)?;

    enter(Stage::ReversePoints, progress);
    geometry::reverse_points_for_reversed_edges(g);

    enter(Stage::RestoreReversedEdges, progress);
    acyclic::undo(g)?;
    Ok(())
}
