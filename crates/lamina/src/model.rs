//! Configuration, input labels, and the records carried through the pipeline.

use lamina_graph::{EdgeKey, Graph, GraphOptions, NodeId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RankDir {
    #[default]
    TB,
    BT,
    LR,
    RL,
}

impl RankDir {
    pub fn is_horizontal(self) -> bool {
        matches!(self, RankDir::LR | RankDir::RL)
    }
}

/// Where an edge label sits relative to the edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelPos {
    L,
    C,
    #[default]
    R,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Acyclicer {
    #[default]
    Dfs,
    Greedy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Ranker {
    #[default]
    NetworkSimplex,
    TightTree,
    LongestPath,
}

/// One of the four Brandes-Koepf alignments: vertical sweep direction plus horizontal bias.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Align {
    UL,
    UR,
    DL,
    DR,
}

impl Align {
    pub const ALL: [Align; 4] = [Align::UL, Align::UR, Align::DL, Align::DR];

    pub fn is_up(self) -> bool {
        matches!(self, Align::UL | Align::UR)
    }

    pub fn is_right(self) -> bool {
        matches!(self, Align::UR | Align::DR)
    }
}

/// Solver for horizontal coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Positioner {
    #[default]
    BrandesKoepf,
    /// Skip Brandes-Koepf and solve x directly with network simplex.
    NetworkSimplex,
}

/// Layout options. Travels as the graph label of an [`InputGraph`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutConfig {
    pub rankdir: RankDir,
    pub nodesep: f64,
    pub edgesep: f64,
    pub ranksep: f64,
    pub marginx: f64,
    pub marginy: f64,
    pub acyclicer: Acyclicer,
    pub ranker: Ranker,
    pub align: Option<Align>,
    pub positioner: Positioner,
    /// Pull long-edge dummies toward the straight line between their endpoints, with the given
    /// strength in `(0, 1]`. Disabled when absent.
    pub straighten: Option<f64>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            rankdir: RankDir::TB,
            nodesep: 50.0,
            edgesep: 20.0,
            ranksep: 50.0,
            marginx: 0.0,
            marginy: 0.0,
            acyclicer: Acyclicer::Dfs,
            ranker: Ranker::NetworkSimplex,
            align: None,
            positioner: Positioner::BrandesKoepf,
            straighten: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Caller-facing node record. `x`/`y` are filled in by [`crate::layout`]; compound nodes also
/// get their `width`/`height` from their children.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NodeLabel {
    pub width: f64,
    pub height: f64,
    pub x: Option<f64>,
    pub y: Option<f64>,
}

impl NodeLabel {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }
}

/// Caller-facing edge record. `points` (and `x`/`y` when the edge has a label) are filled in by
/// [`crate::layout`].
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeLabel {
    pub weight: f64,
    pub minlen: u32,
    pub width: f64,
    pub height: f64,
    pub labelpos: LabelPos,
    pub labeloffset: f64,
    pub points: Vec<Point>,
    pub x: Option<f64>,
    pub y: Option<f64>,
}

impl Default for EdgeLabel {
    fn default() -> Self {
        Self {
            weight: 1.0,
            minlen: 1,
            width: 0.0,
            height: 0.0,
            labelpos: LabelPos::R,
            labeloffset: 10.0,
            points: Vec::new(),
            x: None,
            y: None,
        }
    }
}

impl EdgeLabel {
    pub fn with_label(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }
}

pub type InputGraph = Graph<NodeLabel, EdgeLabel, LayoutConfig>;

/// An empty directed, compound multigraph with default configuration.
pub fn input_graph() -> InputGraph {
    input_graph_with(LayoutConfig::default())
}

pub fn input_graph_with(config: LayoutConfig) -> InputGraph {
    Graph::with_label(
        GraphOptions {
            directed: true,
            multigraph: true,
            compound: true,
        },
        config,
    )
}

// ---- working graph ---------------------------------------------------------------------------

/// Why a node that the caller never created exists in the working graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dummy {
    /// Interior point of a long edge.
    Edge,
    /// Interior point of a long edge that also carries the edge's label.
    EdgeLabel,
    /// Temporary marker used to pick the label rank of an edge.
    EdgeProxy,
    /// Compound-node boundary (top, bottom, or a left/right segment).
    Border,
    /// Stand-in for a self-loop during ordering and positioning.
    SelfEdge,
    /// Root of the nesting graph.
    Root,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BorderSide {
    Left,
    Right,
}

/// An edge removed from the working graph, remembered so it can be restored later.
#[derive(Debug, Clone, PartialEq)]
pub struct DetachedEdge {
    pub key: EdgeKey,
    pub label: LayoutEdge,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct LayoutNode {
    pub width: f64,
    pub height: f64,
    pub x: f64,
    pub y: f64,
    pub rank: Option<i32>,
    pub order: Option<usize>,
    pub dummy: Option<Dummy>,
    pub labelpos: Option<LabelPos>,
    /// Originating edge of a dummy (chain member, label proxy, self-loop stand-in).
    pub edge: Option<EdgeKey>,
    /// Original label of a normalized edge; kept on the first node of its chain, or on a
    /// self-loop stand-in.
    pub edge_label: Option<Box<LayoutEdge>>,
    pub min_rank: Option<i32>,
    pub max_rank: Option<i32>,
    pub border_top: Option<NodeId>,
    pub border_bottom: Option<NodeId>,
    /// Left/right border segment per rank, indexed by rank.
    pub border_left: Vec<Option<NodeId>>,
    pub border_right: Vec<Option<NodeId>>,
    pub border_side: Option<BorderSide>,
    pub self_edges: Vec<DetachedEdge>,
}

impl LayoutNode {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    pub fn dummy(kind: Dummy, width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            dummy: Some(kind),
            ..Default::default()
        }
    }

    pub fn is_dummy(&self) -> bool {
        self.dummy.is_some()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LayoutEdge {
    pub weight: f64,
    pub minlen: i32,
    pub width: f64,
    pub height: f64,
    pub labelpos: LabelPos,
    pub labeloffset: f64,
    pub label_rank: Option<i32>,
    pub nesting: bool,
    pub reversed: bool,
    /// Name of the edge before it was reversed to break a cycle.
    pub forward_name: Option<String>,
    pub points: Vec<Point>,
    pub x: Option<f64>,
    pub y: Option<f64>,
}

impl Default for LayoutEdge {
    fn default() -> Self {
        Self {
            weight: 1.0,
            minlen: 1,
            width: 0.0,
            height: 0.0,
            labelpos: LabelPos::R,
            labeloffset: 10.0,
            label_rank: None,
            nesting: false,
            reversed: false,
            forward_name: None,
            points: Vec::new(),
            x: None,
            y: None,
        }
    }
}

impl LayoutEdge {
    pub fn new(weight: f64, minlen: i32) -> Self {
        Self {
            weight,
            minlen,
            ..Default::default()
        }
    }

    pub fn has_label(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}

/// Graph-level state of a layout run.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LayoutState {
    pub config: LayoutConfig,
    /// First dummy of every chain created by normalization.
    pub dummy_chains: Vec<NodeId>,
    pub nesting_root: Option<NodeId>,
    /// Rank multiple that must be kept even when empty (compound graphs only).
    pub node_rank_factor: i32,
    pub max_rank: i32,
    pub width: f64,
    pub height: f64,
}

impl LayoutState {
    pub fn new(config: LayoutConfig) -> Self {
        Self {
            config,
            node_rank_factor: 1,
            ..Default::default()
        }
    }
}

pub type LayoutGraph = Graph<LayoutNode, LayoutEdge, LayoutState>;

/// An empty working graph: directed, compound, multigraph.
pub fn layout_graph(config: LayoutConfig) -> LayoutGraph {
    Graph::with_label(
        GraphOptions {
            directed: true,
            multigraph: true,
            compound: true,
        },
        LayoutState::new(config),
    )
}

/// Width and height of a finished layout, margins included.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LayoutSummary {
    pub width: f64,
    pub height: f64,
}
