//! JSON documents for graphs going into and layouts coming out of [`crate::layout`].
//!
//! ```json
//! {
//!   "config": { "rankdir": "LR", "nodesep": 30 },
//!   "nodes": [{ "id": "a", "width": 80, "height": 40 }, { "id": "b", "width": 80, "height": 40 }],
//!   "edges": [{ "v": "a", "w": "b" }]
//! }
//! ```

use crate::error::{LayoutError, Result};
use crate::model::{EdgeLabel, InputGraph, LabelPos, LayoutConfig, LayoutSummary, NodeLabel, Point, input_graph_with};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphDocument {
    #[serde(default)]
    pub config: LayoutConfig,
    #[serde(default)]
    pub nodes: Vec<NodeDocument>,
    #[serde(default)]
    pub edges: Vec<EdgeDocument>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeDocument {
    pub id: String,
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub height: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
}

fn one() -> f64 {
    1.0
}

fn one_rank() -> u32 {
    1
}

fn label_offset() -> f64 {
    10.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeDocument {
    pub v: String,
    pub w: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default = "one")]
    pub weight: f64,
    #[serde(default = "one_rank")]
    pub minlen: u32,
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub height: f64,
    #[serde(default)]
    pub labelpos: LabelPos,
    #[serde(default = "label_offset")]
    pub labeloffset: f64,
}

impl GraphDocument {
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Builds the input graph. Node ids must be unique, and every parent and edge endpoint must
    /// name a declared node.
    pub fn into_graph(self) -> Result<InputGraph> {
        let mut g = input_graph_with(self.config);
        for node in &self.nodes {
            if g.node_id(&node.id).is_some() {
                return Err(LayoutError::DuplicateNode(node.id.clone()));
            }
            g.set_node(node.id.as_str(), NodeLabel::new(node.width, node.height));
        }

        let lookup = |g: &InputGraph, id: &str| {
            g.node_id(id)
                .ok_or_else(|| LayoutError::UnknownNode(id.to_string()))
        };
        for node in &self.nodes {
            let Some(parent) = node.parent.as_deref() else {
                continue;
            };
            let v = lookup(&g, &node.id)?;
            let p = lookup(&g, parent)?;
            g.set_parent(v, Some(p))?;
        }
        for edge in self.edges {
            let v = lookup(&g, &edge.v)?;
            let w = lookup(&g, &edge.w)?;
            let label = EdgeLabel {
                weight: edge.weight,
                minlen: edge.minlen,
                width: edge.width,
                height: edge.height,
                labelpos: edge.labelpos,
                labeloffset: edge.labeloffset,
                ..EdgeLabel::default()
            };
            g.set_edge_named(v, w, edge.name.as_deref(), label)?;
        }
        Ok(g)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LayoutDocument {
    pub width: f64,
    pub height: f64,
    pub nodes: Vec<PlacedNode>,
    pub edges: Vec<RoutedEdge>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedNode {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutedEdge {
    pub v: String,
    pub w: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub points: Vec<Point>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
}

impl LayoutDocument {
    /// Snapshot of a laid-out graph, nodes and edges in insertion order.
    pub fn from_graph(g: &InputGraph, summary: LayoutSummary) -> Self {
        let nodes = g
            .nodes()
            .iter()
            .filter_map(|&v| {
                let (id, label) = (g.key(v)?, g.node(v)?);
                Some(PlacedNode {
                    id: id.to_string(),
                    x: label.x.unwrap_or_default(),
                    y: label.y.unwrap_or_default(),
                    width: label.width,
                    height: label.height,
                })
            })
            .collect();
        let edges = g
            .edges()
            .iter()
            .filter_map(|&e| {
                let (key, label) = (g.edge_key(e)?, g.edge(e)?);
                Some(RoutedEdge {
                    v: g.key(key.v)?.to_string(),
                    w: g.key(key.w)?.to_string(),
                    name: key.name.clone(),
                    points: label.points.clone(),
                    x: label.x,
                    y: label.y,
                })
            })
            .collect();
        Self {
            width: summary.width,
            height: summary.height,
            nodes,
            edges,
        }
    }
}

/// Parses a graph document, lays it out and returns the result document.
pub fn layout_json(text: &str) -> Result<LayoutDocument> {
    let mut g = GraphDocument::from_json(text)?.into_graph()?;
    let summary = crate::layout(&mut g)?;
    Ok(LayoutDocument::from_graph(&g, summary))
}
