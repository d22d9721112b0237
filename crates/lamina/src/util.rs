//! Helpers shared by the layout passes: checked label access, layer matrices, rank
//! normalization and rectangle geometry.

use crate::error::{LayoutError, Result};
use crate::model::{Dummy, LayoutGraph, LayoutNode, Point};
use lamina_graph::{Graph, NodeId};

/// Axis-aligned rectangle described by its center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl From<&LayoutNode> for Rect {
    fn from(node: &LayoutNode) -> Self {
        Rect {
            x: node.x,
            y: node.y,
            width: node.width,
            height: node.height,
        }
    }
}

/// Display name of `v`, for error messages.
pub fn name<N, E, G>(g: &Graph<N, E, G>, v: NodeId) -> String {
    g.key(v)
        .map(str::to_string)
        .unwrap_or_else(|| v.to_string())
}

pub fn node(g: &LayoutGraph, v: NodeId) -> Result<&LayoutNode> {
    g.node(v).ok_or_else(|| LayoutError::MissingNode(name(g, v)))
}

pub fn node_mut(g: &mut LayoutGraph, v: NodeId) -> Result<&mut LayoutNode> {
    if !g.has_node(v) {
        return Err(LayoutError::MissingNode(name(g, v)));
    }
    g.node_mut(v)
        .ok_or_else(|| LayoutError::MissingNode(v.to_string()))
}

pub fn rank(g: &LayoutGraph, v: NodeId) -> Result<i32> {
    node(g, v)?
        .rank
        .ok_or_else(|| LayoutError::MissingRank(name(g, v)))
}

pub fn order(g: &LayoutGraph, v: NodeId) -> Result<usize> {
    node(g, v)?
        .order
        .ok_or_else(|| LayoutError::MissingOrder(name(g, v)))
}

/// Adds a dummy node of the given kind with a fresh `{prefix}{n}` key.
pub fn add_dummy_node(g: &mut LayoutGraph, kind: Dummy, mut label: LayoutNode, prefix: &str) -> NodeId {
    label.dummy = Some(kind);
    g.add_unique_node(prefix, label)
}

/// Point where the ray from the rectangle's center toward `point` leaves the rectangle.
///
/// Fails when `point` is the center itself, since every boundary point is then equally valid.
pub fn intersect_rect(rect: Rect, point: Point) -> Result<Point> {
    let dx = point.x - rect.x;
    let dy = point.y - rect.y;
    if dx == 0.0 && dy == 0.0 {
        return Err(LayoutError::DegenerateIntersection {
            x: point.x,
            y: point.y,
        });
    }

    let mut w = rect.width / 2.0;
    let mut h = rect.height / 2.0;
    let (sx, sy) = if dy.abs() * w > dx.abs() * h {
        if dy < 0.0 {
            h = -h;
        }
        (h * dx / dy, h)
    } else {
        if dx < 0.0 {
            w = -w;
        }
        (w, w * dy / dx)
    };
    Ok(Point::new(rect.x + sx, rect.y + sy))
}

/// Ranked nodes grouped by rank, each layer sorted by order.
pub fn build_layer_matrix(g: &LayoutGraph) -> Result<Vec<Vec<NodeId>>> {
    let mut layers: Vec<Vec<(usize, NodeId)>> = Vec::new();
    for &v in g.nodes() {
        let Some(label) = g.node(v) else { continue };
        let Some(r) = label.rank else { continue };
        let r = usize::try_from(r).map_err(|_| LayoutError::MissingRank(name(g, v)))?;
        let o = label
            .order
            .ok_or_else(|| LayoutError::MissingOrder(name(g, v)))?;
        if layers.len() <= r {
            layers.resize_with(r + 1, Vec::new);
        }
        layers[r].push((o, v));
    }
    Ok(layers
        .into_iter()
        .map(|mut layer| {
            layer.sort_by_key(|&(o, _)| o);
            layer.into_iter().map(|(_, v)| v).collect()
        })
        .collect())
}

/// Shifts ranks so the smallest is zero.
pub fn normalize_ranks(g: &mut LayoutGraph) {
    let Some(min) = g
        .nodes()
        .iter()
        .filter_map(|&v| g.node(v).and_then(|n| n.rank))
        .min()
    else {
        return;
    };
    let nodes = g.nodes().to_vec();
    for v in nodes {
        if let Some(r) = g.node_mut(v).and_then(|n| n.rank.as_mut()) {
            *r -= min;
        }
    }
}

/// Closes gaps between occupied ranks, except at multiples of `node_rank_factor`, which the
/// nesting graph reserves for compound borders.
pub fn remove_empty_ranks(g: &mut LayoutGraph) {
    let ranked: Vec<(NodeId, i32)> = g
        .nodes()
        .iter()
        .filter_map(|&v| g.node(v).and_then(|n| n.rank).map(|r| (v, r)))
        .collect();
    let Some(offset) = ranked.iter().map(|&(_, r)| r).min() else {
        return;
    };

    let mut layers: Vec<Vec<NodeId>> = Vec::new();
    for &(v, r) in &ranked {
        let i = (r - offset) as usize;
        if layers.len() <= i {
            layers.resize_with(i + 1, Vec::new);
        }
        layers[i].push(v);
    }

    let factor = g.graph().node_rank_factor.max(1) as usize;
    let mut delta = 0i32;
    for (i, layer) in layers.iter().enumerate() {
        if layer.is_empty() {
            if i % factor != 0 {
                delta -= 1;
            }
        } else if delta != 0 {
            for &v in layer {
                if let Some(r) = g.node_mut(v).and_then(|n| n.rank.as_mut()) {
                    *r += delta;
                }
            }
        }
    }
}

pub fn max_rank(g: &LayoutGraph) -> i32 {
    g.nodes()
        .iter()
        .filter_map(|&v| g.node(v).and_then(|n| n.rank))
        .max()
        .unwrap_or(0)
}

/// Compound hierarchy in postorder: every node after all of its descendants.
pub fn hierarchy_postorder<N, E, G>(g: &Graph<N, E, G>) -> Vec<NodeId> {
    let mut out = Vec::with_capacity(g.node_count());
    let mut stack: Vec<(NodeId, bool)> = g
        .root_children()
        .into_iter()
        .rev()
        .map(|v| (v, false))
        .collect();
    while let Some((v, expanded)) = stack.pop() {
        if expanded {
            out.push(v);
            continue;
        }
        stack.push((v, true));
        stack.extend(g.children(v).into_iter().rev().map(|c| (c, false)));
    }
    out
}
