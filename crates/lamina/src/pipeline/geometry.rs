//! Final geometry passes run after positioning.

use crate::error::Result;
use crate::model::{Dummy, LayoutGraph, Point};
use crate::util::{self, Rect};

/// Records each compound node's rank span from its top and bottom borders.
pub fn assign_rank_min_max(g: &mut LayoutGraph) -> Result<()> {
    let mut max_rank = 0;
    for v in g.nodes().to_vec() {
        let node = util::node(g, v)?;
        let (Some(top), Some(bottom)) = (node.border_top, node.border_bottom) else {
            continue;
        };
        let min = util::rank(g, top)?;
        let max = util::rank(g, bottom)?;
        let node = util::node_mut(g, v)?;
        node.min_rank = Some(min);
        node.max_rank = Some(max);
        max_rank = max_rank.max(max);
    }
    g.graph_mut().max_rank = max_rank;
    Ok(())
}

/// Sizes every compound node to the box framed by its borders, then drops all border dummies.
pub fn remove_border_nodes(g: &mut LayoutGraph) -> Result<()> {
    for v in g.nodes().to_vec() {
        if !g.has_children(v) {
            continue;
        }
        let node = util::node(g, v)?;
        let last = |side: &[Option<_>]| side.iter().rev().find_map(|b| *b);
        let (Some(top), Some(bottom), Some(left), Some(right)) = (
            node.border_top,
            node.border_bottom,
            last(&node.border_left),
            last(&node.border_right),
        ) else {
            continue;
        };
        let (t, b) = (util::node(g, top)?.y, util::node(g, bottom)?.y);
        let (l, r) = (util::node(g, left)?.x, util::node(g, right)?.x);

        let node = util::node_mut(g, v)?;
        node.width = (r - l).abs();
        node.height = (b - t).abs();
        node.x = l + node.width / 2.0;
        node.y = t + node.height / 2.0;
    }

    for v in g.nodes().to_vec() {
        if util::node(g, v)?.dummy == Some(Dummy::Border) {
            g.remove_node(v);
        }
    }
    Ok(())
}

/// Moves the drawing so its top-left corner (after margins) sits at the origin, and records the
/// overall size.
pub fn translate_graph(g: &mut LayoutGraph) {
    let mut min_x = f64::INFINITY;
    let mut max_x = 0.0f64;
    let mut min_y = f64::INFINITY;
    let mut max_y = 0.0f64;
    let mut extend = |x: f64, y: f64, w: f64, h: f64| {
        min_x = min_x.min(x - w / 2.0);
        max_x = max_x.max(x + w / 2.0);
        min_y = min_y.min(y - h / 2.0);
        max_y = max_y.max(y + h / 2.0);
    };
    for &v in g.nodes() {
        if let Some(node) = g.node(v) {
            extend(node.x, node.y, node.width, node.height);
        }
    }
    for &e in g.edges() {
        if let Some(edge) = g.edge(e) {
            if let (Some(x), Some(y)) = (edge.x, edge.y) {
                extend(x, y, edge.width, edge.height);
            }
        }
    }
    if !min_x.is_finite() {
        min_x = 0.0;
    }
    if !min_y.is_finite() {
        min_y = 0.0;
    }

    let config = &g.graph().config;
    let (margin_x, margin_y) = (config.marginx, config.marginy);
    min_x -= margin_x;
    min_y -= margin_y;

    for v in g.nodes().to_vec() {
        if let Some(node) = g.node_mut(v) {
            node.x -= min_x;
            node.y -= min_y;
        }
    }
    for e in g.edges().to_vec() {
        if let Some(edge) = g.edge_mut(e) {
            for p in &mut edge.points {
                p.x -= min_x;
                p.y -= min_y;
            }
            if let Some(x) = edge.x.as_mut() {
                *x -= min_x;
            }
            if let Some(y) = edge.y.as_mut() {
                *y -= min_y;
            }
        }
    }

    let state = g.graph_mut();
    state.width = max_x - min_x + margin_x;
    state.height = max_y - min_y + margin_y;
}

/// Clips both ends of every edge route to the boundary of its endpoint nodes.
pub fn assign_node_intersects(g: &mut LayoutGraph) -> Result<()> {
    for e in g.edges().to_vec() {
        let Some((v, w)) = g.endpoints(e) else { continue };
        let v_rect = Rect::from(util::node(g, v)?);
        let w_rect = Rect::from(util::node(g, w)?);
        let Some(edge) = g.edge_mut(e) else { continue };

        let (toward_v, toward_w) = match (edge.points.first(), edge.points.last()) {
            (Some(&first), Some(&last)) => (first, last),
            _ => (Point::new(w_rect.x, w_rect.y), Point::new(v_rect.x, v_rect.y)),
        };
        let start = util::intersect_rect(v_rect, toward_v)?;
        let end = util::intersect_rect(w_rect, toward_w)?;
        edge.points.insert(0, start);
        edge.points.push(end);
    }
    Ok(())
}

pub fn reverse_points_for_reversed_edges(g: &mut LayoutGraph) {
    for e in g.edges().to_vec() {
        if let Some(edge) = g.edge_mut(e) {
            if edge.reversed {
                edge.points.reverse();
            }
        }
    }
}
