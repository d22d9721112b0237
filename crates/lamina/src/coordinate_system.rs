//! The core passes always lay out top to bottom. Horizontal rank directions swap width and
//! height before positioning and swap the axes back afterwards; `BT` and `RL` mirror `y`.

use crate::model::{LayoutGraph, RankDir};

pub fn adjust(g: &mut LayoutGraph) {
    if g.graph().config.rankdir.is_horizontal() {
        swap_width_height(g);
    }
}

pub fn undo(g: &mut LayoutGraph) {
    let rankdir = g.graph().config.rankdir;
    if matches!(rankdir, RankDir::BT | RankDir::RL) {
        reverse_y(g);
    }
    if rankdir.is_horizontal() {
        swap_xy(g);
        swap_width_height(g);
    }
}

fn swap_width_height(g: &mut LayoutGraph) {
    for v in g.nodes().to_vec() {
        if let Some(node) = g.node_mut(v) {
            std::mem::swap(&mut node.width, &mut node.height);
        }
    }
    for e in g.edges().to_vec() {
        if let Some(edge) = g.edge_mut(e) {
            std::mem::swap(&mut edge.width, &mut edge.height);
        }
    }
}

fn reverse_y(g: &mut LayoutGraph) {
    for v in g.nodes().to_vec() {
        if let Some(node) = g.node_mut(v) {
            node.y = -node.y;
        }
    }
    for e in g.edges().to_vec() {
        if let Some(edge) = g.edge_mut(e) {
            for p in &mut edge.points {
                p.y = -p.y;
            }
            if let Some(y) = edge.y.as_mut() {
                *y = -*y;
            }
        }
    }
}

fn swap_xy(g: &mut LayoutGraph) {
    for v in g.nodes().to_vec() {
        if let Some(node) = g.node_mut(v) {
            std::mem::swap(&mut node.x, &mut node.y);
        }
    }
    for e in g.edges().to_vec() {
        if let Some(edge) = g.edge_mut(e) {
            for p in &mut edge.points {
                std::mem::swap(&mut p.x, &mut p.y);
            }
            std::mem::swap(&mut edge.x, &mut edge.y);
        }
    }
}
