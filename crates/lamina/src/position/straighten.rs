//! Optional post-pass that pulls long-edge dummies toward the straight line between the edge's
//! endpoints, then restores layer separation left to right.

use super::bk::sep;
use crate::error::{LayoutError, Result};
use crate::model::{Dummy, LayoutGraph};
use crate::util;
use lamina_graph::NodeId;
use rustc_hash::FxHashMap;

fn is_chain_dummy(g: &LayoutGraph, v: NodeId) -> bool {
    g.node(v)
        .is_some_and(|n| matches!(n.dummy, Some(Dummy::Edge | Dummy::EdgeLabel)))
}

pub fn straighten(g: &LayoutGraph, xs: &mut FxHashMap<NodeId, f64>, strength: f64) -> Result<()> {
    if !(strength > 0.0 && strength <= 1.0) {
        return Err(LayoutError::InvalidStraighten(strength));
    }

    for &start in &g.graph().dummy_chains {
        let Some(tail) = g.first_predecessor(start) else {
            continue;
        };
        let mut chain = vec![start];
        let mut head = None;
        let mut v = start;
        while let Some(w) = g.first_successor(v) {
            if is_chain_dummy(g, w) {
                chain.push(w);
                v = w;
            } else {
                head = Some(w);
                break;
            }
        }
        let Some(head) = head else { continue };
        let (Some(&x0), Some(&x1)) = (xs.get(&tail), xs.get(&head)) else {
            continue;
        };
        let r0 = util::rank(g, tail)?;
        let span = f64::from(util::rank(g, head)? - r0);
        if span <= 0.0 {
            continue;
        }
        for &d in &chain {
            let t = f64::from(util::rank(g, d)? - r0) / span;
            let target = x0 + (x1 - x0) * t;
            if let Some(x) = xs.get_mut(&d) {
                *x += (target - *x) * strength;
            }
        }
    }

    for layer in util::build_layer_matrix(g)? {
        for pair in layer.windows(2) {
            let (left, right) = (pair[0], pair[1]);
            let min = xs.get(&left).copied().unwrap_or_default() + sep(g, right, left, false)?;
            if let Some(x) = xs.get_mut(&right) {
                if *x < min {
                    *x = min;
                }
            }
        }
    }
    Ok(())
}
