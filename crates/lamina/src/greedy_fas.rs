//! Greedy feedback arc set heuristic (Eades, Lin & Smyth).
//!
//! Nodes are peeled off one at a time: sinks go to the back of the sequence, sources to the
//! front, and when neither exists the node with the largest `out_weight - in_weight` goes to the
//! front. Edges pointing backwards in the final sequence form the feedback set.
//!
//! Sinks and sources are detected by the number of remaining edges, never by their weight, so a
//! node whose only outgoing edge has weight zero is not mistaken for a sink.

use lamina_graph::{EdgeId, Graph, NodeId};
use std::cmp::Ordering;
use std::collections::{BTreeSet, VecDeque};

#[derive(Debug, Clone, Copy)]
struct Candidate {
    delta: f64,
    in_weight: f64,
    v: NodeId,
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Candidate {}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Candidate {
    // Smallest first = best candidate: largest delta, then lowest in-weight, then oldest node.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .delta
            .total_cmp(&self.delta)
            .then_with(|| self.in_weight.total_cmp(&other.in_weight))
            .then_with(|| self.v.cmp(&other.v))
    }
}

struct Peeler {
    alive: Vec<bool>,
    in_count: Vec<usize>,
    out_count: Vec<usize>,
    in_weight: Vec<f64>,
    out_weight: Vec<f64>,
    candidates: BTreeSet<Candidate>,
    sinks: VecDeque<NodeId>,
    sources: VecDeque<NodeId>,
}

impl Peeler {
    fn candidate(&self, v: NodeId) -> Candidate {
        let i = v.index();
        Candidate {
            delta: self.out_weight[i] - self.in_weight[i],
            in_weight: self.in_weight[i],
            v,
        }
    }

    fn next_ready(&mut self, sinks: bool) -> Option<NodeId> {
        loop {
            let v = if sinks {
                self.sinks.pop_front()?
            } else {
                self.sources.pop_front()?
            };
            let i = v.index();
            let ready = if sinks {
                self.out_count[i] == 0
            } else {
                self.in_count[i] == 0
            };
            if self.alive[i] && ready {
                return Some(v);
            }
        }
    }

    fn remove<N, E, G>(&mut self, g: &Graph<N, E, G>, v: NodeId, weight: &impl Fn(&E) -> f64) {
        self.alive[v.index()] = false;
        let key = self.candidate(v);
        self.candidates.remove(&key);

        for e in g.out_edges(v) {
            let (Some((_, w)), Some(label)) = (g.endpoints(e), g.edge(e)) else {
                continue;
            };
            if w == v || !self.alive[w.index()] {
                continue;
            }
            let old = self.candidate(w);
            self.candidates.remove(&old);
            self.in_count[w.index()] -= 1;
            self.in_weight[w.index()] -= weight(label);
            let new = self.candidate(w);
            self.candidates.insert(new);
            if self.in_count[w.index()] == 0 {
                self.sources.push_back(w);
            }
        }

        for e in g.in_edges(v) {
            let (Some((u, _)), Some(label)) = (g.endpoints(e), g.edge(e)) else {
                continue;
            };
            if u == v || !self.alive[u.index()] {
                continue;
            }
            let old = self.candidate(u);
            self.candidates.remove(&old);
            self.out_count[u.index()] -= 1;
            self.out_weight[u.index()] -= weight(label);
            let new = self.candidate(u);
            self.candidates.insert(new);
            if self.out_count[u.index()] == 0 {
                self.sinks.push_back(u);
            }
        }
    }
}

/// Returns edges whose removal (or reversal) leaves `g` acyclic. Self-loops are always included.
pub fn greedy_fas<N, E, G>(g: &Graph<N, E, G>, weight: impl Fn(&E) -> f64) -> Vec<EdgeId> {
    let bound = g.node_bound();
    let mut peeler = Peeler {
        alive: vec![false; bound],
        in_count: vec![0; bound],
        out_count: vec![0; bound],
        in_weight: vec![0.0; bound],
        out_weight: vec![0.0; bound],
        candidates: BTreeSet::new(),
        sinks: VecDeque::new(),
        sources: VecDeque::new(),
    };

    for &v in g.nodes() {
        peeler.alive[v.index()] = true;
    }
    for &e in g.edges() {
        let (Some((v, w)), Some(label)) = (g.endpoints(e), g.edge(e)) else {
            continue;
        };
        if v == w {
            continue;
        }
        let wt = weight(label);
        peeler.out_count[v.index()] += 1;
        peeler.out_weight[v.index()] += wt;
        peeler.in_count[w.index()] += 1;
        peeler.in_weight[w.index()] += wt;
    }
    for &v in g.nodes() {
        let key = peeler.candidate(v);
        peeler.candidates.insert(key);
        if peeler.out_count[v.index()] == 0 {
            peeler.sinks.push_back(v);
        }
        if peeler.in_count[v.index()] == 0 {
            peeler.sources.push_back(v);
        }
    }

    let mut front: Vec<NodeId> = Vec::with_capacity(g.node_count());
    let mut back: Vec<NodeId> = Vec::new();
    loop {
        if let Some(v) = peeler.next_ready(true) {
            peeler.remove(g, v, &weight);
            back.push(v);
        } else if let Some(v) = peeler.next_ready(false) {
            peeler.remove(g, v, &weight);
            front.push(v);
        } else if let Some(best) = peeler.candidates.first().copied() {
            peeler.remove(g, best.v, &weight);
            front.push(best.v);
        } else {
            break;
        }
    }
    front.extend(back.into_iter().rev());

    let mut position = vec![usize::MAX; bound];
    for (i, v) in front.iter().enumerate() {
        position[v.index()] = i;
    }
    g.edges()
        .iter()
        .copied()
        .filter(|&e| {
            g.endpoints(e)
                .is_some_and(|(v, w)| position[v.index()] >= position[w.index()])
        })
        .collect()
}
