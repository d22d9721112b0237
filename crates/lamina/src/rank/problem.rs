//! Compact constraint graph solved by the rankers.
//!
//! Nodes are dense indices `0..len`. Parallel constraints between the same ordered pair are
//! merged (weights summed, largest `minlen` kept) and self-constraints are dropped, so every
//! tree edge of the simplex maps to exactly one constraint.

use rustc_hash::FxHashMap;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Constraint {
    pub tail: usize,
    pub head: usize,
    pub minlen: i32,
    pub weight: f64,
}

#[derive(Debug, Clone, Default)]
pub struct RankProblem {
    len: usize,
    constraints: Vec<Constraint>,
    by_pair: FxHashMap<(usize, usize), usize>,
    out_adj: Vec<Vec<usize>>,
    in_adj: Vec<Vec<usize>>,
}

impl RankProblem {
    pub fn new(len: usize) -> Self {
        Self {
            len,
            constraints: Vec::new(),
            by_pair: FxHashMap::default(),
            out_adj: vec![Vec::new(); len],
            in_adj: vec![Vec::new(); len],
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Requires `rank(head) - rank(tail) >= minlen`, with cost `weight * (rank(head) - rank(tail))`.
    pub fn constrain(&mut self, tail: usize, head: usize, minlen: i32, weight: f64) {
        if tail == head || tail >= self.len || head >= self.len {
            return;
        }
        if let Some(&i) = self.by_pair.get(&(tail, head)) {
            let c = &mut self.constraints[i];
            c.weight += weight;
            c.minlen = c.minlen.max(minlen);
            return;
        }
        let i = self.constraints.len();
        self.constraints.push(Constraint {
            tail,
            head,
            minlen,
            weight,
        });
        self.by_pair.insert((tail, head), i);
        self.out_adj[tail].push(i);
        self.in_adj[head].push(i);
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    pub fn constraint(&self, i: usize) -> Constraint {
        self.constraints[i]
    }

    /// Index of the constraint `tail -> head`, if any.
    pub fn find(&self, tail: usize, head: usize) -> Option<usize> {
        self.by_pair.get(&(tail, head)).copied()
    }

    pub fn out_constraints(&self, v: usize) -> &[usize] {
        &self.out_adj[v]
    }

    pub fn in_constraints(&self, v: usize) -> &[usize] {
        &self.in_adj[v]
    }

    /// Incident constraints of `v`, incoming first.
    pub fn incident(&self, v: usize) -> impl Iterator<Item = usize> + '_ {
        self.in_adj[v].iter().chain(self.out_adj[v].iter()).copied()
    }

    pub fn sources(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.len).filter(|&v| self.in_adj[v].is_empty())
    }

    pub fn slack(&self, ranks: &[i32], i: usize) -> i32 {
        let c = &self.constraints[i];
        ranks[c.head] - ranks[c.tail] - c.minlen
    }
}
