//! Spanning tree (or forest) over a [`RankProblem`], with the low/lim numbering and cut values
//! the simplex pivots on.

use super::problem::RankProblem;

#[derive(Debug, Clone)]
pub struct SpanningTree {
    in_tree: Vec<bool>,
    members: Vec<usize>,
    adj: Vec<Vec<usize>>,
    /// Tree parent after [`SpanningTree::init_low_lim`]; `None` for component roots.
    pub parent: Vec<Option<usize>>,
    pub low: Vec<usize>,
    pub lim: Vec<usize>,
    /// Cut value of the tree edge between a node and its parent.
    pub cut: Vec<f64>,
    postorder: Vec<usize>,
}

impl SpanningTree {
    pub fn new(len: usize) -> Self {
        Self {
            in_tree: vec![false; len],
            members: Vec::new(),
            adj: vec![Vec::new(); len],
            parent: vec![None; len],
            low: vec![0; len],
            lim: vec![0; len],
            cut: vec![0.0; len],
            postorder: Vec::new(),
        }
    }

    pub fn contains(&self, v: usize) -> bool {
        self.in_tree[v]
    }

    pub fn size(&self) -> usize {
        self.members.len()
    }

    /// Tree nodes in the order they joined the tree.
    pub fn members(&self) -> &[usize] {
        &self.members
    }

    pub fn add_node(&mut self, v: usize) {
        if !self.in_tree[v] {
            self.in_tree[v] = true;
            self.members.push(v);
        }
    }

    pub fn add_edge(&mut self, u: usize, v: usize) {
        self.add_node(u);
        self.add_node(v);
        self.adj[u].push(v);
        self.adj[v].push(u);
    }

    pub fn remove_edge(&mut self, u: usize, v: usize) {
        self.adj[u].retain(|&x| x != v);
        self.adj[v].retain(|&x| x != u);
    }

    pub fn neighbors(&self, v: usize) -> &[usize] {
        &self.adj[v]
    }

    pub fn edge_count(&self) -> usize {
        self.adj.iter().map(Vec::len).sum::<usize>() / 2
    }

    /// Nodes in the postorder produced by the last [`SpanningTree::init_low_lim`].
    pub fn postorder(&self) -> &[usize] {
        &self.postorder
    }

    /// Roots each component at its earliest member and numbers nodes in postorder: `lim` is the
    /// postorder number, `low` the smallest `lim` in the subtree.
    pub fn init_low_lim(&mut self) {
        let len = self.in_tree.len();
        let mut visited = vec![false; len];
        let mut next_lim = 1;
        self.postorder.clear();

        for i in 0..self.members.len() {
            let root = self.members[i];
            if visited[root] {
                continue;
            }
            visited[root] = true;
            self.parent[root] = None;
            // (node, next neighbor index, low)
            let mut frames: Vec<(usize, usize, usize)> = vec![(root, 0, next_lim)];
            while let Some(frame) = frames.last_mut() {
                let (v, at, low) = *frame;
                if let Some(&w) = self.adj[v].get(at) {
                    frame.1 += 1;
                    if !visited[w] {
                        visited[w] = true;
                        self.parent[w] = Some(v);
                        frames.push((w, 0, next_lim));
                    }
                    continue;
                }
                self.low[v] = low;
                self.lim[v] = next_lim;
                next_lim += 1;
                self.postorder.push(v);
                frames.pop();
            }
        }
    }

    /// Whether `v` lies in the subtree rooted at `root`.
    pub fn is_descendant(&self, v: usize, root: usize) -> bool {
        self.low[root] <= self.lim[v] && self.lim[v] <= self.lim[root]
    }

    pub fn is_tree_edge(&self, u: usize, v: usize) -> bool {
        self.parent[u] == Some(v) || self.parent[v] == Some(u)
    }

    /// Recomputes every cut value bottom-up.
    pub fn init_cut_values(&mut self, p: &RankProblem) {
        for i in 0..self.postorder.len() {
            let v = self.postorder[i];
            if let Some(value) = self.calc_cut_value(p, v) {
                self.cut[v] = value;
            }
        }
    }

    /// Cut value of the tree edge `(child, parent(child))`, assuming the cut values of all tree
    /// edges below `child` are already known.
    fn calc_cut_value(&self, p: &RankProblem, child: usize) -> Option<f64> {
        let parent = self.parent[child]?;
        let (child_is_tail, edge) = match p.find(child, parent) {
            Some(ci) => (true, ci),
            None => (false, p.find(parent, child)?),
        };

        let mut value = p.constraint(edge).weight;
        for ci in p.incident(child) {
            let c = p.constraint(ci);
            let is_out = c.tail == child;
            let other = if is_out { c.head } else { c.tail };
            if other == parent {
                continue;
            }
            let points_to_head = is_out == child_is_tail;
            value += if points_to_head { c.weight } else { -c.weight };
            if self.parent[other] == Some(child) {
                let other_cut = self.cut[other];
                value += if points_to_head { -other_cut } else { other_cut };
            }
        }
        Some(value)
    }
}
