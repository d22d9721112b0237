use super::problem::RankProblem;
use super::tree::SpanningTree;

/// Grows a spanning tree of tight constraints (slack 0), shifting the tree's ranks to tighten
/// the cheapest crossing constraint whenever growth stalls.
///
/// Disconnected problems yield a forest: a component with no constraint into the current tree
/// starts a new root.
pub fn feasible_tree(p: &RankProblem, ranks: &mut [i32]) -> SpanningTree {
    let n = p.len();
    let mut tree = SpanningTree::new(n);
    if n == 0 {
        return tree;
    }
    tree.add_node(0);

    loop {
        tight_tree(&mut tree, p, ranks);
        if tree.size() == n {
            break;
        }
        match min_slack_constraint(&tree, p, ranks) {
            Some(ci) => {
                let c = p.constraint(ci);
                let slack = p.slack(ranks, ci);
                let delta = if tree.contains(c.tail) { slack } else { -slack };
                for &v in tree.members() {
                    ranks[v] += delta;
                }
            }
            None => {
                if let Some(v) = (0..n).find(|&v| !tree.contains(v)) {
                    tree.add_node(v);
                }
            }
        }
    }
    tree
}

/// Extends the tree depth-first along tight constraints from every current member.
fn tight_tree(tree: &mut SpanningTree, p: &RankProblem, ranks: &[i32]) {
    let starts = tree.members().to_vec();
    for start in starts {
        let mut frames: Vec<(usize, Vec<usize>, usize)> = vec![(start, p.incident(start).collect(), 0)];
        while let Some(frame) = frames.last_mut() {
            let Some(&ci) = frame.1.get(frame.2) else {
                frames.pop();
                continue;
            };
            frame.2 += 1;
            let v = frame.0;
            let c = p.constraint(ci);
            let w = if c.tail == v { c.head } else { c.tail };
            if !tree.contains(w) && p.slack(ranks, ci) == 0 {
                tree.add_edge(v, w);
                frames.push((w, p.incident(w).collect(), 0));
            }
        }
    }
}

fn min_slack_constraint(tree: &SpanningTree, p: &RankProblem, ranks: &[i32]) -> Option<usize> {
    (0..p.constraints().len())
        .filter(|&ci| {
            let c = p.constraint(ci);
            tree.contains(c.tail) != tree.contains(c.head)
        })
        .min_by_key(|&ci| p.slack(ranks, ci))
}
