use super::problem::RankProblem;

/// Initial feasible ranking: every node as high as its successors allow, sinks at rank 0.
///
/// Ranks come out non-positive; callers normalize afterwards. Nodes unreachable from a source
/// (only possible on cyclic input) are ranked from their own traversal.
pub fn longest_path(p: &RankProblem) -> Vec<i32> {
    let n = p.len();
    let mut rank: Vec<Option<i32>> = vec![None; n];
    let mut started = vec![false; n];

    let roots: Vec<usize> = p.sources().chain(0..n).collect();
    for root in roots {
        if started[root] {
            continue;
        }
        started[root] = true;
        // (node, next out-constraint to look at)
        let mut stack: Vec<(usize, usize)> = vec![(root, 0)];
        while let Some(frame) = stack.last_mut() {
            let v = frame.0;
            let outs = p.out_constraints(v);
            if let Some(&ci) = outs.get(frame.1) {
                frame.1 += 1;
                let w = p.constraint(ci).head;
                if !started[w] {
                    started[w] = true;
                    stack.push((w, 0));
                }
                continue;
            }

            let r = outs
                .iter()
                .filter_map(|&ci| {
                    let c = p.constraint(ci);
                    rank[c.head].map(|rw| rw - c.minlen)
                })
                .min()
                .unwrap_or(0);
            rank[v] = Some(r);
            stack.pop();
        }
    }
    rank.into_iter().map(|r| r.unwrap_or(0)).collect()
}
