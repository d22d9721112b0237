//! Traversals the layout passes need. All of them use explicit stacks, so deep graphs cannot
//! overflow the call stack.

use super::{Graph, NodeId};

/// Depth-first preorder over successors, starting from each root in turn. Nodes reachable from
/// an earlier root are not revisited.
pub fn preorder<N, E, G>(g: &Graph<N, E, G>, roots: &[NodeId]) -> Vec<NodeId> {
    let mut visited = vec![false; g.node_bound()];
    let mut out = Vec::new();
    let mut stack: Vec<NodeId> = Vec::new();
    for &root in roots {
        stack.push(root);
        while let Some(v) = stack.pop() {
            if visited[v.index()] || !g.has_node(v) {
                continue;
            }
            visited[v.index()] = true;
            out.push(v);
            stack.extend(g.successors(v).into_iter().rev());
        }
    }
    out
}

/// Strongly connected components (Tarjan), in the order they are completed.
pub fn tarjan<N, E, G>(g: &Graph<N, E, G>) -> Vec<Vec<NodeId>> {
    struct Frame {
        v: NodeId,
        succs: Vec<NodeId>,
        next: usize,
    }

    struct State {
        index: Vec<Option<usize>>,
        low: Vec<usize>,
        on_stack: Vec<bool>,
        stack: Vec<NodeId>,
        counter: usize,
    }

    impl State {
        fn open<N, E, G>(&mut self, g: &Graph<N, E, G>, v: NodeId, frames: &mut Vec<Frame>) {
            self.index[v.index()] = Some(self.counter);
            self.low[v.index()] = self.counter;
            self.counter += 1;
            self.on_stack[v.index()] = true;
            self.stack.push(v);
            frames.push(Frame {
                v,
                succs: g.successors(v),
                next: 0,
            });
        }
    }

    let bound = g.node_bound();
    let mut st = State {
        index: vec![None; bound],
        low: vec![0; bound],
        on_stack: vec![false; bound],
        stack: Vec::new(),
        counter: 0,
    };
    let mut out = Vec::new();

    for &root in g.nodes() {
        if st.index[root.index()].is_some() {
            continue;
        }
        let mut frames: Vec<Frame> = Vec::new();
        st.open(g, root, &mut frames);

        while let Some(frame) = frames.last_mut() {
            let v = frame.v;
            if frame.next < frame.succs.len() {
                let w = frame.succs[frame.next];
                frame.next += 1;
                match st.index[w.index()] {
                    None => st.open(g, w, &mut frames),
                    Some(wi) if st.on_stack[w.index()] => {
                        st.low[v.index()] = st.low[v.index()].min(wi);
                    }
                    Some(_) => {}
                }
                continue;
            }

            frames.pop();
            if let Some(parent) = frames.last() {
                st.low[parent.v.index()] = st.low[parent.v.index()].min(st.low[v.index()]);
            }
            if Some(st.low[v.index()]) == st.index[v.index()] {
                let mut component = Vec::new();
                while let Some(w) = st.stack.pop() {
                    st.on_stack[w.index()] = false;
                    component.push(w);
                    if w == v {
                        break;
                    }
                }
                out.push(component);
            }
        }
    }
    out
}

/// Components that contain a cycle: every multi-node SCC plus nodes with a self-loop.
pub fn find_cycles<N, E, G>(g: &Graph<N, E, G>) -> Vec<Vec<NodeId>> {
    tarjan(g)
        .into_iter()
        .filter(|component| match component.as_slice() {
            [v] => g.successors(*v).contains(v),
            _ => true,
        })
        .collect()
}

pub fn is_acyclic<N, E, G>(g: &Graph<N, E, G>) -> bool {
    find_cycles(g).is_empty()
}
