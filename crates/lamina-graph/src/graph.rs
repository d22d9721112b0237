//! The [`Graph`] container.
//!
//! Node and edge records live in `Vec<Option<_>>` arenas. Removal leaves a tombstone, so a
//! handle obtained earlier can never alias a node or edge inserted later, and iteration order is
//! always insertion order. The lists returned by [`Graph::nodes`] and [`Graph::edges`] are
//! cached and rebuilt lazily after the next structural change.

pub mod alg;
mod edge_key;
mod entries;
mod ids;
mod options;

pub use edge_key::EdgeKey;
pub use ids::{EdgeId, NodeId};
pub use options::GraphOptions;

use crate::error::{GraphError, Result};
use edge_key::EdgeKeyRef;
use entries::{EdgeSlot, NodeSlot, OrderedSet, bump, drop_one};
use rustc_hash::FxBuildHasher;
use std::sync::OnceLock;

type HashMap<K, V> = hashbrown::HashMap<K, V, FxBuildHasher>;

#[derive(Debug, Clone)]
pub struct Graph<N, E, G = ()> {
    options: GraphOptions,
    label: G,

    nodes: Vec<Option<NodeSlot<N>>>,
    node_index: HashMap<String, NodeId>,
    node_count: usize,

    edges: Vec<Option<EdgeSlot<E>>>,
    edge_index: HashMap<EdgeKey, EdgeId>,
    edge_count: usize,

    // Children of the implicit root; only maintained for compound graphs.
    root_children: OrderedSet<NodeId>,

    // Suffix counter for `add_unique_node`. Per graph, so two layouts never share state.
    unique_seq: u64,

    node_list: OnceLock<Vec<NodeId>>,
    edge_list: OnceLock<Vec<EdgeId>>,
}

impl<N, E, G: Default> Graph<N, E, G> {
    pub fn new(options: GraphOptions) -> Self {
        Self::with_label(options, G::default())
    }
}

impl<N, E, G> Graph<N, E, G> {
    pub fn with_label(options: GraphOptions, label: G) -> Self {
        Self {
            options,
            label,
            nodes: Vec::new(),
            node_index: HashMap::default(),
            node_count: 0,
            edges: Vec::new(),
            edge_index: HashMap::default(),
            edge_count: 0,
            root_children: OrderedSet::default(),
            unique_seq: 0,
            node_list: OnceLock::new(),
            edge_list: OnceLock::new(),
        }
    }

    pub fn options(&self) -> GraphOptions {
        self.options
    }

    pub fn is_directed(&self) -> bool {
        self.options.directed
    }

    pub fn is_multigraph(&self) -> bool {
        self.options.multigraph
    }

    pub fn is_compound(&self) -> bool {
        self.options.compound
    }

    pub fn graph(&self) -> &G {
        &self.label
    }

    pub fn graph_mut(&mut self) -> &mut G {
        &mut self.label
    }

    pub fn set_graph(&mut self, label: G) -> &mut Self {
        self.label = label;
        self
    }

    pub fn node_count(&self) -> usize {
        self.node_count
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Upper bound (exclusive) on `NodeId::index` for this graph, tombstones included.
    ///
    /// Useful for dense per-node side tables.
    pub fn node_bound(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_bound(&self) -> usize {
        self.edges.len()
    }

    fn slot(&self, v: NodeId) -> Option<&NodeSlot<N>> {
        self.nodes.get(v.index()).and_then(Option::as_ref)
    }

    fn slot_mut(&mut self, v: NodeId) -> Option<&mut NodeSlot<N>> {
        self.nodes.get_mut(v.index()).and_then(Option::as_mut)
    }

    fn describe(&self, v: NodeId) -> String {
        match self.slot(v) {
            Some(slot) => slot.key.clone(),
            None => v.to_string(),
        }
    }

    fn require(&self, v: NodeId) -> Result<()> {
        if self.has_node(v) {
            Ok(())
        } else {
            Err(GraphError::MissingNode(v))
        }
    }

    // ---- nodes -------------------------------------------------------------------------------

    /// Inserts a node under `key`, or replaces the label of the existing node with that key.
    ///
    /// # Panics
    ///
    /// If the node arena already holds `NodeId::MAX_INDEX + 1` slots.
    pub fn set_node(&mut self, key: impl Into<String>, label: N) -> NodeId {
        let key = key.into();
        if let Some(&v) = self.node_index.get(&key) {
            if let Some(slot) = self.slot_mut(v) {
                slot.label = label;
            }
            return v;
        }
        self.insert_node(key, label)
    }

    /// Inserts a node with a fresh key of the form `{prefix}{n}`.
    pub fn add_unique_node(&mut self, prefix: &str, label: N) -> NodeId {
        loop {
            self.unique_seq += 1;
            let key = format!("{prefix}{}", self.unique_seq);
            if !self.node_index.contains_key(&key) {
                return self.insert_node(key, label);
            }
        }
    }

    fn insert_node(&mut self, key: String, label: N) -> NodeId {
        let Some(v) = NodeId::try_from_index(self.nodes.len()) else {
            panic!("node arena is full ({} slots)", self.nodes.len());
        };
        self.node_index.insert(key.clone(), v);
        self.nodes.push(Some(NodeSlot::new(key, label)));
        if self.options.compound {
            self.root_children.insert(v);
        }
        self.node_count += 1;
        self.node_list.take();
        v
    }

    pub fn node_id(&self, key: &str) -> Option<NodeId> {
        self.node_index.get(key).copied()
    }

    pub fn has_node(&self, v: NodeId) -> bool {
        self.slot(v).is_some()
    }

    pub fn key(&self, v: NodeId) -> Option<&str> {
        self.slot(v).map(|slot| slot.key.as_str())
    }

    pub fn node(&self, v: NodeId) -> Option<&N> {
        self.slot(v).map(|slot| &slot.label)
    }

    pub fn node_mut(&mut self, v: NodeId) -> Option<&mut N> {
        self.slot_mut(v).map(|slot| &mut slot.label)
    }

    /// Live nodes in insertion order.
    pub fn nodes(&self) -> &[NodeId] {
        self.node_list.get_or_init(|| {
            self.nodes
                .iter()
                .enumerate()
                .filter(|(_, slot)| slot.is_some())
                .map(|(i, _)| NodeId(i as u32))
                .collect()
        })
    }

    /// Removes `v` together with its incident edges. Children of `v` move to the root.
    pub fn remove_node(&mut self, v: NodeId) -> Option<N> {
        let incident: Vec<EdgeId> = {
            let slot = self.slot(v)?;
            slot.in_edges
                .iter()
                .chain(slot.out_edges.iter())
                .copied()
                .collect()
        };
        for e in incident {
            self.remove_edge(e);
        }

        if self.options.compound {
            let (parent, children) = {
                let slot = self.slot(v)?;
                (slot.parent, slot.children.iter().copied().collect::<Vec<_>>())
            };
            for child in children {
                if let Some(slot) = self.slot_mut(child) {
                    slot.parent = None;
                }
                self.root_children.insert(child);
            }
            match parent.and_then(|p| self.slot_mut(p)) {
                Some(parent_slot) => {
                    parent_slot.children.shift_remove(&v);
                }
                None => {
                    self.root_children.shift_remove(&v);
                }
            }
        }

        let slot = self.nodes.get_mut(v.index())?.take()?;
        self.node_index.remove(&slot.key);
        self.node_count -= 1;
        self.node_list.take();
        Some(slot.label)
    }

    // ---- edges -------------------------------------------------------------------------------

    fn canonical_ref<'a>(&self, v: NodeId, w: NodeId, name: Option<&'a str>) -> EdgeKeyRef<'a> {
        let (v, w) = if self.options.directed || v <= w {
            (v, w)
        } else {
            (w, v)
        };
        let name = if self.options.multigraph { name } else { None };
        EdgeKeyRef { v, w, name }
    }

    /// Inserts the unnamed edge `v -> w`, or replaces its label.
    pub fn set_edge(&mut self, v: NodeId, w: NodeId, label: E) -> Result<EdgeId> {
        self.set_edge_named(v, w, None, label)
    }

    /// Inserts edge `(v, w, name)`, or replaces its label. Naming an edge requires a multigraph.
    pub fn set_edge_named(
        &mut self,
        v: NodeId,
        w: NodeId,
        name: Option<&str>,
        label: E,
    ) -> Result<EdgeId> {
        if let Some(name) = name {
            if !self.options.multigraph {
                return Err(GraphError::NamedEdgeInSimpleGraph {
                    v: self.describe(v),
                    w: self.describe(w),
                    name: name.to_string(),
                });
            }
        }
        self.require(v)?;
        self.require(w)?;

        let key_ref = self.canonical_ref(v, w, name);
        if let Some(&e) = self.edge_index.get(&key_ref) {
            if let Some(slot) = self.edges[e.index()].as_mut() {
                slot.label = label;
            }
            return Ok(e);
        }

        let key = EdgeKey::new(key_ref.v, key_ref.w, key_ref.name);
        let (tail, head) = (key.v, key.w);
        let e = EdgeId::try_from_index(self.edges.len()).ok_or(GraphError::EdgeCapacity)?;
        self.edge_index.insert(key.clone(), e);
        self.edges.push(Some(EdgeSlot { key, label }));
        if let Some(slot) = self.slot_mut(tail) {
            slot.out_edges.insert(e);
            bump(&mut slot.succs, head);
        }
        if let Some(slot) = self.slot_mut(head) {
            slot.in_edges.insert(e);
            bump(&mut slot.preds, tail);
        }
        self.edge_count += 1;
        self.edge_list.take();
        Ok(e)
    }

    /// Connects consecutive nodes of `path` with unnamed edges carrying a clone of `label`.
    pub fn set_path(&mut self, path: &[NodeId], label: E) -> Result<()>
    where
        E: Clone,
    {
        for pair in path.windows(2) {
            self.set_edge(pair[0], pair[1], label.clone())?;
        }
        Ok(())
    }

    pub fn find_edge(&self, v: NodeId, w: NodeId, name: Option<&str>) -> Option<EdgeId> {
        self.edge_index.get(&self.canonical_ref(v, w, name)).copied()
    }

    pub fn has_edge(&self, v: NodeId, w: NodeId, name: Option<&str>) -> bool {
        self.find_edge(v, w, name).is_some()
    }

    pub fn edge(&self, e: EdgeId) -> Option<&E> {
        self.edges
            .get(e.index())
            .and_then(Option::as_ref)
            .map(|slot| &slot.label)
    }

    pub fn edge_mut(&mut self, e: EdgeId) -> Option<&mut E> {
        self.edges
            .get_mut(e.index())
            .and_then(Option::as_mut)
            .map(|slot| &mut slot.label)
    }

    /// Label of the edge `(v, w, name)`.
    pub fn edge_between(&self, v: NodeId, w: NodeId, name: Option<&str>) -> Option<&E> {
        self.find_edge(v, w, name).and_then(|e| self.edge(e))
    }

    pub fn edge_key(&self, e: EdgeId) -> Option<&EdgeKey> {
        self.edges
            .get(e.index())
            .and_then(Option::as_ref)
            .map(|slot| &slot.key)
    }

    pub fn endpoints(&self, e: EdgeId) -> Option<(NodeId, NodeId)> {
        self.edge_key(e).map(|key| (key.v, key.w))
    }

    /// Live edges in insertion order.
    pub fn edges(&self) -> &[EdgeId] {
        self.edge_list.get_or_init(|| {
            self.edges
                .iter()
                .enumerate()
                .filter(|(_, slot)| slot.is_some())
                .map(|(i, _)| EdgeId(i as u32))
                .collect()
        })
    }

    pub fn remove_edge(&mut self, e: EdgeId) -> Option<E> {
        let slot = self.edges.get_mut(e.index())?.take()?;
        self.edge_index.remove(&slot.key);
        let EdgeKey { v, w, .. } = slot.key;
        if let Some(tail) = self.slot_mut(v) {
            tail.out_edges.shift_remove(&e);
            drop_one(&mut tail.succs, w);
        }
        if let Some(head) = self.slot_mut(w) {
            head.in_edges.shift_remove(&e);
            drop_one(&mut head.preds, v);
        }
        self.edge_count -= 1;
        self.edge_list.take();
        Some(slot.label)
    }

    // ---- adjacency ---------------------------------------------------------------------------

    /// Nodes with an edge into `v`. For undirected graphs this is [`Graph::neighbors`].
    pub fn predecessors(&self, v: NodeId) -> Vec<NodeId> {
        if !self.options.directed {
            return self.neighbors(v);
        }
        self.slot(v)
            .map(|slot| slot.preds.keys().copied().collect())
            .unwrap_or_default()
    }

    pub fn successors(&self, v: NodeId) -> Vec<NodeId> {
        if !self.options.directed {
            return self.neighbors(v);
        }
        self.slot(v)
            .map(|slot| slot.succs.keys().copied().collect())
            .unwrap_or_default()
    }

    pub fn first_successor(&self, v: NodeId) -> Option<NodeId> {
        let slot = self.slot(v)?;
        slot.succs
            .keys()
            .next()
            .or_else(|| {
                if self.options.directed {
                    None
                } else {
                    slot.preds.keys().next()
                }
            })
            .copied()
    }

    pub fn first_predecessor(&self, v: NodeId) -> Option<NodeId> {
        let slot = self.slot(v)?;
        slot.preds
            .keys()
            .next()
            .or_else(|| {
                if self.options.directed {
                    None
                } else {
                    slot.succs.keys().next()
                }
            })
            .copied()
    }

    pub fn neighbors(&self, v: NodeId) -> Vec<NodeId> {
        let Some(slot) = self.slot(v) else {
            return Vec::new();
        };
        let mut out: Vec<NodeId> = slot.preds.keys().copied().collect();
        out.extend(slot.succs.keys().filter(|w| !slot.preds.contains_key(*w)));
        out
    }

    /// Edges entering `v`. For undirected graphs this is [`Graph::node_edges`].
    pub fn in_edges(&self, v: NodeId) -> Vec<EdgeId> {
        if !self.options.directed {
            return self.node_edges(v);
        }
        self.slot(v)
            .map(|slot| slot.in_edges.iter().copied().collect())
            .unwrap_or_default()
    }

    pub fn out_edges(&self, v: NodeId) -> Vec<EdgeId> {
        if !self.options.directed {
            return self.node_edges(v);
        }
        self.slot(v)
            .map(|slot| slot.out_edges.iter().copied().collect())
            .unwrap_or_default()
    }

    /// All edges incident to `v`; a self-loop is listed once.
    pub fn node_edges(&self, v: NodeId) -> Vec<EdgeId> {
        let Some(slot) = self.slot(v) else {
            return Vec::new();
        };
        let mut out: Vec<EdgeId> = slot.in_edges.iter().copied().collect();
        out.extend(
            slot.out_edges
                .iter()
                .filter(|e| !slot.in_edges.contains(*e)),
        );
        out
    }

    /// Edges `v -> w` (any name).
    pub fn out_edges_to(&self, v: NodeId, w: NodeId) -> Vec<EdgeId> {
        self.node_edges(v)
            .into_iter()
            .filter(|&e| {
                self.endpoints(e).is_some_and(|(a, b)| {
                    (a == v && b == w) || (!self.options.directed && a == w && b == v)
                })
            })
            .collect()
    }

    pub fn in_degree(&self, v: NodeId) -> usize {
        self.slot(v).map_or(0, |slot| slot.in_edges.len())
    }

    pub fn out_degree(&self, v: NodeId) -> usize {
        self.slot(v).map_or(0, |slot| slot.out_edges.len())
    }

    /// Nodes without incoming edges.
    pub fn sources(&self) -> Vec<NodeId> {
        self.nodes()
            .iter()
            .copied()
            .filter(|&v| self.in_degree(v) == 0)
            .collect()
    }

    /// Nodes without outgoing edges.
    pub fn sinks(&self) -> Vec<NodeId> {
        self.nodes()
            .iter()
            .copied()
            .filter(|&v| self.out_degree(v) == 0)
            .collect()
    }

    // ---- hierarchy ---------------------------------------------------------------------------

    /// Moves `v` under `parent` (`None` = the root). Only valid on compound graphs.
    pub fn set_parent(&mut self, v: NodeId, parent: Option<NodeId>) -> Result<()> {
        if !self.options.compound {
            return Err(GraphError::NotCompound {
                node: self.describe(v),
            });
        }
        self.require(v)?;
        if let Some(p) = parent {
            self.require(p)?;
            let mut ancestor = Some(p);
            while let Some(a) = ancestor {
                if a == v {
                    return Err(GraphError::ParentCycle {
                        node: self.describe(v),
                        parent: self.describe(p),
                    });
                }
                ancestor = self.parent(a);
            }
        }

        let previous = self.slot(v).and_then(|slot| slot.parent);
        match previous.and_then(|p| self.slot_mut(p)) {
            Some(slot) => {
                slot.children.shift_remove(&v);
            }
            None => {
                self.root_children.shift_remove(&v);
            }
        }
        if let Some(slot) = self.slot_mut(v) {
            slot.parent = parent;
        }
        match parent.and_then(|p| self.slot_mut(p)) {
            Some(slot) => {
                slot.children.insert(v);
            }
            None => {
                self.root_children.insert(v);
            }
        }
        Ok(())
    }

    pub fn parent(&self, v: NodeId) -> Option<NodeId> {
        self.slot(v).and_then(|slot| slot.parent)
    }

    pub fn children(&self, v: NodeId) -> Vec<NodeId> {
        self.slot(v)
            .map(|slot| slot.children.iter().copied().collect())
            .unwrap_or_default()
    }

    pub fn has_children(&self, v: NodeId) -> bool {
        self.slot(v).is_some_and(|slot| !slot.children.is_empty())
    }

    /// Top-level nodes. On a non-compound graph every node is top-level.
    pub fn root_children(&self) -> Vec<NodeId> {
        if self.options.compound {
            self.root_children.iter().copied().collect()
        } else {
            self.nodes().to_vec()
        }
    }
}
