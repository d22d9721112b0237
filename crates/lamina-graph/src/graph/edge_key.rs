use super::NodeId;
use std::hash::{Hash, Hasher};

/// Identity of an edge: ordered endpoints plus an optional name (multigraphs only).
///
/// Keys stored in a graph are canonical: undirected graphs keep `v <= w` and simple graphs
/// never carry a name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeKey {
    pub v: NodeId,
    pub w: NodeId,
    pub name: Option<String>,
}

impl EdgeKey {
    pub fn new(v: NodeId, w: NodeId, name: Option<&str>) -> Self {
        Self {
            v,
            w,
            name: name.map(str::to_string),
        }
    }
}

impl Hash for EdgeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.v.hash(state);
        self.w.hash(state);
        self.name.as_deref().hash(state);
    }
}

/// Borrowed lookup key; hashes exactly like [`EdgeKey`].
#[derive(Clone, Copy)]
pub(super) struct EdgeKeyRef<'a> {
    pub(super) v: NodeId,
    pub(super) w: NodeId,
    pub(super) name: Option<&'a str>,
}

impl Hash for EdgeKeyRef<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.v.hash(state);
        self.w.hash(state);
        self.name.hash(state);
    }
}

impl hashbrown::Equivalent<EdgeKey> for EdgeKeyRef<'_> {
    fn equivalent(&self, key: &EdgeKey) -> bool {
        key.v == self.v && key.w == self.w && key.name.as_deref() == self.name
    }
}
