//! Graph container for layered layout.
//!
//! A [`Graph`] stores typed node and edge labels in arenas addressed by [`NodeId`] and
//! [`EdgeId`] handles. It can be directed or undirected, simple or multi, and optionally
//! compound (nodes may have a parent node). Incidence lists are kept up to date on every
//! mutation, so adjacency queries never scan the whole edge set.

mod error;
mod graph;

pub use error::{GraphError, Result};
pub use graph::alg;
pub use graph::{EdgeId, EdgeKey, Graph, GraphOptions, NodeId};
