//! Topology index - external identifiers to dense slots.
//!
//! Built once from the caller's node and edge records. Node indices follow
//! input order; every edge endpoint is resolved to a node index up front so
//! the simulation buffers never see an unchecked id. The maps are
//! write-once: nothing mutates a `Topology` after `build` returns.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use thiserror::Error;

use super::edge::{EdgeIndex, EdgeKey, EdgeRecord};
use super::node::{NodeIndex, NodeRecord};

/// Errors raised while building a topology.
///
/// Ids are carried as their `Debug` rendering so the error type does not
/// depend on the caller's id type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TopologyError {
    #[error("edge {edge} references unknown node id {id}")]
    UnknownNode { edge: usize, id: String },

    #[error("node id {id} appears more than once")]
    DuplicateNode { id: String },

    #[error("edge id {id} appears more than once")]
    DuplicateEdge { id: String },

    #[error("{count} nodes exceed the u32 index space")]
    TooManyNodes { count: usize },

    #[error("{count} edges exceed the u32 index space")]
    TooManyEdges { count: usize },
}

/// Bijective id maps plus resolved edge endpoints.
#[derive(Debug, Clone)]
pub struct Topology<K> {
    /// Dense index -> external node id
    node_ids: Vec<K>,

    /// External node id -> dense index
    node_id_to_index: HashMap<K, NodeIndex>,

    /// Edge key -> dense edge index
    edge_key_to_index: HashMap<EdgeKey<K>, EdgeIndex>,

    /// Per edge, (source, target) dense node indices
    endpoints: Vec<(NodeIndex, NodeIndex)>,
}

impl<K> Topology<K>
where
    K: Eq + Hash + Clone + Debug,
{
    /// Resolve node and edge records into dense indices.
    pub fn build(nodes: &[NodeRecord<K>], edges: &[EdgeRecord<K>]) -> Result<Self, TopologyError> {
        if u32::try_from(nodes.len()).is_err() {
            return Err(TopologyError::TooManyNodes { count: nodes.len() });
        }
        if u32::try_from(edges.len()).is_err() {
            return Err(TopologyError::TooManyEdges { count: edges.len() });
        }

        let mut node_ids = Vec::with_capacity(nodes.len());
        let mut node_id_to_index = HashMap::with_capacity(nodes.len());

        for (i, node) in nodes.iter().enumerate() {
            let index = NodeIndex(i as u32);
            if node_id_to_index.insert(node.id.clone(), index).is_some() {
                return Err(TopologyError::DuplicateNode {
                    id: format!("{:?}", node.id),
                });
            }
            node_ids.push(node.id.clone());
        }

        let mut edge_key_to_index = HashMap::with_capacity(edges.len());
        let mut endpoints = Vec::with_capacity(edges.len());

        for (i, edge) in edges.iter().enumerate() {
            let lookup = |id: &K| {
                node_id_to_index
                    .get(id)
                    .copied()
                    .ok_or_else(|| TopologyError::UnknownNode {
                        edge: i,
                        id: format!("{id:?}"),
                    })
            };
            let source = lookup(&edge.source)?;
            let target = lookup(&edge.target)?;

            let key = match &edge.id {
                Some(id) => EdgeKey::Explicit(id.clone()),
                None => EdgeKey::Ordinal(i as u32),
            };
            if edge_key_to_index.contains_key(&key) {
                return Err(TopologyError::DuplicateEdge {
                    id: format!("{key:?}"),
                });
            }
            edge_key_to_index.insert(key, EdgeIndex(i as u32));
            endpoints.push((source, target));
        }

        Ok(Self {
            node_ids,
            node_id_to_index,
            edge_key_to_index,
            endpoints,
        })
    }

    /// Dense index of an external node id.
    pub fn node_index(&self, id: &K) -> Option<NodeIndex> {
        self.node_id_to_index.get(id).copied()
    }

    /// Dense index of an edge by its registration key.
    pub fn edge_index(&self, key: &EdgeKey<K>) -> Option<EdgeIndex> {
        self.edge_key_to_index.get(key).copied()
    }

    /// Dense index of an edge that was given an explicit id.
    pub fn edge_index_by_id(&self, id: &K) -> Option<EdgeIndex> {
        self.edge_index(&EdgeKey::Explicit(id.clone()))
    }

}

impl<K> Topology<K> {
    /// Get the number of nodes.
    pub fn node_count(&self) -> usize {
        self.node_ids.len()
    }

    /// Get the number of edges.
    pub fn edge_count(&self) -> usize {
        self.endpoints.len()
    }

    /// External id of a dense node index.
    pub fn node_id(&self, index: NodeIndex) -> Option<&K> {
        self.node_ids.get(index.index())
    }

    /// Resolved (source, target) for one edge.
    pub fn edge_endpoints(&self, index: EdgeIndex) -> Option<(NodeIndex, NodeIndex)> {
        self.endpoints.get(index.index()).copied()
    }

    /// Resolved (source, target) for every edge, in edge index order.
    pub fn endpoints(&self) -> &[(NodeIndex, NodeIndex)] {
        &self.endpoints
    }
}
