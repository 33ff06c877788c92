//! Edge identifiers and construction records.
//!
//! Edges are the springs between nodes. Each edge has:
//! - A dense index (0..E-1) into the endpoint buffers
//! - Source and target node ids, resolved to dense node indices
//! - An optional external id; edges without one are keyed by position

use serde::{Deserialize, Serialize};
use std::fmt;

/// Dense edge index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeIndex(pub u32);

impl EdgeIndex {
    /// Create a new EdgeIndex from a raw u32.
    #[inline]
    pub fn new(index: u32) -> Self {
        Self(index)
    }

    /// Get the raw u32 value.
    #[inline]
    pub fn raw(self) -> u32 {
        self.0
    }

    /// Get the index as a usize for slice access.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for EdgeIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Edge({})", self.0)
    }
}

impl From<u32> for EdgeIndex {
    #[inline]
    fn from(index: u32) -> Self {
        Self(index)
    }
}

impl From<EdgeIndex> for u32 {
    #[inline]
    fn from(index: EdgeIndex) -> Self {
        index.0
    }
}

/// Key under which an edge is registered in the edge map.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EdgeKey<K> {
    /// The caller supplied an id.
    Explicit(K),
    /// No id was supplied; keyed by position in the input sequence.
    Ordinal(u32),
}

/// An edge as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeRecord<K> {
    pub source: K,
    pub target: K,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<K>,
}

impl<K> EdgeRecord<K> {
    /// An edge without an explicit id.
    pub fn new(source: impl Into<K>, target: impl Into<K>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            id: None,
        }
    }

    /// An edge with an explicit id.
    pub fn with_id(source: impl Into<K>, target: impl Into<K>, id: impl Into<K>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            id: Some(id.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::ExternalId;

    #[test]
    fn test_edge_index() {
        let index = EdgeIndex::new(42);
        assert_eq!(index.raw(), 42);
        assert_eq!(format!("{}", index), "Edge(42)");
    }

    #[test]
    fn test_edge_record_constructors() {
        let plain: EdgeRecord<ExternalId> = EdgeRecord::new(1u32, 0u32);
        assert_eq!(plain.source, ExternalId::Int(1));
        assert_eq!(plain.target, ExternalId::Int(0));
        assert!(plain.id.is_none());

        let named: EdgeRecord<ExternalId> = EdgeRecord::with_id("a", "b", "a-b");
        assert_eq!(named.id, Some(ExternalId::from("a-b")));
    }

    #[test]
    fn test_edge_record_id_optional() {
        let plain: EdgeRecord<ExternalId> = serde_json::from_str(r#"{"source": 1, "target": "b"}"#).unwrap();
        assert_eq!(plain.source, ExternalId::Int(1));
        assert_eq!(plain.target, ExternalId::from("b"));
        assert!(plain.id.is_none());

        let named: EdgeRecord<ExternalId> =
            serde_json::from_str(r#"{"source": "a", "target": "b", "id": "a-b"}"#).unwrap();
        assert_eq!(named.id, Some(ExternalId::from("a-b")));
    }

    #[test]
    fn test_edge_record_omits_missing_id() {
        let json = serde_json::to_string(&EdgeRecord::<ExternalId>::new(1u32, 0u32)).unwrap();
        assert_eq!(json, r#"{"source":1,"target":0}"#);
    }
}
