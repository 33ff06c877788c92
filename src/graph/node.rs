//! Node identifiers and construction records.
//!
//! Nodes are addressed two ways:
//! - An external identifier supplied by the caller (any hashable value)
//! - A dense index (0..N-1) used for every buffer in the simulation

use serde::{Deserialize, Serialize};
use std::fmt;

/// Dense node index.
///
/// Assigned in input order at construction and stable for the lifetime
/// of the simulation. It wraps a u32 for compact edge buffers and
/// WebAssembly interop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeIndex(pub u32);

impl NodeIndex {
    /// Create a new NodeIndex from a raw u32.
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

impl fmt::Display for NodeIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Node({})", self.0)
    }
}

impl From<u32> for NodeIndex {
    #[inline]
    fn from(index: u32) -> Self {
        Self(index)
    }
}

impl From<NodeIndex> for u32 {
    #[inline]
    fn from(index: NodeIndex) -> Self {
        index.0
    }
}

/// External identifier as it arrives from JavaScript.
///
/// JSON graphs key their nodes by either numbers or strings, so this is
/// the id type used by the WASM facade and the scale-free generator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExternalId {
    Int(i64),
    Str(String),
}

impl fmt::Display for ExternalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExternalId::Int(v) => write!(f, "{v}"),
            ExternalId::Str(s) => f.write_str(s),
        }
    }
}

impl From<i64> for ExternalId {
    fn from(v: i64) -> Self {
        ExternalId::Int(v)
    }
}

impl From<u32> for ExternalId {
    fn from(v: u32) -> Self {
        ExternalId::Int(i64::from(v))
    }
}

impl From<&str> for ExternalId {
    fn from(s: &str) -> Self {
        ExternalId::Str(s.to_owned())
    }
}

impl From<String> for ExternalId {
    fn from(s: String) -> Self {
        ExternalId::Str(s)
    }
}

/// A node as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeRecord<K> {
    pub id: K,
}

impl<K> NodeRecord<K> {
    pub fn new(id: impl Into<K>) -> Self {
        Self { id: id.into() }
    }
}
