//! Graph identifiers and the topology index.
//!
//! The simulation never stores external ids in its hot buffers. This module
//! owns the write-once mapping from caller ids to the dense node and edge
//! indices that every buffer is addressed by.

mod edge;
mod node;
mod topology;

pub use edge::{EdgeIndex, EdgeKey, EdgeRecord};
pub use node::{ExternalId, NodeIndex, NodeRecord};
pub use topology::{Topology, TopologyError};
