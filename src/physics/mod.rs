//! Spring physics over flat buffers.
//!
//! One tick is a force-accumulation pass over every edge (and, when
//! enabled, every node pair) followed by an explicit Euler pass over every
//! node. Nothing allocates after construction.

pub mod buffers;
pub mod config;
mod error;
pub mod forces;
pub mod integrator;
mod system;

pub use buffers::{EdgeBuffers, NodeBuffers, PairBuffer};
pub use config::{RepulsionConfig, SimulationConfig, SpringConfig, Viewport};
pub use error::{SimulationError, SimulationResult};
pub use system::SpringSystem;
