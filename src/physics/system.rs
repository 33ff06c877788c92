//! SpringSystem - the simulation instance.
//!
//! Owns the topology index and every state buffer. Construction resolves
//! ids, allocates all storage and places nodes; after that the only
//! mutation is `update()`, which runs the force passes and then the
//! integrator over the full buffers.

use std::fmt::Debug;
use std::hash::Hash;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::buffers::{EdgeBuffers, NodeBuffers, PairBuffer};
use super::config::{SimulationConfig, Viewport};
use super::error::{SimulationError, SimulationResult};
use super::{forces, integrator};
use crate::console::console_log;
use crate::graph::{EdgeRecord, ExternalId, NodeIndex, NodeRecord, Topology, TopologyError};

/// Force-directed spring simulation over a fixed graph.
///
/// This struct manages:
/// - The write-once id maps (topology index)
/// - Node position/velocity/home buffers in one SoA allocation
/// - Edge endpoint indices
/// - The pair list, when repulsion is enabled
#[derive(Debug, Clone)]
pub struct SpringSystem<K = ExternalId> {
    topology: Topology<K>,
    nodes: NodeBuffers,
    edges: EdgeBuffers,
    pairs: PairBuffer,
    config: SimulationConfig,
}

impl<K> SpringSystem<K>
where
    K: Eq + Hash + Clone + Debug,
{
    /// Build a simulation, placing every node uniformly at random inside
    /// the viewport.
    pub fn new<R: Rng>(
        nodes: &[NodeRecord<K>],
        edges: &[EdgeRecord<K>],
        viewport: Viewport,
        config: SimulationConfig,
        rng: &mut R,
    ) -> SimulationResult<Self> {
        let mut system = Self::allocate(nodes, edges, config)?;
        {
            let fields = system.nodes.fields_mut();
            for x in fields.pos_x.iter_mut() {
                *x = sample_axis(rng, viewport.width);
            }
            for y in fields.pos_y.iter_mut() {
                *y = sample_axis(rng, viewport.height);
            }
            fields.home_x.copy_from_slice(fields.pos_x);
            fields.home_y.copy_from_slice(fields.pos_y);
        }
        Ok(system)
    }

    /// Build a simulation with a reproducible random placement.
    pub fn with_seed(
        nodes: &[NodeRecord<K>],
        edges: &[EdgeRecord<K>],
        viewport: Viewport,
        config: SimulationConfig,
        seed: u64,
    ) -> SimulationResult<Self> {
        let mut rng = SmallRng::seed_from_u64(seed);
        Self::new(nodes, edges, viewport, config, &mut rng)
    }

    /// Build a simulation with caller-chosen initial positions, one per
    /// node in input order.
    pub fn with_positions(
        nodes: &[NodeRecord<K>],
        edges: &[EdgeRecord<K>],
        positions: &[(f32, f32)],
        config: SimulationConfig,
    ) -> SimulationResult<Self> {
        if positions.len() != nodes.len() {
            return Err(SimulationError::LayoutLength {
                expected: nodes.len(),
                actual: positions.len(),
            });
        }

        let mut system = Self::allocate(nodes, edges, config)?;
        {
            let fields = system.nodes.fields_mut();
            for (i, &(x, y)) in positions.iter().enumerate() {
                fields.pos_x[i] = x;
                fields.pos_y[i] = y;
            }
            fields.home_x.copy_from_slice(fields.pos_x);
            fields.home_y.copy_from_slice(fields.pos_y);
        }
        Ok(system)
    }

    /// Validate the config, resolve the topology and allocate zeroed buffers.
    fn allocate(
        nodes: &[NodeRecord<K>],
        edges: &[EdgeRecord<K>],
        config: SimulationConfig,
    ) -> SimulationResult<Self> {
        config.validate()?;
        let topology = Topology::build(nodes, edges)?;
        let node_count = topology.node_count();

        let node_buffers =
            NodeBuffers::zeroed(node_count).ok_or(TopologyError::TooManyNodes { count: node_count })?;
        let edge_buffers = EdgeBuffers::from_endpoints(topology.endpoints());
        let pairs = if config.repulsion.enabled {
            PairBuffer::for_nodes(node_count).ok_or(SimulationError::TooManyPairs { count: node_count })?
        } else {
            PairBuffer::empty()
        };

        console_log!(
            "spring system: {} nodes, {} edges, {} pairs",
            node_count,
            edge_buffers.len(),
            pairs.len()
        );

        Ok(Self {
            topology,
            nodes: node_buffers,
            edges: edge_buffers,
            pairs,
            config,
        })
    }

    /// Dense index of an external node id.
    pub fn node_index(&self, id: &K) -> Option<NodeIndex> {
        self.topology.node_index(id)
    }

    /// Current position of a node by external id.
    pub fn position_of(&self, id: &K) -> Option<(f32, f32)> {
        self.node_index(id).and_then(|index| self.position(index))
    }
}

impl<K> SpringSystem<K> {
    /// Advance the simulation by one tick.
    ///
    /// Runs the spring pass over every edge, then the repulsion pass if
    /// enabled, then the integrator over every node.
    pub fn update(&mut self) {
        let mut fields = self.nodes.fields_mut();
        forces::apply_springs(&mut fields, &self.edges, &self.config.spring);
        if self.config.repulsion.enabled {
            forces::apply_repulsion(&mut fields, &self.pairs, &self.config.repulsion);
        }
        integrator::integrate(&mut fields, self.config.velocity_floor);
    }

    // =========================================================================
    // Buffer Access
    // =========================================================================

    /// Get the number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Get the number of edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Get X positions slice.
    pub fn positions_x(&self) -> &[f32] {
        self.nodes.fields().pos_x
    }

    /// Get Y positions slice.
    pub fn positions_y(&self) -> &[f32] {
        self.nodes.fields().pos_y
    }

    /// Get X velocities slice.
    pub fn velocities_x(&self) -> &[f32] {
        self.nodes.fields().vel_x
    }

    /// Get Y velocities slice.
    pub fn velocities_y(&self) -> &[f32] {
        self.nodes.fields().vel_y
    }

    /// Get initial X placements.
    pub fn home_x(&self) -> &[f32] {
        self.nodes.fields().home_x
    }

    /// Get initial Y placements.
    pub fn home_y(&self) -> &[f32] {
        self.nodes.fields().home_y
    }

    /// Source node index of every edge.
    pub fn edge_sources(&self) -> &[u32] {
        self.edges.sources()
    }

    /// Target node index of every edge.
    pub fn edge_targets(&self) -> &[u32] {
        self.edges.targets()
    }

    /// The pair list; empty unless repulsion is enabled.
    pub fn pairs(&self) -> &PairBuffer {
        &self.pairs
    }

    /// A node's position.
    pub fn position(&self, index: NodeIndex) -> Option<(f32, f32)> {
        let fields = self.nodes.fields();
        let i = index.index();
        Some((*fields.pos_x.get(i)?, *fields.pos_y.get(i)?))
    }

    /// A node's velocity.
    pub fn velocity(&self, index: NodeIndex) -> Option<(f32, f32)> {
        let fields = self.nodes.fields();
        let i = index.index();
        Some((*fields.vel_x.get(i)?, *fields.vel_y.get(i)?))
    }

    pub fn topology(&self) -> &Topology<K> {
        &self.topology
    }

    #[cfg(test)]
    pub(crate) fn fields_mut(&mut self) -> super::buffers::NodeFieldsMut<'_> {
        self.nodes.fields_mut()
    }
}

/// Uniform sample in `[0, extent)`; 0 when the extent is not a positive
/// finite number.
fn sample_axis<R: Rng>(rng: &mut R, extent: f32) -> f32 {
    if extent.is_finite() && extent > 0.0 {
        rng.random_range(0.0..extent)
    } else {
        0.0
    }
}
