//! Scale-free random graphs and degree queries.
//!
//! The generator grows a tree by preferential attachment: node 1 links to
//! node 0, and every later node links to one earlier node picked with
//! probability proportional to its current degree. A few early nodes end
//! up as hubs, which is the shape the spring layout is tuned for.
//!
//! Degree-proportional picks use the endpoint trick: a uniformly random
//! endpoint of a uniformly random existing edge lands on each node in
//! proportion to its degree, so no cumulative scan is needed.

use petgraph::algo::connected_components;
use petgraph::graph::{NodeIndex as GraphNode, UnGraph};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::graph::{EdgeRecord, ExternalId, NodeRecord, Topology};

/// Node and edge records ready to hand to `SpringSystem`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Network {
    pub nodes: Vec<NodeRecord<ExternalId>>,
    pub edges: Vec<EdgeRecord<ExternalId>>,
}

impl Network {
    /// Get the number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Get the number of edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}

/// Generate a connected scale-free graph with `count` nodes and
/// `count - 1` edges (none for `count <= 1`).
///
/// Node ids are the integers `0..count`. Every edge points from the newer
/// node to the older one it attached to.
pub fn scale_free<R: Rng>(count: usize, rng: &mut R) -> Network {
    let mut graph: UnGraph<u32, ()> = UnGraph::with_capacity(count, count.saturating_sub(1));

    for i in 0..count {
        let node = graph.add_node(i as u32);
        if i == 1 {
            graph.add_edge(node, GraphNode::new(0), ());
        } else if i > 1 {
            let target = pick_by_degree(&graph, rng);
            graph.add_edge(node, target, ());
        }
    }

    let nodes = graph
        .node_weights()
        .map(|&id| NodeRecord::new(id))
        .collect();
    let edges = graph
        .raw_edges()
        .iter()
        .map(|edge| EdgeRecord::new(graph[edge.source()], graph[edge.target()]))
        .collect();

    Network { nodes, edges }
}

/// Pick an existing node with probability proportional to its degree.
///
/// The graph must hold at least one edge.
fn pick_by_degree<R: Rng>(graph: &UnGraph<u32, ()>, rng: &mut R) -> GraphNode {
    let draw = rng.random_range(0..graph.edge_count() * 2);
    let edge = &graph.raw_edges()[draw / 2];
    if draw % 2 == 0 {
        edge.source()
    } else {
        edge.target()
    }
}

/// Build an undirected petgraph view of a topology, one graph node per
/// dense index.
pub fn to_graph<K>(topology: &Topology<K>) -> UnGraph<(), ()> {
    let mut graph = UnGraph::with_capacity(topology.node_count(), topology.edge_count());
    for _ in 0..topology.node_count() {
        graph.add_node(());
    }
    for &(source, target) in topology.endpoints() {
        graph.add_edge(GraphNode::new(source.index()), GraphNode::new(target.index()), ());
    }
    graph
}

/// Degree of every node, by dense index. Self-loops count twice.
pub fn degrees<K>(topology: &Topology<K>) -> Vec<u32> {
    let mut degrees = vec![0u32; topology.node_count()];
    for &(source, target) in topology.endpoints() {
        degrees[source.index()] += 1;
        degrees[target.index()] += 1;
    }
    degrees
}

/// Number of connected components; 0 for an empty topology.
pub fn component_count<K>(topology: &Topology<K>) -> usize {
    connected_components(&to_graph(topology))
}

#[cfg(test)]
mod tests {
    use super::*;
    use petgraph::graph::EdgeIndex;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn generate(count: usize, seed: u64) -> Network {
        let mut rng = SmallRng::seed_from_u64(seed);
        scale_free(count, &mut rng)
    }

    fn id(n: u32) -> ExternalId {
        ExternalId::from(n)
    }

    #[test]
    fn test_tiny_networks() {
        assert_eq!(generate(0, 1).node_count(), 0);
        assert_eq!(generate(0, 1).edge_count(), 0);

        let one = generate(1, 1);
        assert_eq!(one.node_count(), 1);
        assert_eq!(one.edge_count(), 0);

        let two = generate(2, 1);
        assert_eq!(two.edges, vec![EdgeRecord::<ExternalId>::new(1u32, 0u32)]);
    }

    #[test]
    fn test_three_nodes_always_connect_one_to_zero() {
        for seed in 0..50 {
            let network = generate(3, seed);
            assert_eq!(network.edge_count(), 2);
            assert_eq!(network.edges[0].source, id(1));
            assert_eq!(network.edges[0].target, id(0));
            assert_eq!(network.edges[1].source, id(2));
            assert!(network.edges[1].target == id(0) || network.edges[1].target == id(1));
        }
    }

    #[test]
    fn test_each_node_attaches_to_one_earlier_node() {
        let network = generate(300, 11);
        assert_eq!(network.edge_count(), 299);

        for (k, edge) in network.edges.iter().enumerate() {
            let (ExternalId::Int(source), ExternalId::Int(target)) = (&edge.source, &edge.target) else {
                panic!("generator ids are integers");
            };
            assert_eq!(*source, k as i64 + 1);
            assert!(*target < *source);
            assert!(edge.id.is_none());
        }
    }

    #[test]
    fn test_generated_network_is_connected() {
        for count in [1usize, 2, 3, 10, 500] {
            let network = generate(count, count as u64);
            let topology = Topology::build(&network.nodes, &network.edges).unwrap();
            assert_eq!(component_count(&topology), 1, "count={count}");
            assert_eq!(topology.edge_count(), count - 1);
        }
    }

    #[test]
    fn test_degree_distribution_is_skewed() {
        let network = generate(2000, 42);
        let topology = Topology::build(&network.nodes, &network.edges).unwrap();
        let degrees = degrees(&topology);

        assert_eq!(degrees.iter().sum::<u32>(), 2 * 1999);
        let max = *degrees.iter().max().unwrap();
        let leaves = degrees.iter().filter(|&&d| d == 1).count();
        assert!(max >= 10, "expected a hub, max degree {max}");
        assert!(leaves > 1000, "expected mostly leaves, got {leaves}");
    }

    #[test]
    fn test_network_from_json() {
        let network: Network = serde_json::from_str(
            r#"{"nodes": [{"id": "hub"}, {"id": 2}], "edges": [{"source": 2, "target": "hub"}]}"#,
        )
        .unwrap();

        assert_eq!(network.node_count(), 2);
        assert_eq!(network.edges, vec![EdgeRecord::<ExternalId>::new(2u32, "hub")]);

        let topology = Topology::build(&network.nodes, &network.edges).unwrap();
        assert_eq!(degrees(&topology), vec![1, 1]);
    }

    #[test]
    fn test_same_seed_same_network() {
        assert_eq!(generate(100, 5), generate(100, 5));
    }

    #[test]
    fn test_to_graph_matches_topology() {
        let network = generate(20, 3);
        let topology = Topology::build(&network.nodes, &network.edges).unwrap();
        let graph = to_graph(&topology);

        assert_eq!(graph.node_count(), 20);
        assert_eq!(graph.edge_count(), 19);
        let (a, b) = graph.edge_endpoints(EdgeIndex::new(0)).unwrap();
        assert_eq!((a.index(), b.index()), (1, 0));
    }

    #[test]
    fn test_component_count_disconnected() {
        let nodes: Vec<NodeRecord<u32>> = (0..4u32).map(NodeRecord::new).collect();
        let edges = vec![EdgeRecord::new(0u32, 1u32)];
        let topology = Topology::build(&nodes, &edges).unwrap();
        assert_eq!(component_count(&topology), 3);
        assert_eq!(degrees(&topology), vec![1, 1, 0, 0]);
    }
}
