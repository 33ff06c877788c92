//! Force accumulation passes.
//!
//! Both passes only write velocities. Positions move exclusively in the
//! integrator, after every force of the tick has been accumulated.

use super::buffers::{EdgeBuffers, NodeFieldsMut, PairBuffer};
use super::config::{RepulsionConfig, SpringConfig};

/// Damped spring force on the source endpoint of an edge.
///
/// `dx, dy` point from source to target. `rel_vx, rel_vy` is the source
/// velocity minus the target velocity. The force on the target is the
/// exact negation of the returned value.
///
/// Coincident endpoints use `config.zero_distance` in place of the zero
/// distance, which keeps the result finite.
#[inline]
pub fn spring_force(dx: f32, dy: f32, rel_vx: f32, rel_vy: f32, config: &SpringConfig) -> (f32, f32) {
    let mut distance = (dx * dx + dy * dy).sqrt();
    if distance == 0.0 {
        distance = config.zero_distance;
    }

    let unit_x = dx / distance;
    let unit_y = dy / distance;
    let stretch = config.stiffness * (distance - config.rest_length);

    (
        stretch * (unit_x / distance) - config.damping * rel_vx,
        stretch * (unit_y / distance) - config.damping * rel_vy,
    )
}

/// Spring pass: accumulate every edge's force into its endpoint velocities.
///
/// Edges are applied in index order and velocities are updated in place,
/// so an edge sees the contributions of the edges before it.
pub fn apply_springs(nodes: &mut NodeFieldsMut<'_>, edges: &EdgeBuffers, config: &SpringConfig) {
    for (i, j) in edges.iter() {
        let dx = nodes.pos_x[j] - nodes.pos_x[i];
        let dy = nodes.pos_y[j] - nodes.pos_y[i];
        let rel_vx = nodes.vel_x[i] - nodes.vel_x[j];
        let rel_vy = nodes.vel_y[i] - nodes.vel_y[j];

        let (fx, fy) = spring_force(dx, dy, rel_vx, rel_vy, config);

        nodes.vel_x[i] += fx;
        nodes.vel_y[i] += fy;
        nodes.vel_x[j] -= fx;
        nodes.vel_y[j] -= fy;
    }
}

/// Inverse-square push between two nodes, as the velocity change of `j`.
///
/// `dx, dy` point from `i` to `j`; `i` receives the negation. Coincident
/// nodes separate along +x.
#[inline]
pub fn repulsion_force(dx: f32, dy: f32, config: &RepulsionConfig) -> (f32, f32) {
    let distance = (dx * dx + dy * dy).sqrt();
    let (unit_x, unit_y) = if distance > 0.0 {
        (dx / distance, dy / distance)
    } else {
        (1.0, 0.0)
    };

    let clamped = distance.max(config.min_distance);
    let push = config.strength / (clamped * clamped);
    (push * unit_x, push * unit_y)
}

/// Pair pass: push every pair of nodes apart.
pub fn apply_repulsion(nodes: &mut NodeFieldsMut<'_>, pairs: &PairBuffer, config: &RepulsionConfig) {
    for (i, j) in pairs.iter() {
        let dx = nodes.pos_x[j] - nodes.pos_x[i];
        let dy = nodes.pos_y[j] - nodes.pos_y[i];

        let (fx, fy) = repulsion_force(dx, dy, config);

        nodes.vel_x[i] -= fx;
        nodes.vel_y[i] -= fy;
        nodes.vel_x[j] += fx;
        nodes.vel_y[j] += fy;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::NodeIndex;
    use crate::physics::buffers::NodeBuffers;

    fn undamped() -> SpringConfig {
        SpringConfig {
            damping: 0.0,
            ..Default::default()
        }
    }

    /// Two nodes joined by one edge, node 0 at `a`, node 1 at `b`.
    fn pair_at(a: (f32, f32), b: (f32, f32)) -> (NodeBuffers, EdgeBuffers) {
        let mut nodes = NodeBuffers::zeroed(2).unwrap();
        {
            let fields = nodes.fields_mut();
            fields.pos_x[0] = a.0;
            fields.pos_y[0] = a.1;
            fields.pos_x[1] = b.0;
            fields.pos_y[1] = b.1;
        }
        let edges = EdgeBuffers::from_endpoints(&[(NodeIndex(0), NodeIndex(1))]);
        (nodes, edges)
    }

    #[test]
    fn test_stretched_spring_pulls_together() {
        let (fx, fy) = spring_force(200.0, 0.0, 0.0, 0.0, &SpringConfig::default());
        assert!((fx - 2.5).abs() < 1e-6);
        assert_eq!(fy, 0.0);
    }

    #[test]
    fn test_compressed_spring_pushes_apart() {
        let (fx, _) = spring_force(100.0, 0.0, 0.0, 0.0, &SpringConfig::default());
        assert!(fx < 0.0);
    }

    #[test]
    fn test_equilibrium_at_rest_length() {
        let (fx, fy) = spring_force(150.0, 0.0, 0.0, 0.0, &SpringConfig::default());
        assert_eq!(fx, 0.0);
        assert_eq!(fy, 0.0);

        // Diagonal 3-4-5 triangle scaled to exactly 150.
        let (fx, fy) = spring_force(90.0, 120.0, 0.0, 0.0, &SpringConfig::default());
        assert_eq!(fx, 0.0);
        assert_eq!(fy, 0.0);
    }

    #[test]
    fn test_zero_distance_is_finite() {
        let (fx, fy) = spring_force(0.0, 0.0, 0.5, -0.5, &SpringConfig::default());
        assert!(fx.is_finite() && !fx.is_nan());
        assert!(fy.is_finite() && !fy.is_nan());
        // Zero unit vector leaves only the damping term.
        assert!((fx + 0.015).abs() < 1e-6);
        assert!((fy - 0.015).abs() < 1e-6);
    }

    #[test]
    fn test_damping_opposes_relative_velocity() {
        let (fx, _) = spring_force(150.0, 0.0, 2.0, 0.0, &SpringConfig::default());
        assert!((fx + 0.06).abs() < 1e-6);
    }

    #[test]
    fn test_spring_pass_is_antisymmetric() {
        let (mut nodes, edges) = pair_at((10.0, 20.0), (250.0, -70.0));
        let mut fields = nodes.fields_mut();
        apply_springs(&mut fields, &edges, &undamped());

        assert_ne!(fields.vel_x[0], 0.0);
        assert_eq!(fields.vel_x[0], -fields.vel_x[1]);
        assert_eq!(fields.vel_y[0], -fields.vel_y[1]);
    }

    #[test]
    fn test_spring_pass_leaves_positions() {
        let (mut nodes, edges) = pair_at((0.0, 0.0), (200.0, 0.0));
        let mut fields = nodes.fields_mut();
        apply_springs(&mut fields, &edges, &SpringConfig::default());

        assert_eq!(fields.pos_x, &[0.0, 200.0]);
        assert_eq!(fields.pos_y, &[0.0, 0.0]);
    }

    #[test]
    fn test_spring_pass_coincident_nodes() {
        let (mut nodes, edges) = pair_at((42.0, 42.0), (42.0, 42.0));
        let mut fields = nodes.fields_mut();
        apply_springs(&mut fields, &edges, &SpringConfig::default());

        assert!(fields.vel_x.iter().chain(fields.vel_y.iter()).all(|v| v.is_finite()));
    }

    #[test]
    fn test_spring_pass_accumulates_across_edges() {
        // Node 1 sits between 0 and 2; both springs are stretched equally,
        // so its velocity gains cancel in x.
        let mut nodes = NodeBuffers::zeroed(3).unwrap();
        {
            let fields = nodes.fields_mut();
            fields.pos_x.copy_from_slice(&[0.0, 200.0, 400.0]);
        }
        let edges = EdgeBuffers::from_endpoints(&[
            (NodeIndex(0), NodeIndex(1)),
            (NodeIndex(2), NodeIndex(1)),
        ]);
        let mut fields = nodes.fields_mut();
        apply_springs(&mut fields, &edges, &undamped());

        assert!(fields.vel_x[0] > 0.0);
        assert!(fields.vel_x[2] < 0.0);
        assert!(fields.vel_x[1].abs() < 1e-6);
    }

    #[test]
    fn test_repulsion_pushes_apart() {
        let mut nodes = NodeBuffers::zeroed(2).unwrap();
        {
            let fields = nodes.fields_mut();
            fields.pos_x[1] = 10.0;
        }
        let pairs = PairBuffer::for_nodes(2).unwrap();
        let config = RepulsionConfig {
            enabled: true,
            ..Default::default()
        };
        let mut fields = nodes.fields_mut();
        apply_repulsion(&mut fields, &pairs, &config);

        assert!(fields.vel_x[0] < 0.0);
        assert!(fields.vel_x[1] > 0.0);
        assert_eq!(fields.vel_x[0], -fields.vel_x[1]);
        assert!((fields.vel_x[1] - 50.0).abs() < 1e-3);
    }

    #[test]
    fn test_repulsion_coincident_is_finite() {
        let (fx, fy) = repulsion_force(0.0, 0.0, &RepulsionConfig::default());
        assert_eq!(fx, 5000.0);
        assert_eq!(fy, 0.0);
    }
}
