//! Node pass: explicit Euler position update.

use super::buffers::NodeFieldsMut;

/// Snap a velocity component to zero when its magnitude is at or below `floor`.
#[inline]
pub fn floor_velocity(v: f32, floor: f32) -> f32 {
    if v.abs() <= floor { 0.0 } else { v }
}

/// Floor each velocity component independently, store it back, then add
/// it to the position.
///
/// There is no friction here; velocities carry over to the next tick and
/// only the spring damping slows nodes down.
pub fn integrate(nodes: &mut NodeFieldsMut<'_>, velocity_floor: f32) {
    let n = nodes.pos_x.len();
    for i in 0..n {
        let vx = floor_velocity(nodes.vel_x[i], velocity_floor);
        let vy = floor_velocity(nodes.vel_y[i], velocity_floor);
        nodes.vel_x[i] = vx;
        nodes.vel_y[i] = vy;

        nodes.pos_x[i] += vx;
        nodes.pos_y[i] += vy;
    }
}
