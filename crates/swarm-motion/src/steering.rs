//! Seek/arrive steering.

use swarm_agent::Agent;
use swarm_core::Vec2;

/// Steer toward `target` with damped arrival.
///
/// Inside `arrival_radius`, desired speed scales proportionally with the
/// remaining distance; outside it, desired speed is the agent's maximum.
/// The applied force is `clamp(desired_velocity − velocity, max_accel)`.
///
/// At the target exactly (zero-length direction) no force is applied —
/// degenerate geometry is a guard, not a fault.
pub fn follow(agent: &mut Agent, target: Vec2, arrival_radius: f32) {
    let offset = target - agent.position;
    let Some(dir) = offset.normalized() else {
        return;
    };
    let distance = offset.length();

    let desired_speed = if distance < arrival_radius {
        agent.limits.max_speed * (distance / arrival_radius)
    } else {
        agent.limits.max_speed
    };

    let desired = dir * desired_speed;
    let steer = (desired - agent.velocity).limit(agent.limits.max_accel);
    agent.apply_force(steer);
}

/// Aisle-constrained variant of [`follow`]: move along one axis at a time,
/// aligning horizontally first and only then vertically.
///
/// `axis_threshold` is the alignment tolerance on the horizontal leg.
pub fn follow_axis(agent: &mut Agent, target: Vec2, arrival_radius: f32, axis_threshold: f32) {
    let waypoint = if (target.x - agent.position.x).abs() > axis_threshold {
        Vec2::new(target.x, agent.position.y)
    } else {
        target
    };
    follow(agent, waypoint, arrival_radius);
}
