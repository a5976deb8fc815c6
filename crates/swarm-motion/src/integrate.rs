//! Fixed-timestep kinematic integration.

use std::f32::consts::{PI, TAU};

use swarm_agent::Agent;
use swarm_core::{Bounds, Vec2};

/// Advance one agent by one tick of duration `dt`.
///
/// Order matters and mirrors the steering contract:
/// 1. velocity += acceleration·dt, clamped to max speed;
/// 2. position += velocity·dt; pending forces cleared;
/// 3. position clamped to `bounds`, zeroing the velocity component that
///    hit a wall;
/// 4. distance counter and track updated;
/// 5. heading slewed toward the velocity direction by the minimal signed
///    angular delta, clamped to the max angular speed.
pub fn integrate(agent: &mut Agent, dt: f32, bounds: Bounds) {
    agent.velocity = (agent.velocity + agent.acceleration * dt).limit(agent.limits.max_speed);
    agent.position += agent.velocity * dt;
    agent.acceleration = Vec2::ZERO;

    let (clamped, hit_x, hit_y) = bounds.clamp(agent.position);
    agent.position = clamped;
    if hit_x {
        agent.velocity.x = 0.0;
    }
    if hit_y {
        agent.velocity.y = 0.0;
    }

    agent.distance_moved += agent.velocity.length() * dt;
    agent.record_track();

    // Heading only turns while there is a direction to turn toward.
    if agent.velocity.normalized().is_some() {
        let desired = agent.velocity.angle();
        let mut diff = desired - agent.heading;
        while diff > PI {
            diff -= TAU;
        }
        while diff < -PI {
            diff += TAU;
        }
        if diff.abs() > agent.limits.max_angular_speed {
            diff = agent.limits.max_angular_speed.copysign(diff);
        }
        agent.heading += diff * dt;
    }
}
