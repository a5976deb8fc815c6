//! Pairwise collision avoidance.
//!
//! Avoidance is repulsion only — there is no contact resolution.  Each
//! agent yields (or not) according to coarse-state right-of-way:
//!
//! - a carrying agent never yields to a non-carrying one;
//! - an idle agent yields at half weight;
//! - among equal states, the lower-id agent yields.
//!
//! The caller blends the returned force into the tick's steering before the
//! final integration, so avoidance and seek compete under the same
//! max-accel clamp.

use swarm_agent::{Agent, AgentState, Broadcast};
use swarm_core::{AgentId, Vec2};

/// Minimum distance used in the inverse-distance falloff, to keep the
/// repulsion finite for overlapping agents.
const MIN_DISTANCE: f32 = 1e-3;

/// How strongly `agent` must give way to a neighbor; 0.0 = hold course.
pub fn yield_weight(
    state: AgentState,
    id: AgentId,
    other_state: AgentState,
    other_id: AgentId,
) -> f32 {
    let own_share = if state == AgentState::Idle { 0.5 } else { 1.0 };
    use std::cmp::Ordering::*;
    match state.priority().cmp(&other_state.priority()) {
        Less => own_share,
        Greater => 0.0,
        Equal => {
            if id < other_id {
                own_share
            } else {
                0.0
            }
        }
    }
}

/// Summed repulsion force away from all neighbors closer than `proximity`.
///
/// `neighbors` is the begin-of-tick broadcast set already filtered to the
/// agent's communication radius; the hard `proximity` threshold applies on
/// top of it.  Repulsion magnitude falls off inversely with distance and
/// the sum is clamped to the agent's max accel.
pub fn avoidance(agent: &Agent, neighbors: &[Broadcast], proximity: f32) -> Vec2 {
    let mut sum = Vec2::ZERO;
    for other in neighbors {
        if other.id == agent.id {
            continue;
        }
        let away = agent.position - other.position;
        let distance = away.length();
        if distance >= proximity {
            continue;
        }
        let weight = yield_weight(agent.state, agent.id, other.state, other.id);
        if weight == 0.0 {
            continue;
        }
        // Coincident agents have no away-direction; skip rather than fault.
        let Some(dir) = away.normalized() else {
            continue;
        };
        sum += dir * (proximity / distance.max(MIN_DISTANCE)) * weight;
    }
    sum.limit(agent.limits.max_accel)
}
