//! Initial population spawning.

use swarm_core::{layout, AgentConfig, AgentId, SimRng};

use crate::agent::Agent;

/// Spawn `cfg.quantity` agents at scattered, non-overlapping positions.
///
/// Deterministic for a given `rng` stream; agent ids are dense from 0.
pub fn spawn_agents(cfg: &AgentConfig, rng: &mut SimRng) -> Vec<Agent> {
    layout::scatter(cfg.quantity, cfg.spawn_area, cfg.spawn_separation, rng)
        .into_iter()
        .enumerate()
        .map(|(i, pos)| Agent::new(AgentId(i as u32), pos, cfg))
        .collect()
}
