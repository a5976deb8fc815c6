//! The per-tick evaluation context handed to every node.

use swarm_core::{SimConfig, SimRng, Tick};
use swarm_task::TaskRegistry;

use crate::snapshot::WorldSnapshot;

/// Everything a node may touch beyond its own agent and blackboard.
///
/// `snapshot` is the frozen begin-of-tick world; `tasks` is the live
/// registry where claims, loads, and completions land.  Trees are
/// evaluated one agent at a time in ascending id order, so registry
/// mutations are serialized — that order is the claim arbitration rule.
pub struct TickContext<'a> {
    pub tick: Tick,
    pub dt: f32,
    pub config: &'a SimConfig,
    pub snapshot: &'a WorldSnapshot,
    pub tasks: &'a mut TaskRegistry,
    /// Stream for replacement-task generation, owned by the driver.
    pub spawn_rng: &'a mut SimRng,
}
