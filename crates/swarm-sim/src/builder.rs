//! Fluent builder for constructing a [`Sim`].

use std::sync::Arc;

use swarm_agent::{spawn_agents, Agent};
use swarm_bt::{build_tree, AllocationPolicy, NodeDef, PolicyKind};
use swarm_core::{AgentId, SimConfig, SimRng, Vec2};
use swarm_task::{Task, TaskRegistry};

use crate::{Sim, SimError, SimResult};

/// Fluent builder for [`Sim`].
///
/// Only a validated [`SimConfig`] is required; everything else defaults:
///
/// | Method                | Default                                    |
/// |-----------------------|--------------------------------------------|
/// | `.policy(p)`          | [`PolicyKind::FirstCome`]                  |
/// | `.tree(def)`          | [`NodeDef::default_root()`]                |
/// | `.tasks(v)`           | Generated per `config.tasks`               |
/// | `.agent_positions(v)` | Scattered per `config.agents.spawn_area`   |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(config)
///     .policy(PolicyKind::Nearest.make())
///     .build()?;
/// sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder {
    config: SimConfig,
    policy: Arc<dyn AllocationPolicy>,
    tree_def: NodeDef,
    tasks: Option<Vec<Task>>,
    positions: Option<Vec<Vec2>>,
}

impl SimBuilder {
    pub fn new(config: SimConfig) -> Self {
        Self {
            config,
            policy: PolicyKind::FirstCome.make(),
            tree_def: NodeDef::default_root(),
            tasks: None,
            positions: None,
        }
    }

    /// Use a different task-allocation policy.
    pub fn policy(mut self, policy: Arc<dyn AllocationPolicy>) -> Self {
        self.policy = policy;
        self
    }

    /// Use a custom behavior-tree definition instead of the stock mission
    /// tree.  Every agent gets an independent instance of it.
    pub fn tree(mut self, def: NodeDef) -> Self {
        self.tree_def = def;
        self
    }

    /// Supply explicit initial tasks instead of generating
    /// `config.tasks.quantity` scattered ones (tests, replays).
    pub fn tasks(mut self, tasks: Vec<Task>) -> Self {
        self.tasks = Some(tasks);
        self
    }

    /// Supply explicit agent spawn positions instead of scattering.
    ///
    /// Must be length `config.agents.quantity`.
    pub fn agent_positions(mut self, positions: Vec<Vec2>) -> Self {
        self.positions = Some(positions);
        self
    }

    /// Validate the configuration, spawn the world, instantiate per-agent
    /// trees, and return a ready-to-run [`Sim`].
    pub fn build(self) -> SimResult<Sim> {
        self.config.validate()?;
        let cfg = self.config;

        // Independent child streams: task generation and agent placement
        // never perturb each other, and the sim's spawn stream (child 1) is
        // reserved by `Sim::from_parts`.
        let mut root_rng = SimRng::new(cfg.seed);
        let _reserved = root_rng.child(1);
        let mut task_rng = root_rng.child(2);
        let mut agent_rng = root_rng.child(3);

        let tasks = match self.tasks {
            Some(t) => TaskRegistry::from_tasks(t, cfg.tasks.clone()),
            None => TaskRegistry::generate(cfg.tasks.clone(), &mut task_rng),
        };

        let agents: Vec<Agent> = match self.positions {
            Some(positions) => {
                if positions.len() != cfg.agents.quantity {
                    return Err(SimError::AgentCountMismatch {
                        expected: cfg.agents.quantity,
                        got: positions.len(),
                        what: "agent positions",
                    });
                }
                positions
                    .into_iter()
                    .enumerate()
                    .map(|(i, pos)| Agent::new(AgentId(i as u32), pos, &cfg.agents))
                    .collect()
            }
            None => spawn_agents(&cfg.agents, &mut agent_rng),
        };

        let trees = agents
            .iter()
            .map(|_| build_tree(&self.tree_def, &self.policy))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Sim::from_parts(cfg, agents, tasks, trees))
    }
}
