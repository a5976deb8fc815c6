//! The `Sim` struct and its tick loop.

use tracing::{debug, info};

use swarm_agent::Agent;
use swarm_bt::{BehaviorTree, Blackboard, Status, TaskExecuting, TickContext, WorldSnapshot};
use swarm_core::{AgentId, AgentRng, SimClock, SimConfig, SimRng, TaskId, Tick};
use swarm_motion::{avoidance, integrate};
use swarm_task::TaskRegistry;

use crate::{SimObserver, SimResult};

/// The main simulation runner.
///
/// Holds all world state and drives the snapshot → decide → avoid →
/// integrate tick loop.  Per-agent decision state (tree, blackboard, RNG)
/// lives in `Vec`s parallel to `agents`, indexed by `AgentId`.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim {
    pub config: SimConfig,

    /// Simulation clock — tracks the current tick.
    pub clock: SimClock,

    pub agents: Vec<Agent>,

    /// The live task store.  Claims made during the decide phase land here
    /// immediately, serialized by the ascending-id evaluation order.
    pub tasks: TaskRegistry,

    trees: Vec<BehaviorTree>,
    blackboards: Vec<Blackboard>,
    rngs: Vec<AgentRng>,
    /// Stream for replacement-task generation.
    spawn_rng: SimRng,
}

impl std::fmt::Debug for Sim {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sim")
            .field("tick", &self.clock.current_tick)
            .field("agents", &self.agents.len())
            .finish_non_exhaustive()
    }
}

impl Sim {
    pub(crate) fn from_parts(
        config: SimConfig,
        agents: Vec<Agent>,
        tasks: TaskRegistry,
        trees: Vec<BehaviorTree>,
    ) -> Self {
        let rngs = agents
            .iter()
            .map(|a| AgentRng::new(config.seed, a.id))
            .collect();
        let blackboards = agents.iter().map(|_| Blackboard::new()).collect();
        // Offset 1 keeps the spawn stream independent of the generation
        // streams the builder already consumed.
        let spawn_rng = SimRng::new(config.seed).child(1);
        Self {
            clock: config.make_clock(),
            config,
            agents,
            tasks,
            trees,
            blackboards,
            rngs,
            spawn_rng,
        }
    }

    // ── Public API ────────────────────────────────────────────────────────

    /// Run from the current tick to `config.end_tick()`.
    ///
    /// Calls observer hooks at every tick boundary.  Use
    /// [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        info!(
            agents = self.agents.len(),
            tasks = self.tasks.len(),
            total_ticks = self.config.total_ticks,
            seed = self.config.seed,
            "simulation starting"
        );
        while self.clock.current_tick < self.config.end_tick() {
            self.step(observer)?;
        }
        let finished = self.clock.current_tick;
        info!(
            tick = finished.0,
            completed = self.tasks.completed_count(),
            "simulation finished"
        );
        observer.on_sim_end(finished, &self.agents, &self.tasks);
        Ok(())
    }

    /// Run until every task (including all replacements) is completed, or
    /// `config.end_tick()` is reached, whichever comes first.
    ///
    /// Returns the tick at which the run stopped.
    pub fn run_until_complete<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<Tick> {
        while self.clock.current_tick < self.config.end_tick() && !self.tasks.all_complete() {
            self.step(observer)?;
        }
        let finished = self.clock.current_tick;
        info!(
            tick = finished.0,
            completed = self.tasks.completed_count(),
            all_complete = self.tasks.all_complete(),
            "run-until-complete finished"
        );
        observer.on_sim_end(finished, &self.agents, &self.tasks);
        Ok(finished)
    }

    /// Run exactly `n` ticks from the current position (ignores `end_tick`).
    ///
    /// Useful for tests and incremental stepping.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            self.step(observer)?;
        }
        Ok(())
    }

    /// Advance the world by one tick.
    pub fn step<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        let now = self.clock.current_tick;
        observer.on_tick_start(now);

        let completions = self.process_tick(now);
        for &(agent, task) in &completions {
            debug!(tick = now.0, %agent, %task, "task delivered");
            observer.on_task_completed(now, agent, task);
        }

        observer.on_tick_end(now, &self.agents, &self.tasks);
        if self.config.snapshot_interval_ticks > 0
            && now.0.is_multiple_of(self.config.snapshot_interval_ticks)
        {
            observer.on_snapshot(now, &self.agents, &self.tasks);
        }

        self.clock.advance();
        Ok(())
    }

    // ── Core tick processing ──────────────────────────────────────────────

    fn process_tick(&mut self, now: Tick) -> Vec<(AgentId, TaskId)> {
        let dt = self.config.dt();

        // ── Phase 1: freeze the begin-of-tick world ───────────────────────
        //
        // Every agent senses this frozen view, so perception is independent
        // of the evaluation order below.
        let snapshot = WorldSnapshot::build(&self.agents, &self.tasks);

        // ── Phase 2: decide (ascending AgentId) ───────────────────────────
        //
        // Trees steer by accumulating forces; registry writes (claims,
        // loads, completions) are serialized by this order, which makes
        // same-tick claim races deterministic.
        let mut completions = Vec::new();
        for i in 0..self.agents.len() {
            let hauling_task = self.agents[i].assigned_task;
            let mut ctx = TickContext {
                tick: now,
                dt,
                config: &self.config,
                snapshot: &snapshot,
                tasks: &mut self.tasks,
                spawn_rng: &mut self.spawn_rng,
            };
            self.trees[i].run(
                &mut self.agents[i],
                &mut self.blackboards[i],
                &mut ctx,
                &mut self.rngs[i],
            );
            // TaskExecuting succeeds only on the delivery tick.
            if self.blackboards[i].result(TaskExecuting::NAME) == Some(Status::Success)
                && let Some(task) = hauling_task
            {
                completions.push((self.agents[i].id, task));
            }
        }

        // ── Phase 3: collision avoidance ──────────────────────────────────
        //
        // Repulsion reads begin-of-tick neighbor positions and blends into
        // the same per-tick force budget the trees used.
        for agent in &mut self.agents {
            let neighbors =
                snapshot.neighbors_within(agent.id, agent.position, agent.communication_radius);
            let repulsion = avoidance(agent, &neighbors, self.config.agents.avoidance_radius);
            if repulsion != swarm_core::Vec2::ZERO {
                agent.apply_force(repulsion);
            }
        }

        // ── Phase 4: integrate ────────────────────────────────────────────
        for agent in &mut self.agents {
            integrate(agent, dt, self.config.bounds);
        }

        completions
    }

    // ── Introspection ─────────────────────────────────────────────────────

    /// The blackboard of one agent (tests, visualization).
    pub fn blackboard(&self, agent: AgentId) -> &Blackboard {
        &self.blackboards[agent.index()]
    }
}
