//! The four built-in action nodes.
//!
//! Each node records its result on the blackboard under its name before
//! returning, so observers (and tests) can read back the full evaluation.

use std::sync::Arc;

use rustc_hash::FxHashSet;
use swarm_agent::{Agent, AgentState};
use swarm_core::{AgentRng, SteeringMode, TaskId, Vec2};
use swarm_motion::{follow, follow_axis};

use crate::blackboard::Blackboard;
use crate::context::TickContext;
use crate::policy::AllocationPolicy;
use crate::status::Status;
use crate::tree::BehaviorNode;

/// Steer toward `target` per the configured steering mode.
fn steer(agent: &mut Agent, target: Vec2, ctx: &TickContext<'_>) {
    let arrival = ctx.config.agents.arrival_radius;
    match ctx.config.steering {
        SteeringMode::Direct => follow(agent, target, arrival),
        SteeringMode::AxisAligned => {
            follow_axis(agent, target, arrival, ctx.config.tasks.arrival_threshold)
        }
    }
}

/// Drop the agent's commitment to its current task.
fn clear_assignment(agent: &mut Agent, bb: &mut Blackboard) {
    agent.assigned_task = None;
    agent.planned.clear();
    bb.assigned_task = None;
}

// ── LocalSensing ──────────────────────────────────────────────────────────────

/// Refresh the blackboard from the begin-of-tick snapshot: uncompleted
/// tasks within the situation-awareness radius and neighbor broadcasts
/// within the communication radius.  Always succeeds.
pub struct LocalSensing;

impl LocalSensing {
    pub const NAME: &'static str = "LocalSensing";
}

impl BehaviorNode for LocalSensing {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn tick(
        &mut self,
        agent: &mut Agent,
        bb: &mut Blackboard,
        ctx: &mut TickContext<'_>,
        _rng: &mut AgentRng,
    ) -> Status {
        bb.position = agent.position;
        bb.tasks_in_view = ctx
            .snapshot
            .tasks_within(agent.position, agent.situation_awareness_radius);
        bb.neighbors =
            ctx.snapshot
                .neighbors_within(agent.id, agent.position, agent.communication_radius);

        bb.record(Self::NAME, Status::Success);
        Status::Success
    }
}

// ── DecisionMaking ────────────────────────────────────────────────────────────

/// Pick a task to commit to, if unburdened and one is available.
///
/// Candidates are the claimable sensed tasks minus any a neighbor already
/// broadcast a commitment to — a best-effort filter over possibly-stale
/// gossip; the live registry's claim check is the actual arbiter.
pub struct DecisionMaking {
    policy: Arc<dyn AllocationPolicy>,
}

impl DecisionMaking {
    pub const NAME: &'static str = "DecisionMaking";

    pub fn new(policy: Arc<dyn AllocationPolicy>) -> Self {
        Self { policy }
    }
}

impl BehaviorNode for DecisionMaking {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn tick(
        &mut self,
        agent: &mut Agent,
        bb: &mut Blackboard,
        _ctx: &mut TickContext<'_>,
        _rng: &mut AgentRng,
    ) -> Status {
        // Loaded agents have exactly one job; don't re-decide mid-haul.
        if bb.carrying {
            bb.record(Self::NAME, Status::Running);
            return Status::Running;
        }

        let observed: FxHashSet<TaskId> =
            bb.neighbors.iter().filter_map(|n| n.assigned_task).collect();
        bb.candidates = bb
            .tasks_in_view
            .iter()
            .filter(|t| t.is_claimable() && !observed.contains(&t.id))
            .copied()
            .collect();

        let status = match self.policy.decide(agent, bb) {
            Some(id) => {
                agent.assigned_task = Some(id);
                agent.planned = vec![id];
                bb.assigned_task = Some(id);
                Status::Success
            }
            None => Status::Failure,
        };
        bb.record(Self::NAME, status);
        status
    }
}

// ── TaskExecuting ─────────────────────────────────────────────────────────────

/// Service the assigned task: drive to it, pick it up, haul it to its
/// category destination, and complete it there.
///
/// Returns `Failure` with the assignment cleared when there is nothing to
/// execute or the claim was lost — the fallback then routes the agent to
/// exploration.  Returns `Running` while driving and `Success` on the
/// delivery tick.
pub struct TaskExecuting;

impl TaskExecuting {
    pub const NAME: &'static str = "TaskExecuting";

    fn approach(
        &mut self,
        agent: &mut Agent,
        bb: &mut Blackboard,
        ctx: &mut TickContext<'_>,
        task_id: TaskId,
    ) -> Status {
        let Some(task) = ctx.tasks.get(task_id) else {
            clear_assignment(agent, bb);
            return Status::Failure;
        };
        // The snapshot said claimable; the registry may disagree by now.
        // A claim held by this agent is fine (claim tick, pre-load).
        if !task.is_claimable() && task.claimant != Some(agent.id) {
            clear_assignment(agent, bb);
            return Status::Failure;
        }
        let target = task.position;
        let pickup_range = task.radius + ctx.config.tasks.arrival_threshold;

        if agent.position.distance(target) >= pickup_range {
            agent.state = AgentState::MovingToTask;
            steer(agent, target, ctx);
            return Status::Running;
        }

        // In range: claim and load atomically within this agent's turn.
        let Some(task) = ctx.tasks.get_mut(task_id) else {
            clear_assignment(agent, bb);
            return Status::Failure;
        };
        if !task.try_claim(agent.id) && task.claimant != Some(agent.id) {
            clear_assignment(agent, bb);
            return Status::Failure;
        }
        if task.load(agent.id).is_err() {
            clear_assignment(agent, bb);
            return Status::Failure;
        }
        bb.carrying = true;
        agent.state = AgentState::Carrying;
        ctx.tasks.spawn_on_pickup(ctx.spawn_rng);
        Status::Running
    }

    fn deliver(
        &mut self,
        agent: &mut Agent,
        bb: &mut Blackboard,
        ctx: &mut TickContext<'_>,
        task_id: TaskId,
    ) -> Status {
        let Some(task) = ctx.tasks.get(task_id) else {
            // A loaded task cannot vanish; treat as a dropped load.
            bb.carrying = false;
            clear_assignment(agent, bb);
            return Status::Failure;
        };
        let destination = ctx.config.destinations.get(task.category);

        if agent.position.distance(destination) >= ctx.config.tasks.arrival_threshold {
            agent.state = AgentState::Carrying;
            steer(agent, destination, ctx);
            return Status::Running;
        }

        let offset = ctx.config.tasks.anchor_offset;
        let delivered = match ctx.tasks.get_mut(task_id) {
            Some(task) => {
                let amount = task.amount;
                task.complete(destination, offset).is_ok().then_some(amount)
            }
            None => None,
        };
        bb.carrying = false;
        clear_assignment(agent, bb);
        agent.state = AgentState::Idle;
        match delivered {
            Some(amount) => {
                agent.work_done += amount;
                Status::Success
            }
            None => Status::Failure,
        }
    }
}

impl BehaviorNode for TaskExecuting {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn tick(
        &mut self,
        agent: &mut Agent,
        bb: &mut Blackboard,
        ctx: &mut TickContext<'_>,
        _rng: &mut AgentRng,
    ) -> Status {
        let status = match agent.assigned_task {
            None => Status::Failure,
            Some(task_id) if bb.carrying => self.deliver(agent, bb, ctx, task_id),
            Some(task_id) => self.approach(agent, bb, ctx, task_id),
        };
        bb.record(Self::NAME, status);
        status
    }
}

// ── Exploration ───────────────────────────────────────────────────────────────

/// Wander toward a random waypoint in the task spawn area, re-rolling it
/// on a fixed cadence.  Always `Running` — exploration never terminates on
/// its own; it just loses to task execution when a task appears.
pub struct Exploration {
    waypoint: Vec2,
    held_ticks: u64,
}

impl Exploration {
    pub const NAME: &'static str = "Exploration";

    pub fn new() -> Self {
        Self {
            waypoint: Vec2::ZERO,
            // Forces a re-roll on the first tick.
            held_ticks: u64::MAX,
        }
    }
}

impl Default for Exploration {
    fn default() -> Self {
        Self::new()
    }
}

impl BehaviorNode for Exploration {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn tick(
        &mut self,
        agent: &mut Agent,
        bb: &mut Blackboard,
        ctx: &mut TickContext<'_>,
        rng: &mut AgentRng,
    ) -> Status {
        if self.held_ticks >= ctx.config.exploration_ticks() {
            let area = ctx.config.tasks.spawn_area;
            self.waypoint = Vec2::new(
                rng.gen_range(area.min.x..=area.max.x),
                rng.gen_range(area.min.y..=area.max.y),
            );
            self.held_ticks = 0;
        }
        self.held_ticks += 1;

        bb.waypoint = Some(self.waypoint);
        agent.state = AgentState::Idle;
        follow(agent, self.waypoint, ctx.config.agents.arrival_radius);

        bb.record(Self::NAME, Status::Running);
        Status::Running
    }
}
