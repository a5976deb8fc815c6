//! The task entity and its lifecycle state machine.

use swarm_core::{AgentId, Category, TaskId, Vec2};

use crate::error::{TaskError, TaskResult};

/// Lifecycle state of a task.
///
/// Transitions are strictly forward: `Unclaimed → Claimed → Loaded →
/// Completed`.  Completed tasks are retained for audit and visualization,
/// never removed.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TaskState {
    #[default]
    Unclaimed,
    Claimed,
    Loaded,
    Completed,
}

/// A unit of work scattered in the world.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Task {
    /// Unique, immutable id — also the task's index in the registry.
    pub id: TaskId,
    /// Pickup position.  Fixed for the task's working life; the display
    /// `anchor` moves on completion instead.
    pub position: Vec2,
    /// Remaining work amount.  Decreases under `reduce_amount`.
    pub amount: f32,
    /// Display radius, derived from `amount`.  Also the pickup radius.
    pub radius: f32,
    /// Selects the delivery destination.
    pub category: Category,
    pub state: TaskState,
    /// The agent holding the claim, once one exists.
    pub claimant: Option<AgentId>,
    /// Where the task is drawn.  Equals `position` until completion, then
    /// destination + offset.
    pub anchor: Vec2,
    /// Rendering visibility flag (read-only to the core).
    pub visible: bool,
}

impl Task {
    pub fn new(id: TaskId, position: Vec2, amount: f32, category: Category, radius_factor: f32) -> Self {
        Self {
            id,
            position,
            amount,
            radius: amount / radius_factor,
            category,
            state: TaskState::Unclaimed,
            claimant: None,
            anchor: position,
            visible: true,
        }
    }

    /// `true` once any agent has claimed (or picked up, or delivered) the task.
    #[inline]
    pub fn is_claimed(&self) -> bool {
        self.state != TaskState::Unclaimed
    }

    #[inline]
    pub fn is_completed(&self) -> bool {
        self.state == TaskState::Completed
    }

    /// A task an allocator may still hand out: neither claimed nor done.
    #[inline]
    pub fn is_claimable(&self) -> bool {
        self.state == TaskState::Unclaimed
    }

    // ── Lifecycle transitions ─────────────────────────────────────────────

    /// Attempt to claim the task for `agent`.
    ///
    /// Succeeds only from `Unclaimed`; records the claimant.  Returns
    /// `false` if the task is already claimed — the caller lost a race,
    /// which is ordinary control flow, not an error.
    pub fn try_claim(&mut self, agent: AgentId) -> bool {
        if self.state != TaskState::Unclaimed {
            return false;
        }
        self.state = TaskState::Claimed;
        self.claimant = Some(agent);
        true
    }

    /// Mark the task picked up by its claimant.
    ///
    /// Only the claiming agent may load, and only from `Claimed`.
    pub fn load(&mut self, agent: AgentId) -> TaskResult<()> {
        if self.state != TaskState::Claimed {
            return Err(TaskError::InvalidTransition {
                task: self.id,
                from: self.state,
                attempted: "load",
            });
        }
        match self.claimant {
            Some(claimant) if claimant == agent => {
                self.state = TaskState::Loaded;
                Ok(())
            }
            Some(claimant) => Err(TaskError::NotClaimant {
                task: self.id,
                claimant,
                agent,
            }),
            // Unreachable when try_claim is the only entry into Claimed.
            None => Err(TaskError::InvalidTransition {
                task: self.id,
                from: self.state,
                attempted: "load",
            }),
        }
    }

    /// Complete a loaded task at its delivery destination.
    ///
    /// Relocates the display anchor to `destination + offset`.
    pub fn complete(&mut self, destination: Vec2, offset: Vec2) -> TaskResult<()> {
        if self.state != TaskState::Loaded {
            return Err(TaskError::InvalidTransition {
                task: self.id,
                from: self.state,
                attempted: "complete",
            });
        }
        self.state = TaskState::Completed;
        self.anchor = destination + offset;
        Ok(())
    }

    // ── Work model ────────────────────────────────────────────────────────

    /// Deplete `work_rate * dt` units of work, shrinking the radius.
    ///
    /// Returns `true` once the task is fully drained.  Completion still goes
    /// through the lifecycle (`complete`), so the Claimed → Loaded →
    /// Completed ordering holds for every task.
    pub fn reduce_amount(&mut self, work_rate: f32, dt: f32, radius_factor: f32) -> bool {
        self.amount = (self.amount - work_rate * dt).max(0.0);
        self.radius = self.amount / radius_factor;
        self.amount <= 0.0
    }
}
