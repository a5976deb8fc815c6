//! Per-agent blackboard scratch space.

use rustc_hash::FxHashMap;
use swarm_agent::Broadcast;
use swarm_core::{Category, TaskId, Vec2};
use swarm_task::{Task, TaskState};

use crate::status::Status;

/// A read-only projection of a task, as sensed at the start of a tick.
///
/// Carries no claimant or mutable handle — an agent acting on a stale view
/// discovers the truth only when it touches the live registry.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TaskView {
    pub id: TaskId,
    pub position: Vec2,
    pub radius: f32,
    pub category: Category,
    pub state: TaskState,
}

impl TaskView {
    pub fn from_task(task: &Task) -> Self {
        Self {
            id: task.id,
            position: task.position,
            radius: task.radius,
            category: task.category,
            state: task.state,
        }
    }

    /// Claimable as of the snapshot.  A claim attempt can still lose the
    /// race against the live registry.
    #[inline]
    pub fn is_claimable(&self) -> bool {
        self.state == TaskState::Unclaimed
    }
}

/// One agent's private scratch space.
///
/// Action results are keyed by node name and cleared at the start of every
/// evaluation; everything else persists across ticks (notably `carrying`,
/// which is the ground truth for "am I loaded").
#[derive(Default)]
pub struct Blackboard {
    results: FxHashMap<&'static str, Status>,

    // ── Refreshed by LocalSensing each tick ───────────────────────────────
    pub position: Vec2,
    pub tasks_in_view: Vec<TaskView>,
    pub neighbors: Vec<Broadcast>,

    // ── Written by DecisionMaking ─────────────────────────────────────────
    /// Claimable tasks that survived the observed-claim filter.
    pub candidates: Vec<TaskView>,
    pub assigned_task: Option<TaskId>,

    // ── Persistent across ticks ───────────────────────────────────────────
    pub carrying: bool,
    /// Current exploration waypoint, for observers.
    pub waypoint: Option<Vec2>,
}

impl Blackboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the result an action node produced this evaluation.
    pub fn record(&mut self, node: &'static str, status: Status) {
        self.results.insert(node, status);
    }

    /// The result `node` produced this evaluation, if it ran.
    pub fn result(&self, node: &str) -> Option<Status> {
        self.results.get(node).copied()
    }

    /// Drop last evaluation's action results.  Sensing data, assignment,
    /// and the carrying flag persist.
    pub fn clear_results(&mut self) {
        self.results.clear();
    }
}
