//! The agent entity.

use std::collections::VecDeque;

use swarm_core::{AgentConfig, AgentId, KinematicLimits, TaskId, Vec2};

/// Coarse agent state, shared over local radio and used by collision
/// avoidance to rank right-of-way.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AgentState {
    #[default]
    Idle,
    MovingToTask,
    Carrying,
}

impl AgentState {
    /// Right-of-way rank: higher keeps course, lower yields.
    #[inline]
    pub fn priority(self) -> u8 {
        match self {
            AgentState::Idle => 0,
            AgentState::MovingToTask => 1,
            AgentState::Carrying => 2,
        }
    }
}

/// The message an agent shares over bounded-range communication.
///
/// A self-declared, possibly-stale fact — receivers treat `assigned_task`
/// as "what that agent believed last tick", never as a globally consistent
/// view.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Broadcast {
    pub id: AgentId,
    pub position: Vec2,
    pub state: AgentState,
    pub assigned_task: Option<TaskId>,
}

/// One autonomous mobile agent.
///
/// Created once at start, never destroyed.  Holds only id-based references
/// to tasks; the task registry itself belongs to the driver.
#[derive(Clone, Debug)]
pub struct Agent {
    /// Unique, immutable id — also the index into the driver's per-agent
    /// arrays.
    pub id: AgentId,

    // ── Pose ──────────────────────────────────────────────────────────────
    pub position: Vec2,
    pub velocity: Vec2,
    pub acceleration: Vec2,
    /// Heading in radians, slewed toward the velocity direction.
    pub heading: f32,

    // ── Limits and ranges ─────────────────────────────────────────────────
    pub limits: KinematicLimits,
    pub communication_radius: f32,
    pub situation_awareness_radius: f32,
    pub work_rate: f32,

    // ── Mission state ─────────────────────────────────────────────────────
    pub state: AgentState,
    /// The task this agent currently intends to service.
    pub assigned_task: Option<TaskId>,
    /// Planned task sequence (visualization only; not consumed by the core).
    pub planned: Vec<TaskId>,

    // ── Counters ──────────────────────────────────────────────────────────
    pub distance_moved: f32,
    pub work_done: f32,

    /// Recent positions for track rendering, bounded by config.
    pub track: VecDeque<Vec2>,
    track_len: usize,
}

impl Agent {
    pub fn new(id: AgentId, position: Vec2, cfg: &AgentConfig) -> Self {
        Self {
            id,
            position,
            velocity: Vec2::ZERO,
            acceleration: Vec2::ZERO,
            heading: 0.0,
            limits: cfg.limits,
            communication_radius: cfg.communication_radius,
            situation_awareness_radius: cfg.situation_awareness_radius,
            work_rate: cfg.work_rate,
            state: AgentState::Idle,
            assigned_task: None,
            planned: Vec::new(),
            distance_moved: 0.0,
            work_done: 0.0,
            track: VecDeque::with_capacity(cfg.track_len),
            track_len: cfg.track_len,
        }
    }

    /// Accumulate a steering force for this tick.
    #[inline]
    pub fn apply_force(&mut self, force: Vec2) {
        self.acceleration += force;
    }

    /// Append the current position to the track ring.
    pub fn record_track(&mut self) {
        if self.track_len == 0 {
            return;
        }
        if self.track.len() == self.track_len {
            self.track.pop_front();
        }
        self.track.push_back(self.position);
    }

    /// The message this agent currently shares with neighbors.
    pub fn broadcast(&self) -> Broadcast {
        Broadcast {
            id: self.id,
            position: self.position,
            state: self.state,
            assigned_task: self.assigned_task,
        }
    }

    /// Zero velocity and pending forces (scenario resets).
    pub fn reset_movement(&mut self) {
        self.velocity = Vec2::ZERO;
        self.acceleration = Vec2::ZERO;
    }
}
