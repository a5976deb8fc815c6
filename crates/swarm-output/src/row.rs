//! Plain data row types written by output backends.

/// A snapshot of one agent's pose and mission state at a given tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgentSnapshotRow {
    pub agent_id: u32,
    pub tick: u64,
    pub x: f32,
    pub y: f32,
    /// Heading in radians.
    pub heading: f32,
    /// Coarse state: `idle`, `moving_to_task`, or `carrying`.
    pub state: &'static str,
    /// Assigned task id; `u32::MAX` means unassigned.
    pub assigned_task: u32,
    pub distance_moved: f32,
    pub work_done: f32,
}

/// Summary statistics for one simulation tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickSummaryRow {
    pub tick: u64,
    pub sim_time_secs: f32,
    pub completed_tasks: u64,
    pub carrying_agents: u64,
}
