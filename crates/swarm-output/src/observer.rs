//! `SimOutputObserver<W>` — bridges `SimObserver` to an `OutputWriter`.

use swarm_agent::{Agent, AgentState};
use swarm_core::{SimConfig, TaskId, Tick};
use swarm_sim::SimObserver;
use swarm_task::TaskRegistry;

use crate::row::{AgentSnapshotRow, TickSummaryRow};
use crate::writer::OutputWriter;
use crate::OutputError;

fn state_label(state: AgentState) -> &'static str {
    match state {
        AgentState::Idle => "idle",
        AgentState::MovingToTask => "moving_to_task",
        AgentState::Carrying => "carrying",
    }
}

/// A [`SimObserver`] that writes agent snapshots and tick summaries to any
/// [`OutputWriter`] backend.
///
/// Errors from the writer are stored internally because `SimObserver`
/// methods have no return value.  After `sim.run()` returns, check for
/// errors with [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer: W,
    dt_secs: f32,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    /// Create an observer backed by `writer`, using `config` for tick-to-
    /// seconds conversion.
    pub fn new(writer: W, config: &SimConfig) -> Self {
        Self {
            writer,
            dt_secs: config.dt(),
            last_error: None,
        }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the sim).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: crate::OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_tick_end(&mut self, tick: Tick, agents: &[Agent], tasks: &TaskRegistry) {
        let row = TickSummaryRow {
            tick: tick.0,
            sim_time_secs: tick.0 as f32 * self.dt_secs,
            completed_tasks: tasks.completed_count() as u64,
            carrying_agents: agents
                .iter()
                .filter(|a| a.state == AgentState::Carrying)
                .count() as u64,
        };
        let result = self.writer.write_tick_summary(&row);
        self.store_err(result);
    }

    fn on_snapshot(&mut self, tick: Tick, agents: &[Agent], _tasks: &TaskRegistry) {
        let rows: Vec<AgentSnapshotRow> = agents
            .iter()
            .map(|a| AgentSnapshotRow {
                agent_id: a.id.0,
                tick: tick.0,
                x: a.position.x,
                y: a.position.y,
                heading: a.heading,
                state: state_label(a.state),
                assigned_task: a.assigned_task.unwrap_or(TaskId::INVALID).0,
                distance_moved: a.distance_moved,
                work_done: a.work_done,
            })
            .collect();

        if !rows.is_empty() {
            let result = self.writer.write_snapshots(&rows);
            self.store_err(result);
        }
    }

    fn on_sim_end(&mut self, _final_tick: Tick, _agents: &[Agent], _tasks: &TaskRegistry) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
