//! Simulation observer trait for progress reporting and data collection.

use swarm_agent::Agent;
use swarm_core::{AgentId, TaskId, Tick};
use swarm_task::TaskRegistry;

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// tick loop.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example — completion printer
///
/// ```rust,ignore
/// struct CompletionPrinter;
///
/// impl SimObserver for CompletionPrinter {
///     fn on_task_completed(&mut self, tick: Tick, agent: AgentId, task: TaskId) {
///         println!("{tick}: {agent} delivered {task}");
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before any processing.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called at the end of each tick, after integration.
    fn on_tick_end(&mut self, _tick: Tick, _agents: &[Agent], _tasks: &TaskRegistry) {}

    /// Called once per completed delivery, in ascending `AgentId` order
    /// within a tick.
    fn on_task_completed(&mut self, _tick: Tick, _agent: AgentId, _task: TaskId) {}

    /// Called at snapshot intervals (every `config.snapshot_interval_ticks`
    /// ticks).  Provides read-only access to the full world so output
    /// writers can record state without the sim knowing any format.
    fn on_snapshot(&mut self, _tick: Tick, _agents: &[Agent], _tasks: &TaskRegistry) {}

    /// Called once after the final tick completes.
    fn on_sim_end(&mut self, _final_tick: Tick, _agents: &[Agent], _tasks: &TaskRegistry) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run`
/// but don't want progress callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
