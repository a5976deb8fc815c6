//! warehouse — demo scenario for the rust_swarm framework.
//!
//! Five forklift-style agents clear a floor of scattered tasks: discover,
//! claim, haul to the per-category drop-off, repeat.  Replacement tasks
//! appear at the inbound dock as pickups happen, until the spawn budget
//! runs out.  CSV output lands in `output/warehouse/`.

use std::path::Path;
use std::time::Instant;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use swarm_agent::Agent;
use swarm_bt::PolicyKind;
use swarm_core::{AgentId, SimConfig, TaskId, Tick};
use swarm_output::{CsvWriter, OutputWriter, SimOutputObserver};
use swarm_sim::{SimBuilder, SimObserver};
use swarm_task::TaskRegistry;

// ── Constants ─────────────────────────────────────────────────────────────────

const AGENT_COUNT: usize = 5;
const TASK_COUNT: usize = 8;
const SPAWN_BUDGET: u32 = 6;
const SEED: u64 = 42;
const TICK_HZ: f32 = 20.0;
const MAX_SIM_SECS: u64 = 600;
const SNAPSHOT_INTERVAL_TICKS: u64 = 20; // once per simulated second

// ── Observer wrapper to count rows and deliveries ─────────────────────────────

struct CountingObserver<W: OutputWriter> {
    inner: SimOutputObserver<W>,
    snapshot_rows: usize,
    summary_rows: usize,
    deliveries: Vec<(Tick, AgentId, TaskId)>,
}

impl<W: OutputWriter> CountingObserver<W> {
    fn new(inner: SimOutputObserver<W>) -> Self {
        Self {
            inner,
            snapshot_rows: 0,
            summary_rows: 0,
            deliveries: Vec::new(),
        }
    }
}

impl<W: OutputWriter> SimObserver for CountingObserver<W> {
    fn on_tick_end(&mut self, tick: Tick, agents: &[Agent], tasks: &TaskRegistry) {
        self.summary_rows += 1;
        self.inner.on_tick_end(tick, agents, tasks);
    }

    fn on_task_completed(&mut self, tick: Tick, agent: AgentId, task: TaskId) {
        self.deliveries.push((tick, agent, task));
        self.inner.on_task_completed(tick, agent, task);
    }

    fn on_snapshot(&mut self, tick: Tick, agents: &[Agent], tasks: &TaskRegistry) {
        self.snapshot_rows += agents.len();
        self.inner.on_snapshot(tick, agents, tasks);
    }

    fn on_sim_end(&mut self, final_tick: Tick, agents: &[Agent], tasks: &TaskRegistry) {
        self.inner.on_sim_end(final_tick, agents, tasks);
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    println!("=== warehouse — rust_swarm demo ===");
    println!("Agents: {AGENT_COUNT}  |  Tasks: {TASK_COUNT} (+{SPAWN_BUDGET} inbound)  |  Seed: {SEED}");
    println!();

    // 1. Sim config — defaults carry the floor geometry (bounds, spawn
    //    areas, drop-off table); only the scenario scale is overridden.
    let mut config = SimConfig::default();
    config.tick_hz = TICK_HZ;
    config.total_ticks = MAX_SIM_SECS * TICK_HZ as u64;
    config.seed = SEED;
    config.snapshot_interval_ticks = SNAPSHOT_INTERVAL_TICKS;
    config.agents.quantity = AGENT_COUNT;
    config.tasks.quantity = TASK_COUNT;
    config.tasks.spawn_budget = SPAWN_BUDGET;

    // 2. Build sim — nearest-task allocation suits a compact floor.
    let mut sim = SimBuilder::new(config.clone())
        .policy(PolicyKind::Nearest.make())
        .build()?;

    // 3. Set up output.
    std::fs::create_dir_all("output/warehouse")?;
    let writer = CsvWriter::new(Path::new("output/warehouse"))?;
    let mut obs = CountingObserver::new(SimOutputObserver::new(writer, &config));

    // 4. Run until the floor is clear (or the time limit hits).
    let t0 = Instant::now();
    let finished = sim.run_until_complete(&mut obs)?;
    let elapsed = t0.elapsed();

    if let Some(e) = obs.inner.take_error() {
        eprintln!("output error: {e}");
    }

    // 5. Summary.
    println!(
        "Simulation complete in {:.3} s wall / {:.1} s simulated",
        elapsed.as_secs_f64(),
        finished.0 as f32 / TICK_HZ,
    );
    println!(
        "  tasks completed     : {} / {}",
        sim.tasks.completed_count(),
        sim.tasks.len()
    );
    println!("  agent_snapshots.csv : {} rows", obs.snapshot_rows);
    println!("  tick_summaries.csv  : {} rows", obs.summary_rows);
    println!();

    // 6. Per-agent totals.
    println!("{:<8} {:>10} {:>10} {:>12}", "Agent", "Hauled", "Work", "Distance");
    println!("{}", "-".repeat(44));
    for agent in &sim.agents {
        let hauled = obs.deliveries.iter().filter(|d| d.1 == agent.id).count();
        println!(
            "{:<8} {:>10} {:>10.1} {:>12.1}",
            agent.id.0, hauled, agent.work_done, agent.distance_moved,
        );
    }

    Ok(())
}
