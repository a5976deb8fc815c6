//! `swarm-sim` — tick loop orchestrator for the rust_swarm framework.
//!
//! # Tick loop
//!
//! ```text
//! for tick in 0..config.total_ticks:
//!   ① Snapshot   — freeze all agent broadcasts and task views; build the
//!                  spatial index.  All sensing this tick reads the frozen
//!                  world.
//!   ② Decide     — run every agent's behavior tree in ascending AgentId
//!                  order against the snapshot; claims/loads/completions
//!                  land on the live task registry (this order is the
//!                  claim arbitration rule).
//!   ③ Avoid      — blend pairwise repulsion into each agent's pending
//!                  steering force.
//!   ④ Integrate  — advance kinematics, clamp to bounds, slew headings.
//! ```
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use swarm_core::SimConfig;
//! use swarm_sim::{NoopObserver, SimBuilder};
//!
//! let mut sim = SimBuilder::new(SimConfig::default()).build()?;
//! sim.run(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod sim;


pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use sim::Sim;
