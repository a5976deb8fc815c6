//! `swarm-task` — task entity and lifecycle for the rust_swarm framework.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                  |
//! |--------------|-----------------------------------------------------------|
//! | [`task`]     | `Task`, `TaskState` — the lifecycle state machine         |
//! | [`registry`] | `TaskRegistry` — owning store + dynamic spawning          |
//! | [`error`]    | `TaskError`, `TaskResult<T>`                              |
//!
//! # Lifecycle
//!
//! ```text
//! Unclaimed ──try_claim──▶ Claimed ──load──▶ Loaded ──complete──▶ Completed
//! ```
//!
//! At most one agent ever holds a claim; `try_claim` is the only entry into
//! `Claimed` and fails (returning `false`, not an error) once a claimant is
//! recorded.  Losing a claim race is ordinary control flow — the loser
//! re-enters decision-making on its next tick.

pub mod error;
pub mod registry;
pub mod task;


pub use error::{TaskError, TaskResult};
pub use registry::TaskRegistry;
pub use task::{Task, TaskState};
