//! `swarm-agent` — the agent entity for the rust_swarm framework.
//!
//! # Crate layout
//!
//! | Module    | Contents                                                 |
//! |-----------|----------------------------------------------------------|
//! | [`agent`] | `Agent`, `AgentState`, `Broadcast`                       |
//! | [`spawn`] | `spawn_agents` — deterministic initial population        |
//!
//! # Ownership model
//!
//! The driver owns `Vec<Agent>`; everything else refers to agents by
//! `AgentId` (which doubles as the index into that vector and into the
//! parallel blackboard/tree/RNG vectors).  An agent exclusively owns its
//! own mutable fields and never touches another agent's state — it only
//! observes [`Broadcast`] messages relayed through the per-tick snapshot.

pub mod agent;
pub mod spawn;


pub use agent::{Agent, AgentState, Broadcast};
pub use spawn::spawn_agents;
