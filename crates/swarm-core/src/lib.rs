//! `swarm-core` — foundational types for the `rust_swarm` framework.
//!
//! This crate is a dependency of every other `swarm-*` crate.  It
//! intentionally has no `swarm-*` dependencies and minimal external ones
//! (only `rand` and `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module       | Contents                                             |
//! |--------------|------------------------------------------------------|
//! | [`ids`]      | `AgentId`, `TaskId`                                  |
//! | [`vec2`]     | `Vec2` planar vector math                            |
//! | [`time`]     | `Tick`, `SimClock`                                   |
//! | [`rng`]      | `AgentRng` (per-agent), `SimRng` (global)            |
//! | [`category`] | `Category` — closed task-category enumeration        |
//! | [`layout`]   | `scatter` — non-overlapping spawn positions          |
//! | [`config`]   | `SimConfig` and all sub-configuration structs        |
//! | [`error`]    | `CoreError`, `CoreResult`                            |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                         |
//! |---------|----------------------------------------------------------------|
//! | `serde` | `Serialize`/`Deserialize` on all public types, so boundary     |
//! |         | code can load configuration from TOML/JSON.                    |

pub mod category;
pub mod config;
pub mod error;
pub mod ids;
pub mod layout;
pub mod rng;
pub mod time;
pub mod vec2;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use category::Category;
pub use config::{
    AgentConfig, Bounds, DestinationTable, KinematicLimits, SimConfig, SteeringMode, TaskConfig,
};
pub use error::{CoreError, CoreResult};
pub use ids::{AgentId, TaskId};
pub use rng::{AgentRng, SimRng};
pub use time::{SimClock, Tick};
pub use vec2::Vec2;
