//! `swarm-motion` — steering and kinematics for the rust_swarm framework.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                    |
//! |---------------|-------------------------------------------------------------|
//! | [`steering`]  | `follow` (damped arrival), `follow_axis` (aisle-constrained) |
//! | [`integrate`] | `integrate` — fixed-dt kinematic step with bounds clamp      |
//! | [`avoid`]     | `avoidance` — priority-weighted pairwise repulsion           |
//!
//! # Force model
//!
//! Steering functions accumulate forces on `Agent::acceleration` via
//! `apply_force`; nothing moves until [`integrate`] runs.  This lets the
//! driver blend seek and avoidance forces within one tick before the single
//! integration step, exactly one integration per agent per tick.

pub mod avoid;
pub mod integrate;
pub mod steering;


pub use avoid::{avoidance, yield_weight};
pub use integrate::integrate;
pub use steering::{follow, follow_axis};
