//! Behavior-tree decision layer.
//!
//! Every agent owns one tree instance plus a [`Blackboard`] scratch space.
//! The driver evaluates trees once per tick against an immutable
//! begin-of-tick [`WorldSnapshot`]; the only mutable world state a node may
//! touch is the live task registry handed in through [`TickContext`].
//!
//! | Module       | Contents                                              |
//! |--------------|-------------------------------------------------------|
//! | `status`     | Three-valued node result                              |
//! | `blackboard` | Per-agent scratch space and `TaskView`                |
//! | `snapshot`   | Begin-of-tick world view with spatial index           |
//! | `context`    | Per-tick evaluation context                           |
//! | `tree`       | Node trait, `Sequence`/`Fallback`, `BehaviorTree`     |
//! | `nodes`      | The four built-in action nodes                        |
//! | `policy`     | Pluggable task-allocation policies                    |
//! | `def`        | Declarative tree definitions and the node factory     |

mod blackboard;
mod context;
mod def;
mod error;
mod nodes;
mod policy;
mod snapshot;
mod status;
mod tree;

#[cfg(test)]
mod tests;

pub use blackboard::{Blackboard, TaskView};
pub use context::TickContext;
pub use def::{build_tree, NodeDef};
pub use error::{BtError, BtResult};
pub use nodes::{DecisionMaking, Exploration, LocalSensing, TaskExecuting};
pub use policy::{AllocationPolicy, FirstCome, Nearest, PolicyKind};
pub use snapshot::WorldSnapshot;
pub use status::Status;
pub use tree::{BehaviorNode, BehaviorTree, Fallback, Sequence};
