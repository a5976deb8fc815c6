//! Pluggable task-allocation policies.
//!
//! A policy sees only one agent's blackboard — the filtered candidate
//! list built from local sensing — and picks the task that agent should
//! commit to.  Global consistency comes from the registry's claim
//! arbitration, not from the policy.

use std::sync::Arc;

use swarm_agent::Agent;
use swarm_core::TaskId;

use crate::blackboard::Blackboard;

pub trait AllocationPolicy: Send + Sync {
    fn name(&self) -> &'static str;

    /// Pick a task from `bb.candidates`, or `None` to stay unassigned.
    fn decide(&self, agent: &Agent, bb: &Blackboard) -> Option<TaskId>;
}

/// Commit to the lowest-id candidate — the oldest task in view.
#[derive(Default)]
pub struct FirstCome;

impl AllocationPolicy for FirstCome {
    fn name(&self) -> &'static str {
        "first_come"
    }

    fn decide(&self, _agent: &Agent, bb: &Blackboard) -> Option<TaskId> {
        bb.candidates.iter().map(|t| t.id).min()
    }
}

/// Commit to the spatially closest candidate; ties break on lower id so
/// the choice stays deterministic.
#[derive(Default)]
pub struct Nearest;

impl AllocationPolicy for Nearest {
    fn name(&self) -> &'static str {
        "nearest"
    }

    fn decide(&self, agent: &Agent, bb: &Blackboard) -> Option<TaskId> {
        bb.candidates
            .iter()
            .min_by(|a, b| {
                let da = a.position.distance(agent.position);
                let db = b.position.distance(agent.position);
                da.total_cmp(&db).then(a.id.cmp(&b.id))
            })
            .map(|t| t.id)
    }
}

/// Closed set of built-in policies, for configuration files.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PolicyKind {
    #[default]
    FirstCome,
    Nearest,
}

impl PolicyKind {
    pub fn make(self) -> Arc<dyn AllocationPolicy> {
        match self {
            PolicyKind::FirstCome => Arc::new(FirstCome),
            PolicyKind::Nearest => Arc::new(Nearest),
        }
    }
}
