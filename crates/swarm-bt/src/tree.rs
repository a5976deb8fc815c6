//! The node trait, the two control nodes, and the tree wrapper.

use swarm_agent::Agent;
use swarm_core::AgentRng;

use crate::blackboard::Blackboard;
use crate::context::TickContext;
use crate::status::Status;

/// One node in a behavior tree.
///
/// Action nodes record their result on the blackboard under their name
/// before returning; control nodes never write the blackboard.
pub trait BehaviorNode {
    fn name(&self) -> &'static str;

    fn tick(
        &mut self,
        agent: &mut Agent,
        bb: &mut Blackboard,
        ctx: &mut TickContext<'_>,
        rng: &mut AgentRng,
    ) -> Status;
}

// ── Control nodes ─────────────────────────────────────────────────────────────

/// Evaluate children in order; `Running` children are skipped, the first
/// `Failure` aborts with `Failure`, otherwise the sequence succeeds.
///
/// Skipping `Running` (instead of suspending on it) lets a long-lived leg
/// like task execution coexist with later siblings in the same tick.
pub struct Sequence {
    children: Vec<Box<dyn BehaviorNode>>,
}

impl Sequence {
    pub fn new(children: Vec<Box<dyn BehaviorNode>>) -> Self {
        Self { children }
    }
}

impl BehaviorNode for Sequence {
    fn name(&self) -> &'static str {
        "Sequence"
    }

    fn tick(
        &mut self,
        agent: &mut Agent,
        bb: &mut Blackboard,
        ctx: &mut TickContext<'_>,
        rng: &mut AgentRng,
    ) -> Status {
        for child in &mut self.children {
            match child.tick(agent, bb, ctx, rng) {
                Status::Running => continue,
                Status::Failure => return Status::Failure,
                Status::Success => {}
            }
        }
        Status::Success
    }
}

/// Evaluate children in order; `Running` children are skipped, the first
/// `Success` returns immediately, and the fallback fails only if every
/// child failed.
pub struct Fallback {
    children: Vec<Box<dyn BehaviorNode>>,
}

impl Fallback {
    pub fn new(children: Vec<Box<dyn BehaviorNode>>) -> Self {
        Self { children }
    }
}

impl BehaviorNode for Fallback {
    fn name(&self) -> &'static str {
        "Fallback"
    }

    fn tick(
        &mut self,
        agent: &mut Agent,
        bb: &mut Blackboard,
        ctx: &mut TickContext<'_>,
        rng: &mut AgentRng,
    ) -> Status {
        for child in &mut self.children {
            match child.tick(agent, bb, ctx, rng) {
                Status::Running => continue,
                Status::Failure => continue,
                Status::Success => return Status::Success,
            }
        }
        Status::Failure
    }
}

// ── Tree ──────────────────────────────────────────────────────────────────────

/// One agent's decision tree.
pub struct BehaviorTree {
    root: Box<dyn BehaviorNode>,
}

impl std::fmt::Debug for BehaviorTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BehaviorTree").finish_non_exhaustive()
    }
}

impl BehaviorTree {
    pub fn new(root: Box<dyn BehaviorNode>) -> Self {
        Self { root }
    }

    /// Run one evaluation.  Last tick's action results are cleared first;
    /// persistent blackboard fields carry over.
    pub fn run(
        &mut self,
        agent: &mut Agent,
        bb: &mut Blackboard,
        ctx: &mut TickContext<'_>,
        rng: &mut AgentRng,
    ) -> Status {
        bb.clear_results();
        self.root.tick(agent, bb, ctx, rng)
    }
}
