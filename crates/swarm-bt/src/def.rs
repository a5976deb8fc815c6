//! Declarative tree definitions.
//!
//! A `NodeDef` is a plain data tree (deserializable from config with the
//! `serde` feature) that `build_tree` turns into a live `BehaviorTree`.
//! The node vocabulary is closed: an unknown kind is a startup error, not
//! a silently-ignored leaf.

use std::sync::Arc;

use crate::error::{BtError, BtResult};
use crate::nodes::{DecisionMaking, Exploration, LocalSensing, TaskExecuting};
use crate::policy::AllocationPolicy;
use crate::tree::{BehaviorNode, BehaviorTree, Fallback, Sequence};

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeDef {
    pub kind: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub children: Vec<NodeDef>,
}

impl NodeDef {
    pub fn leaf(kind: &str) -> Self {
        Self {
            kind: kind.to_owned(),
            children: Vec::new(),
        }
    }

    pub fn branch(kind: &str, children: Vec<NodeDef>) -> Self {
        Self {
            kind: kind.to_owned(),
            children,
        }
    }

    /// The stock mission tree: sense, decide, execute; explore otherwise.
    pub fn default_root() -> Self {
        Self::branch(
            "Fallback",
            vec![
                Self::branch(
                    "Sequence",
                    vec![
                        Self::leaf(LocalSensing::NAME),
                        Self::leaf(DecisionMaking::NAME),
                        Self::leaf(TaskExecuting::NAME),
                    ],
                ),
                Self::leaf(Exploration::NAME),
            ],
        )
    }
}

/// Instantiate one agent's tree from a definition.
///
/// Each call produces fresh node instances, so per-agent node state
/// (exploration waypoints) is never shared.
pub fn build_tree(def: &NodeDef, policy: &Arc<dyn AllocationPolicy>) -> BtResult<BehaviorTree> {
    Ok(BehaviorTree::new(build_node(def, policy)?))
}

fn build_node(
    def: &NodeDef,
    policy: &Arc<dyn AllocationPolicy>,
) -> BtResult<Box<dyn BehaviorNode>> {
    let node: Box<dyn BehaviorNode> = match def.kind.as_str() {
        "Sequence" | "Fallback" => {
            if def.children.is_empty() {
                return Err(BtError::Definition(format!(
                    "control node `{}` needs at least one child",
                    def.kind
                )));
            }
            let children = def
                .children
                .iter()
                .map(|c| build_node(c, policy))
                .collect::<BtResult<Vec<_>>>()?;
            if def.kind == "Sequence" {
                Box::new(Sequence::new(children))
            } else {
                Box::new(Fallback::new(children))
            }
        }
        kind => {
            if !def.children.is_empty() {
                return Err(BtError::Definition(format!(
                    "action node `{kind}` cannot have children"
                )));
            }
            match kind {
                LocalSensing::NAME => Box::new(LocalSensing),
                DecisionMaking::NAME => Box::new(DecisionMaking::new(Arc::clone(policy))),
                TaskExecuting::NAME => Box::new(TaskExecuting),
                Exploration::NAME => Box::new(Exploration::new()),
                unknown => return Err(BtError::UnknownNode(unknown.to_owned())),
            }
        }
    };
    Ok(node)
}
