use thiserror::Error;

use swarm_core::{AgentId, TaskId};

use crate::TaskState;

#[derive(Debug, Error)]
pub enum TaskError {
    #[error("task {task}: cannot {attempted} from state {from:?}")]
    InvalidTransition {
        task: TaskId,
        from: TaskState,
        attempted: &'static str,
    },

    #[error("task {task} is claimed by {claimant}, not {agent}")]
    NotClaimant {
        task: TaskId,
        claimant: AgentId,
        agent: AgentId,
    },
}

pub type TaskResult<T> = Result<T, TaskError>;
