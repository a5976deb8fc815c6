use swarm_bt::BtError;
use swarm_core::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Config(#[from] CoreError),

    #[error("{what} length {got} does not match agent count {expected}")]
    AgentCountMismatch {
        expected: usize,
        got: usize,
        what: &'static str,
    },

    #[error("behavior tree error: {0}")]
    Behavior(#[from] BtError),
}

pub type SimResult<T> = Result<T, SimError>;
