use thiserror::Error;

pub type BtResult<T> = Result<T, BtError>;

/// Errors from building a behavior tree out of a declarative definition.
#[derive(Error, Debug)]
pub enum BtError {
    #[error("unknown behavior node kind `{0}`")]
    UnknownNode(String),

    #[error("invalid tree definition: {0}")]
    Definition(String),
}
