//! The three-valued result a node evaluation produces.

use std::fmt;

/// Outcome of ticking one node.
///
/// `Running` means "in progress, come back next tick" — control nodes in
/// this tree dialect skip over it rather than suspending on it, so a
/// running branch never blocks its siblings.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Status {
    Success,
    Failure,
    Running,
}

impl Status {
    #[inline]
    pub fn is_success(self) -> bool {
        self == Status::Success
    }

    #[inline]
    pub fn is_failure(self) -> bool {
        self == Status::Failure
    }

    #[inline]
    pub fn is_running(self) -> bool {
        self == Status::Running
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Status::Success => "success",
            Status::Failure => "failure",
            Status::Running => "running",
        };
        f.write_str(s)
    }
}
