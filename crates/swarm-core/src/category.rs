//! Task categories.
//!
//! A category selects the delivery destination for a loaded task.  The set
//! is closed: rendering collaborators may key assets off it, but the core
//! only ever matches on the enum.

use std::fmt;

/// The closed set of task categories.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Category {
    Red,
    Blue,
    Yellow,
}

impl Category {
    /// All categories, in declaration order.
    pub const ALL: [Category; 3] = [Category::Red, Category::Blue, Category::Yellow];

    /// Stable index into per-category tables.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Category::Red => 0,
            Category::Blue => 1,
            Category::Yellow => 2,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::Red => "red",
            Category::Blue => "blue",
            Category::Yellow => "yellow",
        };
        f.write_str(name)
    }
}
