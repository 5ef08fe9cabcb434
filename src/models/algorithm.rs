use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Algorithms the visualizer knows how to animate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    Bubble,
    Insertion,
    Merge,
    Quick,
    Bfs,
    Dfs,
}

/// Returned when a selection names no known algorithm.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown algorithm: {0}")]
pub struct UnknownAlgorithm(pub String);

impl Algorithm {
    /// Every selectable algorithm, in menu order.
    pub const ALL: [Algorithm; 6] = [
        Algorithm::Bubble,
        Algorithm::Insertion,
        Algorithm::Merge,
        Algorithm::Quick,
        Algorithm::Bfs,
        Algorithm::Dfs,
    ];

    /// Short name used by the command line and the config file.
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Bubble => "bubble",
            Algorithm::Insertion => "insertion",
            Algorithm::Merge => "merge",
            Algorithm::Quick => "quick",
            Algorithm::Bfs => "bfs",
            Algorithm::Dfs => "dfs",
        }
    }

    /// Description shown in the explanation panel when a run starts.
    pub fn explanation(self) -> &'static str {
        match self {
            Algorithm::Bubble => {
                "Bubble Sort: Repeatedly swap adjacent elements if they're in the wrong order."
            }
            Algorithm::Insertion => {
                "Insertion Sort: Insert elements into their correct sorted position."
            }
            Algorithm::Merge => "Merge Sort: Recursively divide, then merge sorted halves.",
            Algorithm::Quick => "Quick Sort: Choose pivot, partition, and sort recursively.",
            Algorithm::Bfs => "Breadth-First Search: Visit nodes level-by-level.",
            Algorithm::Dfs => "Depth-First Search: Visit nodes deeply before backtracking.",
        }
    }

    /// Traversals animate the fixed node space instead of the working sequence.
    pub fn is_traversal(self) -> bool {
        matches!(self, Algorithm::Bfs | Algorithm::Dfs)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = UnknownAlgorithm;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Algorithm::ALL
            .into_iter()
            .find(|algorithm| algorithm.name() == wanted)
            .ok_or_else(|| UnknownAlgorithm(s.trim().to_string()))
    }
}
