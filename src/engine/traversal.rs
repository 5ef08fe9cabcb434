// Graph traversal engines
//
// The graph is implicit: nodes 0..NODE_COUNT, with edges n -> n+1 and n -> n+2.
// BFS and DFS share one loop and differ only in their frontier.

use super::StepContext;
use crate::models::RunOutcome;
use crate::render::StatusColor;
use std::collections::VecDeque;

/// Size of the fixed node space
pub const NODE_COUNT: usize = 10;

/// Node every traversal starts from
pub const START_NODE: usize = 0;

/// Result of a traversal run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Traversal {
    pub outcome: RunOutcome,
    /// Nodes in the order they were visited
    pub order: Vec<usize>,
}

/// Pending-node collection of a traversal
trait Frontier: Default + Send {
    /// Name used in the completion status
    const LABEL: &'static str;

    fn push(&mut self, node: usize);

    fn pop(&mut self) -> Option<usize>;

    /// Successors of `node` in the order they are pushed
    fn successors(node: usize) -> [usize; 2];
}

/// FIFO frontier for breadth-first search
#[derive(Default)]
struct Queue(VecDeque<usize>);

impl Frontier for Queue {
    const LABEL: &'static str = "BFS";

    fn push(&mut self, node: usize) {
        self.0.push_back(node);
    }

    fn pop(&mut self) -> Option<usize> {
        self.0.pop_front()
    }

    fn successors(node: usize) -> [usize; 2] {
        [node + 1, node + 2]
    }
}

/// LIFO frontier for depth-first search
#[derive(Default)]
struct Stack(Vec<usize>);

impl Frontier for Stack {
    const LABEL: &'static str = "DFS";

    fn push(&mut self, node: usize) {
        self.0.push(node);
    }

    fn pop(&mut self) -> Option<usize> {
        self.0.pop()
    }

    // n+2 goes in first so that n+1 is popped first
    fn successors(node: usize) -> [usize; 2] {
        [node + 2, node + 1]
    }
}

/// Bars drawn for the node space; node `k` has height `(k + 1) * 10`.
pub fn node_bars() -> Vec<f64> {
    (1..=NODE_COUNT).map(|k| (k * 10) as f64).collect()
}

pub async fn breadth_first(ctx: &StepContext) -> Traversal {
    traverse::<Queue>(ctx).await
}

pub async fn depth_first(ctx: &StepContext) -> Traversal {
    traverse::<Stack>(ctx).await
}

async fn traverse<F: Frontier>(ctx: &StepContext) -> Traversal {
    let bars = node_bars();
    let mut frontier = F::default();
    let mut visited = [false; NODE_COUNT];
    let mut order = Vec::with_capacity(NODE_COUNT);

    frontier.push(START_NODE);

    loop {
        if ctx.is_stopped() {
            return Traversal {
                outcome: RunOutcome::Aborted,
                order,
            };
        }

        let Some(node) = frontier.pop() else {
            break;
        };
        if visited[node] {
            continue;
        }

        visited[node] = true;
        order.push(node);
        ctx.render(&bars, &[node], &[]);
        ctx.set_status(&format!("Visited node {}", node), StatusColor::Lime);
        ctx.step().await;

        for next in F::successors(node) {
            if next < NODE_COUNT && !visited[next] {
                frontier.push(next);
            }
        }
    }

    ctx.render(&bars, &[], &order);
    ctx.set_status(&format!("{} Complete", F::LABEL), StatusColor::Lime);

    Traversal {
        outcome: RunOutcome::Completed,
        order,
    }
}
