use core::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, HashMap};
use std::time::Instant;

use chase_core::{Cell, Direction, DirectionRank, GridConfig};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Limits for one search call.
///
/// The deadline is checked once per iteration, before a node is popped, so the search can
/// overrun it by at most one expansion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchBudget {
    pub deadline: Option<Instant>,
    pub max_expansions: usize,
}

impl SearchBudget {
    pub fn unbounded() -> Self {
        Self {
            deadline: None,
            max_expansions: usize::MAX,
        }
    }

    pub fn until(deadline: Option<Instant>) -> Self {
        Self {
            deadline,
            ..Self::unbounded()
        }
    }

    pub fn with_max_expansions(mut self, max_expansions: usize) -> Self {
        self.max_expansions = max_expansions;
        self
    }

    fn exceeded(&self, expansions: usize) -> Option<Termination> {
        if self.deadline.is_some_and(|d| Instant::now() >= d) {
            return Some(Termination::DeadlineExceeded);
        }
        if expansions >= self.max_expansions {
            return Some(Termination::ExpansionLimit);
        }
        None
    }
}

impl Default for SearchBudget {
    fn default() -> Self {
        Self::unbounded()
    }
}

/// Why the search stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Termination {
    /// The target was popped; the direction is the first step of a shortest path.
    Reached,
    /// Frontier ran dry before the target: no path exists.
    Exhausted,
    DeadlineExceeded,
    ExpansionLimit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOutcome {
    /// First step toward the target, or toward the closest node seen when cut short.
    pub direction: Option<Direction>,
    pub termination: Termination,
    pub expansions: usize,
}

#[derive(Debug, Clone, Copy)]
struct OpenNode {
    cell: Cell,
    g: u64,
    h: u64,
    /// Direction of the first hop from the start; `None` only for the start node.
    first: Option<Direction>,
    rank: u8,
}

impl OpenNode {
    fn f(&self) -> u64 {
        self.g.saturating_add(self.h)
    }

    /// Smaller key expands first: lower `f`, lower `h`, deeper `g`, tie-break rank, then `y`, `x`.
    fn key(&self) -> (u64, u64, Reverse<u64>, u8, i64, i64) {
        (
            self.f(),
            self.h,
            Reverse(self.g),
            self.rank,
            self.cell.y,
            self.cell.x,
        )
    }
}

impl PartialEq for OpenNode {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for OpenNode {}

impl PartialOrd for OpenNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OpenNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering to make BinaryHeap behave like a min-heap.
        other.key().cmp(&self.key())
    }
}

/// Anytime A* from `cfg.me()` to `cfg.target()` on the 4-connected grid with unit step cost.
///
/// Returns the first direction of the best plan found:
/// - the start of a shortest path when the target is reached,
/// - otherwise the first hop toward the node with the smallest heuristic distance seen, provided
///   it improved on the start's distance (else `None`).
///
/// `legal` restricts only the first hop; deeper nodes expand all four directions. The target
/// cell is always enterable, even when it is marked blocked.
///
/// Equal `(f, h, g, rank, y, x)` keys cannot coexist in the frontier because a cell is only
/// re-queued on a strictly smaller `g`, so the pop order is fully determined by the key.
pub fn first_direction(
    cfg: &GridConfig,
    legal: &[Direction],
    rank: &DirectionRank,
    budget: SearchBudget,
) -> SearchOutcome {
    let start = cfg.me();
    let target = cfg.target();

    if start == target {
        return SearchOutcome {
            direction: Some(Direction::Wait),
            termination: Termination::Reached,
            expansions: 0,
        };
    }

    let start_h = start.manhattan(target);
    let mut open = BinaryHeap::<OpenNode>::new();
    let mut g_score: HashMap<Cell, u64> = HashMap::new();

    g_score.insert(start, 0);
    open.push(OpenNode {
        cell: start,
        g: 0,
        h: start_h,
        first: None,
        rank: rank.rank(Direction::Wait),
    });

    let mut best_direction = None;
    let mut best_distance = start_h;
    let mut expansions: usize = 0;

    let termination = loop {
        if open.is_empty() {
            break Termination::Exhausted;
        }
        if let Some(reason) = budget.exceeded(expansions) {
            break reason;
        }
        let Some(node) = open.pop() else {
            break Termination::Exhausted;
        };
        expansions += 1;

        if node.cell == target {
            return SearchOutcome {
                direction: Some(node.first.unwrap_or(Direction::Wait)),
                termination: Termination::Reached,
                expansions,
            };
        }

        if let Some(first) = node.first {
            if node.h < best_distance {
                best_distance = node.h;
                best_direction = Some(first);
            }
        }

        for dir in Direction::CARDINAL {
            if node.first.is_none() && !legal.contains(&dir) {
                continue;
            }

            let next = node.cell.step(dir);
            if next != target && !cfg.is_passable(next) {
                continue;
            }

            let tentative_g = node.g.saturating_add(1);
            if g_score.get(&next).is_some_and(|&prev| tentative_g >= prev) {
                continue;
            }
            g_score.insert(next, tentative_g);

            let first = node.first.unwrap_or(dir);
            open.push(OpenNode {
                cell: next,
                g: tentative_g,
                h: next.manhattan(target),
                first: Some(first),
                rank: rank.rank(first),
            });
        }
    };

    SearchOutcome {
        direction: best_direction,
        termination,
        expansions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(x: i64, y: i64, g: u64, h: u64, rank: u8) -> OpenNode {
        OpenNode {
            cell: Cell::new(x, y),
            g,
            h,
            first: Some(Direction::Up),
            rank,
        }
    }

    fn pop_order(nodes: Vec<OpenNode>) -> Vec<(i64, i64)> {
        let mut heap: BinaryHeap<OpenNode> = nodes.into_iter().collect();
        let mut out = Vec::new();
        while let Some(n) = heap.pop() {
            out.push((n.cell.x, n.cell.y));
        }
        out
    }

    #[test]
    fn lower_f_then_lower_h_first() {
        let order = pop_order(vec![node(0, 0, 3, 5, 0), node(1, 0, 4, 3, 0), node(2, 0, 1, 6, 0)]);
        // f: 8, 7, 7 -> the f=7 pair splits on h (3 before 6).
        assert_eq!(order, vec![(1, 0), (2, 0), (0, 0)]);
    }

    #[test]
    fn equal_f_prefers_the_node_that_travelled_further() {
        // f = 6 for both; the deeper node is closer to the goal.
        let order = pop_order(vec![node(0, 0, 1, 5, 0), node(4, 4, 4, 2, 3)]);
        assert_eq!(order, vec![(4, 4), (0, 0)]);
    }

    #[test]
    fn rank_then_y_then_x_break_remaining_ties() {
        let order = pop_order(vec![
            node(3, 1, 2, 2, 1),
            node(2, 1, 2, 2, 0),
            node(1, 2, 2, 2, 0),
            node(0, 1, 2, 2, 0),
        ]);
        assert_eq!(order, vec![(0, 1), (2, 1), (1, 2), (3, 1)]);
    }
}
