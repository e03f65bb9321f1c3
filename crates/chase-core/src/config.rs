use std::collections::HashSet;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::Direction;

pub const DEFAULT_WIDTH: i64 = 20;
pub const DEFAULT_HEIGHT: i64 = 15;
/// Decision budget used when the caller supplies none.
pub const DEFAULT_BUDGET_MS: f64 = 2.0;
/// Smallest decision budget a config will carry.
pub const MIN_BUDGET_MS: f64 = 0.2;

/// Grid coordinate. `(0, 0)` is the top-left cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Cell {
    pub x: i64,
    pub y: i64,
}

impl Cell {
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }

    pub fn manhattan(self, other: Cell) -> u64 {
        self.x
            .abs_diff(other.x)
            .saturating_add(self.y.abs_diff(other.y))
    }
}

/// Strict, already-sanitized description of one decision.
///
/// Every constructor and `with_*` method clamps instead of failing, so a `GridConfig` always
/// satisfies:
/// - `width >= 1` and `height >= 1`
/// - `me` and `target` lie inside `[0, width) x [0, height)`
/// - the legal set is non-empty, duplicate-free, and keeps the caller's order
/// - the budget is finite and at least [`MIN_BUDGET_MS`]
///
/// Blocked cells may lie outside the grid; they are simply never consulted.
#[derive(Debug, Clone, PartialEq)]
pub struct GridConfig {
    width: i64,
    height: i64,
    blocked: HashSet<Cell>,
    legal: Vec<Direction>,
    me: Cell,
    target: Cell,
    seed: Option<String>,
    budget_ms: f64,
}

impl GridConfig {
    /// An open grid with the agent at the origin and the target in the bottom-right corner.
    pub fn new(width: i64, height: i64) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        Self {
            width,
            height,
            blocked: HashSet::new(),
            legal: Direction::CANONICAL.to_vec(),
            me: Cell::new(0, 0),
            target: Cell::new(width - 1, height - 1),
            seed: None,
            budget_ms: DEFAULT_BUDGET_MS,
        }
    }

    pub fn with_me(mut self, me: Cell) -> Self {
        self.me = self.clamp(me);
        self
    }

    pub fn with_target(mut self, target: Cell) -> Self {
        self.target = self.clamp(target);
        self
    }

    pub fn with_blocked<I>(mut self, cells: I) -> Self
    where
        I: IntoIterator<Item = Cell>,
    {
        self.blocked.extend(cells);
        self
    }

    /// Replace the legal set. Duplicates are dropped; an empty set falls back to all five.
    pub fn with_legal_actions<I>(mut self, directions: I) -> Self
    where
        I: IntoIterator<Item = Direction>,
    {
        let mut legal = Vec::with_capacity(Direction::CANONICAL.len());
        for dir in directions {
            if !legal.contains(&dir) {
                legal.push(dir);
            }
        }
        if legal.is_empty() {
            legal = Direction::CANONICAL.to_vec();
        }
        self.legal = legal;
        self
    }

    pub fn with_seed(mut self, seed: Option<impl Into<String>>) -> Self {
        self.seed = seed.map(Into::into);
        self
    }

    /// Non-finite budgets fall back to [`DEFAULT_BUDGET_MS`].
    pub fn with_budget_ms(mut self, budget_ms: f64) -> Self {
        let budget_ms = if budget_ms.is_finite() {
            budget_ms
        } else {
            DEFAULT_BUDGET_MS
        };
        self.budget_ms = budget_ms.max(MIN_BUDGET_MS);
        self
    }

    pub fn width(&self) -> i64 {
        self.width
    }

    pub fn height(&self) -> i64 {
        self.height
    }

    pub fn me(&self) -> Cell {
        self.me
    }

    pub fn target(&self) -> Cell {
        self.target
    }

    pub fn blocked(&self) -> &HashSet<Cell> {
        &self.blocked
    }

    /// Blocked cells in `(y, x)` order, for stable output.
    pub fn blocked_sorted(&self) -> Vec<Cell> {
        let mut cells: Vec<Cell> = self.blocked.iter().copied().collect();
        cells.sort_by_key(|c| (c.y, c.x));
        cells
    }

    /// Configured legal set, in the caller's order.
    pub fn legal_actions(&self) -> &[Direction] {
        &self.legal
    }

    pub fn seed(&self) -> Option<&str> {
        self.seed.as_deref()
    }

    pub fn budget_ms(&self) -> f64 {
        self.budget_ms
    }

    fn clamp(&self, cell: Cell) -> Cell {
        Cell {
            x: cell.x.clamp(0, self.width - 1),
            y: cell.y.clamp(0, self.height - 1),
        }
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimensions_are_at_least_one() {
        let cfg = GridConfig::new(0, -4);
        assert_eq!((cfg.width(), cfg.height()), (1, 1));
        assert_eq!(cfg.me(), Cell::new(0, 0));
        assert_eq!(cfg.target(), Cell::new(0, 0));
    }

    #[test]
    fn positions_are_clamped_into_bounds() {
        let cfg = GridConfig::new(5, 4)
            .with_me(Cell::new(-3, 9))
            .with_target(Cell::new(100, -1));
        assert_eq!(cfg.me(), Cell::new(0, 3));
        assert_eq!(cfg.target(), Cell::new(4, 0));
    }

    #[test]
    fn budget_is_floored_and_defaulted() {
        assert_eq!(GridConfig::default().budget_ms(), DEFAULT_BUDGET_MS);
        assert_eq!(GridConfig::default().with_budget_ms(0.0).budget_ms(), MIN_BUDGET_MS);
        assert_eq!(
            GridConfig::default().with_budget_ms(f64::NAN).budget_ms(),
            DEFAULT_BUDGET_MS
        );
        assert_eq!(GridConfig::default().with_budget_ms(7.5).budget_ms(), 7.5);
    }

    #[test]
    fn legal_set_is_deduplicated_and_never_empty() {
        let cfg = GridConfig::default().with_legal_actions([
            Direction::Left,
            Direction::Wait,
            Direction::Left,
        ]);
        assert_eq!(cfg.legal_actions(), &[Direction::Left, Direction::Wait]);

        let cfg = GridConfig::default().with_legal_actions([]);
        assert_eq!(cfg.legal_actions(), &Direction::CANONICAL);
    }

    #[test]
    fn manhattan_saturates_instead_of_overflowing() {
        let a = Cell::new(i64::MIN, i64::MIN);
        let b = Cell::new(i64::MAX, i64::MAX);
        assert_eq!(a.manhattan(b), u64::MAX);
    }
}
