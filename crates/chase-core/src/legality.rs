//! Legality oracle: bounds, passability, and whether an action may be taken right now.

use crate::{Action, Cell, Direction, GridConfig};

impl GridConfig {
    pub fn is_inside(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.y >= 0 && cell.x < self.width() && cell.y < self.height()
    }

    /// In bounds and not blocked.
    pub fn is_passable(&self, cell: Cell) -> bool {
        self.is_inside(cell) && !self.blocked().contains(&cell)
    }

    /// `Wait` is legal whenever it is in the legal set; anything else must also land on a
    /// passable cell.
    pub fn is_legal_direction(&self, direction: Direction) -> bool {
        if !self.legal_actions().contains(&direction) {
            return false;
        }
        direction.is_wait() || self.is_passable(self.me().step(direction))
    }

    pub fn is_legal_action(&self, action: Action) -> bool {
        self.is_legal_direction(action.direction())
    }

    /// Directions that are legal this tick, in the configured order.
    pub fn legal_directions(&self) -> Vec<Direction> {
        self.legal_actions()
            .iter()
            .copied()
            .filter(|&dir| self.is_legal_direction(dir))
            .collect()
    }
}
