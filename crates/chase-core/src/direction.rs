use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One of the five moves an agent can make on a tick.
///
/// `Wait` is a movement with zero displacement; it is never a graph edge during search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "UPPERCASE"))]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
    Wait,
}

impl Direction {
    /// Canonical order. Also the unseeded tie-break order.
    pub const CANONICAL: [Direction; 5] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
        Direction::Wait,
    ];

    /// The four directions with a non-zero displacement, in canonical order.
    pub const CARDINAL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    /// Grid displacement `(dx, dy)`; `y` grows downwards.
    pub const fn delta(self) -> (i64, i64) {
        match self {
            Direction::Up => (0, -1),
            Direction::Right => (1, 0),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Wait => (0, 0),
        }
    }

    pub const fn is_wait(self) -> bool {
        matches!(self, Direction::Wait)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Direction::Up => "UP",
            Direction::Right => "RIGHT",
            Direction::Down => "DOWN",
            Direction::Left => "LEFT",
            Direction::Wait => "WAIT",
        }
    }

    /// Case-insensitive parse of a direction name (`"up"`, `"Wait"`, ...).
    pub fn parse(text: &str) -> Option<Self> {
        match text.to_uppercase().as_str() {
            "UP" => Some(Direction::Up),
            "RIGHT" => Some(Direction::Right),
            "DOWN" => Some(Direction::Down),
            "LEFT" => Some(Direction::Left),
            "WAIT" => Some(Direction::Wait),
            _ => None,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The decision returned to the game loop.
///
/// Serializes as `{"type":"MOVE","direction":"UP"}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type"))]
pub enum Action {
    #[cfg_attr(feature = "serde", serde(rename = "MOVE"))]
    Move { direction: Direction },
}

impl Action {
    pub const WAIT: Action = Action::Move {
        direction: Direction::Wait,
    };

    pub const fn direction(self) -> Direction {
        match self {
            Action::Move { direction } => direction,
        }
    }
}

impl From<Direction> for Action {
    fn from(direction: Direction) -> Self {
        Action::Move { direction }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(Direction::parse("up"), Some(Direction::Up));
        assert_eq!(Direction::parse("Right"), Some(Direction::Right));
        assert_eq!(Direction::parse("WAIT"), Some(Direction::Wait));
        assert_eq!(Direction::parse("north"), None);
        assert_eq!(Direction::parse(""), None);
    }

    #[test]
    fn only_wait_has_zero_displacement() {
        for dir in Direction::CANONICAL {
            assert_eq!(dir.delta() == (0, 0), dir.is_wait(), "{dir}");
        }
    }
}
