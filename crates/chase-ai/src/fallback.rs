use chase_core::{Action, GridConfig};

/// Last line of defence: `WAIT` if legal, else the first legal action in configured order,
/// else `WAIT` anyway.
pub fn fallback_action(cfg: &GridConfig) -> Action {
    if cfg.is_legal_action(Action::WAIT) {
        return Action::WAIT;
    }

    cfg.legal_actions()
        .iter()
        .map(|&dir| Action::from(dir))
        .find(|&action| cfg.is_legal_action(action))
        .unwrap_or(Action::WAIT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chase_core::{Cell, Direction};

    #[test]
    fn prefers_wait() {
        let cfg = GridConfig::new(3, 3).with_me(Cell::new(1, 1));
        assert_eq!(fallback_action(&cfg), Action::WAIT);
    }

    #[test]
    fn first_legal_when_wait_is_not_allowed() {
        let cfg = GridConfig::new(3, 3)
            .with_me(Cell::new(0, 0))
            .with_legal_actions([Direction::Up, Direction::Down, Direction::Right]);
        assert_eq!(fallback_action(&cfg), Action::from(Direction::Down));
    }

    #[test]
    fn wait_when_nothing_is_legal() {
        let cfg = GridConfig::new(1, 1).with_legal_actions([Direction::Left]);
        assert_eq!(fallback_action(&cfg), Action::WAIT);
    }
}
