use chase_core::{Direction, DirectionRank, GridConfig};

/// One-step chooser used when the search produced nothing usable.
///
/// Picks the legal non-`Wait` direction whose destination is closest (Manhattan) to the target,
/// breaking exact ties with `rank`. With no such direction it prefers `Wait` when legal, then
/// the first entry of `legal`, then `Wait` unconditionally.
pub fn greedy_direction(cfg: &GridConfig, legal: &[Direction], rank: &DirectionRank) -> Direction {
    let me = cfg.me();
    let target = cfg.target();

    let best = legal
        .iter()
        .copied()
        .filter(|dir| !dir.is_wait())
        .min_by_key(|&dir| (me.step(dir).manhattan(target), rank.rank(dir)));

    if let Some(dir) = best {
        return dir;
    }
    if legal.contains(&Direction::Wait) {
        return Direction::Wait;
    }
    legal.first().copied().unwrap_or(Direction::Wait)
}
