use std::time::{Duration, Instant};

use chase_core::{Action, Direction, DirectionRank, GridConfig};
use chase_nav::{first_direction, greedy_direction, SearchBudget, Termination};
use serde::Serialize;
use serde_json::Value;

use crate::{fallback_action, normalize, parse_snapshot};

/// Time kept back from the budget for the pipeline's own overhead and the final legality check.
pub const DECISION_MARGIN_MS: f64 = 0.05;
/// Shortest search window, however small the budget.
pub const MIN_SEARCH_WINDOW_MS: f64 = 0.1;

/// Which stage produced the returned action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionSource {
    /// Agent already stands on the target.
    AtTarget,
    /// Search reached the target; the move starts a shortest path.
    SearchExact,
    /// Search was cut short or exhausted; the move heads for the closest node seen.
    SearchBestSoFar,
    Greedy,
    Fallback,
}

/// An action plus how it was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Decision {
    pub action: Action,
    pub source: DecisionSource,
    /// `None` when no search ran (nothing legal this tick).
    pub termination: Option<Termination>,
    pub expansions: usize,
    pub elapsed_us: u64,
}

/// Normalize `snapshot` and decide. Never fails.
pub fn decide(snapshot: &Value) -> Decision {
    decide_config(&normalize(snapshot))
}

/// The game loop's entry point: one legal action for this tick.
pub fn decide_action(snapshot: &Value) -> Action {
    decide(snapshot).action
}

/// Like [`decide_action`], for raw text. Unparseable text is treated as an empty snapshot.
pub fn decide_action_str(text: &str) -> Action {
    let snapshot = parse_snapshot(text).unwrap_or_else(|err| {
        tracing::warn!(error = %err, "unreadable snapshot, using defaults");
        Value::Null
    });
    decide_action(&snapshot)
}

/// Run the pipeline on an already-normalized config.
pub fn decide_config(cfg: &GridConfig) -> Decision {
    let started = Instant::now();

    let legal = cfg.legal_directions();
    if legal.is_empty() {
        return finish(cfg, started, fallback_action(cfg), DecisionSource::Fallback, None, 0);
    }

    let rank = DirectionRank::from_seed(cfg.seed());
    let budget = SearchBudget::until(search_deadline(started, cfg.budget_ms()));
    let outcome = first_direction(cfg, &legal, &rank, budget);

    let (direction, source) = match outcome.direction.filter(|d| legal.contains(d)) {
        Some(dir) => {
            let source = match outcome.termination {
                Termination::Reached if dir == Direction::Wait => DecisionSource::AtTarget,
                Termination::Reached => DecisionSource::SearchExact,
                _ => DecisionSource::SearchBestSoFar,
            };
            (dir, source)
        }
        None => (greedy_direction(cfg, &legal, &rank), DecisionSource::Greedy),
    };

    let candidate = Action::from(direction);
    let (action, source) = if cfg.is_legal_action(candidate) {
        (candidate, source)
    } else {
        (fallback_action(cfg), DecisionSource::Fallback)
    };

    finish(
        cfg,
        started,
        action,
        source,
        Some(outcome.termination),
        outcome.expansions,
    )
}

/// `start + max(MIN_SEARCH_WINDOW_MS, budget - DECISION_MARGIN_MS)`.
///
/// A window too large to represent as an `Instant` means no deadline.
fn search_deadline(started: Instant, budget_ms: f64) -> Option<Instant> {
    let window_ms = (budget_ms - DECISION_MARGIN_MS).max(MIN_SEARCH_WINDOW_MS);
    let window = Duration::try_from_secs_f64(window_ms / 1000.0).ok()?;
    started.checked_add(window)
}

fn finish(
    cfg: &GridConfig,
    started: Instant,
    action: Action,
    source: DecisionSource,
    termination: Option<Termination>,
    expansions: usize,
) -> Decision {
    let elapsed_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);

    tracing::debug!(
        direction = %action.direction(),
        ?source,
        ?termination,
        expansions,
        elapsed_us,
        budget_ms = cfg.budget_ms(),
        "decision"
    );

    Decision {
        action,
        source,
        termination,
        expansions,
        elapsed_us,
    }
}
