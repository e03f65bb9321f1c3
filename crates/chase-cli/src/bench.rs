//! Reproducible timing runs over seeded random grids.

use std::collections::BTreeMap;

use chase_ai::{decide_config, DecisionSource};
use chase_core::{Cell, GridConfig, SplitMix64};

use crate::config::BenchConfig;

#[derive(Debug, Default)]
pub struct BenchReport {
    pub decisions: usize,
    pub min_us: u64,
    pub max_us: u64,
    pub mean_us: f64,
    pub over_budget: usize,
    pub sources: BTreeMap<String, usize>,
}

/// Next scenario drawn from `rng`; the same config and RNG state always yield the same grid.
pub fn scenario(config: &BenchConfig, rng: &mut SplitMix64, budget_ms: f64) -> GridConfig {
    let width = config.width.max(1);
    let height = config.height.max(1);
    let density = config.wall_density.clamp(0.0, 1.0);

    let me = random_cell(rng, width, height);
    let target = random_cell(rng, width, height);

    let mut blocked = Vec::new();
    for y in 0..height {
        for x in 0..width {
            if rng.next_f64_unit() < density {
                blocked.push(Cell::new(x, y));
            }
        }
    }

    GridConfig::new(width, height)
        .with_me(me)
        .with_target(target)
        .with_blocked(blocked.into_iter().filter(|&c| c != me))
        .with_seed(Some(rng.next_below(1 << 16).to_string()))
        .with_budget_ms(budget_ms)
}

fn random_cell(rng: &mut SplitMix64, width: i64, height: i64) -> Cell {
    let x = rng.next_below(width as u64) as i64;
    let y = rng.next_below(height as u64) as i64;
    Cell::new(x, y)
}

pub fn run(config: &BenchConfig, budget_ms: f64) -> BenchReport {
    let mut rng = SplitMix64::new(config.seed);
    let mut report = BenchReport {
        min_us: u64::MAX,
        ..BenchReport::default()
    };
    let mut total_us: u128 = 0;

    for i in 0..config.iterations {
        let cfg = scenario(config, &mut rng, budget_ms);
        let decision = decide_config(&cfg);

        report.decisions += 1;
        report.min_us = report.min_us.min(decision.elapsed_us);
        report.max_us = report.max_us.max(decision.elapsed_us);
        total_us += u128::from(decision.elapsed_us);
        if decision.elapsed_us as f64 > cfg.budget_ms() * 1000.0 {
            report.over_budget += 1;
            tracing::debug!(iteration = i, elapsed_us = decision.elapsed_us, "over budget");
        }
        *report.sources.entry(source_name(decision.source).to_owned()).or_default() += 1;
    }

    if report.decisions == 0 {
        report.min_us = 0;
    } else {
        report.mean_us = total_us as f64 / report.decisions as f64;
    }
    report
}

fn source_name(source: DecisionSource) -> &'static str {
    match source {
        DecisionSource::AtTarget => "at_target",
        DecisionSource::SearchExact => "search_exact",
        DecisionSource::SearchBestSoFar => "search_best_so_far",
        DecisionSource::Greedy => "greedy",
        DecisionSource::Fallback => "fallback",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small() -> BenchConfig {
        BenchConfig {
            width: 8,
            height: 6,
            wall_density: 0.25,
            iterations: 25,
            seed: 11,
        }
    }

    #[test]
    fn scenarios_are_reproducible() {
        let config = small();
        let mut a = SplitMix64::new(config.seed);
        let mut b = SplitMix64::new(config.seed);
        for _ in 0..5 {
            assert_eq!(scenario(&config, &mut a, 2.0), scenario(&config, &mut b, 2.0));
        }
    }

    #[test]
    fn agent_never_starts_on_a_wall() {
        let config = BenchConfig {
            wall_density: 1.0,
            ..small()
        };
        let mut rng = SplitMix64::new(3);
        let cfg = scenario(&config, &mut rng, 2.0);
        assert!(cfg.is_passable(cfg.me()));
    }

    #[test]
    fn report_counts_every_decision() {
        let report = run(&small(), 5.0);
        assert_eq!(report.decisions, 25);
        assert_eq!(report.sources.values().sum::<usize>(), 25);
        assert!(report.min_us <= report.max_us);
    }
}
