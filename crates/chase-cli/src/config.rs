//! CLI configuration, loaded from `chase.yaml`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const DEFAULT_CONFIG_FILE: &str = "chase.yaml";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Budget injected into snapshots that carry neither budget field
    pub default_budget_ms: Option<f64>,

    /// Pretty-print JSON output
    pub pretty: bool,

    /// Defaults for `chase bench`
    pub bench: BenchConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchConfig {
    #[serde(default = "default_bench_width")]
    pub width: i64,

    #[serde(default = "default_bench_height")]
    pub height: i64,

    /// Share of cells that start blocked, in `[0, 1]`
    #[serde(default = "default_wall_density")]
    pub wall_density: f64,

    #[serde(default = "default_iterations")]
    pub iterations: usize,

    #[serde(default = "default_bench_seed")]
    pub seed: u64,
}

fn default_bench_width() -> i64 {
    20
}
fn default_bench_height() -> i64 {
    15
}
fn default_wall_density() -> f64 {
    0.2
}
fn default_iterations() -> usize {
    1_000
}
fn default_bench_seed() -> u64 {
    0x5EED
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            width: default_bench_width(),
            height: default_bench_height(),
            wall_density: default_wall_density(),
            iterations: default_iterations(),
            seed: default_bench_seed(),
        }
    }
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            default_budget_ms: None,
            pretty: false,
            bench: BenchConfig::default(),
        }
    }
}

impl CliConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;
        let config: Self = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;
        Ok(config)
    }

    /// An explicit path must exist; otherwise `chase.yaml` is used when present.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        let fallback = PathBuf::from(DEFAULT_CONFIG_FILE);
        if fallback.exists() {
            Self::load(&fallback)
        } else {
            Ok(Self::default())
        }
    }

    /// Insert `default_budget_ms` when the snapshot has neither budget field.
    pub fn apply_defaults(&self, snapshot: &mut Value) {
        let (Some(budget), Some(obj)) = (self.default_budget_ms, snapshot.as_object_mut()) else {
            return;
        };
        if obj.contains_key("maxDecisionMs") || obj.contains_key("decisionBudgetMs") {
            return;
        }
        obj.insert("maxDecisionMs".to_owned(), Value::from(budget));
    }
}
