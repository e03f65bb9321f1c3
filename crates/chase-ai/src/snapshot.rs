use chase_core::GridConfig;
use serde_json::{json, Value};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot text is empty")]
    Empty,

    #[error("snapshot is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Parse snapshot text. Shape is not checked here; [`crate::normalize`] accepts any JSON value.
pub fn parse_snapshot(text: &str) -> Result<Value, SnapshotError> {
    if text.trim().is_empty() {
        return Err(SnapshotError::Empty);
    }
    Ok(serde_json::from_str(text)?)
}

/// Re-encode a config in the snapshot shape the game loop sends.
///
/// Normalizing the result yields the same config.
pub fn to_snapshot(cfg: &GridConfig) -> Value {
    let blocked: Vec<[i64; 2]> = cfg.blocked_sorted().iter().map(|c| [c.x, c.y]).collect();
    let me = cfg.me();
    let target = cfg.target();

    let mut snapshot = json!({
        "grid": {
            "width": cfg.width(),
            "height": cfg.height(),
            "blocked": blocked,
        },
        "me": { "x": me.x, "y": me.y },
        "target": { "x": target.x, "y": target.y },
        "legalActions": cfg.legal_actions(),
        "maxDecisionMs": cfg.budget_ms(),
    });

    if let (Some(seed), Some(obj)) = (cfg.seed(), snapshot.as_object_mut()) {
        obj.insert("rngSeed".to_owned(), Value::String(seed.to_owned()));
    }
    snapshot
}
