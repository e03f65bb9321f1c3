//! Pursuit decision pipeline.
//!
//! A loosely-typed snapshot from the game loop is normalized into a [`GridConfig`], searched
//! under a wall-clock deadline, and resolved into exactly one legal [`Action`]. No input shape
//! makes the pipeline fail: every dead end degrades to a weaker move, ending in `WAIT`.
//!
//! ```
//! use chase_ai::decide_action;
//! use serde_json::json;
//!
//! let action = decide_action(&json!({
//!     "grid": { "width": 5, "height": 5, "blocked": [] },
//!     "me": { "x": 0, "y": 0 },
//!     "target": { "x": 4, "y": 4 },
//!     "maxDecisionMs": 50
//! }));
//! assert_eq!(action.direction().as_str(), "RIGHT");
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod decide;
pub mod fallback;
pub mod normalize;
pub mod snapshot;

pub use chase_core::{Action, Cell, Direction, GridConfig};
pub use decide::{
    decide, decide_action, decide_action_str, decide_config, Decision, DecisionSource,
    DECISION_MARGIN_MS, MIN_SEARCH_WINDOW_MS,
};
pub use fallback::fallback_action;
pub use normalize::normalize;
pub use snapshot::{parse_snapshot, to_snapshot, SnapshotError};
