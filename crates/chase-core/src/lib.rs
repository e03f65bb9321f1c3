//! Deterministic grid pursuit primitives.
//!
//! Everything here is plain data plus pure queries: the strict [`GridConfig`] a decision runs
//! against, the legality oracle on top of it, and the seeded tie-break [`DirectionRank`].

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod config;
pub mod direction;
pub mod legality;
pub mod rank;
pub mod rng;

pub use config::{Cell, GridConfig, DEFAULT_BUDGET_MS, DEFAULT_HEIGHT, DEFAULT_WIDTH, MIN_BUDGET_MS};
pub use direction::{Action, Direction};
pub use rank::{fnv1a_32, DirectionRank};
pub use rng::SplitMix64;
