//! Grid pursuit search: an anytime A* that can be cut off at any iteration, plus a one-step
//! greedy chooser for when the search has nothing usable.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod greedy;
pub mod search;

pub use greedy::greedy_direction;
pub use search::{first_direction, SearchBudget, SearchOutcome, Termination};
