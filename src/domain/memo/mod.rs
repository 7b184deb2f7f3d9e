//! Similarity memoization domain models
//!
//! A memo store keyed by embedding similarity rather than exact value: a
//! query reuses the result of the earliest stored entry whose vector is at
//! least `threshold`-similar to its own.

mod config;
mod entry;
mod outcome;
mod store;

pub use config::{MemoConfig, SimilarityThreshold};
pub use entry::MemoEntry;
pub use outcome::{MemoOutcome, MemoStats};
pub use store::{MemoMatch, MemoStore};
