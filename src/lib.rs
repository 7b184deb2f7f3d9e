//! semantic-memo
//!
//! Memoization keyed by embedding similarity instead of exact equality:
//! a query reuses the result of the earliest remembered input whose
//! embedding is at least threshold-similar, otherwise the result is
//! computed and remembered.
//!
//! Two services sit on top of the memo: a word reverser and a
//! context-aware name formatter.

pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;
