//! Infrastructure layer - embedding providers, the memo and services built on it

pub mod embedding;
pub mod logging;
pub mod memo;
pub mod services;
