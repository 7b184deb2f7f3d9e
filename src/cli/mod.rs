//! CLI module for semantic-memo
//!
//! Subcommands:
//! - `reverse`: reverse the words of each stdin line, memoized by similarity
//! - `format-name`: render a name in the format best suited to a context

pub mod format_name;
pub mod reverse;

use anyhow::Context;
use clap::{Parser, Subcommand};

use crate::config::AppConfig;
use crate::infrastructure::embedding::EmbeddingProviderType;
use crate::infrastructure::logging;

/// semantic-memo - reuse results for inputs similar to ones seen before
#[derive(Parser)]
#[command(name = "semantic-memo")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Embedding provider (overrides config): hashing or openai
    #[arg(long, global = true)]
    pub provider: Option<EmbeddingProviderType>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Reverse the words of each line read from stdin
    Reverse(reverse::ReverseArgs),

    /// Format a full name for one or more contexts
    FormatName(format_name::FormatNameArgs),
}

/// Load `.env` and config, apply CLI overrides and start logging
fn bootstrap(provider: Option<EmbeddingProviderType>) -> anyhow::Result<AppConfig> {
    dotenvy::dotenv().ok();

    bootstrap_with(AppConfig::load, provider)
}

fn bootstrap_with(
    load: impl FnOnce() -> Result<AppConfig, ::config::ConfigError>,
    provider: Option<EmbeddingProviderType>,
) -> anyhow::Result<AppConfig> {
    let mut config = load().context("Failed to load configuration")?;
    if let Some(provider) = provider {
        config.embedding.provider = provider;
    }

    logging::init_logging(&config.logging);

    Ok(config)
}
