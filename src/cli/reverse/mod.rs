//! Reverse command - line-oriented word reversing session over stdin

use chrono::{DateTime, Utc};
use clap::Args;
use serde::Serialize;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::info;
use uuid::Uuid;

use crate::domain::memo::MemoEntry;
use crate::infrastructure::embedding::{create_embedding_provider, EmbeddingProviderType};
use crate::infrastructure::services::WordReverserService;

/// Arguments for the reverse command
#[derive(Args, Clone, Debug)]
pub struct ReverseArgs {
    /// Similarity threshold in [0, 1] (overrides config)
    #[arg(long)]
    pub threshold: Option<f32>,

    /// Print the remembered entries as JSON at end of input
    #[arg(long)]
    pub show_memory: bool,
}

/// Memory dump row; vectors are left out
#[derive(Debug, Serialize)]
struct MemoryRow<'a> {
    id: Uuid,
    input: &'a str,
    result: &'a str,
    dimensions: usize,
    created_at: DateTime<Utc>,
}

impl<'a> From<&'a MemoEntry<String>> for MemoryRow<'a> {
    fn from(entry: &'a MemoEntry<String>) -> Self {
        Self {
            id: entry.id(),
            input: entry.key(),
            result: entry.value(),
            dimensions: entry.vector().len(),
            created_at: entry.created_at(),
        }
    }
}

/// Run a reversing session over stdin
pub async fn run(args: ReverseArgs, provider: Option<EmbeddingProviderType>) -> anyhow::Result<()> {
    let mut config = super::bootstrap(provider)?;

    if let Some(threshold) = args.threshold {
        config.memo = config.memo.with_similarity_threshold(threshold)?;
    }

    let embedding_provider = create_embedding_provider(&config.embedding)?;
    info!(
        provider = embedding_provider.provider_name(),
        threshold = %config.memo.similarity_threshold,
        "Starting reverse session"
    );

    let service = WordReverserService::new(embedding_provider, config.memo);
    let output = session(&service, BufReader::new(tokio::io::stdin())).await?;

    for line in output {
        println!("{}", line);
    }

    let stats = service.stats()?;
    info!(
        entries = stats.entries,
        hits = stats.hits,
        misses = stats.misses,
        hit_rate = stats.hit_rate(),
        "Reverse session finished"
    );

    if args.show_memory {
        let memory = service.memory()?;
        let rows: Vec<MemoryRow<'_>> = memory.iter().map(MemoryRow::from).collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
    }

    Ok(())
}

/// Reverse every non-blank line, returning `<hit|miss>\t<result>` per line
async fn session<R>(service: &WordReverserService, reader: R) -> anyhow::Result<Vec<String>>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    let mut output = Vec::new();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let outcome = service.reverse(&line).await?;
        let tag = if outcome.hit { "hit" } else { "miss" };
        output.push(format!("{}\t{}", tag, outcome.value));
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domain::memo::MemoConfig;
    use crate::infrastructure::embedding::HashingEmbeddingProvider;

    fn service() -> WordReverserService {
        WordReverserService::new(
            Arc::new(HashingEmbeddingProvider::default()),
            MemoConfig::default(),
        )
    }

    #[tokio::test]
    async fn test_session_tags_hits_and_skips_blank_lines() {
        let service = service();
        let input: &[u8] = b"hello world\n\n   \nhello world\nWorld hello\nsomething else\n";

        let output = session(&service, input).await.unwrap();

        assert_eq!(
            output,
            vec![
                "miss\tolleh dlrow",
                "hit\tolleh dlrow",
                "hit\tolleh dlrow",
                "miss\tgnihtemos esle",
            ]
        );
        assert_eq!(service.memory().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_memory_rows_omit_vectors() {
        let service = service();
        session(&service, &b"abc def\n"[..]).await.unwrap();

        let memory = service.memory().unwrap();
        let rows: Vec<MemoryRow<'_>> = memory.iter().map(MemoryRow::from).collect();
        let json = serde_json::to_value(&rows).unwrap();

        assert_eq!(json[0]["input"], "abc def");
        assert_eq!(json[0]["result"], "cba fed");
        assert_eq!(json[0]["dimensions"], 384);
        assert!(json[0].get("vector").is_none());
    }
}
