//! Context-aware name formatting
//!
//! Picks the name format whose description embeds closest to a free-text
//! context ("writing a research paper" -> academic). The context-to-format
//! choice is memoized, so paraphrased contexts skip the comparison.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::domain::embedding::{cosine_similarity, EmbeddingProvider, EmbeddingRequest};
use crate::domain::memo::{MemoConfig, MemoOutcome, MemoStats};
use crate::domain::{DomainError, NameComponents, NameFormat};
use crate::infrastructure::memo::SimilarityMemo;

/// Format selected for a context
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FormatChoice {
    pub format: NameFormat,
    /// Similarity between the context and the format description
    pub confidence: f32,
}

/// A name rendered for a context
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SmartFormat {
    /// `None` when the name lacks a part the format needs
    pub formatted: Option<String>,
    pub format: NameFormat,
    pub confidence: f32,
    /// Whether the format choice came from the memo
    pub cached: bool,
}

/// A name rendered in one format, with that format's example
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormattedName {
    pub format: NameFormat,
    pub formatted: Option<String>,
    pub example: &'static str,
}

#[derive(Debug)]
pub struct NameFormatterService {
    memo: SimilarityMemo<FormatChoice>,
    format_vectors: Vec<(NameFormat, Vec<f32>)>,
}

impl NameFormatterService {
    /// Embed every format description once, up front
    pub async fn new(
        embedding_provider: Arc<dyn EmbeddingProvider>,
        config: MemoConfig,
    ) -> Result<Self, DomainError> {
        let memo = SimilarityMemo::with_config(embedding_provider, config);

        let descriptions = NameFormat::ALL
            .iter()
            .map(|f| f.description().to_string())
            .collect();
        let response = memo
            .embedding_provider()
            .embed(EmbeddingRequest::batch(memo.model(), descriptions))
            .await?;

        if response.len() != NameFormat::ALL.len() {
            return Err(DomainError::embedding_unavailable(
                memo.embedding_provider().provider_name(),
                format!(
                    "Expected {} description embeddings, received {}",
                    NameFormat::ALL.len(),
                    response.len()
                ),
            ));
        }

        let format_vectors = NameFormat::ALL
            .into_iter()
            .zip(response.into_vectors())
            .collect();

        info!(formats = NameFormat::ALL.len(), "Name formatter ready");

        Ok(Self {
            memo,
            format_vectors,
        })
    }

    /// Highest-similarity format for a context vector; first one wins ties
    fn best_format(&self, context_vector: &[f32]) -> Result<FormatChoice, DomainError> {
        let mut best: Option<FormatChoice> = None;

        for (format, vector) in &self.format_vectors {
            let confidence = cosine_similarity(context_vector, vector)?;

            if best.is_none_or(|b| confidence > b.confidence) {
                best = Some(FormatChoice {
                    format: *format,
                    confidence,
                });
            }
        }

        best.ok_or_else(|| DomainError::internal("no name formats configured"))
    }

    /// Format choice for `context`, reusing the choice for a similar context
    #[instrument(skip(self))]
    pub async fn choose_format(
        &self,
        context: &str,
    ) -> Result<MemoOutcome<FormatChoice>, DomainError> {
        self.memo
            .lookup_or_compute_embedded(context, self.memo.threshold(), |_, vector| {
                self.best_format(vector)
            })
            .await
    }

    /// Render `full_name` in the format best suited to `context`
    pub async fn smart_format(
        &self,
        full_name: &str,
        context: &str,
    ) -> Result<SmartFormat, DomainError> {
        let outcome = self.choose_format(context).await?;
        let name = NameComponents::parse(full_name);

        Ok(SmartFormat {
            formatted: outcome.value.format.apply(&name),
            format: outcome.value.format,
            confidence: outcome.value.confidence,
            cached: outcome.hit,
        })
    }

    /// Render `full_name` in every format
    pub fn all_formats(full_name: &str) -> Vec<FormattedName> {
        let name = NameComponents::parse(full_name);

        NameFormat::ALL
            .into_iter()
            .map(|format| FormattedName {
                format,
                formatted: format.apply(&name),
                example: format.example(),
            })
            .collect()
    }

    pub fn stats(&self) -> Result<MemoStats, DomainError> {
        self.memo.stats()
    }
}
