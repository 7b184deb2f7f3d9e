//! Memoized word reversal

use std::sync::Arc;

use tracing::instrument;

use crate::domain::embedding::EmbeddingProvider;
use crate::domain::memo::{MemoConfig, MemoEntry, MemoOutcome, MemoStats};
use crate::domain::{reverse_words, DomainError};
use crate::infrastructure::memo::SimilarityMemo;

/// Reverses words, reusing answers for sentences that embed close to ones
/// already seen in this session
#[derive(Debug)]
pub struct WordReverserService {
    memo: SimilarityMemo<String>,
}

impl WordReverserService {
    pub fn new(embedding_provider: Arc<dyn EmbeddingProvider>, config: MemoConfig) -> Self {
        Self {
            memo: SimilarityMemo::with_config(embedding_provider, config),
        }
    }

    #[instrument(skip(self))]
    pub async fn reverse(&self, sentence: &str) -> Result<MemoOutcome<String>, DomainError> {
        self.memo.memoize(sentence, |s| Ok(reverse_words(s))).await
    }

    /// Remembered (input, output) pairs in insertion order
    pub fn memory(&self) -> Result<Vec<MemoEntry<String>>, DomainError> {
        Ok(self.memo.all_entries()?.collect())
    }

    pub fn stats(&self) -> Result<MemoStats, DomainError> {
        self.memo.stats()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::embedding::StubEmbeddingProvider;
    use crate::infrastructure::embedding::HashingEmbeddingProvider;

    fn service() -> WordReverserService {
        WordReverserService::new(
            Arc::new(HashingEmbeddingProvider::default()),
            MemoConfig::default(),
        )
    }

    #[tokio::test]
    async fn test_hello_world_session() {
        let service = service();

        let first = service.reverse("hello world").await.unwrap();
        assert_eq!((first.value.as_str(), first.hit), ("olleh dlrow", false));
        assert_eq!(service.memory().unwrap().len(), 1);

        let second = service.reverse("hello world").await.unwrap();
        assert_eq!((second.value.as_str(), second.hit), ("olleh dlrow", true));
        assert_eq!(service.memory().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_reordered_words_reuse_cached_answer() {
        let service = service();
        service.reverse("good morning").await.unwrap();

        let outcome = service.reverse("Morning, good!").await.unwrap();

        assert!(outcome.hit);
        assert_eq!(outcome.value, "doog gninrom");
    }

    #[tokio::test]
    async fn test_distinct_sentences_each_computed() {
        let service = service();

        service.reverse("the cat sat").await.unwrap();
        let outcome = service.reverse("a dog ran far").await.unwrap();

        assert!(!outcome.hit);
        assert_eq!(outcome.value, "a god nar raf");

        let memory = service.memory().unwrap();
        assert_eq!(memory[0].key(), "the cat sat");
        assert_eq!(memory[1].value(), "a god nar raf");
    }

    #[tokio::test]
    async fn test_configured_threshold_applies() {
        let provider = Arc::new(
            StubEmbeddingProvider::new()
                .with_vector("hi", vec![1.0, 0.0])
                .with_vector("hey", vec![0.8, 0.6]),
        );

        let strict = WordReverserService::new(provider.clone(), MemoConfig::default());
        strict.reverse("hi").await.unwrap();
        assert!(!strict.reverse("hey").await.unwrap().hit);
        assert_eq!(strict.stats().unwrap().misses, 2);

        let loose_config = MemoConfig::new().with_similarity_threshold(0.5).unwrap();
        let loose = WordReverserService::new(provider, loose_config);
        loose.reverse("hi").await.unwrap();
        let outcome = loose.reverse("hey").await.unwrap();
        assert!(outcome.hit);
        assert_eq!(outcome.value, "ih");
    }
}
