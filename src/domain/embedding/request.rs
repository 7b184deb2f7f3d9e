//! Embedding requests

/// Texts to embed with one model, answered in the same order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbeddingRequest {
    model: String,
    texts: Vec<String>,
}

impl EmbeddingRequest {
    pub fn single(model: impl Into<String>, text: impl Into<String>) -> Self {
        Self::batch(model, vec![text.into()])
    }

    pub fn batch(model: impl Into<String>, texts: Vec<String>) -> Self {
        Self {
            model: model.into(),
            texts,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn texts(&self) -> &[String] {
        &self.texts
    }

    /// Number of vectors a provider must return
    pub fn len(&self) -> usize {
        self.texts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_is_a_batch_of_one() {
        let request = EmbeddingRequest::single("feature-hash-v1", "hello world");

        assert_eq!(request.model(), "feature-hash-v1");
        assert_eq!(request.texts(), ["hello world"]);
        assert_eq!(request.len(), 1);
    }

    #[test]
    fn test_batch_keeps_order() {
        let request =
            EmbeddingRequest::batch("m", vec!["formal letter".into(), "research paper".into()]);

        assert_eq!(request.texts(), ["formal letter", "research paper"]);
        assert!(!request.is_empty());
    }
}
