//! Memo configuration

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Boundary between "reuse" and "recompute", a cosine similarity in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(into = "f32")]
pub struct SimilarityThreshold(f32);

impl SimilarityThreshold {
    pub const DEFAULT: SimilarityThreshold = SimilarityThreshold(0.9);

    pub fn new(value: f32) -> Result<Self, DomainError> {
        if !(0.0..=1.0).contains(&value) {
            return Err(DomainError::invalid_input(format!(
                "similarity threshold must be within [0, 1], got {}",
                value
            )));
        }

        Ok(Self(value))
    }

    pub fn value(&self) -> f32 {
        self.0
    }

    /// Whether a similarity score qualifies as a reuse
    pub fn accepts(&self, similarity: f32) -> bool {
        similarity >= self.0
    }
}

impl Default for SimilarityThreshold {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<f32> for SimilarityThreshold {
    type Error = DomainError;

    fn try_from(value: f32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SimilarityThreshold> for f32 {
    fn from(threshold: SimilarityThreshold) -> Self {
        threshold.0
    }
}

impl<'de> Deserialize<'de> for SimilarityThreshold {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = f32::deserialize(deserializer)?;
        Self::new(value).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for SimilarityThreshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}", self.0)
    }
}

/// Configuration for a similarity memo
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoConfig {
    /// Similarity threshold used when a call site does not pass its own
    #[serde(default)]
    pub similarity_threshold: SimilarityThreshold,

    /// Embedding model; `None` uses the provider's default model
    #[serde(default)]
    pub embedding_model: Option<String>,
}

impl Default for MemoConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: SimilarityThreshold::DEFAULT,
            embedding_model: None,
        }
    }
}

impl MemoConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the similarity threshold; rejects the values deserialization rejects
    pub fn with_similarity_threshold(mut self, threshold: f32) -> Result<Self, DomainError> {
        self.similarity_threshold = SimilarityThreshold::new(threshold)?;
        Ok(self)
    }

    pub fn with_embedding_model(mut self, model: impl Into<String>) -> Self {
        self.embedding_model = Some(model.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MemoConfig::default();

        assert_eq!(config.similarity_threshold.value(), 0.9);
        assert!(config.embedding_model.is_none());
    }

    #[test]
    fn test_config_builder() {
        let config = MemoConfig::new()
            .with_similarity_threshold(0.75)
            .unwrap()
            .with_embedding_model("all-minilm");

        assert_eq!(config.similarity_threshold.value(), 0.75);
        assert_eq!(config.embedding_model.as_deref(), Some("all-minilm"));
    }

    #[test]
    fn test_builder_rejects_invalid_threshold() {
        for bad in [1.5, -0.5, f32::NAN] {
            let result = MemoConfig::new().with_similarity_threshold(bad);
            assert!(matches!(result, Err(DomainError::InvalidInput { .. })), "{}", bad);
        }
    }

    #[test]
    fn test_threshold_rejects_out_of_range() {
        assert!(SimilarityThreshold::new(1.01).is_err());
        assert!(SimilarityThreshold::new(-0.01).is_err());
        assert!(SimilarityThreshold::new(f32::NAN).is_err());
        assert!(SimilarityThreshold::new(0.0).is_ok());
        assert!(SimilarityThreshold::new(1.0).is_ok());
    }

    #[test]
    fn test_threshold_accepts_boundary() {
        let threshold = SimilarityThreshold::new(0.9).unwrap();

        assert!(threshold.accepts(0.9));
        assert!(threshold.accepts(1.0));
        assert!(!threshold.accepts(0.899));
    }

    #[test]
    fn test_threshold_deserialize_validates() {
        let config: MemoConfig = serde_json::from_str(r#"{"similarity_threshold": 0.8}"#).unwrap();
        assert_eq!(config.similarity_threshold.value(), 0.8);

        let result: Result<MemoConfig, _> = serde_json::from_str(r#"{"similarity_threshold": 2.0}"#);
        assert!(result.is_err());
    }
}
