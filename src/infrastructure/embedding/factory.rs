//! Embedding provider factory for runtime selection

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::info;

use super::{HashingEmbeddingProvider, HttpClient, OpenAiEmbeddingProvider};
use crate::domain::embedding::EmbeddingProvider;
use crate::domain::DomainError;

/// Supported embedding providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmbeddingProviderType {
    /// Local feature hashing, no network
    #[default]
    Hashing,
    /// OpenAI-compatible HTTP API
    OpenAi,
}

impl std::fmt::Display for EmbeddingProviderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EmbeddingProviderType::Hashing => write!(f, "hashing"),
            EmbeddingProviderType::OpenAi => write!(f, "openai"),
        }
    }
}

impl std::str::FromStr for EmbeddingProviderType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "hashing" | "hash" | "local" => Ok(EmbeddingProviderType::Hashing),
            "openai" | "open_ai" => Ok(EmbeddingProviderType::OpenAi),
            _ => Err(DomainError::configuration(format!(
                "Unknown embedding provider: {}. Valid providers: hashing, openai",
                s
            ))),
        }
    }
}

/// Settings for building an embedding provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingSettings {
    #[serde(default)]
    pub provider: EmbeddingProviderType,

    /// Base URL for the OpenAI-compatible API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Name of the environment variable holding the API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Vector size for the hashing provider
    #[serde(default = "default_dimensions")]
    pub dimensions: usize,

    /// HTTP request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    super::openai::DEFAULT_OPENAI_BASE_URL.to_string()
}

fn default_api_key_env() -> String {
    "OPENAI_API_KEY".to_string()
}

fn default_dimensions() -> usize {
    super::hashing::DEFAULT_HASHING_DIMENSIONS
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for EmbeddingSettings {
    fn default() -> Self {
        Self {
            provider: EmbeddingProviderType::default(),
            base_url: default_base_url(),
            api_key_env: default_api_key_env(),
            dimensions: default_dimensions(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl EmbeddingSettings {
    pub fn with_provider(mut self, provider: EmbeddingProviderType) -> Self {
        self.provider = provider;
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Build the configured embedding provider
pub fn create_embedding_provider(
    settings: &EmbeddingSettings,
) -> Result<Arc<dyn EmbeddingProvider>, DomainError> {
    create_embedding_provider_with_env(settings, |name| std::env::var(name).ok())
}

fn create_embedding_provider_with_env(
    settings: &EmbeddingSettings,
    lookup_env: impl Fn(&str) -> Option<String>,
) -> Result<Arc<dyn EmbeddingProvider>, DomainError> {
    let provider: Arc<dyn EmbeddingProvider> = match settings.provider {
        EmbeddingProviderType::Hashing => {
            Arc::new(HashingEmbeddingProvider::new(settings.dimensions)?)
        }
        EmbeddingProviderType::OpenAi => {
            let api_key = lookup_env(&settings.api_key_env)
                .filter(|key| !key.trim().is_empty())
                .ok_or_else(|| {
                    DomainError::configuration(format!(
                        "{} must be set to use the openai embedding provider",
                        settings.api_key_env
                    ))
                })?;

            let client = HttpClient::with_timeout(settings.timeout())?;

            Arc::new(OpenAiEmbeddingProvider::with_base_url(
                client,
                api_key,
                &settings.base_url,
            ))
        }
    };

    let model = provider.default_model();
    info!(
        provider = provider.provider_name(),
        model,
        dimensions = ?provider.dimensions(model),
        "Embedding provider ready"
    );

    Ok(provider)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_type_from_str() {
        assert_eq!(
            "OpenAI".parse::<EmbeddingProviderType>().unwrap(),
            EmbeddingProviderType::OpenAi
        );
        assert_eq!(
            "local".parse::<EmbeddingProviderType>().unwrap(),
            EmbeddingProviderType::Hashing
        );
        assert!("cohere".parse::<EmbeddingProviderType>().is_err());
    }

    #[test]
    fn test_default_settings() {
        let settings = EmbeddingSettings::default();

        assert_eq!(settings.provider, EmbeddingProviderType::Hashing);
        assert_eq!(settings.api_key_env, "OPENAI_API_KEY");
        assert_eq!(settings.dimensions, 384);
        assert_eq!(settings.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_creates_hashing_provider() {
        let provider = create_embedding_provider(&EmbeddingSettings::default()).unwrap();

        assert_eq!(provider.provider_name(), "hashing");
        assert_eq!(provider.dimensions(provider.default_model()), Some(384));
    }

    #[test]
    fn test_openai_requires_api_key() {
        let settings = EmbeddingSettings::default().with_provider(EmbeddingProviderType::OpenAi);

        let result = create_embedding_provider_with_env(&settings, |_| None);

        assert!(matches!(result, Err(DomainError::Configuration { .. })));
    }

    #[test]
    fn test_creates_openai_provider() {
        let settings = EmbeddingSettings::default().with_provider(EmbeddingProviderType::OpenAi);

        let provider =
            create_embedding_provider_with_env(&settings, |_| Some("sk-test".to_string())).unwrap();

        assert_eq!(provider.provider_name(), "openai");
    }

    #[test]
    fn test_settings_deserialize_lowercase_provider() {
        let settings: EmbeddingSettings =
            serde_json::from_str(r#"{"provider": "openai", "timeout_secs": 5}"#).unwrap();

        assert_eq!(settings.provider, EmbeddingProviderType::OpenAi);
        assert_eq!(settings.timeout_secs, 5);
        assert_eq!(settings.dimensions, 384);
    }
}
