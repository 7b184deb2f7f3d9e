//! OpenAI-compatible embedding provider

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::HttpClientTrait;
use crate::domain::embedding::{Embedding, EmbeddingProvider, EmbeddingRequest, EmbeddingResponse};
use crate::domain::DomainError;

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com";
const DEFAULT_MODEL: &str = "text-embedding-3-small";

/// Output sizes of the hosted embedding models
const MODEL_DIMENSIONS: &[(&str, usize)] = &[
    ("text-embedding-3-small", 1536),
    ("text-embedding-3-large", 3072),
    ("text-embedding-ada-002", 1536),
];

/// Provider speaking `POST {base}/v1/embeddings`
#[derive(Debug)]
pub struct OpenAiEmbeddingProvider<C: HttpClientTrait> {
    client: C,
    bearer: String,
    endpoint: String,
}

impl<C: HttpClientTrait> OpenAiEmbeddingProvider<C> {
    pub fn new(client: C, api_key: impl Into<String>) -> Self {
        Self::with_base_url(client, api_key, DEFAULT_OPENAI_BASE_URL)
    }

    /// Provider against a compatible server (local model gateway, proxy)
    pub fn with_base_url(client: C, api_key: impl Into<String>, base_url: &str) -> Self {
        Self {
            client,
            bearer: format!("Bearer {}", api_key.into()),
            endpoint: format!("{}/v1/embeddings", base_url.trim_end_matches('/')),
        }
    }

    fn unavailable(message: impl Into<String>) -> DomainError {
        DomainError::embedding_unavailable("openai", message)
    }

    fn decode(json: serde_json::Value, expected: usize) -> Result<EmbeddingResponse, DomainError> {
        let reply: EmbeddingsReply = serde_json::from_value(json)
            .map_err(|e| Self::unavailable(format!("Failed to parse embedding response: {}", e)))?;

        if reply.data.len() != expected {
            return Err(Self::unavailable(format!(
                "Expected {} embeddings, received {}",
                expected,
                reply.data.len()
            )));
        }

        if let Some(usage) = reply.usage {
            debug!(model = %reply.model, prompt_tokens = usage.prompt_tokens, "Embeddings received");
        }

        Ok(EmbeddingResponse::new(
            reply
                .data
                .into_iter()
                .map(|item| Embedding::new(item.index, item.embedding))
                .collect(),
        ))
    }
}

#[async_trait]
impl<C: HttpClientTrait> EmbeddingProvider for OpenAiEmbeddingProvider<C> {
    async fn embed(&self, request: EmbeddingRequest) -> Result<EmbeddingResponse, DomainError> {
        if request.is_empty() {
            return Ok(EmbeddingResponse::default());
        }

        let body = serde_json::to_value(EmbeddingsBody {
            model: request.model(),
            input: request.texts(),
        })
        .map_err(|e| Self::unavailable(format!("Failed to encode request: {}", e)))?;

        debug!(model = request.model(), inputs = request.len(), "Requesting embeddings");

        let headers = vec![
            ("Authorization", self.bearer.as_str()),
            ("Content-Type", "application/json"),
        ];
        let json = self.client.post_json(&self.endpoint, headers, &body).await?;

        Self::decode(json, request.len())
    }

    fn provider_name(&self) -> &'static str {
        "openai"
    }

    fn default_model(&self) -> &'static str {
        DEFAULT_MODEL
    }

    fn dimensions(&self, model: &str) -> Option<usize> {
        MODEL_DIMENSIONS
            .iter()
            .find_map(|(name, dims)| (*name == model).then_some(*dims))
    }
}

#[derive(Debug, Serialize)]
struct EmbeddingsBody<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Debug, Deserialize)]
struct EmbeddingsReply {
    #[serde(default)]
    model: String,
    data: Vec<EmbeddingItem>,
    usage: Option<ReplyUsage>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingItem {
    index: usize,
    embedding: Vec<f32>,
}

#[derive(Debug, Deserialize)]
struct ReplyUsage {
    prompt_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::embedding::MockHttpClient;

    const ENDPOINT: &str = "https://api.openai.com/v1/embeddings";

    /// Reply with `count` vectors of `dims` values, listed in reverse order
    fn reply(count: usize, dims: usize) -> serde_json::Value {
        let data: Vec<serde_json::Value> = (0..count)
            .rev()
            .map(|i| {
                serde_json::json!({
                    "object": "embedding",
                    "index": i,
                    "embedding": vec![i as f32 + 1.0; dims],
                })
            })
            .collect();

        serde_json::json!({
            "object": "list",
            "model": DEFAULT_MODEL,
            "data": data,
            "usage": { "prompt_tokens": 3, "total_tokens": 3 }
        })
    }

    #[tokio::test]
    async fn test_single_text() {
        let client = MockHttpClient::new().with_response(ENDPOINT, reply(1, 1536));
        let provider = OpenAiEmbeddingProvider::new(client, "sk-test");

        let vectors = provider
            .embed(EmbeddingRequest::single(DEFAULT_MODEL, "hello world"))
            .await
            .unwrap()
            .into_vectors();

        assert_eq!(vectors.len(), 1);
        assert_eq!(vectors[0].len(), 1536);

        let body = provider.client.last_body().unwrap();
        assert_eq!(body["model"], DEFAULT_MODEL);
        assert_eq!(body["input"], serde_json::json!(["hello world"]));
    }

    #[tokio::test]
    async fn test_batch_vectors_follow_request_order() {
        let client = MockHttpClient::new().with_response(ENDPOINT, reply(2, 4));
        let provider = OpenAiEmbeddingProvider::new(client, "sk-test");

        let vectors = provider
            .embed(EmbeddingRequest::batch(
                DEFAULT_MODEL,
                vec!["formal letter".into(), "research paper".into()],
            ))
            .await
            .unwrap()
            .into_vectors();

        assert_eq!(vectors[0], vec![1.0; 4]);
        assert_eq!(vectors[1], vec![2.0; 4]);
        assert_eq!(provider.client.last_body().unwrap()["input"][1], "research paper");
    }

    #[tokio::test]
    async fn test_empty_request_skips_http() {
        let provider = OpenAiEmbeddingProvider::new(MockHttpClient::new(), "sk-test");

        let response = provider
            .embed(EmbeddingRequest::batch(DEFAULT_MODEL, vec![]))
            .await
            .unwrap();

        assert!(response.is_empty());
        assert!(provider.client.last_body().is_none());
    }

    #[tokio::test]
    async fn test_count_mismatch_is_unavailable() {
        let client = MockHttpClient::new().with_response(ENDPOINT, reply(1, 4));
        let provider = OpenAiEmbeddingProvider::new(client, "sk-test");

        let result = provider
            .embed(EmbeddingRequest::batch(DEFAULT_MODEL, vec!["a".into(), "b".into()]))
            .await;

        assert!(matches!(result, Err(DomainError::EmbeddingUnavailable { .. })));
    }

    #[tokio::test]
    async fn test_transport_error_is_unavailable() {
        let client = MockHttpClient::new().with_error(ENDPOINT, "Rate limit exceeded");
        let provider = OpenAiEmbeddingProvider::new(client, "sk-test");

        let result = provider
            .embed(EmbeddingRequest::single(DEFAULT_MODEL, "hello"))
            .await;

        assert!(matches!(result, Err(DomainError::EmbeddingUnavailable { .. })));
    }

    #[tokio::test]
    async fn test_malformed_reply_is_unavailable() {
        let client =
            MockHttpClient::new().with_response(ENDPOINT, serde_json::json!({"error": "nope"}));
        let provider = OpenAiEmbeddingProvider::new(client, "sk-test");

        let result = provider
            .embed(EmbeddingRequest::single(DEFAULT_MODEL, "hello"))
            .await;

        assert!(matches!(result, Err(DomainError::EmbeddingUnavailable { .. })));
    }

    #[tokio::test]
    async fn test_base_url_trailing_slash() {
        let client = MockHttpClient::new()
            .with_response("http://localhost:8080/v1/embeddings", reply(1, 16));
        let provider =
            OpenAiEmbeddingProvider::with_base_url(client, "sk-test", "http://localhost:8080/");

        let response = provider
            .embed(EmbeddingRequest::single(DEFAULT_MODEL, "Test"))
            .await
            .unwrap();

        assert_eq!(response.len(), 1);
    }

    #[test]
    fn test_model_dimensions() {
        let provider = OpenAiEmbeddingProvider::new(MockHttpClient::new(), "sk-test");

        assert_eq!(provider.default_model(), "text-embedding-3-small");
        assert_eq!(provider.dimensions("text-embedding-3-large"), Some(3072));
        assert_eq!(provider.dimensions("unknown-model"), None);
    }
}
