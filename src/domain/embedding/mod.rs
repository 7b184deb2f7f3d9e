//! Embedding provider domain models and traits

mod provider;
mod request;
mod response;
mod similarity;

pub use provider::EmbeddingProvider;
pub use request::EmbeddingRequest;
pub use response::{Embedding, EmbeddingResponse};
pub use similarity::{cosine_similarity, l2_norm};

#[cfg(test)]
pub use provider::mock::StubEmbeddingProvider;
#[cfg(test)]
pub use provider::MockEmbeddingProvider;
