//! Domain layer - Core logic and entities

pub mod embedding;
pub mod error;
pub mod memo;
pub mod name_format;
pub mod reverse;

pub use embedding::{
    cosine_similarity, Embedding, EmbeddingProvider, EmbeddingRequest, EmbeddingResponse,
};
pub use error::DomainError;
pub use memo::{
    MemoConfig, MemoEntry, MemoMatch, MemoOutcome, MemoStats, MemoStore, SimilarityThreshold,
};
pub use name_format::{NameComponents, NameFormat};
pub use reverse::reverse_words;
