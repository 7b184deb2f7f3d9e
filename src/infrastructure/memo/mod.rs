//! Similarity memo implementations

mod similarity_memo;

pub use similarity_memo::SimilarityMemo;
