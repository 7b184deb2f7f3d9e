//! Embedding responses

/// One vector of a batch, tagged with the position of its input text
#[derive(Debug, Clone, PartialEq)]
pub struct Embedding {
    index: usize,
    vector: Vec<f32>,
}

impl Embedding {
    pub fn new(index: usize, vector: Vec<f32>) -> Self {
        Self { index, vector }
    }
}

/// Vectors returned for an [`EmbeddingRequest`](super::EmbeddingRequest).
///
/// Providers may answer out of order; [`Self::into_vectors`] restores the
/// request order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmbeddingResponse {
    embeddings: Vec<Embedding>,
}

impl EmbeddingResponse {
    pub fn new(embeddings: Vec<Embedding>) -> Self {
        Self { embeddings }
    }

    pub fn len(&self) -> usize {
        self.embeddings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.embeddings.is_empty()
    }

    pub fn into_vectors(mut self) -> Vec<Vec<f32>> {
        self.embeddings.sort_by_key(|e| e.index);
        self.embeddings.into_iter().map(|e| e.vector).collect()
    }
}

impl FromIterator<Vec<f32>> for EmbeddingResponse {
    /// Number vectors in iteration order
    fn from_iter<I: IntoIterator<Item = Vec<f32>>>(iter: I) -> Self {
        Self::new(
            iter.into_iter()
                .enumerate()
                .map(|(index, vector)| Embedding::new(index, vector))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_vectors_restores_request_order() {
        let response = EmbeddingResponse::new(vec![
            Embedding::new(1, vec![0.3, 0.4]),
            Embedding::new(0, vec![0.1, 0.2]),
        ]);

        assert_eq!(response.len(), 2);
        assert_eq!(response.into_vectors(), vec![vec![0.1, 0.2], vec![0.3, 0.4]]);
    }

    #[test]
    fn test_collect_numbers_in_order() {
        let response: EmbeddingResponse = vec![vec![1.0], vec![2.0]].into_iter().collect();

        assert_eq!(response.into_vectors(), vec![vec![1.0], vec![2.0]]);
    }

    #[test]
    fn test_default_is_empty() {
        assert!(EmbeddingResponse::default().is_empty());
    }
}
