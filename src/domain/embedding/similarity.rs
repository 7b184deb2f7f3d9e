//! Vector similarity

use crate::domain::DomainError;

/// Euclidean length of a vector
pub fn l2_norm(v: &[f32]) -> f64 {
    dot(v, v).sqrt()
}

fn dot(a: &[f32], b: &[f32]) -> f64 {
    a.iter().zip(b).map(|(x, y)| f64::from(*x) * f64::from(*y)).sum()
}

/// Cosine similarity `dot(a, b) / (|a| * |b|)`.
///
/// Accumulates in `f64` and clamps into `[-1, 1]`, so a vector compared
/// with itself scores exactly `1.0`.
///
/// Fails with `DimensionMismatch` when the lengths differ and with
/// `DegenerateVector` when either side has zero norm (an empty vector
/// counts as zero norm).
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f32, DomainError> {
    if a.len() != b.len() {
        return Err(DomainError::dimension_mismatch(a.len(), b.len()));
    }

    let norm_a = l2_norm(a);
    let norm_b = l2_norm(b);

    if norm_a == 0.0 || norm_b == 0.0 {
        return Err(DomainError::degenerate_vector(
            "cosine similarity is undefined for a zero-norm vector",
        ));
    }

    let similarity = dot(a, b) / (norm_a * norm_b);

    Ok(similarity.clamp(-1.0, 1.0) as f32)
}
