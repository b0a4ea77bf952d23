//! Cosine similarity between two embeddings.
//!
//! Accumulates in f64 so long f32 vectors don't lose precision, and clamps the
//! result to [-1, 1] to absorb rounding drift. A zero-magnitude vector has no
//! direction, so comparing it is an error rather than a silent 0 or NaN.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimilarityError {
    #[error("embedding is empty")]
    Empty,

    #[error("embedding dimensions differ ({left} vs {right})")]
    DimensionMismatch { left: usize, right: usize },

    #[error("embedding has zero magnitude")]
    ZeroMagnitude,

    #[error("embedding contains a non-finite component")]
    NonFinite,
}

/// `dot(a, b) / (|a| * |b|)`, in [-1, 1].
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f64, SimilarityError> {
    if a.is_empty() || b.is_empty() {
        return Err(SimilarityError::Empty);
    }
    if a.len() != b.len() {
        return Err(SimilarityError::DimensionMismatch {
            left: a.len(),
            right: b.len(),
        });
    }

    let mut dot = 0.0_f64;
    let mut norm_a = 0.0_f64;
    let mut norm_b = 0.0_f64;

    for (&x, &y) in a.iter().zip(b) {
        let (x, y) = (f64::from(x), f64::from(y));
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    if !(dot.is_finite() && norm_a.is_finite() && norm_b.is_finite()) {
        return Err(SimilarityError::NonFinite);
    }

    let denom = norm_a.sqrt() * norm_b.sqrt();
    if denom == 0.0 {
        return Err(SimilarityError::ZeroMagnitude);
    }

    Ok((dot / denom).clamp(-1.0, 1.0))
}
