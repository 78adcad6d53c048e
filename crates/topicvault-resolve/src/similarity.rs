//! Cosine similarity between embeddings.

use ndarray::ArrayView1;

/// `dot(a, b) / (|a| * |b|)`.
///
/// Sums accumulate left to right in one pass, so a score sitting exactly on
/// the threshold lands on the same side every time. Mismatched lengths or a
/// zero-norm operand give 0 rather than NaN.
pub fn cosine_similarity(a: ArrayView1<'_, f64>, b: ArrayView1<'_, f64>) -> f64 {
    if a.len() != b.len() {
        return 0.0;
    }
    let (mut dot, mut norm_a, mut norm_b) = (0.0f64, 0.0f64, 0.0f64);
    for (&x, &y) in a.iter().zip(b.iter()) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a.sqrt() * norm_b.sqrt())
}
