//! Cosine similarity and sigmoid normalization

/// Sigmoid steepness for [`normalized_similarity`]
const SIGMOID_STEEPNESS: f64 = 10.0;

/// Sigmoid center for [`normalized_similarity`]
const SIGMOID_CENTER: f64 = 0.5;

/// Calculate cosine similarity between two embedding vectors
///
/// # Returns
///
/// Cosine similarity in [-1, 1], where 1.0 is identical direction, 0.0 is
/// orthogonal, and -1.0 is opposite direction. Zero-magnitude input yields 0,
/// as do vectors of different lengths (embeddings from different models are
/// incomparable, not erroneous).
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let magnitude_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let magnitude_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if magnitude_a == 0.0 || magnitude_b == 0.0 {
        return 0.0;
    }

    dot_product / (magnitude_a * magnitude_b)
}

/// Normalized similarity: cosine similarity passed through a sigmoid centered
/// at 0.5 with steepness 10.
///
/// `r = 1 / (1 + e^(-10 * (cos(a,b) - 0.5)))`
///
/// Compresses near-zero similarities toward 0 and separates mid-to-high
/// similarities. Downstream weighting assumes scores spread across the full
/// [0, 1] range rather than clustering near 0.5.
pub fn normalized_similarity(a: &[f32], b: &[f32]) -> f64 {
    let cos = cosine_similarity(a, b) as f64;
    1.0 / (1.0 + (-SIGMOID_STEEPNESS * (cos - SIGMOID_CENTER)).exp())
}
