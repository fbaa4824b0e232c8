//! Relevance scores in `0.0..=1.0`.
//!
//! Providers either return hits in relevance order (position scoring) or
//! carry a native popularity/relevance figure (normalized against the page
//! maximum).

/// Round to two decimal digits.
pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Score of the hit at `index` on a provider page: `1 / (1 + index/10)`.
pub fn index_score(index: usize) -> f64 {
    round2(1.0 / (1.0 + index as f64 / 10.0))
}

/// Normalize native popularity values against the page maximum.
///
/// The divisor is never below 1, so a page of zeros scores zero.
pub fn popularity_scores(values: &[f64]) -> Vec<f64> {
    let max = values.iter().copied().fold(1.0_f64, f64::max);
    values.iter().map(|v| round2(v.max(0.0) / max)).collect()
}
