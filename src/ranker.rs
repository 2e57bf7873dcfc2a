use serde::Serialize;

use crate::vector_space::SparseVector;

/// The best candidate for a query.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Match {
    /// Position of the candidate in the ranked sequence.
    pub index: usize,
    /// Cosine similarity in `[0, 1]`.
    pub score: f64,
}

/// Cosine similarity of two non-negative vectors, clamped to `[0, 1]`.
///
/// Defined as 0 when either vector has zero magnitude.
pub fn cosine_similarity(a: &SparseVector, b: &SparseVector) -> f64 {
    let denominator = a.magnitude() * b.magnitude();
    if denominator == 0.0 {
        return 0.0;
    }
    (a.dot(b) / denominator).clamp(0.0, 1.0)
}

/// Similarity of `query` to every candidate, in candidate order.
pub fn scores(query: &SparseVector, candidates: &[SparseVector]) -> Vec<f64> {
    candidates
        .iter()
        .map(|c| cosine_similarity(query, c))
        .collect()
}

/// Pick the candidate most similar to `query`.
///
/// Ties go to the lowest index. Returns `None` only when there are no
/// candidates; a zero score is still a match and left to the caller to
/// interpret.
pub fn rank(query: &SparseVector, candidates: &[SparseVector]) -> Option<Match> {
    let mut best: Option<Match> = None;
    for (index, score) in scores(query, candidates).into_iter().enumerate() {
        if best.is_none_or(|b| score > b.score) {
            best = Some(Match { index, score });
        }
    }
    best
}

/// Rank the final vector, taken as the query, against all vectors before it.
///
/// The query never competes with itself, so a corpus of one sentence plus
/// the query always yields index 0.
pub fn rank_excluding_query(vectors: &[SparseVector]) -> Option<Match> {
    let (query, corpus) = vectors.split_last()?;
    rank(query, corpus)
}
