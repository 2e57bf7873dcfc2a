//! TF-IDF vectors over a jointly built vocabulary.
//!
//! Every document in one build shares the same vocabulary, so vectors from
//! the same [`VectorSpace`] are directly comparable. Vectors from different
//! builds are not.

use std::collections::BTreeMap;

use crate::{normalizer::Normalizer, stop_words::StopWords};

/// A sparse vector of `(term index, weight)` pairs sorted by term index.
///
/// Weights are non-negative. Absent terms have weight zero.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    entries: Vec<(usize, f64)>,
}

impl SparseVector {
    /// Build from entries; zero weights are dropped and entries sorted.
    pub fn new(mut entries: Vec<(usize, f64)>) -> Self {
        entries.retain(|&(_, w)| w != 0.0);
        entries.sort_by_key(|&(idx, _)| idx);
        Self { entries }
    }

    pub fn entries(&self) -> &[(usize, f64)] {
        &self.entries
    }

    pub fn get(&self, term: usize) -> f64 {
        self.entries
            .binary_search_by_key(&term, |&(idx, _)| idx)
            .map(|pos| self.entries[pos].1)
            .unwrap_or(0.0)
    }

    pub fn is_zero(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn magnitude(&self) -> f64 {
        self.entries.iter().map(|(_, w)| w * w).sum::<f64>().sqrt()
    }

    /// Dot product by merging the two sorted entry lists.
    pub fn dot(&self, other: &Self) -> f64 {
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0;
        while i < self.entries.len() && j < other.entries.len() {
            let (a_idx, a_w) = self.entries[i];
            let (b_idx, b_w) = other.entries[j];
            match a_idx.cmp(&b_idx) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += a_w * b_w;
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }
}

/// The result of one build: the shared vocabulary and one vector per input
/// document, in input order.
#[derive(Debug, Clone)]
pub struct VectorSpace {
    vocabulary: Vec<String>,
    vectors: Vec<SparseVector>,
}

impl VectorSpace {
    /// Terms in index order (lexicographic).
    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    pub fn vectors(&self) -> &[SparseVector] {
        &self.vectors
    }

    pub fn into_vectors(self) -> Vec<SparseVector> {
        self.vectors
    }

    /// Index of a term in the vocabulary.
    pub fn term_index(&self, term: &str) -> Option<usize> {
        self.vocabulary
            .binary_search_by(|t| t.as_str().cmp(term))
            .ok()
    }
}

/// Builds TF-IDF vectors with an explicit normalizer and stop-word set.
///
/// Weight of term `t` in document `d` is `tf(t, d) * idf(t)` with the
/// smoothed `idf(t) = ln((1 + n) / (1 + df(t))) + 1`; each vector is then
/// scaled to unit length.
#[derive(Debug, Clone, Default)]
pub struct VectorSpaceBuilder {
    normalizer: Normalizer,
    stop_words: StopWords,
}

impl VectorSpaceBuilder {
    pub fn new(normalizer: Normalizer, stop_words: StopWords) -> Self {
        Self {
            normalizer,
            stop_words,
        }
    }

    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    pub fn stop_words(&self) -> &StopWords {
        &self.stop_words
    }

    /// Normalize `text` and drop stop words.
    pub fn terms(&self, text: &str) -> Vec<String> {
        self.normalizer
            .normalize(text)
            .into_iter()
            .filter(|t| !self.stop_words.contains(t))
            .collect()
    }

    pub fn build<S: AsRef<str>>(&self, documents: &[S]) -> VectorSpace {
        let tokenized: Vec<Vec<String>> = documents
            .iter()
            .map(|doc| self.terms(doc.as_ref()))
            .collect();

        let mut term_ids: BTreeMap<&str, usize> = BTreeMap::new();
        for term in tokenized.iter().flatten() {
            term_ids.insert(term.as_str(), 0);
        }
        for (idx, id) in term_ids.values_mut().enumerate() {
            *id = idx;
        }

        let counts: Vec<BTreeMap<usize, usize>> = tokenized
            .iter()
            .map(|terms| {
                let mut tf = BTreeMap::new();
                for term in terms {
                    *tf.entry(term_ids[term.as_str()]).or_insert(0) += 1;
                }
                tf
            })
            .collect();

        let mut df = vec![0usize; term_ids.len()];
        for tf in &counts {
            for &idx in tf.keys() {
                df[idx] += 1;
            }
        }

        let n = documents.len() as f64;
        let idf: Vec<f64> = df
            .iter()
            .map(|&d| ((1.0 + n) / (1.0 + d as f64)).ln() + 1.0)
            .collect();

        let vectors = counts
            .iter()
            .map(|tf| {
                let weights: Vec<(usize, f64)> = tf
                    .iter()
                    .map(|(&idx, &count)| (idx, count as f64 * idf[idx]))
                    .collect();
                let norm =
                    weights.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
                if norm == 0.0 {
                    return SparseVector::default();
                }
                SparseVector::new(
                    weights.into_iter().map(|(idx, w)| (idx, w / norm)).collect(),
                )
            })
            .collect();

        let vocabulary = term_ids.into_keys().map(str::to_string).collect();

        VectorSpace {
            vocabulary,
            vectors,
        }
    }
}
