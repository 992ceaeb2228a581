//! Sparse cosine similarity and the one-against-corpus index.
//!
//! # Quick Start
//!
//! ```
//! use sugerir::text::{cosine_similarity, SparseVector};
//!
//! let a = SparseVector::new(vec![(0, 1.0), (1, 2.0)]);
//! let b = SparseVector::new(vec![(0, 2.0), (1, 4.0)]);
//!
//! // Same direction, different magnitude.
//! assert!((cosine_similarity(&a, &b) - 1.0).abs() < 1e-12);
//! ```

use crate::text::vectorize::SparseVector;

/// Compute cosine similarity between two sparse vectors.
///
/// Returns a value in [0, 1] for TF-IDF vectors (all weights
/// non-negative): 1 means identical direction, 0 means no term overlap.
/// If either vector is zero the similarity is defined as 0.0, never NaN.
///
/// # Formula
/// ```text
/// cosine_sim(A, B) = (A . B) / (||A|| * ||B||)
/// ```
#[must_use]
pub fn cosine_similarity(a: &SparseVector, b: &SparseVector) -> f64 {
    let norm_a = a.norm();
    let norm_b = b.norm();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    a.dot(b) / (norm_a * norm_b)
}

/// All-pairs similarity structure queryable by one document against the
/// whole corpus.
///
/// Stores the corpus vectors and their precomputed norms; a query returns
/// one cosine score per corpus document, in corpus order, so callers can
/// zip scores back onto their own row structures by index.
///
/// # Examples
///
/// ```
/// use sugerir::text::{SimilarityIndex, SparseVector};
///
/// let corpus = vec![
///     SparseVector::new(vec![(0, 1.0)]),
///     SparseVector::new(vec![(1, 1.0)]),
/// ];
/// let index = SimilarityIndex::new(corpus);
///
/// let scores = index.query(&SparseVector::new(vec![(0, 2.0)]));
/// assert!((scores[0] - 1.0).abs() < 1e-12);
/// assert!((scores[1] - 0.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct SimilarityIndex {
    documents: Vec<SparseVector>,
    norms: Vec<f64>,
}

impl SimilarityIndex {
    /// Build an index over the corpus vectors.
    #[must_use]
    pub fn new(documents: Vec<SparseVector>) -> Self {
        let norms = documents.iter().map(SparseVector::norm).collect();
        Self { documents, norms }
    }

    /// Cosine similarity of `query` against every corpus document, in
    /// corpus order.
    ///
    /// The query must be built from the same vocabulary as the indexed
    /// corpus; ids the corpus never saw contribute 0 through the sparse
    /// dot product.
    #[must_use]
    pub fn query(&self, query: &SparseVector) -> Vec<f64> {
        let query_norm = query.norm();
        if query_norm == 0.0 {
            return vec![0.0; self.documents.len()];
        }

        self.documents
            .iter()
            .zip(&self.norms)
            .map(|(doc, &doc_norm)| {
                if doc_norm == 0.0 {
                    0.0
                } else {
                    query.dot(doc) / (query_norm * doc_norm)
                }
            })
            .collect()
    }

    /// Number of indexed documents.
    #[must_use]
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Whether the index contains no documents.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// The indexed vector for a corpus row, if in bounds.
    #[must_use]
    pub fn document(&self, idx: usize) -> Option<&SparseVector> {
        self.documents.get(idx)
    }
}

#[cfg(test)]
#[path = "similarity_tests.rs"]
mod tests;
