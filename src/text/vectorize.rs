//! TF-IDF vectorization over pre-tokenized documents.
//!
//! Product descriptions arrive already tokenized (lowercased, stopwords
//! removed upstream), so the vectorizer consumes token lists rather than
//! raw strings. Output is sparse: each document becomes a list of
//! (term-id, weight) pairs with `weight = tf * ln(n_docs / df)`.
//!
//! # Quick Start
//!
//! ```
//! use sugerir::text::TfidfVectorizer;
//!
//! let docs = vec![
//!     vec!["cream".to_string(), "hydrating".to_string()],
//!     vec!["cream".to_string(), "matte".to_string()],
//!     vec!["lipstick".to_string()],
//! ];
//!
//! let mut vectorizer = TfidfVectorizer::new();
//! let vectors = vectorizer.fit_transform(&docs).expect("fit_transform should succeed");
//!
//! assert_eq!(vectors.len(), 3);
//! assert_eq!(vectorizer.vocabulary().len(), 4);
//! ```

use std::collections::{HashMap, HashSet};

use crate::error::{Result, SugerirError};

/// Term vocabulary assigning each distinct term a stable integer id.
///
/// Ids are handed out in first-encounter order, so the same corpus walked
/// in the same order always produces the same assignment. The vocabulary
/// built over a corpus must be reused for any query against that corpus; a
/// query vectorized under a different vocabulary produces meaningless
/// scores.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    ids: HashMap<String, u32>,
    terms: Vec<String>,
}

impl Vocabulary {
    /// Create an empty vocabulary.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the id for `term`, assigning the next free id if unseen.
    pub fn add_or_get(&mut self, term: &str) -> u32 {
        if let Some(&id) = self.ids.get(term) {
            return id;
        }
        let id = self.terms.len() as u32;
        self.ids.insert(term.to_string(), id);
        self.terms.push(term.to_string());
        id
    }

    /// Look up the id of a term, if present.
    #[must_use]
    pub fn get(&self, term: &str) -> Option<u32> {
        self.ids.get(term).copied()
    }

    /// Look up the term for an id, if present.
    #[must_use]
    pub fn term(&self, id: u32) -> Option<&str> {
        self.terms.get(id as usize).map(String::as_str)
    }

    /// Number of distinct terms.
    #[must_use]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Whether the vocabulary is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

/// Sparse vector of (term-id, weight) pairs, sorted by term id.
///
/// Zero weights are dropped at construction, so an all-zero document is
/// simply empty and its similarity with anything is defined as 0.
///
/// # Examples
///
/// ```
/// use sugerir::text::SparseVector;
///
/// let a = SparseVector::new(vec![(0, 1.0), (2, 2.0)]);
/// let b = SparseVector::new(vec![(2, 3.0), (5, 1.0)]);
///
/// // Only the overlapping id (2) contributes.
/// assert!((a.dot(&b) - 6.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    entries: Vec<(u32, f64)>,
}

impl SparseVector {
    /// Build a sparse vector from (id, weight) pairs.
    ///
    /// Entries are sorted by id, duplicate ids are coalesced by summing
    /// their weights, and zero weights are dropped.
    #[must_use]
    pub fn new(mut entries: Vec<(u32, f64)>) -> Self {
        entries.sort_unstable_by_key(|&(id, _)| id);
        let mut merged: Vec<(u32, f64)> = Vec::with_capacity(entries.len());
        for (id, weight) in entries {
            match merged.last_mut() {
                Some((last_id, last_weight)) if *last_id == id => *last_weight += weight,
                _ => merged.push((id, weight)),
            }
        }
        merged.retain(|&(_, w)| w != 0.0);
        Self { entries: merged }
    }

    /// The empty vector.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// The (id, weight) pairs in ascending id order.
    #[must_use]
    pub fn entries(&self) -> &[(u32, f64)] {
        &self.entries
    }

    /// Number of non-zero entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the vector has no non-zero entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sparse dot product via merge join over overlapping ids.
    ///
    /// Ids present in only one vector contribute nothing, which is how
    /// query terms unseen by the indexed corpus are ignored.
    #[must_use]
    pub fn dot(&self, other: &Self) -> f64 {
        let mut sum = 0.0;
        let (mut i, mut j) = (0, 0);
        while i < self.entries.len() && j < other.entries.len() {
            let (id_a, w_a) = self.entries[i];
            let (id_b, w_b) = other.entries[j];
            match id_a.cmp(&id_b) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += w_a * w_b;
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }

    /// Euclidean norm.
    #[must_use]
    pub fn norm(&self) -> f64 {
        self.entries
            .iter()
            .map(|&(_, w)| w * w)
            .sum::<f64>()
            .sqrt()
    }
}

/// TF-IDF vectorizer over pre-tokenized documents.
///
/// **TF-IDF Formula:**
/// ```text
/// tfidf(t, d) = tf(t, d) * idf(t)
/// tf(t, d) = count of term t in document d
/// idf(t) = ln(N / df(t))
/// where N = total documents, df(t) = documents containing term t
/// ```
///
/// `df(t) >= 1` for every vocabulary term, so the idf is always defined.
/// In a single-document corpus every idf is ln(1) = 0 and all vectors are
/// empty; similarity degenerates to 0 rather than dividing by zero.
#[derive(Debug, Clone, Default)]
pub struct TfidfVectorizer {
    vocabulary: Vocabulary,
    idf: Vec<f64>,
    n_documents: usize,
}

impl TfidfVectorizer {
    /// Create a new, unfitted `TfidfVectorizer`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Learn vocabulary and document frequencies from a corpus.
    ///
    /// Refitting replaces any previously learned state. Vocabulary ids are
    /// assigned in first-encounter order over `documents`, making the fit
    /// reproducible for a fixed corpus.
    ///
    /// # Errors
    ///
    /// Returns an error if `documents` is empty.
    pub fn fit<D: AsRef<[String]>>(&mut self, documents: &[D]) -> Result<()> {
        if documents.is_empty() {
            return Err(SugerirError::empty_input("documents"));
        }

        let mut vocabulary = Vocabulary::new();
        let mut doc_freq: Vec<usize> = Vec::new();

        for doc in documents {
            let mut seen: HashSet<u32> = HashSet::new();
            for token in doc.as_ref() {
                let id = vocabulary.add_or_get(token);
                if id as usize == doc_freq.len() {
                    doc_freq.push(0);
                }
                seen.insert(id);
            }
            for id in seen {
                doc_freq[id as usize] += 1;
            }
        }

        let n = documents.len() as f64;
        self.idf = doc_freq.iter().map(|&df| (n / df as f64).ln()).collect();
        self.vocabulary = vocabulary;
        self.n_documents = documents.len();
        Ok(())
    }

    /// Transform documents to sparse TF-IDF vectors using the learned
    /// vocabulary, one vector per document in input order.
    ///
    /// # Errors
    ///
    /// Returns an error if `fit` has not been called.
    pub fn transform<D: AsRef<[String]>>(&self, documents: &[D]) -> Result<Vec<SparseVector>> {
        if self.n_documents == 0 {
            return Err(SugerirError::Other(
                "Vectorizer not fitted. Call fit() first".to_string(),
            ));
        }

        Ok(documents
            .iter()
            .map(|doc| self.transform_tokens(doc.as_ref()))
            .collect())
    }

    /// Fit and transform in one step.
    ///
    /// # Errors
    ///
    /// Returns an error if `documents` is empty.
    pub fn fit_transform<D: AsRef<[String]>>(
        &mut self,
        documents: &[D],
    ) -> Result<Vec<SparseVector>> {
        self.fit(documents)?;
        self.transform(documents)
    }

    /// Transform a single token list into a sparse TF-IDF vector.
    ///
    /// Tokens absent from the learned vocabulary are ignored. An empty
    /// token list yields the empty vector.
    #[must_use]
    pub fn transform_tokens(&self, tokens: &[String]) -> SparseVector {
        let mut counts: HashMap<u32, usize> = HashMap::new();
        for token in tokens {
            if let Some(id) = self.vocabulary.get(token) {
                *counts.entry(id).or_insert(0) += 1;
            }
        }

        SparseVector::new(
            counts
                .into_iter()
                .map(|(id, tf)| (id, tf as f64 * self.idf[id as usize]))
                .collect(),
        )
    }

    /// The learned vocabulary.
    #[must_use]
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Inverse document frequencies, indexed by term id.
    #[must_use]
    pub fn idf_values(&self) -> &[f64] {
        &self.idf
    }

    /// Number of documents the vectorizer was fitted on.
    #[must_use]
    pub fn n_documents(&self) -> usize {
        self.n_documents
    }
}

#[cfg(test)]
#[path = "vectorize_tests.rs"]
mod tests;
