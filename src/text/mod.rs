//! Text processing for the content-based ranker.
//!
//! This module turns tokenized product descriptions into a term-weighted
//! vector space and answers one-against-corpus similarity queries:
//! - [`vectorize`]: vocabulary construction and TF-IDF weighting
//! - [`similarity`]: sparse cosine similarity and the all-pairs index

pub mod similarity;
pub mod vectorize;

pub use similarity::{cosine_similarity, SimilarityIndex};
pub use vectorize::{SparseVector, TfidfVectorizer, Vocabulary};
