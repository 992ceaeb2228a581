//! Content-based recommendation.
//!
//! Ranks catalog products against a query product by blending TF-IDF
//! cosine similarity with each candidate's average rating:
//!
//! ```text
//! final_score = similarity * weight_content + avg_rating * weight_rating
//! ```
//!
//! The query product itself is part of the raw ranking (its
//! self-similarity is 1.0); callers that want it excluded filter it out
//! of the result by code.
//!
//! # Quick Start
//!
//! ```
//! use sugerir::catalog::{Catalog, Product};
//! use sugerir::recommend::ContentRecommender;
//!
//! let catalog = Catalog::from_products(vec![
//!     Product::new("SP001", "Hydrating Cream")
//!         .with_tokens(vec!["cream".into(), "hydrating".into(), "skin".into()])
//!         .with_avg_rating(4.0),
//!     Product::new("SP002", "Rich Cream")
//!         .with_tokens(vec!["cream".into(), "hydrating".into(), "rich".into()])
//!         .with_avg_rating(3.5),
//!     Product::new("SP003", "Matte Lipstick")
//!         .with_tokens(vec!["lipstick".into(), "matte".into()])
//!         .with_avg_rating(4.9),
//! ]).expect("catalog should build");
//!
//! let recommender = ContentRecommender::new(catalog);
//! let rows = recommender.recommend("SP001").expect("SP001 exists");
//!
//! // The query product ranks first: self-similarity is 1.0.
//! assert_eq!(rows[0].product_code, "SP001");
//! ```

use std::sync::OnceLock;

use tracing::debug;

use crate::catalog::Catalog;
use crate::config::ContentConfig;
use crate::error::{Result, SugerirError};
use crate::text::{SimilarityIndex, TfidfVectorizer};

/// One ranked row of a content-based recommendation.
///
/// All display attributes are looked up from the catalog row, never
/// computed here.
#[derive(Debug, Clone)]
pub struct ContentRecommendation {
    /// Product code.
    pub product_code: String,
    /// Display name.
    pub name: String,
    /// Cosine similarity with the query product, in [0, 1].
    pub similarity: f64,
    /// Average customer rating.
    pub avg_rating: f64,
    /// Blended score the ranking is ordered by.
    pub final_score: f64,
    /// Image reference.
    pub image: String,
    /// Current price.
    pub price: f64,
    /// Original price.
    pub list_price: f64,
    /// Free-text description.
    pub description: String,
}

/// Vectorizer and similarity index derived from one catalog.
#[derive(Debug)]
struct ContentIndex {
    vectorizer: TfidfVectorizer,
    index: SimilarityIndex,
}

impl ContentIndex {
    fn build(catalog: &Catalog) -> Result<Self> {
        let documents: Vec<&[String]> = catalog
            .products()
            .iter()
            .map(|p| p.tokens.as_slice())
            .collect();

        let mut vectorizer = TfidfVectorizer::new();
        let vectors = vectorizer.fit_transform(&documents)?;
        debug!(
            products = documents.len(),
            vocabulary = vectorizer.vocabulary().len(),
            fingerprint = catalog.fingerprint(),
            "content index built"
        );

        Ok(Self {
            vectorizer,
            index: SimilarityIndex::new(vectors),
        })
    }
}

/// Content-similarity ranker over an immutable catalog.
///
/// The TF-IDF index is built lazily on first use and reused for every
/// subsequent call; the owned catalog never changes, so the index never
/// goes stale. Reload the catalog by constructing a new recommender
/// (compare [`Catalog::fingerprint`] to detect content changes).
#[derive(Debug)]
pub struct ContentRecommender {
    catalog: Catalog,
    config: ContentConfig,
    index: OnceLock<ContentIndex>,
}

impl ContentRecommender {
    /// Create a recommender with default configuration.
    #[must_use]
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            config: ContentConfig::default(),
            index: OnceLock::new(),
        }
    }

    /// Replace the default configuration.
    #[must_use]
    pub fn with_config(mut self, config: ContentConfig) -> Self {
        self.config = config;
        self
    }

    /// The owned catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Rank catalog products against `product_code` using the configured
    /// weights and result size.
    ///
    /// # Errors
    ///
    /// Returns [`SugerirError::ProductNotFound`] if the code is absent
    /// from the catalog.
    pub fn recommend(&self, product_code: &str) -> Result<Vec<ContentRecommendation>> {
        self.recommend_with(product_code, &self.config)
    }

    /// Rank catalog products against `product_code` with an explicit
    /// configuration.
    ///
    /// Candidates are sorted descending by `final_score`; ties keep
    /// catalog order (stable sort, no secondary key is defined). The
    /// result holds at most `top_n` rows and contains each product code
    /// at most once.
    ///
    /// # Errors
    ///
    /// Returns [`SugerirError::ProductNotFound`] for an unknown code or
    /// [`SugerirError::InvalidWeight`] for invalid weights.
    pub fn recommend_with(
        &self,
        product_code: &str,
        config: &ContentConfig,
    ) -> Result<Vec<ContentRecommendation>> {
        config.validate()?;

        let product = self.catalog.get(product_code).ok_or_else(|| {
            SugerirError::ProductNotFound {
                code: product_code.trim().to_string(),
            }
        })?;

        let content_index = self.index()?;
        let query = content_index.vectorizer.transform_tokens(&product.tokens);
        let scores = content_index.index.query(&query);

        let mut rows: Vec<ContentRecommendation> = self
            .catalog
            .products()
            .iter()
            .zip(scores)
            .map(|(candidate, similarity)| ContentRecommendation {
                product_code: candidate.code.clone(),
                name: candidate.name.clone(),
                similarity,
                avg_rating: candidate.avg_rating,
                final_score: similarity * config.weight_content
                    + candidate.avg_rating * config.weight_rating,
                image: candidate.image.clone(),
                price: candidate.price,
                list_price: candidate.list_price,
                description: candidate.description.clone(),
            })
            .collect();

        rows.sort_by(|a, b| {
            b.final_score
                .partial_cmp(&a.final_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        rows.truncate(config.top_n);
        Ok(rows)
    }

    /// The memoized index, built on first use.
    ///
    /// Under concurrent first access a losing thread may build a
    /// duplicate index that is immediately discarded; the stored value
    /// is set exactly once.
    fn index(&self) -> Result<&ContentIndex> {
        if let Some(index) = self.index.get() {
            return Ok(index);
        }
        let built = ContentIndex::build(&self.catalog)?;
        Ok(self.index.get_or_init(|| built))
    }
}

#[cfg(test)]
#[path = "content_tests.rs"]
mod tests;
