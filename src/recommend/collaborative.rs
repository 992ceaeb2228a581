//! Collaborative recommendation.
//!
//! Ranks every product in the rating history that the customer has not
//! already rated highly, ordered by the predictive model's estimated
//! rating. Candidate predictions share no mutable state and are scored
//! in parallel; ordering is decided after all scores are collected, not
//! by completion order.
//!
//! # Quick Start
//!
//! ```
//! use sugerir::model::{PredictedRating, RatingPredictor};
//! use sugerir::ratings::{RatingRecord, RatingStore};
//! use sugerir::recommend::CollaborativeRecommender;
//!
//! // Any predictor satisfies the capability interface, stubs included.
//! struct Constant(f64);
//! impl RatingPredictor for Constant {
//!     fn predict(&self, _customer: &str, _product: &str) -> PredictedRating {
//!         PredictedRating { estimated_rating: self.0, fallback: false }
//!     }
//! }
//!
//! let store = RatingStore::from_records(vec![
//!     RatingRecord::new("U1", "P1", 5),
//!     RatingRecord::new("U2", "P2", 4),
//! ]);
//!
//! let recommender = CollaborativeRecommender::new(store, Constant(3.7));
//! let rows = recommender.recommend("U1").expect("recommendation should succeed");
//!
//! // P1 is excluded: U1 already rated it 5 stars.
//! assert_eq!(rows.len(), 1);
//! assert_eq!(rows[0].product_code, "P2");
//! ```

use std::collections::HashSet;

use rayon::prelude::*;
use tracing::debug;

use crate::config::CollaborativeConfig;
use crate::error::Result;
use crate::model::RatingPredictor;
use crate::ratings::{normalize_id, RatingStore};

/// One ranked row of a collaborative recommendation.
///
/// Display attributes come from the rating table's first matching
/// metadata row; they default to empty when the sources carry none.
#[derive(Debug, Clone)]
pub struct CollaborativeRecommendation {
    /// Product code.
    pub product_code: String,
    /// Display name.
    pub name: String,
    /// The model's estimated rating, the value the ranking is ordered by.
    pub estimated_rating: f64,
    /// Average rating.
    pub avg_rating: f64,
    /// Image reference.
    pub image: String,
    /// Current price.
    pub price: f64,
    /// Original price.
    pub list_price: f64,
    /// Free-text description.
    pub description: String,
}

/// Collaborative ranker over a rating store and a trained predictor.
#[derive(Debug)]
pub struct CollaborativeRecommender<M> {
    store: RatingStore,
    model: M,
    config: CollaborativeConfig,
}

impl<M: RatingPredictor + Sync> CollaborativeRecommender<M> {
    /// Create a recommender with default configuration.
    #[must_use]
    pub fn new(store: RatingStore, model: M) -> Self {
        Self {
            store,
            model,
            config: CollaborativeConfig::default(),
        }
    }

    /// Replace the default configuration.
    #[must_use]
    pub fn with_config(mut self, config: CollaborativeConfig) -> Self {
        self.config = config;
        self
    }

    /// The owned rating store.
    #[must_use]
    pub fn store(&self) -> &RatingStore {
        &self.store
    }

    /// Rank unseen products for `customer_id` using the configured
    /// threshold and result size.
    ///
    /// # Errors
    ///
    /// Currently infallible in practice: an unknown customer is not an
    /// error (the model falls back to cold-start estimates) and an empty
    /// candidate set yields `Ok` with an empty list.
    pub fn recommend(&self, customer_id: &str) -> Result<Vec<CollaborativeRecommendation>> {
        self.recommend_with(customer_id, &self.config)
    }

    /// Rank unseen products for `customer_id` with an explicit
    /// configuration.
    ///
    /// The candidate set is every distinct product in the rating history
    /// minus those the customer rated at or above the exclusion
    /// threshold. Candidates are sorted descending by estimated rating;
    /// ties keep first-occurrence candidate order (stable sort). A
    /// customer who has rated every known product gets an empty result,
    /// which is a valid state, not an error.
    ///
    /// # Errors
    ///
    /// Reserved for future load-coupled failures; see [`Self::recommend`].
    pub fn recommend_with(
        &self,
        customer_id: &str,
        config: &CollaborativeConfig,
    ) -> Result<Vec<CollaborativeRecommendation>> {
        let customer = normalize_id(customer_id);
        let excluded = self
            .store
            .rated_at_least(&customer, config.exclusion_threshold);

        let candidates: Vec<&str> = self
            .store
            .products()
            .iter()
            .map(String::as_str)
            .filter(|code| !excluded.contains(*code))
            .collect();

        if candidates.is_empty() {
            return Ok(Vec::new());
        }

        debug!(
            customer = %customer,
            candidates = candidates.len(),
            excluded = excluded.len(),
            "scoring candidates"
        );

        // Predictions are independent; rayon preserves candidate order in
        // the collected vector.
        let mut scored: Vec<(&str, f64)> = candidates
            .par_iter()
            .map(|&code| (code, self.model.predict(&customer, code).estimated_rating))
            .collect();

        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

        let mut seen = HashSet::new();
        let mut rows = Vec::with_capacity(config.top_n.min(scored.len()));
        for (code, estimated_rating) in scored {
            if rows.len() == config.top_n {
                break;
            }
            if !seen.insert(code) {
                continue;
            }
            let info = self.store.metadata(code).cloned().unwrap_or_default();
            rows.push(CollaborativeRecommendation {
                product_code: code.to_string(),
                name: info.name,
                estimated_rating,
                avg_rating: info.avg_rating,
                image: info.image,
                price: info.price,
                list_price: info.list_price,
                description: info.description,
            });
        }
        Ok(rows)
    }
}

#[cfg(test)]
#[path = "collaborative_tests.rs"]
mod tests;
