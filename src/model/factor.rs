//! Biased latent-factor rating predictor.
//!
//! The trained model the artifact carries: a global mean, per-user and
//! per-item biases, and latent factor vectors whose dot product captures
//! the user-item interaction. The estimate for a known pair is
//!
//! ```text
//! est(u, i) = mu + b_u + b_i + p_u . q_i
//! ```
//!
//! clipped to the trained rating scale. Unknown users or items simply
//! drop their terms, degrading gracefully to the baseline estimates
//! that cold-start callers rely on.
//!
//! # Examples
//!
//! ```
//! use sugerir::model::artifact::ArtifactMetadata;
//! use sugerir::model::{FactorModel, RatingPredictor};
//!
//! let model = FactorModel::from_parts(
//!     ArtifactMetadata {
//!         model_type: "matrix_factorization".to_string(),
//!         n_factors: 1,
//!         rating_min: 1.0,
//!         rating_max: 5.0,
//!         global_mean: 3.0,
//!         users: vec!["U1".to_string()],
//!         items: vec!["P1".to_string()],
//!     },
//!     vec![0.5],
//!     vec![-0.2],
//!     vec![1.0],
//!     vec![1.0],
//! ).expect("model should build");
//!
//! let known = model.predict("U1", "P1");
//! assert!((known.estimated_rating - 4.3).abs() < 1e-6);
//! assert!(!known.fallback);
//!
//! // Cold start: unknown customer falls back to baseline terms.
//! let cold = model.predict("U9", "P1");
//! assert!((cold.estimated_rating - 2.8).abs() < 1e-6);
//! assert!(cold.fallback);
//! ```

use std::collections::HashMap;
use std::path::Path;

use crate::error::{Result, SugerirError};
use crate::model::artifact::{ArtifactMetadata, ArtifactReader};
use crate::model::{PredictedRating, RatingPredictor};

/// Model family tag expected in artifact metadata.
const MODEL_TYPE: &str = "matrix_factorization";

/// Block names inside the artifact.
const BLOCK_USER_BIAS: &str = "user_bias";
const BLOCK_ITEM_BIAS: &str = "item_bias";
const BLOCK_USER_FACTORS: &str = "user_factors";
const BLOCK_ITEM_FACTORS: &str = "item_factors";

/// Pre-trained biased matrix-factorization model.
///
/// Immutable once loaded; re-loading the same artifact reproduces
/// identical predictions.
#[derive(Debug, Clone)]
pub struct FactorModel {
    global_mean: f64,
    rating_min: f64,
    rating_max: f64,
    n_factors: usize,
    user_index: HashMap<String, usize>,
    item_index: HashMap<String, usize>,
    user_bias: Vec<f32>,
    item_bias: Vec<f32>,
    user_factors: Vec<f32>,
    item_factors: Vec<f32>,
}

impl FactorModel {
    /// Load a model from its artifact file.
    ///
    /// # Errors
    ///
    /// Returns [`SugerirError::ModelLoad`] if the artifact is missing,
    /// corrupt, or structurally inconsistent.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let reader = ArtifactReader::open(path)?;
        Self::from_artifact(&reader)
    }

    /// Build a model from a decoded artifact.
    ///
    /// # Errors
    ///
    /// Returns [`SugerirError::ModelLoad`] on a wrong model type, missing
    /// blocks, or dimension mismatches.
    pub fn from_artifact(reader: &ArtifactReader) -> Result<Self> {
        let metadata = reader.metadata().clone();
        Self::from_parts(
            metadata,
            reader.block(BLOCK_USER_BIAS)?.to_vec(),
            reader.block(BLOCK_ITEM_BIAS)?.to_vec(),
            reader.block(BLOCK_USER_FACTORS)?.to_vec(),
            reader.block(BLOCK_ITEM_FACTORS)?.to_vec(),
        )
    }

    /// Build a model from raw parts, validating dimensions.
    ///
    /// # Errors
    ///
    /// Returns [`SugerirError::ModelLoad`] if the model type is
    /// unsupported, the rating scale is degenerate, or block lengths
    /// disagree with the id lists and factor count.
    pub fn from_parts(
        metadata: ArtifactMetadata,
        user_bias: Vec<f32>,
        item_bias: Vec<f32>,
        user_factors: Vec<f32>,
        item_factors: Vec<f32>,
    ) -> Result<Self> {
        if metadata.model_type != MODEL_TYPE {
            return Err(SugerirError::model_load(format!(
                "unsupported model type: {}",
                metadata.model_type
            )));
        }
        if !metadata.rating_min.is_finite()
            || !metadata.rating_max.is_finite()
            || metadata.rating_min >= metadata.rating_max
        {
            return Err(SugerirError::model_load(format!(
                "degenerate rating scale: [{}, {}]",
                metadata.rating_min, metadata.rating_max
            )));
        }
        if !metadata.global_mean.is_finite() {
            return Err(SugerirError::model_load("global mean is not finite"));
        }

        let n_users = metadata.users.len();
        let n_items = metadata.items.len();
        let k = metadata.n_factors;
        let checks = [
            (BLOCK_USER_BIAS, user_bias.len(), n_users),
            (BLOCK_ITEM_BIAS, item_bias.len(), n_items),
            (BLOCK_USER_FACTORS, user_factors.len(), n_users * k),
            (BLOCK_ITEM_FACTORS, item_factors.len(), n_items * k),
        ];
        for (name, actual, expected) in checks {
            if actual != expected {
                return Err(SugerirError::model_load(format!(
                    "block {name} has {actual} values, expected {expected}"
                )));
            }
        }

        let user_index: HashMap<String, usize> = metadata
            .users
            .iter()
            .enumerate()
            .map(|(idx, id)| (id.clone(), idx))
            .collect();
        let item_index: HashMap<String, usize> = metadata
            .items
            .iter()
            .enumerate()
            .map(|(idx, id)| (id.clone(), idx))
            .collect();
        if user_index.len() != n_users {
            return Err(SugerirError::model_load("duplicate user ids in metadata"));
        }
        if item_index.len() != n_items {
            return Err(SugerirError::model_load("duplicate item ids in metadata"));
        }

        Ok(Self {
            global_mean: metadata.global_mean,
            rating_min: metadata.rating_min,
            rating_max: metadata.rating_max,
            n_factors: k,
            user_index,
            item_index,
            user_bias,
            item_bias,
            user_factors,
            item_factors,
        })
    }

    /// Number of users seen in training.
    #[must_use]
    pub fn n_users(&self) -> usize {
        self.user_bias.len()
    }

    /// Number of items seen in training.
    #[must_use]
    pub fn n_items(&self) -> usize {
        self.item_bias.len()
    }

    /// Latent factor count.
    #[must_use]
    pub fn n_factors(&self) -> usize {
        self.n_factors
    }

    /// Trained rating scale as (min, max).
    #[must_use]
    pub fn rating_scale(&self) -> (f64, f64) {
        (self.rating_min, self.rating_max)
    }

    /// Global mean rating.
    #[must_use]
    pub fn global_mean(&self) -> f64 {
        self.global_mean
    }
}

impl RatingPredictor for FactorModel {
    fn predict(&self, customer_id: &str, product_id: &str) -> PredictedRating {
        let user = self.user_index.get(customer_id).copied();
        let item = self.item_index.get(product_id).copied();

        let mut estimate = self.global_mean;
        if let Some(u) = user {
            estimate += f64::from(self.user_bias[u]);
        }
        if let Some(i) = item {
            estimate += f64::from(self.item_bias[i]);
        }
        if let (Some(u), Some(i)) = (user, item) {
            let k = self.n_factors;
            let p_u = &self.user_factors[u * k..(u + 1) * k];
            let q_i = &self.item_factors[i * k..(i + 1) * k];
            estimate += p_u
                .iter()
                .zip(q_i)
                .map(|(&p, &q)| f64::from(p) * f64::from(q))
                .sum::<f64>();
        }

        PredictedRating {
            estimated_rating: estimate.clamp(self.rating_min, self.rating_max),
            fallback: user.is_none() || item.is_none(),
        }
    }
}

#[cfg(test)]
#[path = "factor_tests.rs"]
mod tests;
