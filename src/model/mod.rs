//! Pre-trained rating prediction.
//!
//! The collaborative ranker depends on one narrow capability: estimate
//! the rating a customer would give a product. Anything that can do
//! that, from the shipped latent-factor model to a test stub, satisfies
//! [`RatingPredictor`]; the ranker never sees model internals.
//!
//! The production model is consumed as a serialized, compressed artifact
//! produced by the training pipeline (out of scope here); see
//! [`artifact`] for the on-disk layout and [`FactorModel`] for the
//! predictor it deserializes into.

pub mod artifact;
pub mod factor;

pub use artifact::{ArtifactReader, ArtifactWriter};
pub use factor::FactorModel;

/// A rating estimate for one (customer, product) pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PredictedRating {
    /// Estimated rating, clipped to the model's trained scale.
    pub estimated_rating: f64,
    /// True when the estimate fell back to baseline terms because the
    /// customer or product was unknown to the model (cold start).
    pub fallback: bool,
}

/// Capability interface for trained rating-prediction models.
///
/// `predict` is a pure function of its inputs: no mutable state, safe to
/// call from parallel workers. Implementations must handle unknown
/// identifiers by falling back to baseline/global estimates rather than
/// failing; cold start is the model's responsibility, not the caller's.
pub trait RatingPredictor {
    /// Estimate the rating `customer_id` would give `product_id`.
    fn predict(&self, customer_id: &str, product_id: &str) -> PredictedRating;
}
