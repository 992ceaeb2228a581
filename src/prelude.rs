//! Convenience re-exports for common usage.
//!
//! # Usage
//!
//! ```
//! use sugerir::prelude::*;
//! ```

pub use crate::catalog::{Catalog, Product};
pub use crate::config::{CollaborativeConfig, ContentConfig, SourcePaths};
pub use crate::error::{Result, SugerirError};
pub use crate::model::{FactorModel, PredictedRating, RatingPredictor};
pub use crate::ratings::{RatingRecord, RatingStore};
pub use crate::recommend::{
    CollaborativeRecommendation, CollaborativeRecommender, ContentRecommendation,
    ContentRecommender,
};
pub use crate::text::{SimilarityIndex, SparseVector, TfidfVectorizer};
