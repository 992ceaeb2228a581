//! Configuration value objects for recommendation calls.
//!
//! All tunable policy lives here as explicit, documented defaults rather
//! than scattered constants: blend weights, the exclusion threshold, result
//! sizes, and input file locations. Callers pass these into recommenders;
//! nothing reads hidden global state.

use std::path::PathBuf;

use crate::error::{Result, SugerirError};

/// Configuration for content-based recommendation.
///
/// The final score of a candidate is
/// `similarity * weight_content + avg_rating * weight_rating`. The weights
/// are not required to sum to 1 but conventionally do; both must be finite
/// and non-negative.
///
/// # Examples
///
/// ```
/// use sugerir::config::ContentConfig;
///
/// let config = ContentConfig::new().with_weights(0.8, 0.2).with_top_n(10);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct ContentConfig {
    /// Weight applied to the cosine similarity term.
    pub weight_content: f64,
    /// Weight applied to the average-rating term.
    pub weight_rating: f64,
    /// Maximum number of result rows.
    pub top_n: usize,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            weight_content: 0.7,
            weight_rating: 0.3,
            top_n: 6,
        }
    }
}

impl ContentConfig {
    /// Create a config with the observed production defaults (0.7 / 0.3, top 6).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set both blend weights.
    #[must_use]
    pub fn with_weights(mut self, weight_content: f64, weight_rating: f64) -> Self {
        self.weight_content = weight_content;
        self.weight_rating = weight_rating;
        self
    }

    /// Set the maximum number of result rows.
    #[must_use]
    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    /// Check that both weights are finite and non-negative.
    ///
    /// # Errors
    ///
    /// Returns `InvalidWeight` naming the offending parameter.
    pub fn validate(&self) -> Result<()> {
        for (param, value) in [
            ("weight_content", self.weight_content),
            ("weight_rating", self.weight_rating),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(SugerirError::InvalidWeight {
                    param: param.to_string(),
                    value,
                    constraint: "finite and >= 0".to_string(),
                });
            }
        }
        Ok(())
    }
}

/// Configuration for collaborative recommendation.
///
/// Products a customer has already rated at or above
/// `exclusion_threshold` stars are removed from the candidate set: a
/// customer who has shown strong preference for a product is not
/// re-recommended it.
#[derive(Debug, Clone)]
pub struct CollaborativeConfig {
    /// Minimum star value at which a rated product is excluded.
    pub exclusion_threshold: u8,
    /// Maximum number of result rows.
    pub top_n: usize,
}

impl Default for CollaborativeConfig {
    fn default() -> Self {
        Self {
            exclusion_threshold: 3,
            top_n: 6,
        }
    }
}

impl CollaborativeConfig {
    /// Create a config with the observed production defaults (threshold 3, top 6).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the exclusion threshold in stars.
    #[must_use]
    pub fn with_exclusion_threshold(mut self, threshold: u8) -> Self {
        self.exclusion_threshold = threshold;
        self
    }

    /// Set the maximum number of result rows.
    #[must_use]
    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }
}

/// Locations of the flat-file inputs consumed by the engine.
///
/// Defaults mirror the layout the upstream pipelines write into `data/`.
/// Rating history may be partitioned across several files; they are unioned
/// at load time.
#[derive(Debug, Clone)]
pub struct SourcePaths {
    /// Preprocessed product catalog.
    pub catalog: PathBuf,
    /// Rating-history partitions, unioned row-wise.
    pub ratings: Vec<PathBuf>,
    /// Serialized, compressed predictive-model artifact.
    pub model: PathBuf,
}

impl Default for SourcePaths {
    fn default() -> Self {
        Self {
            catalog: PathBuf::from("data/catalog.csv"),
            ratings: vec![
                PathBuf::from("data/ratings_part1.csv"),
                PathBuf::from("data/ratings_part2.csv"),
            ],
            model: PathBuf::from("data/rating_model.sgr"),
        }
    }
}

impl SourcePaths {
    /// Create paths pointing at the default `data/` layout.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the catalog file location.
    #[must_use]
    pub fn with_catalog(mut self, path: impl Into<PathBuf>) -> Self {
        self.catalog = path.into();
        self
    }

    /// Set the rating-history partitions.
    #[must_use]
    pub fn with_ratings(mut self, paths: Vec<PathBuf>) -> Self {
        self.ratings = paths;
        self
    }

    /// Set the model artifact location.
    #[must_use]
    pub fn with_model(mut self, path: impl Into<PathBuf>) -> Self {
        self.model = path.into();
        self
    }
}
