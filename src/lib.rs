//! Sugerir: product recommendation engine in pure Rust.
//!
//! Sugerir recommends products from an e-commerce catalog using two
//! independent strategies: content similarity between product
//! descriptions (TF-IDF vector space blended with a quality signal) and
//! collaborative filtering from historical customer ratings (a
//! pre-trained latent-factor model over unseen products).
//!
//! # Quick Start
//!
//! ```
//! use sugerir::catalog::{Catalog, Product};
//! use sugerir::config::ContentConfig;
//! use sugerir::recommend::ContentRecommender;
//!
//! let catalog = Catalog::from_products(vec![
//!     Product::new("SP001", "Hydrating Cream")
//!         .with_tokens(vec!["cream".into(), "hydrating".into(), "skin".into()])
//!         .with_avg_rating(4.0),
//!     Product::new("SP002", "Rich Night Cream")
//!         .with_tokens(vec!["cream".into(), "hydrating".into(), "rich".into()])
//!         .with_avg_rating(3.5),
//!     Product::new("SP003", "Matte Lipstick")
//!         .with_tokens(vec!["lipstick".into(), "matte".into(), "red".into()])
//!         .with_avg_rating(4.9),
//! ]).unwrap();
//!
//! let recommender = ContentRecommender::new(catalog)
//!     .with_config(ContentConfig::new().with_weights(0.7, 0.3).with_top_n(2));
//!
//! let rows = recommender.recommend("SP001").unwrap();
//! assert_eq!(rows.len(), 2);
//! // The query product leads with self-similarity 1.0.
//! assert_eq!(rows[0].product_code, "SP001");
//! ```
//!
//! # Modules
//!
//! - [`catalog`]: preprocessed product catalog loading
//! - [`text`]: TF-IDF vectorization and sparse cosine similarity
//! - [`ratings`]: customer rating history (multi-file union)
//! - [`model`]: pre-trained rating predictors and their artifact format
//! - [`recommend`]: the content-based and collaborative rankers
//! - [`config`]: explicit configuration value objects and their defaults
//! - [`error`]: the crate error type

pub mod catalog;
pub mod config;
pub mod error;
pub mod model;
pub mod prelude;
pub mod ratings;
pub mod recommend;
pub mod text;

pub use error::{Result, SugerirError};
