//! Recommendation strategies.
//!
//! Two independent rankers over the same catalog of products:
//!
//! - **Content-based** ([`ContentRecommender`]): TF-IDF similarity
//!   between product descriptions, blended with the quality signal of
//!   each candidate's average rating.
//! - **Collaborative** ([`CollaborativeRecommender`]): predicted ratings
//!   from a pre-trained model, excluding products the customer already
//!   rated highly.
//!
//! Both return fully materialized result rows and never mutate their
//! inputs; an empty ranked list is a valid result, not an error.

pub mod collaborative;
pub mod content;

pub use collaborative::{CollaborativeRecommendation, CollaborativeRecommender};
pub use content::{ContentRecommendation, ContentRecommender};
