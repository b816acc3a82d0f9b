//! Recommender crate: similarity lookup and the orchestrator that pairs
//! each recommendation with a poster.

pub mod lookup;
pub mod orchestrator;

pub use lookup::{LookupError, RECOMMENDATION_COUNT, SimilarMovie, similar_movies};
pub use orchestrator::{
    MovieRecommendation, PosterNotice, RecommendationOrchestrator, RecommendationSet,
};
