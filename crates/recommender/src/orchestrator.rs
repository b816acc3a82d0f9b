//! # Recommendation Orchestrator
//!
//! Runs one full interaction:
//! 1. Similarity lookup for the selected title
//! 2. One poster fetch per recommended movie, in rank order, one at a time
//! 3. Collect failed fetches as notices without aborting the batch
//!
//! Lookup errors propagate; poster errors never do.

use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{info, warn};

use data_loader::{DataIndex, MovieId};
use poster_client::{PosterError, PosterSource};

use crate::lookup::{self, RECOMMENDATION_COUNT, SimilarMovie};

/// Final recommendation shown in one result slot
#[derive(Debug, Clone, PartialEq)]
pub struct MovieRecommendation {
    pub movie_id: MovieId,
    pub title: String,
    pub score: f32,
    pub poster_url: Option<String>,
}

/// A poster fetch that failed; rendered as a non-fatal notice
#[derive(Debug, Clone, PartialEq)]
pub struct PosterNotice {
    pub movie_id: MovieId,
    pub title: String,
    pub error: PosterError,
}

/// Everything one trigger produces
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecommendationSet {
    pub recommendations: Vec<MovieRecommendation>,
    pub notices: Vec<PosterNotice>,
}

/// Coordinates the similarity lookup and the poster fetches
#[derive(Clone)]
pub struct RecommendationOrchestrator {
    data_index: Arc<DataIndex>,
    posters: Arc<dyn PosterSource>,
    limit: usize,
}

impl RecommendationOrchestrator {
    /// Create an orchestrator over a loaded index and a poster source
    pub fn new(data_index: Arc<DataIndex>, posters: Arc<dyn PosterSource>) -> Self {
        Self {
            data_index,
            posters,
            limit: RECOMMENDATION_COUNT,
        }
    }

    /// Override how many recommendations are produced (default: 5)
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn data_index(&self) -> &Arc<DataIndex> {
        &self.data_index
    }

    /// Main entry point: recommendations and posters for a title
    pub async fn recommend(&self, title: &str) -> Result<RecommendationSet> {
        let start_time = Instant::now();

        let similar = lookup::similar_movies(&self.data_index, title, self.limit)
            .context("Similarity lookup failed")?;
        info!("Found {} similar movies for '{}'", similar.len(), title);

        let set = self.attach_posters(similar).await;

        info!(
            "Recommendations for '{}' ready in {:.2?} ({} poster failures)",
            title,
            start_time.elapsed(),
            set.notices.len()
        );
        Ok(set)
    }

    /// Fetch posters serially; each failure becomes a notice and an empty slot
    async fn attach_posters(&self, similar: Vec<SimilarMovie>) -> RecommendationSet {
        let mut set = RecommendationSet::default();

        for movie in similar {
            let poster_url = match self.posters.fetch_poster(movie.movie_id).await {
                Ok(poster) => poster,
                Err(error) => {
                    warn!("Poster fetch failed for '{}': {}", movie.title, error);
                    set.notices.push(PosterNotice {
                        movie_id: movie.movie_id,
                        title: movie.title.clone(),
                        error,
                    });
                    None
                }
            };

            set.recommendations.push(MovieRecommendation {
                movie_id: movie.movie_id,
                title: movie.title,
                score: movie.score,
                poster_url,
            });
        }

        set
    }
}
