//! Similarity lookup over the precomputed matrix.
//!
//! ## Algorithm
//! 1. Find the row of the selected title (first exact match)
//! 2. Pair every score in that row with its column index
//! 3. Stable sort by score, highest first
//! 4. Drop the selected movie itself and keep the next `limit`
//! 5. Resolve id and title for each kept index

use data_loader::{DataIndex, MovieId};
use thiserror::Error;
use tracing::{debug, instrument};

/// How many similar movies the recommender shows
pub const RECOMMENDATION_COUNT: usize = 5;

/// Errors from a similarity lookup
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("Movie '{0}' is not in the movie table")]
    TitleNotFound(String),

    #[error("Row {position} is outside the {dimension}x{dimension} similarity matrix")]
    RowOutOfRange { position: usize, dimension: usize },
}

/// One entry of a similarity ranking
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarMovie {
    /// Row of the movie in the table / matrix
    pub position: usize,
    pub movie_id: MovieId,
    pub title: String,
    pub score: f32,
}

/// Rank every other movie against `title` and return the top `limit`.
///
/// The selected movie is excluded by position, so a tie at the top score can
/// never push the input title into the result. Tables smaller than
/// `limit + 1` yield `len - 1` entries.
#[instrument(skip(data_index))]
pub fn similar_movies(
    data_index: &DataIndex,
    title: &str,
    limit: usize,
) -> Result<Vec<SimilarMovie>, LookupError> {
    let position = data_index
        .position_of(title)
        .ok_or_else(|| LookupError::TitleNotFound(title.to_string()))?;

    let row = data_index
        .similarity_row(position)
        .ok_or(LookupError::RowOutOfRange {
            position,
            dimension: data_index.similarity().dimension(),
        })?;

    let ranked = rank_row(row, position, limit);
    debug!(
        "Ranked {} neighbours of '{}' (row {})",
        ranked.len(),
        title,
        position
    );

    Ok(ranked
        .into_iter()
        .filter_map(|(index, score)| {
            let movie = data_index.movie_at(index)?;
            Some(SimilarMovie {
                position: index,
                movie_id: movie.id,
                title: movie.title.clone(),
                score,
            })
        })
        .collect())
}

/// Sort one matrix row descending, skipping `exclude`, and keep `limit`
/// (index, score) pairs. NaN scores compare equal to everything.
fn rank_row(row: &[f32], exclude: usize, limit: usize) -> Vec<(usize, f32)> {
    let mut scored: Vec<(usize, f32)> = row
        .iter()
        .copied()
        .enumerate()
        .filter(|(index, _)| *index != exclude)
        .collect();

    // Vec::sort_by is stable, so equal scores keep table order
    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    scored.truncate(limit);
    scored
}
