//! Core domain types for the precomputed recommendation artifacts.
//!
//! The movie table and the similarity matrix share one index space: row `i`
//! of the table is row `i` (and column `i`) of the matrix.

use serde::{Deserialize, Serialize};

use crate::error::{DataLoadError, Result};

// =============================================================================
// Type Aliases
// =============================================================================

/// TMDB identifier of a movie
pub type MovieId = u32;

// =============================================================================
// Movie Table
// =============================================================================

/// One row of the movie table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
}

impl Movie {
    pub fn new(id: MovieId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
        }
    }
}

// =============================================================================
// Similarity Matrix
// =============================================================================

/// Square matrix of pairwise similarity scores, stored row-major.
///
/// Symmetry is produced by whatever built the matrix and is not checked here.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityMatrix {
    dimension: usize,
    scores: Vec<f32>,
}

impl SimilarityMatrix {
    /// Build a matrix from its rows, rejecting anything that is not square.
    pub fn from_rows(rows: Vec<Vec<f32>>) -> Result<Self> {
        let dimension = rows.len();

        // Shape is checked before sizing the buffer from it
        if let Some((i, row)) = rows.iter().enumerate().find(|(_, row)| row.len() != dimension) {
            return Err(DataLoadError::ValidationError(format!(
                "similarity matrix is not square: row {} has {} columns, expected {}",
                i,
                row.len(),
                dimension
            )));
        }

        let mut scores = Vec::with_capacity(rows.iter().map(Vec::len).sum());
        for row in rows {
            scores.extend(row);
        }

        Ok(Self { dimension, scores })
    }

    /// Number of rows (and columns)
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Scores of movie `i` against every movie, or `None` past the last row
    pub fn row(&self, i: usize) -> Option<&[f32]> {
        if i >= self.dimension {
            return None;
        }
        let start = i * self.dimension;
        Some(&self.scores[start..start + self.dimension])
    }

    /// Single entry (i, j)
    pub fn score(&self, i: usize, j: usize) -> Option<f32> {
        self.row(i)?.get(j).copied()
    }
}

// =============================================================================
// DataIndex - The immutable context shared by lookup and presentation
// =============================================================================

/// Both artifacts, loaded once and held read-only for the process lifetime.
///
/// Construction always goes through [`DataIndex::from_parts`] (directly or via
/// `load_from_files`), so a `DataIndex` in hand is guaranteed to have a
/// non-empty table whose length matches the matrix dimension.
#[derive(Debug)]
pub struct DataIndex {
    pub(crate) movies: Vec<Movie>,
    pub(crate) similarity: SimilarityMatrix,
}

impl DataIndex {
    /// Pair a movie table with its similarity matrix after validating that
    /// they describe the same index space.
    pub fn from_parts(movies: Vec<Movie>, similarity: SimilarityMatrix) -> Result<Self> {
        let index = Self { movies, similarity };
        index.validate()?;
        Ok(index)
    }

    /// Number of movies
    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    /// Titles in table order; this is the option set of the selector
    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.movies.iter().map(|m| m.title.as_str())
    }

    /// Movie at a row position
    pub fn movie_at(&self, position: usize) -> Option<&Movie> {
        self.movies.get(position)
    }

    /// Row position of the first movie whose title matches exactly
    pub fn position_of(&self, title: &str) -> Option<usize> {
        self.movies.iter().position(|m| m.title == title)
    }

    /// Similarity scores for the movie at `position`
    pub fn similarity_row(&self, position: usize) -> Option<&[f32]> {
        self.similarity.row(position)
    }

    pub fn similarity(&self) -> &SimilarityMatrix {
        &self.similarity
    }

    /// (movies, matrix dimension) for logging
    pub fn counts(&self) -> (usize, usize) {
        (self.movies.len(), self.similarity.dimension())
    }
}
