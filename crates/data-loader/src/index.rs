//! DataIndex loading and validation.
//!
//! Both artifacts must load or nothing does: existence of both files is
//! checked before either is deserialized, and the pair is validated as a
//! unit before the index is handed out.

use crate::error::{DataLoadError, Result};
use crate::parser;
use crate::types::*;
use std::path::Path;
use tracing::{debug, info};

/// Default file name of the movie table artifact
pub const MOVIES_FILE: &str = "movies_dict.json";

/// Default file name of the similarity matrix artifact
pub const SIMILARITY_FILE: &str = "similarity.json";

impl DataIndex {
    /// Load the movie table and similarity matrix from disk.
    ///
    /// Steps:
    /// 1. Check that both files exist (`ArtifactMissing` otherwise)
    /// 2. Deserialize both (`Corrupt` on malformed data)
    /// 3. Validate that they share one index space
    pub fn load_from_files(movies_path: &Path, similarity_path: &Path) -> Result<Self> {
        for path in [movies_path, similarity_path] {
            if !path.exists() {
                return Err(DataLoadError::ArtifactMissing {
                    path: path.display().to_string(),
                });
            }
        }

        debug!(
            movies = %movies_path.display(),
            similarity = %similarity_path.display(),
            "Reading artifacts"
        );
        let movies = parser::parse_movies(movies_path)?;
        let similarity = parser::parse_similarity(similarity_path)?;

        let index = DataIndex::from_parts(movies, similarity)?;
        let (movie_count, dimension) = index.counts();
        info!(
            "Loaded {} movies and a {}x{} similarity matrix",
            movie_count, dimension, dimension
        );
        Ok(index)
    }

    /// Validate data integrity
    ///
    /// Check that:
    /// - The movie table is not empty
    /// - The matrix dimension equals the number of movies
    pub fn validate(&self) -> Result<()> {
        if self.movies.is_empty() {
            return Err(DataLoadError::ValidationError(
                "movie table is empty".to_string(),
            ));
        }
        if self.similarity.dimension() != self.movies.len() {
            return Err(DataLoadError::ValidationError(format!(
                "similarity matrix is {}x{} but the movie table has {} rows",
                self.similarity.dimension(),
                self.similarity.dimension(),
                self.movies.len()
            )));
        }
        Ok(())
    }
}
