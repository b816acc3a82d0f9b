//! Deserializers for the two artifact files.
//!
//! - movie table: JSON, either a list of records
//!   `[{"movie_id": 19995, "title": "Avatar"}, ...]` or the column-oriented
//!   dict exported by the notebook
//!   `{"movie_id": {"0": 19995, ...}, "title": {"0": "Avatar", ...}}`
//! - similarity matrix: JSON array of rows, `[[1.0, 0.2, ...], ...]`

use crate::error::{DataLoadError, Result};
use crate::types::*;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// On-disk shape of the movie table
#[derive(Deserialize)]
#[serde(untagged)]
enum MovieTableFile {
    Records(Vec<MovieRow>),
    Columns(MovieColumns),
}

#[derive(Deserialize)]
struct MovieRow {
    #[serde(alias = "id")]
    movie_id: MovieId,
    title: String,
}

/// Column-oriented table keyed by row label. Other columns (tags, overview...)
/// are ignored.
#[derive(Deserialize)]
struct MovieColumns {
    #[serde(alias = "id")]
    movie_id: HashMap<String, MovieId>,
    title: HashMap<String, String>,
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let bytes = fs::read(path)?;
    serde_json::from_slice(&bytes).map_err(|e| DataLoadError::Corrupt {
        file: file_label(path),
        reason: e.to_string(),
    })
}

/// Parse the movie table file into rows ordered like the similarity matrix
pub fn parse_movies(path: &Path) -> Result<Vec<Movie>> {
    match read_json::<MovieTableFile>(path)? {
        MovieTableFile::Records(rows) => Ok(rows
            .into_iter()
            .map(|row| Movie::new(row.movie_id, row.title))
            .collect()),
        MovieTableFile::Columns(columns) => movies_from_columns(columns, &file_label(path)),
    }
}

/// Zip the id and title columns back into rows, ordered by numeric row label
fn movies_from_columns(columns: MovieColumns, file: &str) -> Result<Vec<Movie>> {
    let MovieColumns {
        movie_id: ids,
        mut title,
    } = columns;

    if ids.len() != title.len() {
        return Err(DataLoadError::Corrupt {
            file: file.to_string(),
            reason: format!(
                "column length mismatch: {} ids, {} titles",
                ids.len(),
                title.len()
            ),
        });
    }

    let mut rows: Vec<(usize, Movie)> = Vec::with_capacity(ids.len());
    for (label, id) in ids {
        let position: usize = label.parse().map_err(|e| DataLoadError::Corrupt {
            file: file.to_string(),
            reason: format!("invalid row label {:?}: {}", label, e),
        })?;
        let movie_title = title.remove(&label).ok_or_else(|| DataLoadError::Corrupt {
            file: file.to_string(),
            reason: format!("row {} has an id but no title", label),
        })?;
        rows.push((position, Movie::new(id, movie_title)));
    }

    rows.sort_by_key(|(position, _)| *position);
    Ok(rows.into_iter().map(|(_, movie)| movie).collect())
}

/// Parse the similarity matrix file
pub fn parse_similarity(path: &Path) -> Result<SimilarityMatrix> {
    let rows: Vec<Vec<f32>> = read_json(path)?;
    SimilarityMatrix::from_rows(rows).map_err(|e| DataLoadError::Corrupt {
        file: file_label(path),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::TempArtifact;

    #[test]
    fn test_parse_movie_records() {
        let file = TempArtifact::new(
            "records.json",
            r#"[{"movie_id": 19995, "title": "Avatar", "tags": "action"},
                {"id": 285, "title": "Pirates of the Caribbean: At World's End"}]"#,
        );

        let movies = parse_movies(file.path()).unwrap();
        assert_eq!(movies.len(), 2);
        assert_eq!(movies[0], Movie::new(19995, "Avatar"));
        assert_eq!(movies[1].id, 285);
    }

    #[test]
    fn test_parse_movie_columns_orders_by_row_label() {
        let file = TempArtifact::new(
            "columns.json",
            r#"{"movie_id": {"10": 3, "2": 2, "0": 1},
                "title": {"0": "A", "2": "B", "10": "C"},
                "tags": {"0": "x", "2": "y", "10": "z"}}"#,
        );

        let movies = parse_movies(file.path()).unwrap();
        let titles: Vec<&str> = movies.iter().map(|m| m.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "B", "C"]);
        assert_eq!(movies[2].id, 3);
    }

    #[test]
    fn test_parse_movie_columns_missing_title() {
        let file = TempArtifact::new(
            "columns_gap.json",
            r#"{"movie_id": {"0": 1, "1": 2}, "title": {"0": "A", "5": "B"}}"#,
        );

        let result = parse_movies(file.path());
        assert!(matches!(result, Err(DataLoadError::Corrupt { .. })));
    }

    #[test]
    fn test_parse_movies_garbage_is_corrupt() {
        let file = TempArtifact::new("garbage.json", "\u{80}not json at all");

        match parse_movies(file.path()) {
            Err(DataLoadError::Corrupt { file, .. }) => assert!(file.ends_with("garbage.json")),
            other => panic!("expected corrupt error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_similarity() {
        let file = TempArtifact::new("similarity.json", "[[1.0, 0.25], [0.25, 1.0]]");

        let matrix = parse_similarity(file.path()).unwrap();
        assert_eq!(matrix.dimension(), 2);
        assert_eq!(matrix.score(0, 1), Some(0.25));
    }

    #[test]
    fn test_parse_similarity_many_empty_rows_is_corrupt() {
        let contents = format!("[{}]", vec!["[]"; 200_000].join(","));
        let file = TempArtifact::new("empty-rows.json", &contents);

        let result = parse_similarity(file.path());
        assert!(matches!(result, Err(DataLoadError::Corrupt { .. })));
    }

    #[test]
    fn test_parse_similarity_not_square_is_corrupt() {
        let file = TempArtifact::new("ragged.json", "[[1.0, 0.25], [0.25]]");

        let result = parse_similarity(file.path());
        assert!(matches!(result, Err(DataLoadError::Corrupt { .. })));
    }
}
