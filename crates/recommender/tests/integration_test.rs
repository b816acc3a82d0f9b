//! Integration tests for the full recommendation flow.
//!
//! Artifacts are written to disk and loaded through the real loader, and
//! posters come from the real TMDB client pointed at a local mock server.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use data_loader::DataIndex;
use poster_client::{PosterError, TmdbClient, TmdbSettings};
use recommender::RecommendationOrchestrator;
use serde_json::json;
use tokio::net::TcpListener;

const MOVIES: &str = r#"{
    "movie_id": {"0": 19995, "1": 285, "2": 206647, "3": 49026, "4": 49529, "5": 559, "6": 38757},
    "title": {"0": "Avatar", "1": "Pirates of the Caribbean", "2": "Spectre",
              "3": "The Dark Knight Rises", "4": "John Carter", "5": "Spider-Man 3",
              "6": "Tangled"}
}"#;

const SIMILARITY: &str = "[
    [1.0, 0.2, 0.3, 0.4, 0.9, 0.1, 0.5],
    [0.2, 1.0, 0.1, 0.1, 0.1, 0.1, 0.1],
    [0.3, 0.1, 1.0, 0.1, 0.1, 0.1, 0.1],
    [0.4, 0.1, 0.1, 1.0, 0.1, 0.1, 0.1],
    [0.9, 0.1, 0.1, 0.1, 1.0, 0.1, 0.1],
    [0.1, 0.1, 0.1, 0.1, 0.1, 1.0, 0.1],
    [0.5, 0.1, 0.1, 0.1, 0.1, 0.1, 1.0]
]";

/// Directory holding one test's artifacts, removed on drop
struct ArtifactDir(PathBuf);

impl ArtifactDir {
    fn new(name: &str) -> Self {
        let dir = std::env::temp_dir().join(format!(
            "recommender-it-{}-{}",
            std::process::id(),
            name
        ));
        fs::create_dir_all(&dir).unwrap();
        Self(dir)
    }

    fn write(&self, file: &str, contents: &str) -> PathBuf {
        let path = self.0.join(file);
        fs::write(&path, contents).unwrap();
        path
    }
}

impl Drop for ArtifactDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.0);
    }
}

/// Mock TMDB: John Carter (49529) hangs, everything else has a poster
async fn movie_details(
    Path(id): Path<u32>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if params.get("api_key").map(String::as_str) != Some("it-key") {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    if id == 49529 {
        tokio::time::sleep(Duration::from_secs(3)).await;
    }
    Json(json!({ "id": id, "poster_path": format!("/{}.jpg", id) })).into_response()
}

async fn start_mock_tmdb() -> (String, tokio::task::JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = Router::new().route("/movie/:id", get(movie_details));
    let handle = tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{}", addr), handle)
}

fn load_index(dir: &ArtifactDir) -> Arc<DataIndex> {
    let movies = dir.write("movies_dict.json", MOVIES);
    let similarity = dir.write("similarity.json", SIMILARITY);
    Arc::new(DataIndex::load_from_files(&movies, &similarity).unwrap())
}

#[tokio::test]
async fn test_end_to_end_with_slow_poster() {
    let dir = ArtifactDir::new("end-to-end");
    let data_index = load_index(&dir);
    let (addr, handle) = start_mock_tmdb().await;

    let client = TmdbClient::new(
        TmdbSettings::default()
            .with_api_key("it-key")
            .with_api_url(&addr)
            .with_timeout(Duration::from_millis(250)),
    )
    .unwrap();
    let orchestrator = RecommendationOrchestrator::new(data_index, Arc::new(client));

    let set = orchestrator.recommend("Avatar").await.unwrap();

    assert_eq!(set.recommendations.len(), 5);
    assert!(set.recommendations.iter().all(|r| r.title != "Avatar"));
    assert!(
        set.recommendations
            .windows(2)
            .all(|w| w[0].score >= w[1].score)
    );

    // The hanging request times out into exactly one notice
    assert_eq!(set.notices.len(), 1);
    assert_eq!(set.notices[0].movie_id, 49529);
    assert!(matches!(set.notices[0].error, PosterError::Network(_)));
    assert_eq!(set.recommendations[0].poster_url, None);

    // The rest of the batch still resolved
    assert_eq!(
        set.recommendations[1].poster_url.as_deref(),
        Some("https://image.tmdb.org/t/p/w500//38757.jpg")
    );
    assert!(set.recommendations[1..].iter().all(|r| r.poster_url.is_some()));

    handle.abort();
}

#[tokio::test]
async fn test_repeated_requests_are_identical() {
    let dir = ArtifactDir::new("idempotent");
    let data_index = load_index(&dir);
    let (addr, handle) = start_mock_tmdb().await;

    let client = TmdbClient::new(
        TmdbSettings::default()
            .with_api_key("it-key")
            .with_api_url(&addr)
            .with_timeout(Duration::from_millis(250)),
    )
    .unwrap();
    let orchestrator = RecommendationOrchestrator::new(data_index, Arc::new(client));

    let first = orchestrator.recommend("Tangled").await.unwrap();
    let second = orchestrator.recommend("Tangled").await.unwrap();
    assert_eq!(first, second);

    handle.abort();
}

#[test]
fn test_missing_artifact_halts_before_anything_else() {
    let dir = ArtifactDir::new("missing");
    let movies = dir.write("movies_dict.json", MOVIES);
    let similarity = dir.0.join("similarity.json");

    let err = DataIndex::load_from_files(&movies, &similarity).unwrap_err();
    assert!(err.is_missing());
}
