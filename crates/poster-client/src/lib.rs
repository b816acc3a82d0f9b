//! Poster lookups against the TMDB metadata API.
//!
//! This crate provides a small client that resolves a movie identifier to a
//! poster image URL. It handles:
//! - Building the `/movie/{id}` request with the configured key and language
//! - Classifying failures (transport, HTTP status, unexpected payload)
//! - Turning the returned `poster_path` fragment into a full image URL
//!
//! Every lookup is a single request. There is no retry and no caching.

use std::time::Duration;

use async_trait::async_trait;
use data_loader::MovieId;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, error, instrument, warn};

/// Base URL of the TMDB v3 API
pub const DEFAULT_API_URL: &str = "https://api.themoviedb.org/3";

/// Prefix joined with `poster_path` to form the image URL
pub const DEFAULT_IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/w500/";

/// Metadata language requested from TMDB
pub const DEFAULT_LANGUAGE: &str = "en-US";

/// Why a poster could not be resolved
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PosterError {
    /// Connection, transport or timeout failure
    #[error("network error: {0}")]
    Network(String),

    /// TMDB answered with a non-success status
    #[error("TMDB returned HTTP {status}")]
    Status { status: u16 },

    /// Body was not the JSON shape we expect
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

/// `Ok(Some(url))` when a poster exists, `Ok(None)` when TMDB has none.
pub type PosterResult = Result<Option<String>, PosterError>;

/// Anything that can resolve a movie identifier to a poster URL.
///
/// The orchestrator depends on this trait rather than on [`TmdbClient`] so
/// tests can substitute a deterministic source.
#[async_trait]
pub trait PosterSource: Send + Sync {
    async fn fetch_poster(&self, movie_id: MovieId) -> PosterResult;
}

/// Connection settings for [`TmdbClient`]
#[derive(Debug, Clone)]
pub struct TmdbSettings {
    /// API key sent as the `api_key` query parameter; omitted when `None`
    pub api_key: Option<String>,
    pub api_url: String,
    pub image_base_url: String,
    pub language: String,
    /// Request timeout; `None` leaves the transport default in place
    pub timeout: Option<Duration>,
}

impl Default for TmdbSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: DEFAULT_API_URL.to_string(),
            image_base_url: DEFAULT_IMAGE_BASE_URL.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            timeout: None,
        }
    }
}

impl TmdbSettings {
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Subset of the `/movie/{id}` payload we read
#[derive(Deserialize)]
struct MovieDetails {
    #[serde(default)]
    poster_path: Option<String>,
}

/// Client for the TMDB movie details endpoint.
pub struct TmdbClient {
    http: reqwest::Client,
    settings: TmdbSettings,
}

impl TmdbClient {
    /// Build a client. Fails only if the HTTP stack cannot be initialised.
    pub fn new(settings: TmdbSettings) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = settings.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;

        if settings.api_key.is_none() {
            warn!("No TMDB API key configured; poster requests will be unauthenticated");
        }

        Ok(Self { http, settings })
    }

    fn details_url(&self, movie_id: MovieId) -> String {
        format!(
            "{}/movie/{}",
            self.settings.api_url.trim_end_matches('/'),
            movie_id
        )
    }

    /// Join a `poster_path` fragment onto the image base URL.
    ///
    /// The fragment is appended verbatim, so `"/x.jpg"` yields
    /// `https://image.tmdb.org/t/p/w500//x.jpg` with the default base.
    pub fn poster_url(&self, poster_path: &str) -> String {
        format!("{}{}", self.settings.image_base_url, poster_path)
    }
}

#[async_trait]
impl PosterSource for TmdbClient {
    #[instrument(skip(self))]
    async fn fetch_poster(&self, movie_id: MovieId) -> PosterResult {
        let mut query: Vec<(&str, &str)> = Vec::with_capacity(2);
        if let Some(key) = &self.settings.api_key {
            query.push(("api_key", key.as_str()));
        }
        query.push(("language", self.settings.language.as_str()));

        let response = self
            .http
            .get(self.details_url(movie_id))
            .query(&query)
            .send()
            .await
            .map_err(|e| {
                // The URL carries the API key; keep it out of user-facing text.
                let e = e.without_url();
                error!("Request for movie {} failed: {}", movie_id, e);
                PosterError::Network(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!("TMDB returned {} for movie {}", status, movie_id);
            return Err(PosterError::Status {
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| PosterError::Network(e.without_url().to_string()))?;

        let details: MovieDetails = serde_json::from_slice(&body).map_err(|e| {
            warn!("Unexpected TMDB payload for movie {}: {}", movie_id, e);
            PosterError::MalformedResponse(e.to_string())
        })?;

        let poster = details
            .poster_path
            .filter(|path| !path.is_empty())
            .map(|path| self.poster_url(&path));

        debug!("Movie {} poster: {:?}", movie_id, poster);
        Ok(poster)
    }
}
