use std::path::PathBuf;
use std::time::Duration;

use anyhow::anyhow;
use data_loader::{MOVIES_FILE, SIMILARITY_FILE};
use poster_client::{DEFAULT_API_URL, DEFAULT_IMAGE_BASE_URL, DEFAULT_LANGUAGE, TmdbSettings};
use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// TMDB API key
    #[serde(default)]
    pub tmdb_api_key: Option<String>,

    /// TMDB API base URL
    #[serde(default = "default_tmdb_api_url")]
    pub tmdb_api_url: String,

    /// Prefix for poster image URLs
    #[serde(default = "default_tmdb_image_base_url")]
    pub tmdb_image_base_url: String,

    /// Metadata language
    #[serde(default = "default_tmdb_language")]
    pub tmdb_language: String,

    /// Poster request timeout in seconds; unset means no explicit timeout
    #[serde(default)]
    pub tmdb_timeout_secs: Option<u64>,

    /// Movie table artifact
    #[serde(default = "default_movies_path")]
    pub movies_path: PathBuf,

    /// Similarity matrix artifact
    #[serde(default = "default_similarity_path")]
    pub similarity_path: PathBuf,
}

fn default_tmdb_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_tmdb_image_base_url() -> String {
    DEFAULT_IMAGE_BASE_URL.to_string()
}

fn default_tmdb_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

fn default_movies_path() -> PathBuf {
    PathBuf::from(MOVIES_FILE)
}

fn default_similarity_path() -> PathBuf {
    PathBuf::from(SIMILARITY_FILE)
}

impl Config {
    /// Load configuration from environment variables, after applying `.env`
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow!("Failed to load config: {}", e))
    }

    /// Load configuration from explicit key/value pairs
    pub fn from_vars<I>(vars: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::from_iter::<_, Config>(vars).map_err(|e| anyhow!("Failed to load config: {}", e))
    }

    /// Settings for the TMDB client; a blank key counts as no key
    pub fn tmdb_settings(&self) -> TmdbSettings {
        TmdbSettings {
            api_key: self
                .tmdb_api_key
                .clone()
                .filter(|key| !key.trim().is_empty()),
            api_url: self.tmdb_api_url.clone(),
            image_base_url: self.tmdb_image_base_url.clone(),
            language: self.tmdb_language.clone(),
            timeout: self.tmdb_timeout_secs.map(Duration::from_secs),
        }
    }
}
