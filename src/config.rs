use reqwest::Url;
use serde::Deserialize;

use crate::error::{ClientError, ClientResult};

/// Console configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Base URL of the recommendation service
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Path of the recommendations collection endpoint
    #[serde(default = "default_collection_path")]
    pub collection_path: String,

    /// Path of the service health check
    #[serde(default = "default_health_path")]
    pub health_path: String,
}

fn default_api_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_collection_path() -> String {
    "/api/recommendations".to_string()
}

fn default_health_path() -> String {
    "/health".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            collection_path: default_collection_path(),
            health_path: default_health_path(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Config pointing at an arbitrary base URL with the default paths
    pub fn with_api_url(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            ..Self::default()
        }
    }

    /// Absolute URL of the collection endpoint
    pub fn collection_url(&self) -> ClientResult<Url> {
        join_url(&self.api_url, &self.collection_path)
    }

    /// Absolute URL of the health check
    pub fn health_url(&self) -> ClientResult<Url> {
        join_url(&self.api_url, &self.health_path)
    }
}

fn join_url(base: &str, path: &str) -> ClientResult<Url> {
    let joined = format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    );
    Url::parse(&joined).map_err(|e| ClientError::InvalidUrl(format!("{joined}: {e}")))
}
