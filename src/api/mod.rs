//! HTTP client for the video server.

pub mod models;

pub use models::*;

use crate::config::ApiConfig;
use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use thiserror::Error;

static HTTP_CLIENT: Lazy<reqwest::Client> = Lazy::new(reqwest::Client::new);

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("unexpected response body from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct VideoClient {
    config: ApiConfig,
}

impl VideoClient {
    pub fn new(config: ApiConfig) -> Self {
        Self { config }
    }

    fn endpoint(&self, route: &str, query: &[(&str, &str)]) -> String {
        let mut url = format!("{}/api/{}", self.config.base_url, route);
        for (i, (key, value)) in query.iter().enumerate() {
            url.push(if i == 0 { '?' } else { '&' });
            url.push_str(key);
            url.push('=');
            url.push_str(&urlencoding::encode(value));
        }
        url
    }

    pub fn video_info_url(&self, path: &str) -> String {
        self.endpoint("video", &[("path", path)])
    }

    pub fn stream_url(&self, path: &str) -> String {
        self.endpoint("video/stream", &[("path", path)])
    }

    pub fn subtitle_url(&self, path: &str, language: &str) -> String {
        self.endpoint("video/subtitle", &[("path", path), ("lang", language)])
    }

    pub fn thumbnail_url(&self, path: &str) -> String {
        self.endpoint("video/thumbnail", &[("path", path)])
    }

    pub fn browse_url(&self, dir: &str) -> String {
        self.endpoint("browse", &[("path", dir)])
    }

    async fn get_json<T: DeserializeOwned>(&self, url: String) -> Result<T, ApiError> {
        let response = HTTP_CLIENT
            .get(&url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|source| ApiError::Request {
                url: url.clone(),
                source,
            })?;
        response
            .json::<T>()
            .await
            .map_err(|source| ApiError::Decode { url, source })
    }

    pub async fn fetch_video(&self, path: &str) -> Result<VideoResponse, ApiError> {
        self.get_json(self.video_info_url(path)).await
    }

    pub async fn fetch_listing(&self, dir: &str) -> Result<Listing, ApiError> {
        self.get_json(self.browse_url(dir)).await
    }
}
