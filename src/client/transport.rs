//! Request executor: the transport seam between the client components and
//! the KeyWarden service.
//!
//! The bearer token is an argument on every call. It must never be written
//! to shared transport state: two concurrent calls holding different access
//! keys would otherwise race on the Authorization header.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};

use crate::config::ApiConfig;
use crate::errors::{ApiError, ApiResult};

/// Transport abstraction the client components issue requests through.
///
/// `path` is relative to the fixed base endpoint and may carry query
/// parameters. Non-2xx statuses and network errors both surface as
/// `ApiError::Transport`; a 2xx with no content is passed through as an
/// empty string for the envelope layer to classify.
#[async_trait]
pub trait RequestExecutor: Send + Sync {
    /// Issue a POST with a raw JSON body. `bearer = None` sends no
    /// Authorization header at all.
    async fn post(&self, path: &str, body: &str, bearer: Option<&str>) -> ApiResult<String>;

    /// Issue a GET. Same bearer semantics as `post`.
    async fn get(&self, path: &str, bearer: Option<&str>) -> ApiResult<String>;
}

/// reqwest-backed executor targeting the configured base endpoint.
#[derive(Debug, Clone)]
pub struct HttpExecutor {
    http: reqwest::Client,
    base_url: String,
}

impl HttpExecutor {
    /// Build an executor from API configuration.
    pub fn new(config: &ApiConfig) -> ApiResult<Self> {
        let http = reqwest::Client::builder()
            .user_agent(format!("keywarden/{}", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ApiError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn read_success_body(response: reqwest::Response) -> ApiResult<String> {
        if !response.status().is_success() {
            return Err(ApiError::Transport(format!(
                "HTTP status {}",
                response.status()
            )));
        }

        response
            .text()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))
    }
}

#[async_trait]
impl RequestExecutor for HttpExecutor {
    async fn post(&self, path: &str, body: &str, bearer: Option<&str>) -> ApiResult<String> {
        let mut request = self
            .http
            .post(self.url(path))
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .body(body.to_string());

        // Per-request credential attachment; no token means no header.
        if let Some(token) = bearer {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        Self::read_success_body(response).await
    }

    async fn get(&self, path: &str, bearer: Option<&str>) -> ApiResult<String> {
        let mut request = self.http.get(self.url(path)).header(ACCEPT, "application/json");

        if let Some(token) = bearer {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        Self::read_success_body(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn executor(base_url: &str) -> HttpExecutor {
        HttpExecutor::new(&ApiConfig {
            base_url: base_url.to_string(),
            timeout_secs: 5,
        })
        .expect("executor build failed")
    }

    #[test]
    fn url_joining_normalizes_slashes() {
        let plain = executor("https://api.keywarden.dev");
        assert_eq!(plain.url("auth"), "https://api.keywarden.dev/auth");

        let trailing = executor("https://api.keywarden.dev/");
        assert_eq!(trailing.url("auth"), "https://api.keywarden.dev/auth");
        assert_eq!(trailing.url("/auth"), "https://api.keywarden.dev/auth");
    }

    #[test]
    fn url_keeps_query_parameters() {
        let ex = executor("https://api.keywarden.dev");
        assert_eq!(
            ex.url("check_app?app_key=AK-1"),
            "https://api.keywarden.dev/check_app?app_key=AK-1"
        );
    }
}
