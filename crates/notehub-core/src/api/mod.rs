//! REST client for the notes server.
//!
//! `ApiClient` is cheap to clone (the underlying `reqwest::Client` is
//! reference-counted) so the TUI runtime hands a copy to every spawned task.

pub mod auth;
mod error;
pub mod models;
pub mod nodes;

use std::time::Duration;

pub use error::{ApiError, ApiResult};
use reqwest::{Method, RequestBuilder, Response};
use url::Url;

use crate::config::Config;
use crate::session::Session;

pub const USER_AGENT: &str = concat!("notehub/", env!("CARGO_PKG_VERSION"));

/// HTTP client bound to one server and (optionally) one bearer token.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: Url,
    http: reqwest::Client,
    token: Option<String>,
}

impl ApiClient {
    /// Creates a client for `base_url`. `timeout` of `None` keeps reqwest's defaults.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> ApiResult<Self> {
        let trimmed = base_url.trim().trim_end_matches('/');
        let base_url = Url::parse(trimmed)
            .map_err(|e| ApiError::Validation(format!("Invalid server URL '{trimmed}': {e}")))?;

        let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;

        Ok(Self {
            base_url,
            http,
            token: None,
        })
    }

    /// Creates a client from the loaded config, optionally overriding the server.
    pub fn from_config(config: &Config, server_override: Option<&str>) -> ApiResult<Self> {
        let server = server_override.unwrap_or(&config.server_url);
        Self::new(server, config.request_timeout())
    }

    /// Returns a copy of this client that authenticates as `session`.
    #[must_use]
    pub fn with_session(&self, session: &Session) -> Self {
        self.with_token(session.token.clone())
    }

    #[must_use]
    pub fn with_token(&self, token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            ..self.clone()
        }
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url())
    }

    /// Unauthenticated request against `path` (used by the auth endpoints).
    fn public(&self, method: Method, path: &str) -> RequestBuilder {
        self.http
            .request(method, self.endpoint(path))
            .header("accept", "application/json")
    }

    /// Sends an authenticated request to `path`.
    ///
    /// `configure` adds the body. This is the only place a 401 turns into
    /// [`ApiError::SessionExpired`]; other non-2xx statuses become
    /// [`ApiError::Status`].
    pub async fn authorized_request(
        &self,
        method: Method,
        path: &str,
        configure: impl FnOnce(RequestBuilder) -> RequestBuilder,
    ) -> ApiResult<Response> {
        let url = self.endpoint(path);
        self.send_authorized(method, &url, configure).await
    }

    async fn send_authorized(
        &self,
        method: Method,
        url: &str,
        configure: impl FnOnce(RequestBuilder) -> RequestBuilder,
    ) -> ApiResult<Response> {
        let Some(token) = &self.token else {
            return Err(ApiError::SessionExpired);
        };

        let builder = self
            .http
            .request(method.clone(), url)
            .header("accept", "application/json")
            .bearer_auth(token);
        let response = configure(builder).send().await?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            tracing::info!(%method, url, "server rejected session token");
            return Err(ApiError::SessionExpired);
        }
        ensure_success(response).await
    }

    /// Resolves a note's `fileUrl` against the server base.
    ///
    /// Absolute URLs are returned unchanged; relative ones are joined to the
    /// server origin.
    pub fn resolve_file_url(&self, file_url: &str) -> ApiResult<Url> {
        let file_url = file_url.trim();
        if file_url.is_empty() {
            return Err(ApiError::Validation("Note has no file".to_string()));
        }
        if let Ok(absolute) = Url::parse(file_url) {
            return Ok(absolute);
        }
        let mut base = self.base_url.clone();
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        base.join(file_url)
            .map_err(|e| ApiError::Validation(format!("Invalid file URL '{file_url}': {e}")))
    }

    /// Whether `url` points at the configured server (same scheme, host, port).
    pub(crate) fn is_same_origin(&self, url: &Url) -> bool {
        url.origin() == self.base_url.origin()
    }
}

/// Passes 2xx responses through; anything else becomes [`ApiError::Status`].
async fn ensure_success(response: Response) -> ApiResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(ApiError::Status {
        status: status.as_u16(),
        body: body.trim().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> ApiClient {
        ApiClient::new(base, None).unwrap()
    }

    #[test]
    fn test_base_url_trailing_slash_is_ignored() {
        assert_eq!(
            client("http://localhost:8080/").base_url(),
            "http://localhost:8080"
        );
        assert_eq!(
            client("http://host/api/").endpoint("/streams"),
            "http://host/api/streams"
        );
    }

    #[test]
    fn test_invalid_base_url_is_a_validation_error() {
        let err = ApiClient::new("not a url", None).unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[test]
    fn test_resolve_file_url() {
        let api = client("http://host:8080/api");
        assert_eq!(
            api.resolve_file_url("https://cdn.example.com/n.pdf")
                .unwrap()
                .as_str(),
            "https://cdn.example.com/n.pdf"
        );
        assert_eq!(
            api.resolve_file_url("/files/n.pdf").unwrap().as_str(),
            "http://host:8080/files/n.pdf"
        );
        assert_eq!(
            api.resolve_file_url("files/n.pdf").unwrap().as_str(),
            "http://host:8080/api/files/n.pdf"
        );
        assert!(api.resolve_file_url("  ").is_err());
    }

    #[test]
    fn test_same_origin() {
        let api = client("http://host:8080");
        assert!(api.is_same_origin(&Url::parse("http://host:8080/files/a").unwrap()));
        assert!(!api.is_same_origin(&Url::parse("https://cdn.example.com/a").unwrap()));
    }

    #[test]
    fn test_with_token_keeps_base() {
        let api = client("http://host").with_token("t");
        assert_eq!(api.base_url(), "http://host");
    }
}
