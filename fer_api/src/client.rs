//! # HTTP Plumbing
//!
//! One `reqwest` client with a cookie store, a request timeout and a stable
//! user agent. All endpoint methods funnel through [`ApiClient::dispatch`],
//! which applies the shared error contract: non-2xx bodies are mined for an
//! `error`/`message` string, everything else is decoded as JSON.

use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::form_urlencoded;

use crate::error::{ApiError, ApiResult};

/// Default backend base, overridable with `$SUIVIFER_API_BASE`.
pub const DEFAULT_API_BASE: &str = "http://localhost:3000/api";

/// Environment variable holding the backend base URL.
pub const API_BASE_ENV: &str = "SUIVIFER_API_BASE";

const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Cookie-credentialed JSON client for the Suivifer backend.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base: String,
}

impl ApiClient {
    /// Build a client against `base` (e.g. `https://host/api`, no trailing
    /// slash).
    pub fn new(base: impl Into<String>) -> ApiResult<Self> {
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .user_agent(format!("suivifer/{}", env!("CARGO_PKG_VERSION")))
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(ApiClient {
            http,
            base: base.into(),
        })
    }

    /// Build a client from `$SUIVIFER_API_BASE`, falling back to the local
    /// development default.
    pub fn from_env() -> ApiResult<Self> {
        let base = std::env::var(API_BASE_ENV).unwrap_or_else(|_| DEFAULT_API_BASE.to_string());
        ApiClient::new(base)
    }

    /// The configured base URL.
    pub fn base(&self) -> &str {
        &self.base
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        self.dispatch(self.http.get(self.url(path)), Method::GET, path)
            .await
    }

    pub(crate) async fn delete<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        self.dispatch(self.http.delete(self.url(path)), Method::DELETE, path)
            .await
    }

    pub(crate) async fn get_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> ApiResult<T> {
        self.dispatch(self.http.get(self.url(path)).query(query), Method::GET, path)
            .await
    }

    pub(crate) async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        self.dispatch(self.http.post(self.url(path)).json(body), Method::POST, path)
            .await
    }

    pub(crate) async fn put<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        self.dispatch(self.http.put(self.url(path)).json(body), Method::PUT, path)
            .await
    }

    async fn dispatch<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        method: Method,
        path: &str,
    ) -> ApiResult<T> {
        tracing::debug!(%method, path, "api request");
        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let err = ApiError::from_status(status.as_u16(), &body);
            if status != StatusCode::UNAUTHORIZED {
                tracing::warn!(%method, path, status = status.as_u16(), "api request failed");
            }
            return Err(err);
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| ApiError::Decode {
            reason: e.to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }
}

/// Percent-encode one path segment (rapport and mouvement ids come from the
/// backend and are treated as opaque).
pub(crate) fn encode_segment(raw: &str) -> String {
    form_urlencoded::byte_serialize(raw.as_bytes()).collect()
}
