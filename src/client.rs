//! HTTP data source for module payloads and the dashboard listing.
//!
//! The engine never talks to `reqwest` directly: it depends on the
//! [`DataSource`] trait, which fetches one JSON document per call. The
//! production implementation is [`ApiClient`]; tests substitute scripted
//! sources without opening sockets.

use crate::ModuleDescriptor;
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use url::Url;

/// Errors produced while fetching or decoding server data.
///
/// All variants are recovered locally by the caller (a failed module load
/// renders an inline error state; a failed listing renders an inline
/// initialization error). Nothing here propagates to a crash.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The endpoint could not be resolved against the base URL.
    #[error("invalid endpoint URL '{endpoint}': {message}")]
    InvalidUrl {
        /// Endpoint as supplied by the descriptor or configuration.
        endpoint: String,
        /// Parser message.
        message: String,
    },

    /// The request failed at the transport level.
    #[error("request to {url} failed")]
    Network {
        /// Fully resolved request URL.
        url: String,
        /// Underlying client error.
        #[source]
        source: reqwest::Error,
    },

    /// The server answered outside the 2xx range.
    #[error("{url} returned HTTP {status}")]
    Status {
        /// Fully resolved request URL.
        url: String,
        /// Numeric HTTP status code.
        status: u16,
    },

    /// The response body was not valid JSON.
    #[error("{url} returned a non-JSON body: {message}")]
    InvalidBody {
        /// Fully resolved request URL.
        url: String,
        /// Parser message.
        message: String,
    },

    /// The document was valid JSON but not the expected shape.
    #[error("malformed module listing: {0}")]
    Decode(String),
}

/// Source of JSON documents, one per endpoint.
///
/// `endpoint` may be an absolute URL or a path relative to the
/// implementation's base URL.
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Fetches `endpoint` and parses the response body as JSON.
    async fn fetch_json(&self, endpoint: &str) -> Result<Value, FetchError>;
}

/// Reqwest-backed [`DataSource`] with a shared connection pool.
///
/// The client is constructed once at startup and reused for every fetch,
/// including the dashboard listing, module payloads, and the generic
/// fallback path.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    /// Creates a client rooted at `base_url` with a per-request timeout.
    pub fn new(base_url: Url, timeout: Duration) -> Self {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("mdash/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_default();
        Self { http, base_url }
    }

    /// Resolves an endpoint against the base URL.
    ///
    /// Absolute endpoints are used verbatim; relative ones are joined onto
    /// the base.
    fn resolve(&self, endpoint: &str) -> Result<Url, FetchError> {
        self.base_url
            .join(endpoint)
            .map_err(|e| FetchError::InvalidUrl {
                endpoint: endpoint.to_string(),
                message: e.to_string(),
            })
    }
}

#[async_trait]
impl DataSource for ApiClient {
    async fn fetch_json(&self, endpoint: &str) -> Result<Value, FetchError> {
        let url = self.resolve(endpoint)?;
        let url_str = url.to_string();

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|source| FetchError::Network {
                url: url_str.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url_str,
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(|source| FetchError::Network {
            url: url_str.clone(),
            source,
        })?;

        serde_json::from_str(&body).map_err(|e| FetchError::InvalidBody {
            url: url_str,
            message: e.to_string(),
        })
    }
}

/// Fetches the dashboard listing from `path` and decodes it as a descriptor
/// array.
///
/// A decode failure is a listing error ([`FetchError::Decode`]); no partial
/// listing is ever returned.
pub async fn fetch_listing(
    source: &dyn DataSource,
    path: &str,
) -> Result<Vec<ModuleDescriptor>, FetchError> {
    let value = source.fetch_json(path).await?;
    serde_json::from_value(value).map_err(|e| FetchError::Decode(e.to_string()))
}
