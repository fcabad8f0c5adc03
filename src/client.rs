// src/client.rs

use crate::error::FetchError;
use crate::model::JsonWebKeySet;
use tracing::{info, instrument, warn};
use url::Url;

/// A source of the identity provider's published key set.
///
/// [`HttpKeySetFetcher`] is the production implementation. Embedding
/// applications can supply their own, e.g. to read keys from a local file.
pub trait KeySetFetcher: Send + Sync {
    /// Fetches the complete key set. Each call is one attempt; no retries.
    fn fetch_keys(&self) -> Result<JsonWebKeySet, FetchError>;
}

/// Fetches a JWKS document over HTTP with a blocking `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpKeySetFetcher {
    http_client: reqwest::blocking::Client,
    jwks_uri: Url,
}

impl HttpKeySetFetcher {
    /// Creates a fetcher for `jwks_uri` using a default blocking client.
    pub fn new(jwks_uri: Url) -> Self {
        Self::with_client(reqwest::blocking::Client::new(), jwks_uri)
    }

    /// Creates a fetcher that sends its requests through `http_client`.
    pub fn with_client(http_client: reqwest::blocking::Client, jwks_uri: Url) -> Self {
        Self {
            http_client,
            jwks_uri,
        }
    }

    pub fn jwks_uri(&self) -> &Url {
        &self.jwks_uri
    }
}

impl KeySetFetcher for HttpKeySetFetcher {
    #[instrument(skip(self), fields(jwks_uri = %self.jwks_uri), err)]
    fn fetch_keys(&self) -> Result<JsonWebKeySet, FetchError> {
        let url = self.jwks_uri.to_string();

        let response = self
            .http_client
            .get(self.jwks_uri.clone())
            .send()
            .map_err(|source| {
                warn!("Key set request failed: {}", source);
                FetchError::Request {
                    url: url.clone(),
                    source,
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!("Key set endpoint answered with HTTP {}", status.as_u16());
            return Err(FetchError::Status {
                url,
                status: status.as_u16(),
            });
        }

        let body = response.bytes().map_err(|source| {
            warn!("Failed to read key set response body: {}", source);
            FetchError::Request {
                url: url.clone(),
                source,
            }
        })?;

        let jwks: JsonWebKeySet = serde_json::from_slice(&body).map_err(|source| {
            warn!("Key set response is not a valid JWKS document: {}", source);
            FetchError::Decode { url, source }
        })?;

        info!("Successfully fetched {} keys", jwks.keys.len());
        Ok(jwks)
    }
}
