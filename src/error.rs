// src/error.rs

use jsonwebtoken::Algorithm;
use thiserror::Error;

/// The primary error type for the `cognito-verifier` library.
#[derive(Debug, Error)]
pub enum CognitoError {
    /// A required configuration field is missing or empty.
    #[error("A required configuration field is missing: {0}")]
    MissingConfiguration(String),

    /// A configuration value is present but outside its accepted range.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A provided URL could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The token is not a structurally valid compact JWT.
    #[error("Token malformed: {0}")]
    TokenMalformed(String),

    /// The signing key named by the token's `kid` could not be resolved.
    #[error("Key resolution failed: {0}")]
    KeyResolutionFailed(#[from] KeyStoreError),

    /// The token header declares a different algorithm than the resolved key.
    #[error("Algorithm mismatch for kid {kid}: token uses {token_alg:?}, key declares '{key_alg}'")]
    AlgorithmMismatch {
        kid: String,
        token_alg: Algorithm,
        key_alg: String,
    },

    /// The RSA components of the resolved key could not be decoded.
    #[error("Invalid key material for kid {kid}: {source}")]
    InvalidKeyMaterial {
        kid: String,
        #[source]
        source: KeyMaterialError,
    },

    /// Signature or time-based claim validation failed.
    #[error("Token invalid: {0}")]
    TokenInvalid(#[source] jsonwebtoken::errors::Error),
}

/// Errors raised by the [`KeyStore`](crate::key_store::KeyStore).
#[derive(Debug, Error)]
pub enum KeyStoreError {
    /// The key identifier was still absent after refreshing from the provider.
    #[error("Key not found for kid: {0}")]
    KeyNotFound(String),

    /// The key set could not be fetched from the provider.
    #[error("Failed to fetch key set: {0}")]
    KeyFetchFailed(#[from] FetchError),
}

/// Failures while retrieving the provider's JSON Web Key Set.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The HTTP request itself failed (connection, TLS, timeout, body read).
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The provider answered with a non-success status.
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    /// The response body is not a valid key set document.
    #[error("{url} returned an undecodable key set: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Failures while rebuilding an RSA public key from its JWK components.
#[derive(Debug, Error)]
pub enum KeyMaterialError {
    /// A component is not valid unpadded base64url.
    #[error("public key component '{field}' is not valid base64url: {source}")]
    InvalidEncoding {
        field: &'static str,
        #[source]
        source: base64::DecodeError,
    },

    /// The exponent does not fit in 32 bits.
    #[error("public key exponent is {len} bytes, expected at most 4")]
    ExponentTooLarge { len: usize },
}
