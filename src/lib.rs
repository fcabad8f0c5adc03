// src/lib.rs

//! Signing-key cache and token verification for AWS Cognito user pools.

pub mod claims;
pub mod client;
pub mod config;
pub mod error;
pub mod key_store;
pub mod model;
pub mod rsa_key;
pub mod validator;

/// The public prelude for the `cognito-verifier` crate.
///
/// This module re-exports the most commonly used types for convenience.
pub mod prelude {
    pub use crate::claims::{AccessTokenPayload, IdTokenPayload, RawClaims};
    pub use crate::client::{HttpKeySetFetcher, KeySetFetcher};
    pub use crate::config::{Config, ConfigBuilder};
    pub use crate::error::{CognitoError, FetchError, KeyMaterialError, KeyStoreError};
    pub use crate::key_store::KeyStore;
    pub use crate::model::{JsonWebKeySet, SigningKey};
    pub use crate::rsa_key::{public_key_from, PublicKey};
    pub use crate::validator::Verifier;
    pub use jsonwebtoken::Algorithm;
}
