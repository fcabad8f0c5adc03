// src/model.rs

use serde::{Deserialize, Serialize};

/// A single RSA signing key as published in a Cognito user pool's JWKS.
///
/// Keys are immutable once fetched and are identified by `kid` within a
/// single user pool.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SigningKey {
    pub alg: String,
    /// Base64url-encoded public exponent.
    pub e: String,
    pub kid: String,
    pub kty: String,
    /// Base64url-encoded modulus.
    pub n: String,
    #[serde(rename = "use")]
    pub key_use: String,
}

/// Represents a JSON Web Key Set (JWKS), which is a collection of signing keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonWebKeySet {
    pub keys: Vec<SigningKey>,
}
