// src/validator.rs

use crate::claims::{AccessTokenPayload, IdTokenPayload, RawClaims};
use crate::client::HttpKeySetFetcher;
use crate::config::Config;
use crate::error::CognitoError;
use crate::key_store::KeyStore;
use crate::rsa_key::public_key_from;
use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Verifies Cognito ID and access tokens for one user pool.
///
/// This struct should be created once and reused for all validation requests;
/// clones share the same [`KeyStore`].
#[derive(Clone, Debug)]
pub struct Verifier {
    config: Config,
    key_store: Arc<KeyStore>,
}

impl Verifier {
    /// Creates a new `Verifier` that fetches keys from `config.jwks_uri` on demand.
    ///
    /// Key fetches go through a blocking `reqwest` client, which panics when
    /// driven from inside an async runtime. Async callers should wrap
    /// validation in `tokio::task::spawn_blocking`, or supply their own
    /// [`KeySetFetcher`](crate::client::KeySetFetcher) through
    /// [`Verifier::with_key_store`].
    pub fn new(config: Config) -> Self {
        let fetcher = match &config.http_client {
            Some(client) => HttpKeySetFetcher::with_client(client.clone(), config.jwks_uri.clone()),
            None => HttpKeySetFetcher::new(config.jwks_uri.clone()),
        };
        let key_store = Arc::new(KeyStore::new(fetcher));
        Self { config, key_store }
    }

    /// Creates a `Verifier` around an existing key store, e.g. one shared by
    /// several verifiers of the same user pool.
    pub fn with_key_store(config: Config, key_store: Arc<KeyStore>) -> Self {
        Self { config, key_store }
    }

    pub fn key_store(&self) -> &Arc<KeyStore> {
        &self.key_store
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Validates a token and returns its claims.
    ///
    /// This method performs:
    /// 1. Structural checks on the compact serialization and the header's `kid`.
    /// 2. Key resolution through the [`KeyStore`], fetching on a cache miss.
    /// 3. A check that the header `alg` matches the key's declared `alg`.
    /// 4. Signature verification and `exp`/`nbf` validation against the current time.
    #[instrument(skip(self, token), err)]
    pub fn validate_token(&self, token: &str) -> Result<RawClaims, CognitoError> {
        // 1. Three segments, then the header for kid and alg.
        if token.split('.').count() != 3 {
            return Err(CognitoError::TokenMalformed(
                "expected three dot-separated segments".to_string(),
            ));
        }
        let header =
            decode_header(token).map_err(|e| CognitoError::TokenMalformed(e.to_string()))?;
        let kid = header
            .kid
            .ok_or_else(|| CognitoError::TokenMalformed("missing key id".to_string()))?;

        // 2. Resolve the signing key.
        let key = self.key_store.get_key(&kid)?;

        // 3. The token may not choose a different algorithm than the key declares.
        if key.alg.parse::<Algorithm>().ok() != Some(header.alg) {
            return Err(CognitoError::AlgorithmMismatch {
                kid,
                token_alg: header.alg,
                key_alg: key.alg.clone(),
            });
        }

        // 4. Rebuild the public key.
        let public_key = public_key_from(&key.e, &key.n)
            .map_err(|source| CognitoError::InvalidKeyMaterial {
                kid: kid.clone(),
                source,
            })?;
        let decoding_key = DecodingKey::from_rsa_raw_components(
            &public_key.modulus_bytes(),
            &public_key.exponent_bytes(),
        );

        // 5. Verify signature and time-based claims.
        let validation = self.build_validation(header.alg);
        let token_data = decode::<RawClaims>(token, &decoding_key, &validation)
            .map_err(CognitoError::TokenInvalid)?;

        debug!("Token verified with kid: {}", kid);
        Ok(token_data.claims)
    }

    /// Validates an access token and decodes it into an [`AccessTokenPayload`].
    pub fn validate_access_token(&self, token: &str) -> Result<AccessTokenPayload, CognitoError> {
        let claims = self.validate_token(token)?;
        Ok(AccessTokenPayload::from_claims(&claims))
    }

    /// Validates an ID token and decodes it into an [`IdTokenPayload`].
    pub fn validate_id_token(&self, token: &str) -> Result<IdTokenPayload, CognitoError> {
        let claims = self.validate_token(token)?;
        Ok(IdTokenPayload::from_claims(&claims))
    }

    fn build_validation(&self, alg: Algorithm) -> Validation {
        let mut validation = Validation::new(alg);
        validation.leeway = self.config.validation.leeway.as_secs();
        validation.validate_exp = true;
        validation.validate_nbf = true;
        // ID tokens carry `aud`, access tokens carry `client_id`; neither is checked here.
        validation.validate_aud = false;
        validation.required_spec_claims.clear();
        if self.config.validation.validate_issuer {
            validation.set_issuer(&[self.config.issuer()]);
        }
        validation
    }
}
