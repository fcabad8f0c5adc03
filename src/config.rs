// src/config.rs

use crate::error::CognitoError;
use std::time::Duration;
use url::Url;

/// The largest accepted clock skew tolerance (one day).
pub const MAX_LEEWAY: Duration = Duration::from_secs(24 * 60 * 60);

/// Validation settings applied to every token.
#[derive(Debug, Clone)]
pub struct ValidationDetails {
    /// The tolerance for clock skew when validating `exp` and `nbf`.
    /// Defaults to zero: a token is expired the second its `exp` passes.
    pub leeway: Duration,
    /// Whether the `iss` claim must equal the user pool's issuer URL.
    pub validate_issuer: bool,
}

impl Default for ValidationDetails {
    fn default() -> Self {
        Self {
            leeway: Duration::ZERO,
            validate_issuer: false,
        }
    }
}

/// The configuration of a verifier bound to one Cognito user pool.
///
/// Construct it with [`ConfigBuilder`].
#[derive(Debug, Clone)]
pub struct Config {
    pub region: String,
    pub user_pool_id: String,
    /// Where the user pool's key set is fetched from.
    pub jwks_uri: Url,
    pub validation: ValidationDetails,
    /// Transport used to fetch the key set. `None` uses a default blocking client.
    pub http_client: Option<reqwest::blocking::Client>,
}

impl Config {
    /// The issuer URL Cognito places in the `iss` claim of this pool's tokens.
    pub fn issuer(&self) -> String {
        format!(
            "https://cognito-idp.{}.amazonaws.com/{}",
            self.region, self.user_pool_id
        )
    }
}

/// A builder for creating a `Config` instance.
#[derive(Default)]
pub struct ConfigBuilder {
    region: Option<String>,
    user_pool_id: Option<String>,
    jwks_uri_option: Option<String>,
    http_client: Option<reqwest::blocking::Client>,
    validation: ValidationDetails,
}

impl ConfigBuilder {
    /// Creates a new `ConfigBuilder`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the AWS region of the user pool, e.g. `"us-east-1"`. This is a required field.
    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Sets the user pool identifier, e.g. `"us-east-1_MQnn7mzKZ"`. This is a required field.
    pub fn user_pool_id(mut self, user_pool_id: impl Into<String>) -> Self {
        self.user_pool_id = Some(user_pool_id.into());
        self
    }

    /// Overrides the key set URL derived from the region and user pool.
    pub fn jwks_uri(mut self, url: impl Into<String>) -> Self {
        self.jwks_uri_option = Some(url.into());
        self
    }

    /// Sets the clock skew tolerance. Defaults to zero and may not exceed
    /// [`MAX_LEEWAY`].
    pub fn leeway(mut self, leeway: Duration) -> Self {
        self.validation.leeway = leeway;
        self
    }

    /// Requires the `iss` claim to match the user pool's issuer URL.
    pub fn validate_issuer(mut self, validate: bool) -> Self {
        self.validation.validate_issuer = validate;
        self
    }

    /// Uses the given blocking client for key set fetches (timeouts, proxies, TLS).
    pub fn http_client(mut self, client: reqwest::blocking::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Consumes the builder and returns a `Config` object.
    ///
    /// # Errors
    ///
    /// Returns an error if `region` or `user_pool_id` is missing or empty, if
    /// the leeway exceeds [`MAX_LEEWAY`], or if the key set URL cannot be parsed.
    pub fn build(self) -> Result<Config, CognitoError> {
        if self.validation.leeway > MAX_LEEWAY {
            return Err(CognitoError::InvalidConfiguration(format!(
                "leeway of {}s exceeds the maximum of {}s",
                self.validation.leeway.as_secs(),
                MAX_LEEWAY.as_secs()
            )));
        }

        let region = self
            .region
            .filter(|r| !r.trim().is_empty())
            .ok_or_else(|| CognitoError::MissingConfiguration("region".to_string()))?;
        let user_pool_id = self
            .user_pool_id
            .filter(|p| !p.trim().is_empty())
            .ok_or_else(|| CognitoError::MissingConfiguration("user_pool_id".to_string()))?;

        let raw_uri = self.jwks_uri_option.unwrap_or_else(|| {
            format!(
                "https://cognito-idp.{}.amazonaws.com/{}/.well-known/jwks.json",
                region, user_pool_id
            )
        });
        let jwks_uri = Url::parse(&raw_uri).map_err(|e| CognitoError::InvalidUrl(e.to_string()))?;

        Ok(Config {
            region,
            user_pool_id,
            jwks_uri,
            validation: self.validation,
            http_client: self.http_client,
        })
    }
}
