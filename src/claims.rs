// src/claims.rs

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

/// The claim set of a verified token, exactly as it appeared in the payload.
pub type RawClaims = serde_json::Map<String, Value>;

/// Claims of a Cognito access token.
///
/// Fields whose claim is absent, or carries an unexpected JSON type, keep
/// their default value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AccessTokenPayload {
    pub sub: String,
    pub event_id: String,
    pub token_use: String,
    pub iss: String,
    pub username: String,
    pub scope: String,
    pub jti: String,
    pub client_id: String,
    /// From `cognito:groups`.
    pub groups: Vec<String>,
    pub auth_time: Option<DateTime<Utc>>,
    pub exp: Option<DateTime<Utc>>,
    pub iat: Option<DateTime<Utc>>,
}

/// Claims of a Cognito ID token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IdTokenPayload {
    pub sub: String,
    pub aud: String,
    pub event_id: String,
    pub token_use: String,
    pub iss: String,
    /// From `cognito:username`.
    pub username: String,
    pub email: String,
    pub email_verified: bool,
    pub preferred_username: String,
    /// From `cognito:groups`.
    pub groups: Vec<String>,
    pub auth_time: Option<DateTime<Utc>>,
    pub exp: Option<DateTime<Utc>>,
    pub iat: Option<DateTime<Utc>>,
}

impl AccessTokenPayload {
    pub fn from_claims(claims: &RawClaims) -> Self {
        let times = Timestamps::from_claims(claims);
        Self {
            sub: string_claim(claims, "sub"),
            event_id: string_claim(claims, "event_id"),
            token_use: string_claim(claims, "token_use"),
            iss: string_claim(claims, "iss"),
            username: string_claim(claims, "username"),
            scope: string_claim(claims, "scope"),
            jti: string_claim(claims, "jti"),
            client_id: string_claim(claims, "client_id"),
            groups: string_list_claim(claims, "cognito:groups"),
            auth_time: times.auth_time,
            exp: times.exp,
            iat: times.iat,
        }
    }
}

impl IdTokenPayload {
    pub fn from_claims(claims: &RawClaims) -> Self {
        let times = Timestamps::from_claims(claims);
        Self {
            sub: string_claim(claims, "sub"),
            aud: string_claim(claims, "aud"),
            event_id: string_claim(claims, "event_id"),
            token_use: string_claim(claims, "token_use"),
            iss: string_claim(claims, "iss"),
            username: string_claim(claims, "cognito:username"),
            email: string_claim(claims, "email"),
            email_verified: bool_claim(claims, "email_verified"),
            preferred_username: string_claim(claims, "preferred_username"),
            groups: string_list_claim(claims, "cognito:groups"),
            auth_time: times.auth_time,
            exp: times.exp,
            iat: times.iat,
        }
    }
}

impl From<&RawClaims> for AccessTokenPayload {
    fn from(claims: &RawClaims) -> Self {
        Self::from_claims(claims)
    }
}

impl From<&RawClaims> for IdTokenPayload {
    fn from(claims: &RawClaims) -> Self {
        Self::from_claims(claims)
    }
}

/// The three epoch-second claims shared by both token kinds, as UTC instants.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Timestamps {
    pub exp: Option<DateTime<Utc>>,
    pub iat: Option<DateTime<Utc>>,
    pub auth_time: Option<DateTime<Utc>>,
}

impl Timestamps {
    pub fn from_claims(claims: &RawClaims) -> Self {
        Self {
            exp: epoch_claim(claims, "exp"),
            iat: epoch_claim(claims, "iat"),
            auth_time: epoch_claim(claims, "auth_time"),
        }
    }
}

/// Reads a numeric epoch-seconds claim as an absolute UTC instant.
///
/// Fractional seconds are truncated. Absent, non-numeric and out-of-range
/// values yield `None`.
pub fn epoch_claim(claims: &RawClaims, name: &str) -> Option<DateTime<Utc>> {
    let value = claims.get(name)?;
    let secs = match value.as_i64() {
        Some(secs) => secs,
        None => {
            let secs = value.as_f64()?;
            if !secs.is_finite() {
                return None;
            }
            secs.trunc() as i64
        }
    };
    DateTime::from_timestamp(secs, 0)
}

fn string_claim(claims: &RawClaims, name: &str) -> String {
    claims
        .get(name)
        .and_then(Value::as_str)
        .map(str::to_owned)
        .unwrap_or_default()
}

// Cognito emits `email_verified` as a string for some federated identities.
fn bool_claim(claims: &RawClaims, name: &str) -> bool {
    match claims.get(name) {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => s.eq_ignore_ascii_case("true"),
        _ => false,
    }
}

fn string_list_claim(claims: &RawClaims, name: &str) -> Vec<String> {
    claims
        .get(name)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_owned)
                .collect()
        })
        .unwrap_or_default()
}
