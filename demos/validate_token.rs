//! Validates a Cognito token from the command line.
//!
//! ```sh
//! COGNITO_REGION=us-east-1 COGNITO_USER_POOL_ID=us-east-1_XXXXXXXXX \
//! RUST_LOG=cognito_verifier=debug \
//!     cargo run --example validate_token -- [access|id|raw] <token>
//! ```

use cognito_verifier::prelude::*;
use std::env;
use std::error::Error;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut args = env::args().skip(1);
    let (kind, token) = match (args.next(), args.next()) {
        (Some(kind), Some(token)) => (kind, token),
        (Some(token), None) => ("raw".to_string(), token),
        _ => return Err("usage: validate_token [access|id|raw] <token>".into()),
    };

    let http_client = reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(10))
        .build()?;
    let mut builder = ConfigBuilder::new()
        .region(env::var("COGNITO_REGION")?)
        .user_pool_id(env::var("COGNITO_USER_POOL_ID")?)
        .validate_issuer(true)
        .http_client(http_client);
    if let Ok(jwks_uri) = env::var("COGNITO_JWKS_URI") {
        builder = builder.jwks_uri(jwks_uri);
    }
    let verifier = Verifier::new(builder.build()?);

    let output = match kind.as_str() {
        "access" => serde_json::to_string_pretty(&verifier.validate_access_token(&token)?)?,
        "id" => serde_json::to_string_pretty(&verifier.validate_id_token(&token)?)?,
        _ => serde_json::to_string_pretty(&verifier.validate_token(&token)?)?,
    };
    println!("{output}");
    Ok(())
}
