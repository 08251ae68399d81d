use std::path::Path;

use anyhow::Context as _;
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use serde::{Deserialize, Serialize};

/// Subject shared by the service identity and synthesized status records.
pub const SERVICE_SUBJECT: &str = "humrs";

const CLAIMS_VERSION: &str = "3";
const ISSUER: &str = "https://handbookmobileappservice.azurewebsites.net/";
const AUDIENCE: &str = "https://handbookmobileappservice.azurewebsites.net/";
const EXPIRY_EPOCH: i64 = 1_498_867_200;
const NOT_BEFORE_EPOCH: i64 = 1_467_331_200;

/// Claims carried by the bearer token. The validity window is a fixed
/// configuration constant, not derived from the wall clock, so two runs with
/// the same key material produce byte-identical tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub ver: String,
    pub iss: String,
    pub aud: String,
    pub exp: i64,
    pub nbf: i64,
}

impl Claims {
    pub fn service() -> Self {
        Self {
            sub: SERVICE_SUBJECT.to_owned(),
            ver: CLAIMS_VERSION.to_owned(),
            iss: ISSUER.to_owned(),
            aud: AUDIENCE.to_owned(),
            exp: EXPIRY_EPOCH,
            nbf: NOT_BEFORE_EPOCH,
        }
    }
}

/// Reads the hex-encoded signing secret from `keyfile` and mints the service
/// token presented on every request of this run.
pub fn mint_token(keyfile: &Path) -> anyhow::Result<String> {
    let hex_text = std::fs::read_to_string(keyfile)
        .with_context(|| format!("read signing key file: {}", keyfile.display()))?;
    let secret = hex::decode(hex_text.trim())
        .with_context(|| format!("decode signing key hex: {}", keyfile.display()))?;

    sign(&Claims::service(), &secret)
}

pub fn sign(claims: &Claims, secret: &[u8]) -> anyhow::Result<String> {
    encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(secret),
    )
    .context("sign auth token")
}
