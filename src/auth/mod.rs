//! JWT verification for the configured identity provider.
//!
//! The service only needs to verify bearer tokens issued elsewhere; it never
//! issues production tokens. Token minting exists solely for local
//! development through the CLI.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Identity-provider subject, e.g. `auth0|5be343df7025406c0f13d4dd`
    pub sub: String,
    pub aud: String,
    pub iss: String,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn new(sub: String) -> Self {
        let security = &config::config().security;
        let now = Utc::now();
        let exp = (now + Duration::hours(security.jwt_expiry_hours as i64)).timestamp();

        Self {
            sub,
            aud: security.jwt_audience.clone(),
            iss: security.jwt_issuer.clone(),
            exp,
            iat: now.timestamp(),
        }
    }
}

#[derive(Debug)]
pub enum JwtError {
    InvalidSecret,
    InvalidToken(String),
    TokenGeneration(String),
}

impl std::fmt::Display for JwtError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JwtError::InvalidSecret => write!(f, "Invalid JWT secret"),
            JwtError::InvalidToken(msg) => write!(f, "Invalid JWT token: {}", msg),
            JwtError::TokenGeneration(msg) => write!(f, "JWT generation error: {}", msg),
        }
    }
}

impl std::error::Error for JwtError {}

/// Verify a bearer token against the configured secret, audience, and issuer.
pub fn decode_token(token: &str) -> Result<Claims, JwtError> {
    let security = &config::config().security;
    decode_with(
        token,
        &security.jwt_secret,
        &security.jwt_audience,
        &security.jwt_issuer,
    )
}

/// Mint a development token for a subject. Not part of the service's
/// production surface.
pub fn generate_jwt(claims: Claims) -> Result<String, JwtError> {
    let secret = &config::config().security.jwt_secret;
    encode_with(&claims, secret)
}

fn decode_with(token: &str, secret: &str, audience: &str, issuer: &str) -> Result<Claims, JwtError> {
    if secret.is_empty() {
        return Err(JwtError::InvalidSecret);
    }

    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    let mut validation = Validation::default();
    validation.set_audience(&[audience]);
    validation.set_issuer(&[issuer]);

    let token_data = decode::<Claims>(token, &decoding_key, &validation)
        .map_err(|e| JwtError::InvalidToken(e.to_string()))?;

    Ok(token_data.claims)
}

fn encode_with(claims: &Claims, secret: &str) -> Result<String, JwtError> {
    if secret.is_empty() {
        return Err(JwtError::InvalidSecret);
    }

    let encoding_key = EncodingKey::from_secret(secret.as_bytes());
    encode(&Header::default(), claims, &encoding_key)
        .map_err(|e| JwtError::TokenGeneration(e.to_string()))
}
