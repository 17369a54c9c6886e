//! JWT utilities for authentication
//!
//! Verifies access tokens issued by the external auth provider (HS256, user id
//! in `sub`) using the `jsonwebtoken` crate. Token issuance exists for tests
//! and local tooling only.

use chrono::{Duration, Utc};
use deicidium_core::UserId;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Audience
    pub aud: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Database role the provider grants the token
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl Claims {
    /// Get the user ID from the subject
    ///
    /// # Errors
    /// Returns an error if the subject is not a UUID
    pub fn user_id(&self) -> Result<UserId, AppError> {
        self.sub.parse::<UserId>().map_err(|_| AppError::InvalidToken)
    }
}

/// JWT service for verifying access tokens
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    audience: String,
}

impl JwtService {
    /// Create a new JWT service with the shared secret and expected audience
    #[must_use]
    pub fn new(secret: &str, audience: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            audience: audience.to_string(),
        }
    }

    /// Issue an access token for a user
    ///
    /// # Errors
    /// Returns an error if token encoding fails
    pub fn issue_token(&self, user_id: UserId, ttl_secs: i64) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            aud: self.audience.clone(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(ttl_secs)).timestamp(),
            role: Some("authenticated".to_string()),
            email: None,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|_| AppError::Internal(anyhow::anyhow!("Failed to encode JWT")))
    }

    /// Decode and validate an access token
    ///
    /// # Errors
    /// Returns an error if the token is invalid, expired, or for another audience
    pub fn decode_token(&self, token: &str) -> Result<Claims, AppError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[self.audience.as_str()]);

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AppError::TokenExpired,
                _ => AppError::InvalidToken,
            }
        })?;

        Ok(token_data.claims)
    }

    /// Validate an access token and return the user it was issued for
    ///
    /// # Errors
    /// Returns an error if the token is invalid or its subject is not a user id
    pub fn authenticate(&self, token: &str) -> Result<UserId, AppError> {
        self.decode_token(token)?.user_id()
    }
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("audience", &self.audience)
            .finish_non_exhaustive()
    }
}
