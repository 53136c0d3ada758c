use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use super::errors::JwtError;

/// Issuer tag stamped into every token.
pub const ISSUER: &str = "aiselena-auth";

/// Token class discriminator.
///
/// An access token is never accepted where a refresh token is required, and
/// vice versa.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenType {
    #[serde(rename = "access-token")]
    Access,
    #[serde(rename = "refresh-token")]
    Refresh,
}

impl TokenType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenType::Access => "access-token",
            TokenType::Refresh => "refresh-token",
        }
    }
}

/// Signed token payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    /// Subject (user identifier)
    pub sub: String,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Issuer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,

    /// Token class
    #[serde(rename = "type")]
    pub token_type: TokenType,

    /// JWT ID; keeps two tokens minted in the same second distinct
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jti: Option<String>,
}

impl Claims {
    /// Create claims for a subject expiring `ttl` after `now`.
    ///
    /// A negative `ttl` yields claims that are already expired.
    pub fn new(
        subject: impl ToString,
        token_type: TokenType,
        ttl: Duration,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            sub: subject.to_string(),
            exp: (now + ttl).timestamp(),
            iss: Some(ISSUER.to_string()),
            token_type,
            jti: Some(Uuid::new_v4().to_string()),
        }
    }

    /// Check if token is expired.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp < current_timestamp
    }
}

/// Verified content of a token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenInfo {
    pub subject: String,
    pub expires_at: DateTime<Utc>,
    pub token_type: TokenType,
}

impl TryFrom<Claims> for TokenInfo {
    type Error = JwtError;

    fn try_from(claims: Claims) -> Result<Self, Self::Error> {
        if claims.sub.is_empty() {
            return Err(JwtError::BadClaim("empty subject".to_string()));
        }

        let expires_at = DateTime::from_timestamp(claims.exp, 0)
            .ok_or_else(|| JwtError::BadClaim(format!("exp out of range: {}", claims.exp)))?;

        Ok(Self {
            subject: claims.sub,
            expires_at,
            token_type: claims.token_type,
        })
    }
}
