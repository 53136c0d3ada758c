use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::jwt::TokenInfo;
use crate::jwt::TokenType;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Authentication coordinator combining password verification and token issuance.
///
/// Owns the password hasher, the JWT handler and the two token lifetimes.
/// Holds no mutable state and is safe to share between tasks.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
    access_token_ttl: Duration,
    refresh_token_ttl: Duration,
}

/// Access and refresh token minted together for one subject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    /// Expiry of the refresh token, persisted alongside it
    pub refresh_expires_at: DateTime<Utc>,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Create a new authenticator with default hashing cost and token
    /// lifetimes (2 hours access, 7 days refresh).
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for JWT signing
    pub fn new(jwt_secret: &[u8]) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            jwt_handler: JwtHandler::new(jwt_secret),
            access_token_ttl: Duration::hours(2),
            refresh_token_ttl: Duration::days(7),
        }
    }

    /// Override the access and refresh token lifetimes.
    pub fn with_token_ttls(
        mut self,
        access_token_ttl: Duration,
        refresh_token_ttl: Duration,
    ) -> Self {
        self.access_token_ttl = access_token_ttl;
        self.refresh_token_ttl = refresh_token_ttl;
        self
    }

    /// Override the password hasher (e.g. with custom cost parameters).
    pub fn with_password_hasher(mut self, password_hasher: PasswordHasher) -> Self {
        self.password_hasher = password_hasher;
        self
    }

    pub fn access_token_ttl(&self) -> Duration {
        self.access_token_ttl
    }

    pub fn refresh_token_ttl(&self) -> Duration {
        self.refresh_token_ttl
    }

    /// Hash a password for storage.
    ///
    /// # Arguments
    /// * `password` - Plaintext password
    /// * `salt` - Base64 encoded salt
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str, salt: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password, salt)
    }

    /// Check a password against a stored digest.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn verify_password(
        &self,
        stored_digest: &str,
        password: &str,
        salt: &str,
    ) -> Result<bool, PasswordError> {
        self.password_hasher.verify(stored_digest, password, salt)
    }

    /// Verify credentials and mint a token pair.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_digest` - Stored password digest
    /// * `salt` - Salt stored with the digest
    /// * `subject` - User identifier to place in the tokens
    /// * `now` - Issuance instant
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Password verification failed
    /// * `JwtError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_digest: &str,
        salt: &str,
        subject: &str,
        now: DateTime<Utc>,
    ) -> Result<TokenPair, AuthenticationError> {
        if !self.verify_password(stored_digest, password, salt)? {
            return Err(AuthenticationError::InvalidCredentials);
        }

        Ok(self.tokenize(subject, now)?)
    }

    /// Mint an access and refresh token pair without password verification.
    ///
    /// Used by the refresh flow, where the presented refresh token already
    /// stands in for the credentials.
    ///
    /// # Errors
    /// * `JwtError` - Token generation failed
    pub fn tokenize(&self, subject: &str, now: DateTime<Utc>) -> Result<TokenPair, JwtError> {
        let access_token = self
            .jwt_handler
            .issue(subject, TokenType::Access, self.access_token_ttl, now)?;
        let refresh_token = self
            .jwt_handler
            .issue(subject, TokenType::Refresh, self.refresh_token_ttl, now)?;

        Ok(TokenPair {
            access_token,
            refresh_token,
            refresh_expires_at: now + self.refresh_token_ttl,
        })
    }

    /// Validate a token and return its verified content.
    ///
    /// # Errors
    /// * `JwtError` - Token validation failed
    pub fn validate_token(&self, token: &str) -> Result<TokenInfo, JwtError> {
        self.jwt_handler.verify(token)
    }
}
