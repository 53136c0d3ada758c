use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use subtle::ConstantTimeEq;
use uuid::Builder;

use crate::domain::credential::errors::EmailError;
use crate::domain::credential::errors::PasswordError;
use crate::domain::credential::errors::UserIdError;

pub use auth::TokenInfo;
pub use auth::TokenPair;
pub use auth::TokenType;

/// Credential record of one user.
///
/// Owned by the credential store. At most one refresh token is live per user;
/// issuing a new one overwrites the previous value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialRecord {
    pub id: UserId,
    pub email: EmailAddress,
    /// Base64 encoded Argon2id digest
    pub password_digest: String,
    /// Base64 encoded salt
    pub salt: String,
    pub refresh_token: Option<String>,
    pub refresh_token_expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CredentialRecord {
    /// Check whether the presented refresh token is the one currently stored.
    ///
    /// Compared in constant time. False when no token is stored.
    pub fn refresh_token_matches(&self, presented: &str) -> bool {
        self.refresh_token
            .as_deref()
            .map(|stored| bool::from(stored.as_bytes().ct_eq(presented.as_bytes())))
            .unwrap_or(false)
    }

    /// Check whether the stored refresh token expiry has passed.
    ///
    /// A record without an expiry counts as expired.
    pub fn refresh_token_expired(&self, now: DateTime<Utc>) -> bool {
        self.refresh_token_expires_at
            .map_or(true, |expires_at| expires_at < now)
    }
}

/// User unique identifier type
///
/// Opaque string, generated as `acc_<uuid>` from the random source.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserId(String);

impl UserId {
    const PREFIX: &'static str = "acc_";

    /// Build a new identifier from 16 random bytes.
    pub fn from_random_bytes(bytes: [u8; 16]) -> Self {
        let uuid = Builder::from_random_bytes(bytes).into_uuid();
        Self(format!("{}{}", Self::PREFIX, uuid))
    }

    /// Parse a user ID from string.
    ///
    /// # Errors
    /// * `Empty` - String is empty
    pub fn from_string(s: &str) -> Result<Self, UserIdError> {
        if s.is_empty() {
            return Err(UserIdError::Empty);
        }
        Ok(Self(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Lowercase `local@domain.tld`, checked syntactically only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not match `local@domain.tld`
    pub fn new(email: String) -> Result<Self, EmailError> {
        if auth::validate_email(&email) {
            Ok(Self(email))
        } else {
            Err(EmailError::InvalidFormat(email))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Plaintext password that passed the strength policy.
///
/// Never printed; `Debug` is redacted.
#[derive(Clone)]
pub struct Password(String);

impl Password {
    /// Accept a password whose estimated entropy reaches the minimum.
    ///
    /// # Errors
    /// * `Insecure` - Entropy below `auth::MIN_ENTROPY_BITS`
    pub fn new(password: String) -> Result<Self, PasswordError> {
        match auth::validate_password(&password, auth::MIN_ENTROPY_BITS) {
            Ok(()) => Ok(Self(password)),
            Err(auth::PasswordError::InsecurePassword { actual, minimum }) => {
                Err(PasswordError::Insecure { actual, minimum })
            }
            Err(_) => Err(PasswordError::Insecure {
                actual: 0.0,
                minimum: auth::MIN_ENTROPY_BITS,
            }),
        }
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(<redacted>)")
    }
}
