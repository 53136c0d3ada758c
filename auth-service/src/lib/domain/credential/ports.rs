use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;

use crate::domain::credential::errors::AuthError;
use crate::domain::credential::errors::RandomSourceError;
use crate::domain::credential::errors::StoreError;
use crate::domain::credential::models::CredentialRecord;
use crate::domain::credential::models::EmailAddress;
use crate::domain::credential::models::TokenInfo;
use crate::domain::credential::models::TokenPair;
use crate::domain::credential::models::UserId;

/// Port for account registration and sign-in.
#[async_trait]
pub trait AuthenticationServicePort: Send + Sync + 'static {
    /// Register a new account.
    ///
    /// Email is validated before password. Nothing is persisted on failure.
    ///
    /// # Arguments
    /// * `email` - Raw email address
    /// * `password` - Raw plaintext password
    ///
    /// # Returns
    /// Identifier of the new account
    ///
    /// # Errors
    /// * `InvalidEmail` - Email is syntactically invalid
    /// * `InsecurePassword` - Password entropy below the minimum
    /// * `EmailAlreadyInUse` - Email is already registered
    /// * `UnexpectedError` - Random source, hashing or store failed
    async fn sign_up(&self, email: &str, password: &str) -> Result<UserId, AuthError>;

    /// Exchange credentials for a token pair.
    ///
    /// The minted refresh token replaces any previously stored one.
    ///
    /// # Arguments
    /// * `email` - Raw email address
    /// * `password` - Raw plaintext password
    ///
    /// # Returns
    /// Fresh access and refresh tokens
    ///
    /// # Errors
    /// * `InvalidEmail` - Email is syntactically invalid
    /// * `AuthenticationFailed` - Unknown email, wrong password, or the refresh
    ///   token could not be minted or stored
    /// * `UnexpectedError` - Lookup failed
    async fn sign_in(&self, email: &str, password: &str) -> Result<TokenPair, AuthError>;
}

/// Port for bearer token checks and token rotation.
#[async_trait]
pub trait AuthorizationServicePort: Send + Sync + 'static {
    /// Verify an access token.
    ///
    /// # Arguments
    /// * `access_token` - Compact JWT presented by the caller
    ///
    /// # Returns
    /// Subject, expiry and type of the token
    ///
    /// # Errors
    /// * `AuthorizationFailed` - Any verification failure, or a refresh token
    async fn authorize(&self, access_token: &str) -> Result<TokenInfo, AuthError>;

    /// Rotate a refresh token into a new token pair.
    ///
    /// Succeeds only when the presented token is the one currently stored for
    /// its subject.
    ///
    /// # Arguments
    /// * `refresh_token` - Compact JWT of type refresh
    ///
    /// # Returns
    /// Fresh access and refresh tokens
    ///
    /// # Errors
    /// * `TokenExpired` - Token or stored expiry has passed
    /// * `InvalidSignature` - Signature does not verify
    /// * `BadClaim` - Malformed claims, wrong type, or stale token
    /// * `UserNotFound` - Subject no longer exists
    /// * `AuthenticationFailed` - New refresh token could not be stored
    /// * `UnexpectedError` - Lookup or minting failed
    async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, AuthError>;
}

/// Port for self-service account management.
#[async_trait]
pub trait AccountServicePort: Send + Sync + 'static {
    /// Retrieve an account by identifier.
    ///
    /// # Errors
    /// * `UserNotFound` - Account does not exist
    /// * `UnexpectedError` - Lookup failed
    async fn get_account(&self, id: &UserId) -> Result<CredentialRecord, AuthError>;

    /// Change the email of an account.
    ///
    /// # Arguments
    /// * `id` - Account identifier
    /// * `email` - Raw new email address
    ///
    /// # Returns
    /// Updated record
    ///
    /// # Errors
    /// * `InvalidEmail` - Email is syntactically invalid
    /// * `UserNotFound` - Account does not exist
    /// * `SameEmail` - Email equals the current one
    /// * `EmailAlreadyInUse` - Email belongs to another account
    /// * `UnexpectedError` - Store failed
    async fn change_email(&self, id: &UserId, email: &str) -> Result<CredentialRecord, AuthError>;

    /// Replace the password of an account with a freshly salted digest.
    ///
    /// # Errors
    /// * `InsecurePassword` - Password entropy below the minimum
    /// * `UserNotFound` - Account does not exist
    /// * `UnexpectedError` - Random source, hashing or store failed
    async fn change_password(&self, id: &UserId, password: &str) -> Result<(), AuthError>;

    /// Delete an account and its stored refresh token.
    ///
    /// # Errors
    /// * `UserNotFound` - Account does not exist
    /// * `UnexpectedError` - Store failed
    async fn delete_account(&self, id: &UserId) -> Result<(), AuthError>;
}

/// Persistence operations for credential records.
#[async_trait]
pub trait CredentialStore: Send + Sync + 'static {
    /// Persist a new record.
    ///
    /// # Errors
    /// * `Duplicate` - Identifier or email already stored
    /// * `Database` - Storage failed
    async fn create(&self, record: CredentialRecord) -> Result<(), StoreError>;

    /// Retrieve a record by email.
    ///
    /// # Returns
    /// Optional record (None if not found)
    ///
    /// # Errors
    /// * `Database` - Storage failed
    async fn find_by_email(&self, email: &EmailAddress)
        -> Result<Option<CredentialRecord>, StoreError>;

    /// Retrieve a record by identifier.
    ///
    /// # Returns
    /// Optional record (None if not found)
    ///
    /// # Errors
    /// * `Database` - Storage failed
    async fn find_by_id(&self, id: &UserId) -> Result<Option<CredentialRecord>, StoreError>;

    /// Overwrite email, digest and salt of an existing record.
    ///
    /// # Errors
    /// * `NotFound` - Record does not exist
    /// * `Duplicate` - Email belongs to another record
    /// * `Database` - Storage failed
    async fn update(&self, record: &CredentialRecord) -> Result<(), StoreError>;

    /// Replace the stored refresh token and its expiry.
    ///
    /// Leaves `updated_at` untouched. Concurrent writers race; the last
    /// write wins.
    ///
    /// # Errors
    /// * `NotFound` - Record does not exist
    /// * `Database` - Storage failed
    async fn update_refresh_token(
        &self,
        id: &UserId,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), StoreError>;

    /// Remove a record.
    ///
    /// # Errors
    /// * `NotFound` - Record does not exist
    /// * `Database` - Storage failed
    async fn delete(&self, id: &UserId) -> Result<(), StoreError>;
}

/// Source of cryptographically secure random bytes.
pub trait RandomSource: Send + Sync + 'static {
    /// Fill `dest` entirely.
    ///
    /// # Errors
    /// * `Unavailable` - Entropy could not be obtained
    fn fill(&self, dest: &mut [u8]) -> Result<(), RandomSourceError>;
}

/// Wall-clock time.
pub trait Clock: Send + Sync + 'static {
    fn now(&self) -> DateTime<Utc>;
}
