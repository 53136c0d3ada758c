use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;

use super::salt_and_hash;
use crate::domain::credential::errors::AuthError;
use crate::domain::credential::errors::StoreError;
use crate::domain::credential::models::CredentialRecord;
use crate::domain::credential::models::EmailAddress;
use crate::domain::credential::models::Password;
use crate::domain::credential::models::TokenPair;
use crate::domain::credential::models::UserId;
use crate::domain::credential::ports::AuthenticationServicePort;
use crate::domain::credential::ports::Clock;
use crate::domain::credential::ports::CredentialStore;
use crate::domain::credential::ports::RandomSource;

/// Registration and sign-in over a credential store.
pub struct AuthenticationService<CS, RS, C>
where
    CS: CredentialStore,
    RS: RandomSource,
    C: Clock,
{
    store: Arc<CS>,
    random: Arc<RS>,
    clock: Arc<C>,
    authenticator: Arc<Authenticator>,
}

impl<CS, RS, C> AuthenticationService<CS, RS, C>
where
    CS: CredentialStore,
    RS: RandomSource,
    C: Clock,
{
    /// Create a new authentication service with injected dependencies.
    ///
    /// # Arguments
    /// * `store` - Credential persistence implementation
    /// * `random` - Source for identifiers and salts
    /// * `clock` - Time source for token issuance
    /// * `authenticator` - Hashing and token codec
    pub fn new(
        store: Arc<CS>,
        random: Arc<RS>,
        clock: Arc<C>,
        authenticator: Arc<Authenticator>,
    ) -> Self {
        Self {
            store,
            random,
            clock,
            authenticator,
        }
    }

    fn generate_user_id(&self) -> Result<UserId, AuthError> {
        let mut bytes = [0u8; 16];
        self.random.fill(&mut bytes).map_err(|e| {
            tracing::error!("Failed to draw user id: {}", e);
            AuthError::UnexpectedError
        })?;
        Ok(UserId::from_random_bytes(bytes))
    }
}

#[async_trait]
impl<CS, RS, C> AuthenticationServicePort for AuthenticationService<CS, RS, C>
where
    CS: CredentialStore,
    RS: RandomSource,
    C: Clock,
{
    async fn sign_up(&self, email: &str, password: &str) -> Result<UserId, AuthError> {
        let email = EmailAddress::new(email.to_string())?;
        let password = Password::new(password.to_string())?;

        match self.store.find_by_email(&email).await {
            Ok(None) => {}
            Ok(Some(_)) => return Err(AuthError::EmailAlreadyInUse),
            Err(e) => {
                tracing::error!("Email lookup failed during sign up: {}", e);
                return Err(AuthError::UnexpectedError);
            }
        }

        let (password_digest, salt) =
            salt_and_hash(self.random.as_ref(), &self.authenticator, &password)?;
        let id = self.generate_user_id()?;
        let now = self.clock.now();

        let record = CredentialRecord {
            id: id.clone(),
            email,
            password_digest,
            salt,
            refresh_token: None,
            refresh_token_expires_at: None,
            created_at: now,
            updated_at: now,
        };

        self.store.create(record).await.map_err(|e| match e {
            StoreError::Duplicate(_) => AuthError::EmailAlreadyInUse,
            other => {
                tracing::error!("Failed to create credential record {}: {}", id, other);
                AuthError::UnexpectedError
            }
        })?;

        tracing::info!(user_id = %id, "Account registered");
        Ok(id)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<TokenPair, AuthError> {
        let email = EmailAddress::new(email.to_string())?;

        let record = match self.store.find_by_email(&email).await {
            Ok(Some(record)) => record,
            Ok(None) => {
                tracing::warn!("Sign in for unknown email");
                return Err(AuthError::AuthenticationFailed);
            }
            Err(e) => {
                tracing::error!("Email lookup failed during sign in: {}", e);
                return Err(AuthError::UnexpectedError);
            }
        };

        let pair = self
            .authenticator
            .authenticate(
                password,
                &record.password_digest,
                &record.salt,
                record.id.as_str(),
                self.clock.now(),
            )
            .map_err(|e| {
                match e {
                    AuthenticationError::InvalidCredentials => {
                        tracing::warn!(user_id = %record.id, "Wrong password");
                    }
                    other => {
                        tracing::error!(user_id = %record.id, "Sign in failed: {}", other);
                    }
                }
                AuthError::AuthenticationFailed
            })?;

        self.store
            .update_refresh_token(&record.id, &pair.refresh_token, pair.refresh_expires_at)
            .await
            .map_err(|e| {
                tracing::error!(user_id = %record.id, "Failed to store refresh token: {}", e);
                AuthError::AuthenticationFailed
            })?;

        Ok(pair)
    }
}
