use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;

use super::salt_and_hash;
use crate::domain::credential::errors::AuthError;
use crate::domain::credential::errors::StoreError;
use crate::domain::credential::models::CredentialRecord;
use crate::domain::credential::models::EmailAddress;
use crate::domain::credential::models::Password;
use crate::domain::credential::models::UserId;
use crate::domain::credential::ports::AccountServicePort;
use crate::domain::credential::ports::Clock;
use crate::domain::credential::ports::CredentialStore;
use crate::domain::credential::ports::RandomSource;

/// Self-service account management.
///
/// Operations act on the account named by an already authorized subject.
pub struct AccountService<CS, RS, C>
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

impl<CS, RS, C> AccountService<CS, RS, C>
where
    CS: CredentialStore,
    RS: RandomSource,
    C: Clock,
{
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

    async fn load(&self, id: &UserId) -> Result<CredentialRecord, AuthError> {
        match self.store.find_by_id(id).await {
            Ok(Some(record)) => Ok(record),
            Ok(None) => Err(AuthError::UserNotFound),
            Err(e) => {
                tracing::error!(user_id = %id, "Account lookup failed: {}", e);
                Err(AuthError::UnexpectedError)
            }
        }
    }

    async fn save(&self, record: &CredentialRecord) -> Result<(), AuthError> {
        self.store.update(record).await.map_err(|e| match e {
            StoreError::Duplicate(_) => AuthError::EmailAlreadyInUse,
            StoreError::NotFound(_) => AuthError::UserNotFound,
            StoreError::Database(message) => {
                tracing::error!(user_id = %record.id, "Account update failed: {}", message);
                AuthError::UnexpectedError
            }
        })
    }
}

#[async_trait]
impl<CS, RS, C> AccountServicePort for AccountService<CS, RS, C>
where
    CS: CredentialStore,
    RS: RandomSource,
    C: Clock,
{
    async fn get_account(&self, id: &UserId) -> Result<CredentialRecord, AuthError> {
        self.load(id).await
    }

    async fn change_email(&self, id: &UserId, email: &str) -> Result<CredentialRecord, AuthError> {
        let email = EmailAddress::new(email.to_string())?;
        let mut record = self.load(id).await?;

        if record.email == email {
            return Err(AuthError::SameEmail);
        }

        match self.store.find_by_email(&email).await {
            Ok(None) => {}
            Ok(Some(_)) => return Err(AuthError::EmailAlreadyInUse),
            Err(e) => {
                tracing::error!(user_id = %id, "Email lookup failed: {}", e);
                return Err(AuthError::UnexpectedError);
            }
        }

        record.email = email;
        record.updated_at = self.clock.now();
        self.save(&record).await?;

        tracing::info!(user_id = %id, "Email changed");
        Ok(record)
    }

    async fn change_password(&self, id: &UserId, password: &str) -> Result<(), AuthError> {
        let password = Password::new(password.to_string())?;
        let mut record = self.load(id).await?;

        let (password_digest, salt) =
            salt_and_hash(self.random.as_ref(), &self.authenticator, &password)?;
        record.password_digest = password_digest;
        record.salt = salt;
        record.updated_at = self.clock.now();
        self.save(&record).await?;

        tracing::info!(user_id = %id, "Password changed");
        Ok(())
    }

    async fn delete_account(&self, id: &UserId) -> Result<(), AuthError> {
        self.store.delete(id).await.map_err(|e| match e {
            StoreError::NotFound(_) => AuthError::UserNotFound,
            other => {
                tracing::error!(user_id = %id, "Account deletion failed: {}", other);
                AuthError::UnexpectedError
            }
        })?;

        tracing::info!(user_id = %id, "Account deleted");
        Ok(())
    }
}
