use std::collections::HashMap;

use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::domain::credential::errors::StoreError;
use crate::domain::credential::models::CredentialRecord;
use crate::domain::credential::models::EmailAddress;
use crate::domain::credential::models::UserId;
use crate::domain::credential::ports::CredentialStore;

/// Process-local credential store.
///
/// Enforces the same uniqueness rules as the database table. Used by the
/// HTTP tests and for running the service without PostgreSQL.
#[derive(Default)]
pub struct InMemoryCredentialStore {
    records: RwLock<HashMap<UserId, CredentialRecord>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn create(&self, record: CredentialRecord) -> Result<(), StoreError> {
        let mut records = self.records.write().await;

        if records.contains_key(&record.id) {
            return Err(StoreError::Duplicate(record.id.to_string()));
        }
        if records.values().any(|r| r.email == record.email) {
            return Err(StoreError::Duplicate(record.email.to_string()));
        }

        records.insert(record.id.clone(), record);
        Ok(())
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<CredentialRecord>, StoreError> {
        let records = self.records.read().await;
        Ok(records.values().find(|r| &r.email == email).cloned())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<CredentialRecord>, StoreError> {
        Ok(self.records.read().await.get(id).cloned())
    }

    async fn update(&self, record: &CredentialRecord) -> Result<(), StoreError> {
        let mut records = self.records.write().await;

        if records
            .values()
            .any(|r| r.id != record.id && r.email == record.email)
        {
            return Err(StoreError::Duplicate(record.email.to_string()));
        }

        let stored = records
            .get_mut(&record.id)
            .ok_or_else(|| StoreError::NotFound(record.id.to_string()))?;
        stored.email = record.email.clone();
        stored.password_digest = record.password_digest.clone();
        stored.salt = record.salt.clone();
        stored.updated_at = record.updated_at;

        Ok(())
    }

    async fn update_refresh_token(
        &self,
        id: &UserId,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        let mut records = self.records.write().await;

        let stored = records
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        stored.refresh_token = Some(token.to_string());
        stored.refresh_token_expires_at = Some(expires_at);

        Ok(())
    }

    async fn delete(&self, id: &UserId) -> Result<(), StoreError> {
        self.records
            .write()
            .await
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }
}
