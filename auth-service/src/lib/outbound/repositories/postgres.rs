use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::FromRow;
use sqlx::PgPool;

use crate::domain::credential::errors::StoreError;
use crate::domain::credential::models::CredentialRecord;
use crate::domain::credential::models::EmailAddress;
use crate::domain::credential::models::UserId;
use crate::domain::credential::ports::CredentialStore;

const EMAIL_UNIQUE_CONSTRAINT: &str = "credentials_email_key";

/// Credential store backed by the `credentials` table.
pub struct PostgresCredentialStore {
    pool: PgPool,
}

impl PostgresCredentialStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct CredentialRow {
    user_id: String,
    email: String,
    password_digest: String,
    salt: String,
    refresh_token: Option<String>,
    refresh_token_expires_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<CredentialRow> for CredentialRecord {
    type Error = StoreError;

    fn try_from(row: CredentialRow) -> Result<Self, Self::Error> {
        Ok(CredentialRecord {
            id: UserId::from_string(&row.user_id)
                .map_err(|e| StoreError::Database(format!("corrupt user_id: {}", e)))?,
            email: EmailAddress::new(row.email)
                .map_err(|e| StoreError::Database(format!("corrupt email: {}", e)))?,
            password_digest: row.password_digest,
            salt: row.salt,
            refresh_token: row.refresh_token,
            refresh_token_expires_at: row.refresh_token_expires_at,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Map a write error, recognising the email and primary key unique constraints.
fn write_error(e: sqlx::Error, email: &EmailAddress) -> StoreError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            if db_err.constraint() == Some(EMAIL_UNIQUE_CONSTRAINT) {
                return StoreError::Duplicate(email.to_string());
            }
            return StoreError::Duplicate(db_err.message().to_string());
        }
    }
    StoreError::Database(e.to_string())
}

#[async_trait]
impl CredentialStore for PostgresCredentialStore {
    async fn create(&self, record: CredentialRecord) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO credentials (
                user_id, email, password_digest, salt,
                refresh_token, refresh_token_expires_at, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(record.id.as_str())
        .bind(record.email.as_str())
        .bind(&record.password_digest)
        .bind(&record.salt)
        .bind(&record.refresh_token)
        .bind(record.refresh_token_expires_at)
        .bind(record.created_at)
        .bind(record.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| write_error(e, &record.email))?;

        Ok(())
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<CredentialRecord>, StoreError> {
        let row = sqlx::query_as::<_, CredentialRow>(
            r#"
            SELECT user_id, email, password_digest, salt,
                   refresh_token, refresh_token_expires_at, created_at, updated_at
            FROM credentials
            WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

        row.map(CredentialRecord::try_from).transpose()
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<CredentialRecord>, StoreError> {
        let row = sqlx::query_as::<_, CredentialRow>(
            r#"
            SELECT user_id, email, password_digest, salt,
                   refresh_token, refresh_token_expires_at, created_at, updated_at
            FROM credentials
            WHERE user_id = $1
            "#,
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

        row.map(CredentialRecord::try_from).transpose()
    }

    async fn update(&self, record: &CredentialRecord) -> Result<(), StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE credentials
            SET email = $2, password_digest = $3, salt = $4, updated_at = $5
            WHERE user_id = $1
            "#,
        )
        .bind(record.id.as_str())
        .bind(record.email.as_str())
        .bind(&record.password_digest)
        .bind(&record.salt)
        .bind(record.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| write_error(e, &record.email))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(record.id.to_string()));
        }

        Ok(())
    }

    async fn update_refresh_token(
        &self,
        id: &UserId,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE credentials
            SET refresh_token = $2, refresh_token_expires_at = $3
            WHERE user_id = $1
            "#,
        )
        .bind(id.as_str())
        .bind(token)
        .bind(expires_at)
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(id.to_string()));
        }

        Ok(())
    }

    async fn delete(&self, id: &UserId) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM credentials WHERE user_id = $1")
            .bind(id.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::Database(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(id.to_string()));
        }

        Ok(())
    }
}
