use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use auth::JwtError;

use crate::domain::credential::errors::AuthError;
use crate::domain::credential::models::TokenInfo;
use crate::domain::credential::models::TokenPair;
use crate::domain::credential::models::TokenType;
use crate::domain::credential::models::UserId;
use crate::domain::credential::ports::AuthorizationServicePort;
use crate::domain::credential::ports::Clock;
use crate::domain::credential::ports::CredentialStore;

/// Access token checks and refresh token rotation.
pub struct AuthorizationService<CS, C>
where
    CS: CredentialStore,
    C: Clock,
{
    store: Arc<CS>,
    clock: Arc<C>,
    authenticator: Arc<Authenticator>,
}

impl<CS, C> AuthorizationService<CS, C>
where
    CS: CredentialStore,
    C: Clock,
{
    pub fn new(store: Arc<CS>, clock: Arc<C>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            store,
            clock,
            authenticator,
        }
    }
}

fn refresh_error(error: &JwtError) -> AuthError {
    match error {
        JwtError::TokenExpired => AuthError::TokenExpired,
        JwtError::InvalidSignature => AuthError::InvalidSignature,
        JwtError::AlgorithmMismatch | JwtError::BadClaim(_) | JwtError::EncodingFailed(_) => {
            AuthError::BadClaim
        }
    }
}

#[async_trait]
impl<CS, C> AuthorizationServicePort for AuthorizationService<CS, C>
where
    CS: CredentialStore,
    C: Clock,
{
    async fn authorize(&self, access_token: &str) -> Result<TokenInfo, AuthError> {
        let info = self.authenticator.validate_token(access_token).map_err(|e| {
            tracing::warn!("Access token rejected: {}", e);
            AuthError::AuthorizationFailed
        })?;

        if info.token_type != TokenType::Access {
            tracing::warn!(subject = %info.subject, "Refresh token presented as access token");
            return Err(AuthError::AuthorizationFailed);
        }

        Ok(info)
    }

    async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, AuthError> {
        let info = self.authenticator.validate_token(refresh_token).map_err(|e| {
            tracing::warn!("Refresh token rejected: {}", e);
            refresh_error(&e)
        })?;

        if info.token_type != TokenType::Refresh {
            tracing::warn!(subject = %info.subject, "Access token presented for refresh");
            return Err(AuthError::BadClaim);
        }

        let user_id = UserId::from_string(&info.subject).map_err(|_| AuthError::BadClaim)?;

        let record = match self.store.find_by_id(&user_id).await {
            Ok(Some(record)) => record,
            Ok(None) => return Err(AuthError::UserNotFound),
            Err(e) => {
                tracing::error!(user_id = %user_id, "Lookup failed during refresh: {}", e);
                return Err(AuthError::UnexpectedError);
            }
        };

        if !record.refresh_token_matches(refresh_token) {
            tracing::warn!(user_id = %user_id, "Stale refresh token presented");
            return Err(AuthError::BadClaim);
        }

        let now = self.clock.now();
        if record.refresh_token_expired(now) {
            return Err(AuthError::TokenExpired);
        }

        let pair = self
            .authenticator
            .tokenize(user_id.as_str(), now)
            .map_err(|e| {
                tracing::error!(user_id = %user_id, "Failed to mint tokens: {}", e);
                AuthError::UnexpectedError
            })?;

        self.store
            .update_refresh_token(&user_id, &pair.refresh_token, pair.refresh_expires_at)
            .await
            .map_err(|e| {
                tracing::error!(user_id = %user_id, "Failed to store refresh token: {}", e);
                AuthError::AuthenticationFailed
            })?;

        Ok(pair)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use chrono::Utc;
    use mockall::predicate::*;

    use super::*;
    use crate::domain::credential::errors::StoreError;
    use crate::domain::credential::models::CredentialRecord;
    use crate::domain::credential::testing::authenticator;
    use crate::domain::credential::testing::stored_record;
    use crate::domain::credential::testing::FixedClock;
    use crate::domain::credential::testing::MockTestCredentialStore;

    fn service(
        store: MockTestCredentialStore,
    ) -> AuthorizationService<MockTestCredentialStore, FixedClock> {
        AuthorizationService::new(
            Arc::new(store),
            Arc::new(FixedClock(Utc::now())),
            Arc::new(authenticator()),
        )
    }

    /// Record holding a live refresh token, and that token pair.
    fn signed_in_record() -> (CredentialRecord, TokenPair) {
        let authenticator = authenticator();
        let mut record = stored_record(&authenticator, "a@b.com");
        let pair = authenticator
            .tokenize(record.id.as_str(), Utc::now())
            .unwrap();
        record.refresh_token = Some(pair.refresh_token.clone());
        record.refresh_token_expires_at = Some(pair.refresh_expires_at);
        (record, pair)
    }

    #[tokio::test]
    async fn test_authorize_access_token() {
        let service = service(MockTestCredentialStore::new());
        let pair = authenticator().tokenize("acc_1", Utc::now()).unwrap();

        let info = service.authorize(&pair.access_token).await.unwrap();
        assert_eq!(info.subject, "acc_1");
        assert_eq!(info.token_type, TokenType::Access);
    }

    #[tokio::test]
    async fn test_authorize_rejects_refresh_token() {
        let service = service(MockTestCredentialStore::new());
        let pair = authenticator().tokenize("acc_1", Utc::now()).unwrap();

        let result = service.authorize(&pair.refresh_token).await;
        assert_eq!(result, Err(AuthError::AuthorizationFailed));
    }

    #[tokio::test]
    async fn test_authorize_rejects_garbage_and_foreign_tokens() {
        let service = service(MockTestCredentialStore::new());
        let foreign = Authenticator::new(b"another_secret_key_of_32_bytes!!")
            .tokenize("acc_1", Utc::now())
            .unwrap();
        let expired = authenticator()
            .tokenize("acc_1", Utc::now() - Duration::hours(3))
            .unwrap();

        for token in [
            "",
            "not.a.jwt",
            foreign.access_token.as_str(),
            expired.access_token.as_str(),
        ] {
            assert_eq!(
                service.authorize(token).await,
                Err(AuthError::AuthorizationFailed)
            );
        }
    }

    #[tokio::test]
    async fn test_refresh_rotates_token() {
        let (record, pair) = signed_in_record();
        let user_id = record.id.clone();
        let old_refresh = pair.refresh_token.clone();
        let mut store = MockTestCredentialStore::new();

        store
            .expect_find_by_id()
            .with(eq(user_id.clone()))
            .times(1)
            .returning(move |_| Ok(Some(record.clone())));
        store
            .expect_update_refresh_token()
            .withf(move |id, token, _| id == &user_id && token != old_refresh)
            .times(1)
            .returning(|_, _, _| Ok(()));

        let service = service(store);

        let new_pair = service.refresh(&pair.refresh_token).await.unwrap();
        assert_ne!(new_pair.refresh_token, pair.refresh_token);
        assert_ne!(new_pair.access_token, pair.access_token);
    }

    #[tokio::test]
    async fn test_refresh_with_stale_token() {
        let (mut record, pair) = signed_in_record();
        let newer = authenticator()
            .tokenize(record.id.as_str(), Utc::now())
            .unwrap();
        record.refresh_token = Some(newer.refresh_token);
        let mut store = MockTestCredentialStore::new();

        store
            .expect_find_by_id()
            .returning(move |_| Ok(Some(record.clone())));
        store.expect_update_refresh_token().times(0);

        let service = service(store);

        let result = service.refresh(&pair.refresh_token).await;
        assert_eq!(result, Err(AuthError::BadClaim));
    }

    #[tokio::test]
    async fn test_refresh_without_stored_token() {
        let (mut record, pair) = signed_in_record();
        record.refresh_token = None;
        let mut store = MockTestCredentialStore::new();

        store
            .expect_find_by_id()
            .returning(move |_| Ok(Some(record.clone())));

        let service = service(store);

        let result = service.refresh(&pair.refresh_token).await;
        assert_eq!(result, Err(AuthError::BadClaim));
    }

    #[tokio::test]
    async fn test_refresh_with_access_token() {
        let (record, pair) = signed_in_record();
        let mut store = MockTestCredentialStore::new();

        store
            .expect_find_by_id()
            .times(0)
            .returning(move |_| Ok(Some(record.clone())));

        let service = service(store);

        let result = service.refresh(&pair.access_token).await;
        assert_eq!(result, Err(AuthError::BadClaim));
    }

    #[tokio::test]
    async fn test_refresh_expired_token() {
        let expired = authenticator()
            .tokenize("acc_1", Utc::now() - Duration::days(8))
            .unwrap();
        let mut store = MockTestCredentialStore::new();
        store.expect_find_by_id().times(0);

        let service = service(store);

        let result = service.refresh(&expired.refresh_token).await;
        assert_eq!(result, Err(AuthError::TokenExpired));
    }

    #[tokio::test]
    async fn test_refresh_invalid_signature() {
        let foreign = Authenticator::new(b"another_secret_key_of_32_bytes!!")
            .tokenize("acc_1", Utc::now())
            .unwrap();
        let mut store = MockTestCredentialStore::new();
        store.expect_find_by_id().times(0);

        let service = service(store);

        let result = service.refresh(&foreign.refresh_token).await;
        assert_eq!(result, Err(AuthError::InvalidSignature));
    }

    #[tokio::test]
    async fn test_refresh_malformed_token() {
        let service = service(MockTestCredentialStore::new());

        let result = service.refresh("garbage").await;
        assert_eq!(result, Err(AuthError::BadClaim));
    }

    #[tokio::test]
    async fn test_refresh_stored_expiry_passed() {
        let (mut record, pair) = signed_in_record();
        record.refresh_token_expires_at = Some(Utc::now() - Duration::minutes(1));
        let mut store = MockTestCredentialStore::new();

        store
            .expect_find_by_id()
            .returning(move |_| Ok(Some(record.clone())));
        store.expect_update_refresh_token().times(0);

        let service = service(store);

        let result = service.refresh(&pair.refresh_token).await;
        assert_eq!(result, Err(AuthError::TokenExpired));
    }

    #[tokio::test]
    async fn test_refresh_unknown_user() {
        let (_, pair) = signed_in_record();
        let mut store = MockTestCredentialStore::new();
        store.expect_find_by_id().returning(|_| Ok(None));

        let service = service(store);

        let result = service.refresh(&pair.refresh_token).await;
        assert_eq!(result, Err(AuthError::UserNotFound));
    }

    #[tokio::test]
    async fn test_refresh_lookup_failure() {
        let (_, pair) = signed_in_record();
        let mut store = MockTestCredentialStore::new();
        store
            .expect_find_by_id()
            .returning(|_| Err(StoreError::Database("timeout".to_string())));

        let service = service(store);

        let result = service.refresh(&pair.refresh_token).await;
        assert_eq!(result, Err(AuthError::UnexpectedError));
    }

    #[tokio::test]
    async fn test_refresh_persist_failure() {
        let (record, pair) = signed_in_record();
        let mut store = MockTestCredentialStore::new();

        store
            .expect_find_by_id()
            .returning(move |_| Ok(Some(record.clone())));
        store
            .expect_update_refresh_token()
            .returning(|_, _, _| Err(StoreError::NotFound("gone".to_string())));

        let service = service(store);

        let result = service.refresh(&pair.refresh_token).await;
        assert_eq!(result, Err(AuthError::AuthenticationFailed));
    }
}
