//! Shared doubles for service unit tests.

use std::sync::atomic::AtomicU8;
use std::sync::atomic::Ordering;

use async_trait::async_trait;
use auth::Authenticator;
use auth::HashingParams;
use auth::PasswordHasher;
use chrono::DateTime;
use chrono::TimeZone;
use chrono::Utc;
use mockall::mock;

use crate::domain::credential::errors::RandomSourceError;
use crate::domain::credential::errors::StoreError;
use crate::domain::credential::models::CredentialRecord;
use crate::domain::credential::models::EmailAddress;
use crate::domain::credential::models::UserId;
use crate::domain::credential::ports::Clock;
use crate::domain::credential::ports::CredentialStore;
use crate::domain::credential::ports::RandomSource;

pub const SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";
pub const STRONG_PASSWORD: &str = "Tr0ub4dor&3";

mock! {
    pub TestCredentialStore {}

    #[async_trait]
    impl CredentialStore for TestCredentialStore {
        async fn create(&self, record: CredentialRecord) -> Result<(), StoreError>;
        async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<CredentialRecord>, StoreError>;
        async fn find_by_id(&self, id: &UserId) -> Result<Option<CredentialRecord>, StoreError>;
        async fn update(&self, record: &CredentialRecord) -> Result<(), StoreError>;
        async fn update_refresh_token(&self, id: &UserId, token: &str, expires_at: DateTime<Utc>) -> Result<(), StoreError>;
        async fn delete(&self, id: &UserId) -> Result<(), StoreError>;
    }
}

/// Clock frozen at a given instant.
pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    pub fn at_epoch_plus(secs: i64) -> Self {
        Self(Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Deterministic source; every call fills with the next byte value.
#[derive(Default)]
pub struct CountingRandom(AtomicU8);

impl RandomSource for CountingRandom {
    fn fill(&self, dest: &mut [u8]) -> Result<(), RandomSourceError> {
        let value = self.0.fetch_add(1, Ordering::SeqCst);
        dest.fill(value);
        Ok(())
    }
}

pub struct FailingRandom;

impl RandomSource for FailingRandom {
    fn fill(&self, _dest: &mut [u8]) -> Result<(), RandomSourceError> {
        Err(RandomSourceError::Unavailable("entropy exhausted".to_string()))
    }
}

/// Authenticator with a cheap hashing cost.
pub fn authenticator() -> Authenticator {
    let hasher = PasswordHasher::with_params(HashingParams {
        memory_kib: 1024,
        iterations: 1,
        parallelism: 1,
    })
    .unwrap();
    Authenticator::new(SECRET).with_password_hasher(hasher)
}

/// Stored record for `email` whose password is `STRONG_PASSWORD`.
pub fn stored_record(authenticator: &Authenticator, email: &str) -> CredentialRecord {
    let salt = auth::Salt::from_bytes(&[9u8; 16]);
    let digest = authenticator
        .hash_password(STRONG_PASSWORD, salt.as_str())
        .unwrap();
    let now = Utc::now();

    CredentialRecord {
        id: UserId::from_random_bytes([42u8; 16]),
        email: EmailAddress::new(email.to_string()).unwrap(),
        password_digest: digest,
        salt: salt.into_string(),
        refresh_token: None,
        refresh_token_expires_at: None,
        created_at: now,
        updated_at: now,
    }
}
