use thiserror::Error;

/// Error type for password operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Invalid hashing parameters: {0}")]
    InvalidParams(String),

    #[error("Stored salt is not valid base64: {0}")]
    InvalidSalt(String),

    #[error("Random source failure: {0}")]
    RandomSourceFailure(String),

    #[error("Password is insecure: estimated entropy {actual:.1} bits, minimum {minimum:.1}")]
    InsecurePassword { actual: f64, minimum: f64 },
}
