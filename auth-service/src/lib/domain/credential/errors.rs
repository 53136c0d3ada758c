use thiserror::Error;

/// Error for UserId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserIdError {
    #[error("User ID must not be empty")]
    Empty,
}

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

/// Error for Password policy failures
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PasswordError {
    #[error("Password entropy {actual:.1} bits is below the required {minimum:.1}")]
    Insecure { actual: f64, minimum: f64 },
}

/// Error for credential store operations
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Record already exists: {0}")]
    Duplicate(String),

    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(String),
}

/// Error for random source failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RandomSourceError {
    #[error("Entropy source unavailable: {0}")]
    Unavailable(String),
}

/// Closed set of error kinds returned by the credential services.
///
/// Messages are fixed and carry no internal detail; causes are logged where
/// they are mapped.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("user's email is invalid")]
    InvalidEmail,

    #[error("user's password is insecure")]
    InsecurePassword,

    #[error("email already in use")]
    EmailAlreadyInUse,

    #[error("can not change user's email to same email")]
    SameEmail,

    /// Unknown user and wrong password are deliberately indistinguishable.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// Any invalid, expired or malformed access token.
    #[error("authorization failed")]
    AuthorizationFailed,

    #[error("token is expired")]
    TokenExpired,

    #[error("signature is invalid")]
    InvalidSignature,

    /// Malformed claims, or a refresh token that no longer matches storage.
    #[error("bad jwt claim")]
    BadClaim,

    #[error("user not found")]
    UserNotFound,

    #[error("unexpected error")]
    UnexpectedError,
}

impl From<EmailError> for AuthError {
    fn from(_: EmailError) -> Self {
        AuthError::InvalidEmail
    }
}

impl From<PasswordError> for AuthError {
    fn from(_: PasswordError) -> Self {
        AuthError::InsecurePassword
    }
}
