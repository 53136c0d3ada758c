//! Credential and token utilities library
//!
//! Provides the reusable building blocks of the credential service:
//! - Salted password hashing (Argon2id) with constant-time verification
//! - Password strength policy (entropy estimate) and email syntax check
//! - Access/refresh JWT issuance and verification (HS256)
//! - Authentication coordination
//!
//! The service crate defines its own ports and error kinds and adapts these
//! implementations behind them.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::{PasswordHasher, Salt};
//!
//! let hasher = PasswordHasher::new();
//! let salt = Salt::generate().unwrap();
//! let digest = hasher.hash("Tr0ub4dor&3", salt.as_str()).unwrap();
//! assert!(hasher.verify(&digest, "Tr0ub4dor&3", salt.as_str()).unwrap());
//! ```
//!
//! ## JWT Tokens
//! ```
//! use auth::{JwtHandler, TokenType};
//! use chrono::{Duration, Utc};
//!
//! let handler = JwtHandler::new(b"secret_key_at_least_32_bytes_long!");
//! let token = handler
//!     .issue("acc_123", TokenType::Access, Duration::hours(2), Utc::now())
//!     .unwrap();
//! let info = handler.verify(&token).unwrap();
//! assert_eq!(info.subject, "acc_123");
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::{Authenticator, Salt};
//! use chrono::Utc;
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!");
//!
//! // Register: hash password with a fresh salt
//! let salt = Salt::generate().unwrap();
//! let digest = auth.hash_password("Tr0ub4dor&3", salt.as_str()).unwrap();
//!
//! // Login: verify and mint a token pair
//! let pair = auth
//!     .authenticate("Tr0ub4dor&3", &digest, salt.as_str(), "acc_123", Utc::now())
//!     .unwrap();
//!
//! // Validate the access token
//! let info = auth.validate_token(&pair.access_token).unwrap();
//! assert_eq!(info.subject, "acc_123");
//! ```

pub mod authenticator;
pub mod email;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use authenticator::TokenPair;
pub use email::validate_email;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use jwt::TokenInfo;
pub use jwt::TokenType;
pub use password::validate_password;
pub use password::HashingParams;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use password::Salt;
pub use password::MIN_ENTROPY_BITS;
