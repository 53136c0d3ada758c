pub mod account;
pub mod authentication;
pub mod authorization;

pub use account::AccountService;
pub use authentication::AuthenticationService;
pub use authorization::AuthorizationService;

use auth::password::SALT_LENGTH;
use auth::Authenticator;
use auth::Salt;

use crate::domain::credential::errors::AuthError;
use crate::domain::credential::models::Password;
use crate::domain::credential::ports::RandomSource;

/// Draw a fresh salt and hash the password with it.
///
/// # Returns
/// Base64 digest and base64 salt, in that order
///
/// # Errors
/// * `UnexpectedError` - Random source or hashing failed
fn salt_and_hash<RS: RandomSource>(
    random: &RS,
    authenticator: &Authenticator,
    password: &Password,
) -> Result<(String, String), AuthError> {
    let mut bytes = [0u8; SALT_LENGTH];
    random.fill(&mut bytes).map_err(|e| {
        tracing::error!("Failed to draw salt: {}", e);
        AuthError::UnexpectedError
    })?;
    let salt = Salt::from_bytes(&bytes);

    let digest = authenticator
        .hash_password(password.expose(), salt.as_str())
        .map_err(|e| {
            tracing::error!("Password hashing failed: {}", e);
            AuthError::UnexpectedError
        })?;

    Ok((digest, salt.into_string()))
}
