use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use rand::rngs::OsRng;
use rand::CryptoRng;
use rand::RngCore;

use super::errors::PasswordError;

/// Number of random bytes in a freshly generated salt.
pub const SALT_LENGTH: usize = 16;

/// Per-password salt, stored base64 encoded next to the digest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Salt(String);

impl Salt {
    /// Generate a salt from the operating system entropy source.
    ///
    /// # Errors
    /// * `RandomSourceFailure` - The entropy source could not be read
    pub fn generate() -> Result<Self, PasswordError> {
        Self::generate_with(&mut OsRng)
    }

    /// Generate a salt from the given cryptographic RNG.
    ///
    /// # Errors
    /// * `RandomSourceFailure` - The RNG reported an error
    pub fn generate_with<R: RngCore + CryptoRng>(rng: &mut R) -> Result<Self, PasswordError> {
        let mut bytes = [0u8; SALT_LENGTH];
        rng.try_fill_bytes(&mut bytes)
            .map_err(|e| PasswordError::RandomSourceFailure(e.to_string()))?;
        Ok(Self::from_bytes(&bytes))
    }

    /// Encode raw salt bytes obtained elsewhere.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self(STANDARD.encode(bytes))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}
