use argon2::Algorithm;
use argon2::Argon2;
use argon2::Params;
use argon2::Version;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use subtle::ConstantTimeEq;

use super::errors::PasswordError;

/// Length of the derived digest in bytes.
const DIGEST_LENGTH: usize = 32;

/// Argon2id cost parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashingParams {
    /// Memory cost in KiB
    pub memory_kib: u32,
    /// Number of passes
    pub iterations: u32,
    /// Degree of parallelism (lanes)
    pub parallelism: u32,
}

impl HashingParams {
    fn to_argon2(self) -> Result<Params, PasswordError> {
        Params::new(
            self.memory_kib,
            self.iterations,
            self.parallelism,
            Some(DIGEST_LENGTH),
        )
        .map_err(|e| PasswordError::InvalidParams(e.to_string()))
    }
}

impl Default for HashingParams {
    fn default() -> Self {
        Self {
            memory_kib: 64 * 1024,
            iterations: 1,
            parallelism: 4,
        }
    }
}

/// Salted password hashing.
///
/// Derives a raw 32-byte Argon2id digest from a password and an externally
/// managed salt. Digest and salt are both stored base64 encoded.
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    params: HashingParams,
}

impl PasswordHasher {
    /// Create a hasher with the default cost (t=1, m=64 MiB, p=4).
    pub fn new() -> Self {
        Self {
            params: HashingParams::default(),
        }
    }

    /// Create a hasher with explicit cost parameters.
    ///
    /// # Errors
    /// * `InvalidParams` - Parameters rejected by Argon2
    pub fn with_params(params: HashingParams) -> Result<Self, PasswordError> {
        params.to_argon2()?;
        Ok(Self { params })
    }

    /// Hash a password with the given base64 encoded salt.
    ///
    /// Deterministic for a given (password, salt) pair.
    ///
    /// # Arguments
    /// * `password` - Plaintext password
    /// * `salt` - Base64 encoded salt
    ///
    /// # Returns
    /// Base64 encoded digest
    ///
    /// # Errors
    /// * `InvalidSalt` - Salt is not valid base64
    /// * `HashingFailed` - Argon2 rejected the input
    pub fn hash(&self, password: &str, salt: &str) -> Result<String, PasswordError> {
        let digest = self.derive(password, salt)?;
        Ok(STANDARD.encode(digest))
    }

    /// Verify a password against a stored digest.
    ///
    /// The comparison runs in constant time with respect to the digest bytes.
    ///
    /// # Arguments
    /// * `stored_digest` - Base64 encoded digest from storage
    /// * `password` - Candidate plaintext password
    /// * `salt` - Base64 encoded salt stored with the digest
    ///
    /// # Errors
    /// * `InvalidSalt` - Salt is not valid base64
    /// * `HashingFailed` - Argon2 rejected the input
    pub fn verify(
        &self,
        stored_digest: &str,
        password: &str,
        salt: &str,
    ) -> Result<bool, PasswordError> {
        let candidate = STANDARD.encode(self.derive(password, salt)?);
        Ok(candidate.as_bytes().ct_eq(stored_digest.as_bytes()).into())
    }

    fn derive(&self, password: &str, salt: &str) -> Result<[u8; DIGEST_LENGTH], PasswordError> {
        let salt_bytes = STANDARD
            .decode(salt)
            .map_err(|e| PasswordError::InvalidSalt(e.to_string()))?;

        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.to_argon2()?);

        let mut output = [0u8; DIGEST_LENGTH];
        argon2
            .hash_password_into(password.as_bytes(), &salt_bytes, &mut output)
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))?;

        Ok(output)
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}
