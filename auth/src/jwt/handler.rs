use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use serde::Serialize;

use super::claims::Claims;
use super::claims::TokenInfo;
use super::claims::TokenType;
use super::errors::JwtError;

const ACCEPTED_ALGORITHMS: [&str; 3] = ["HS256", "HS384", "HS512"];

/// JWT token handler for issuing and verifying tokens.
///
/// Signs with HS256. Verification accepts only the HMAC family
/// (HS256/HS384/HS512); anything else is an algorithm mismatch.
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl JwtHandler {
    /// Create a new JWT handler with a secret key.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens (should be stored securely)
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Store secrets in environment variables or secure vaults, never in code
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
        }
    }

    /// Issue a signed token for a subject.
    ///
    /// # Arguments
    /// * `subject` - User identifier
    /// * `token_type` - Access or refresh
    /// * `ttl` - Lifetime, may be negative
    /// * `now` - Issuance instant
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn issue(
        &self,
        subject: &str,
        token_type: TokenType,
        ttl: Duration,
        now: DateTime<Utc>,
    ) -> Result<String, JwtError> {
        self.encode(&Claims::new(subject, token_type, ttl, now))
    }

    /// Encode arbitrary claims into a token.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn encode<T: Serialize>(&self, claims: &T) -> Result<String, JwtError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Verify a token and return its claims.
    ///
    /// # Errors
    /// * `AlgorithmMismatch` - Header names an algorithm outside the HMAC family
    /// * `InvalidSignature` - Signature does not match the secret
    /// * `TokenExpired` - `exp` is in the past (no leeway)
    /// * `BadClaim` - Token is malformed or `sub`, `exp` or `type` is missing or invalid
    pub fn verify(&self, token: &str) -> Result<TokenInfo, JwtError> {
        if let Some(algorithm) = header_algorithm(token) {
            if !ACCEPTED_ALGORITHMS.contains(&algorithm.as_str()) {
                return Err(JwtError::AlgorithmMismatch);
            }
        }

        let mut validation = Validation::new(self.algorithm);
        validation.algorithms = vec![Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                ErrorKind::InvalidAlgorithm | ErrorKind::InvalidAlgorithmName => {
                    JwtError::AlgorithmMismatch
                }
                ErrorKind::InvalidSignature => JwtError::InvalidSignature,
                ErrorKind::ExpiredSignature => JwtError::TokenExpired,
                _ => JwtError::BadClaim(e.to_string()),
            }
        })?;

        TokenInfo::try_from(token_data.claims)
    }
}

/// Read `alg` from the header segment without interpreting it, so names the
/// decoder cannot parse (such as "none") are still seen. Unreadable headers
/// yield `None` and are left to the decoder.
fn header_algorithm(token: &str) -> Option<String> {
    let (header, _) = token.split_once('.')?;
    let bytes = URL_SAFE_NO_PAD.decode(header).ok()?;
    let header: serde_json::Value = serde_json::from_slice(&bytes).ok()?;
    header.get("alg")?.as_str().map(str::to_string)
}
