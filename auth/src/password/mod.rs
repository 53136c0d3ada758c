pub mod errors;
pub mod hasher;
pub mod salt;
pub mod strength;

pub use errors::PasswordError;
pub use hasher::HashingParams;
pub use hasher::PasswordHasher;
pub use salt::Salt;
pub use salt::SALT_LENGTH;
pub use strength::entropy;
pub use strength::validate_password;
pub use strength::MIN_ENTROPY_BITS;
