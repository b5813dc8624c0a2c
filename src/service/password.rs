use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

/// Salted SHA-256 password hashing. The salt comes from `PASSWORD_SALT`
/// and must stay stable for stored hashes to keep verifying.
#[derive(Clone)]
pub struct PasswordHasher {
    salt: String,
}

impl PasswordHasher {
    pub fn new(salt: impl Into<String>) -> Self {
        Self { salt: salt.into() }
    }

    /// Lowercase hex digest of `password || salt`.
    pub fn hash(&self, password: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(password.as_bytes());
        hasher.update(self.salt.as_bytes());
        hex::encode(hasher.finalize())
    }

    pub fn verify(&self, password: &str, stored_hash: &str) -> bool {
        let computed = self.hash(password);
        bool::from(computed.as_bytes().ct_eq(stored_hash.as_bytes()))
    }
}
