use bcrypt;

#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    #[error("Bcrypt operation failed: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),
}

/// Hash a plaintext password with bcrypt at the default cost. Used by
/// registration and the startup bootstrap.
pub fn hash_password(plaintext: &str) -> Result<String, PasswordError> {
    bcrypt::hash(plaintext, bcrypt::DEFAULT_COST).map_err(PasswordError::from)
}

/// Verify a password against a bcrypt hash
pub fn verify_password(plaintext: &str, hash: &str) -> Result<bool, PasswordError> {
    bcrypt::verify(plaintext, hash).map_err(PasswordError::from)
}
