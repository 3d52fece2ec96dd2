use bcrypt::{hash, verify};

const BCRYPT_COST: u32 = 10;

/// Digest a plaintext password for storage. Each call salts independently,
/// so two hashes of the same password differ.
pub fn hash_password(password: &str) -> Result<String, bcrypt::BcryptError> {
    hash(password, BCRYPT_COST)
}

/// Compare a plaintext candidate against a stored digest.
///
/// Fails closed: a corrupt or non-bcrypt stored digest verifies as `false`
/// rather than surfacing an error to the caller.
pub fn verify_password(password: &str, stored_digest: &str) -> bool {
    verify(password, stored_digest).unwrap_or(false)
}
