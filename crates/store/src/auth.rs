//! Password verification for `/login`.
//!
//! Stored passwords are argon2 hashes (the registration flow hashes before
//! posting); plaintext never reaches disk and never leaves the store.

use argon2::password_hash::PasswordHash;
use argon2::{Argon2, PasswordVerifier};

/// Verify a candidate password against a stored argon2 hash.
///
/// A malformed stored hash counts as a failed verification rather than an
/// error: either way the credentials are not acceptable.
#[must_use]
pub fn verify_password(candidate: &str, stored_hash: &str) -> bool {
    PasswordHash::new(stored_hash).is_ok_and(|parsed| {
        Argon2::default()
            .verify_password(candidate.as_bytes(), &parsed)
            .is_ok()
    })
}

#[cfg(test)]
mod tests {
    use argon2::password_hash::rand_core::OsRng;
    use argon2::password_hash::{PasswordHasher, SaltString};

    use super::*;

    fn hash(password: &str) -> String {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .expect("hashing")
            .to_string()
    }

    #[test]
    fn test_verify_roundtrip() {
        let stored = hash("secret1");
        assert!(verify_password("secret1", &stored));
        assert!(!verify_password("secret2", &stored));
    }

    #[test]
    fn test_malformed_hash_fails_closed() {
        assert!(!verify_password("secret1", "plaintext-from-old-data"));
        assert!(!verify_password("secret1", ""));
    }
}
