//! PBKDF2-HMAC-SHA256 password hashing.
//!
//! Hashes are stored as base64 strings together with their salt and round
//! count, so the iteration count can be raised without invalidating old rows.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as B64;
use pbkdf2::pbkdf2_hmac;
use serde::{Deserialize, Serialize};
use sha2::Sha256;

use crate::error::AuthError;

const SALT_LEN: usize = 16;
const KEY_LEN: usize = 32;

/// A salted password hash as persisted in the `accounts` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordHash {
    pub salt: String,
    pub hash: String,
    pub iterations: u32,
}

/// Hash `password` with a fresh random salt.
///
/// # Errors
///
/// `AuthError::EmptyPassword` for an empty password, `AuthError::Random` if the
/// OS random source fails.
pub fn hash_password(password: &str, iterations: u32) -> Result<PasswordHash, AuthError> {
    if password.is_empty() {
        return Err(AuthError::EmptyPassword);
    }
    let iterations = iterations.max(1);
    let mut salt = [0u8; SALT_LEN];
    getrandom::fill(&mut salt).map_err(|e| AuthError::Random(e.to_string()))?;
    let key = derive_key(password, &salt, iterations);
    Ok(PasswordHash {
        salt: B64.encode(salt),
        hash: B64.encode(key),
        iterations,
    })
}

/// Check `password` against a stored hash. An empty password never matches.
///
/// # Errors
///
/// `AuthError::MalformedHash` if the stored salt or hash is not valid base64.
pub fn verify_password(password: &str, stored: &PasswordHash) -> Result<bool, AuthError> {
    if password.is_empty() {
        return Ok(false);
    }
    let salt = B64
        .decode(&stored.salt)
        .map_err(|e| AuthError::MalformedHash(e.to_string()))?;
    let expected = B64
        .decode(&stored.hash)
        .map_err(|e| AuthError::MalformedHash(e.to_string()))?;
    let key = derive_key(password, &salt, stored.iterations.max(1));
    Ok(constant_time_eq(&key, &expected))
}

fn derive_key(password: &str, salt: &[u8], iterations: u32) -> [u8; KEY_LEN] {
    let mut key = [0u8; KEY_LEN];
    pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, iterations, &mut key);
    key
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn hash_then_verify() {
        let stored = hash_password("s3cret!", 1_000).unwrap();
        assert_eq!(stored.iterations, 1_000);
        assert!(verify_password("s3cret!", &stored).unwrap());
        assert!(!verify_password("wrong", &stored).unwrap());
        assert!(!verify_password("", &stored).unwrap());
    }

    #[test]
    fn salts_differ_between_hashes() {
        let a = hash_password("same", 10).unwrap();
        let b = hash_password("same", 10).unwrap();
        assert_ne!(a.salt, b.salt);
        assert_ne!(a.hash, b.hash);
    }

    #[test]
    fn zero_iterations_clamped() {
        let stored = hash_password("pw", 0).unwrap();
        assert_eq!(stored.iterations, 1);
    }

    #[test]
    fn empty_password_rejected() {
        assert!(matches!(
            hash_password("", 10),
            Err(AuthError::EmptyPassword)
        ));
    }

    #[test]
    fn malformed_hash_reported() {
        let stored = PasswordHash {
            salt: "***".into(),
            hash: "AAAA".into(),
            iterations: 1,
        };
        assert!(matches!(
            verify_password("pw", &stored),
            Err(AuthError::MalformedHash(_))
        ));
    }
}
