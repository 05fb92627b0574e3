//! # hlm-auth
//!
//! Credential primitives for the HLM local identity provider and CLI.
//!
//! - [`password`]: PBKDF2-HMAC-SHA256 password hashes with random salts
//! - [`token`]: opaque session tokens
//! - [`token_store`]: the CLI's persisted session token (`~/.hlm/credentials`)

pub mod error;
pub mod password;
pub mod token;
pub mod token_store;

pub use error::AuthError;
pub use password::{PasswordHash, hash_password, verify_password};
pub use token::generate_session_token;

/// Resolve the session token the CLI should present, if any.
///
/// Priority: `HLM_AUTH__TOKEN` env var, then the credentials file.
#[must_use]
pub fn resolve_token() -> Option<String> {
    token_store::load()
}

/// Forget the stored session token.
///
/// # Errors
///
/// Returns `AuthError::TokenStore` if the credentials file cannot be removed.
pub fn logout() -> Result<(), AuthError> {
    token_store::delete()
}
