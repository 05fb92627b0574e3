//! Local identity provider settings.

use serde::{Deserialize, Serialize};

/// Longest session lifetime `HlmConfig::validate` accepts, 366 days.
pub const MAX_SESSION_TTL_HOURS: i64 = 24 * 366;

const fn default_pbkdf2_iterations() -> u32 {
    100_000
}

const fn default_session_ttl_hours() -> i64 {
    12
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// PBKDF2-HMAC-SHA256 rounds for new password hashes.
    #[serde(default = "default_pbkdf2_iterations")]
    pub pbkdf2_iterations: u32,

    /// Lifetime of a sign-in session.
    #[serde(default = "default_session_ttl_hours")]
    pub session_ttl_hours: i64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            pbkdf2_iterations: default_pbkdf2_iterations(),
            session_ttl_hours: default_session_ttl_hours(),
        }
    }
}
