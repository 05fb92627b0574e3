use std::fs;
use std::path::{Path, PathBuf};

use crate::error::AuthError;

const CREDENTIALS_FILE_NAME: &str = "credentials";
const TOKEN_ENV: &str = "HLM_AUTH__TOKEN";

/// Persist the session token to `~/.hlm/credentials` with 0600 permissions.
///
/// # Errors
///
/// Returns `AuthError::TokenStore` if the file cannot be written.
pub fn store(token: &str) -> Result<(), AuthError> {
    store_at(&credentials_path()?, token)
}

/// Load the session token. Priority: `HLM_AUTH__TOKEN` env → credentials file.
#[must_use]
pub fn load() -> Option<String> {
    if let Ok(token) = std::env::var(TOKEN_ENV) {
        if !token.trim().is_empty() {
            return Some(token.trim().to_string());
        }
    }
    load_from(&credentials_path().ok()?)
}

/// Delete the credentials file if present.
///
/// # Errors
///
/// Returns `AuthError::TokenStore` if the file exists but cannot be removed.
pub fn delete() -> Result<(), AuthError> {
    delete_at(&credentials_path()?)
}

/// Where the current token came from, for status display.
#[must_use]
pub fn detect_token_source() -> Option<&'static str> {
    if std::env::var(TOKEN_ENV).is_ok_and(|t| !t.trim().is_empty()) {
        return Some("env");
    }
    credentials_path()
        .ok()
        .and_then(|path| load_from(&path))
        .map(|_| "file")
}

fn credentials_path() -> Result<PathBuf, AuthError> {
    dirs::home_dir()
        .map(|h| h.join(".hlm").join(CREDENTIALS_FILE_NAME))
        .ok_or_else(|| {
            AuthError::TokenStore("home directory not found, cannot store credentials".into())
        })
}

fn store_at(path: &Path, token: &str) -> Result<(), AuthError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| AuthError::TokenStore(format!("mkdir {}: {e}", parent.display())))?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if let Err(e) = fs::set_permissions(parent, fs::Permissions::from_mode(0o700)) {
                tracing::warn!("failed to chmod 0700 {}: {e}", parent.display());
            }
        }
    }
    fs::write(path, token)
        .map_err(|e| AuthError::TokenStore(format!("write {}: {e}", path.display())))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o600))
            .map_err(|e| AuthError::TokenStore(format!("chmod {}: {e}", path.display())))?;
    }

    Ok(())
}

fn load_from(path: &Path) -> Option<String> {
    fs::read_to_string(path)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn delete_at(path: &Path) -> Result<(), AuthError> {
    if path.exists() {
        fs::remove_file(path)
            .map_err(|e| AuthError::TokenStore(format!("delete {}: {e}", path.display())))?;
    }
    Ok(())
}
