//! Service layer owning the database handle and identity settings.
//!
//! All repository methods are implemented as `impl HlmService` blocks in
//! [`crate::repos`]. Every mutating method takes the acting [`Actor`]
//! explicitly; nothing is read from ambient state.
//!
//! [`Actor`]: hlm_core::identity::Actor

use std::fs;

use hlm_config::{AuthConfig, HlmConfig};

use crate::HlmDb;
use crate::error::DatabaseError;

pub struct HlmService {
    db: HlmDb,
    auth: AuthConfig,
}

impl HlmService {
    /// Open a service over a local database.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened.
    pub async fn new_local(db_path: &str, auth: AuthConfig) -> Result<Self, DatabaseError> {
        let db = HlmDb::open_local(db_path).await?;
        Ok(Self { db, auth })
    }

    /// Open the database named by the configuration, creating its parent
    /// directory when needed.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Other` if the directory cannot be created, or
    /// any error from [`Self::new_local`].
    pub async fn from_config(config: &HlmConfig) -> Result<Self, DatabaseError> {
        if let Some(dir) = config.database.parent_dir() {
            fs::create_dir_all(&dir).map_err(|e| {
                DatabaseError::Other(anyhow::anyhow!("create {}: {e}", dir.display()))
            })?;
        }
        Self::new_local(&config.database.path, config.auth.clone()).await
    }

    /// Create from an existing `HlmDb` (for testing).
    #[must_use]
    pub const fn from_db(db: HlmDb, auth: AuthConfig) -> Self {
        Self { db, auth }
    }

    #[must_use]
    pub const fn db(&self) -> &HlmDb {
        &self.db
    }

    #[must_use]
    pub const fn auth_config(&self) -> &AuthConfig {
        &self.auth
    }
}
