//! # hlm-db
//!
//! libSQL persistence for HLM ERP.
//!
//! Holds every relational table (clients, projects, tasks, services, team,
//! finance, attendance, notifications, accounts) and the append-only audit
//! log. Mutations of governed tables go through the generic repository in
//! [`governed`], which authorizes the actor, writes the row and then writes
//! exactly one audit entry.

pub mod error;
pub mod governed;
pub mod helpers;
mod migrations;
pub mod repos;
pub mod service;
pub mod updates;

#[cfg(test)]
mod test_support;

pub use error::{DatabaseError, ErrorKind};
pub use service::HlmService;

use libsql::Builder;

/// Central database handle.
///
/// Wraps a libSQL database and its single connection. Provides ID generation.
pub struct HlmDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
}

impl HlmDb {
    /// Open a local database at the given path, or `:memory:`.
    ///
    /// Runs migrations automatically on every open.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;

        // Foreign keys are per-connection in SQLite.
        conn.execute("PRAGMA foreign_keys = ON", ())
            .await
            .map_err(|e| DatabaseError::Migration(format!("PRAGMA foreign_keys: {e}")))?;

        let hlm_db = Self { db, conn };
        hlm_db.run_migrations().await?;
        tracing::debug!(path, "database opened");
        Ok(hlm_db)
    }

    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }

    /// Generate a prefixed ID via libSQL. Returns e.g. `"cli-a3f8b2c1"`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or returns no rows.
    pub async fn generate_id(&self, prefix: &str) -> Result<String, DatabaseError> {
        let mut rows = self
            .conn
            .query(
                &format!("SELECT '{prefix}-' || lower(hex(randomblob(4)))"),
                (),
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        Ok(row.get::<String>(0)?)
    }

    /// Run a `SELECT COUNT(*)`-style query and return the single integer.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or returns no rows.
    pub async fn scalar_i64(
        &self,
        sql: &str,
        params: Vec<libsql::Value>,
    ) -> Result<i64, DatabaseError> {
        let mut rows = self
            .conn
            .query(sql, libsql::params_from_iter(params))
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        Ok(row.get::<Option<i64>>(0)?.unwrap_or(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    async fn test_db() -> HlmDb {
        HlmDb::open_local(":memory:").await.unwrap()
    }

    #[tokio::test]
    async fn open_local_creates_schema() {
        let db = test_db().await;

        let tables = [
            "accounts",
            "auth_sessions",
            "user_roles",
            "profiles",
            "clients",
            "projects",
            "tasks",
            "services",
            "finance_transactions",
            "attendance",
            "notifications",
            "audit_log",
        ];
        for table in &tables {
            let mut rows = db
                .conn()
                .query(
                    "SELECT name FROM sqlite_master WHERE type='table' AND name=?1",
                    [*table],
                )
                .await
                .unwrap();
            let row = rows.next().await.unwrap();
            assert!(row.is_some(), "table '{table}' should exist");
        }
    }

    #[tokio::test]
    async fn generate_id_correct_format() {
        let db = test_db().await;
        let id = db.generate_id("cli").await.unwrap();
        assert!(id.starts_with("cli-"), "ID should start with 'cli-': {id}");
        assert_eq!(id.len(), 12);
        assert!(id[4..].chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[tokio::test]
    async fn generate_id_unique() {
        let db = test_db().await;
        let mut ids = HashSet::new();
        for _ in 0..100 {
            ids.insert(db.generate_id("tsk").await.unwrap());
        }
        assert_eq!(ids.len(), 100);
    }

    #[tokio::test]
    async fn file_database_keeps_rows_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hlm.db");
        let path = path.to_str().unwrap();

        {
            let db = HlmDb::open_local(path).await.unwrap();
            db.conn()
                .execute(
                    "INSERT INTO audit_log (id, user_id, action, table_name, record_id, created_at)
                     VALUES ('aud-1', 'usr-1', 'INSERT', 'clients', 'cli-1', '2024-01-01T00:00:00+00:00')",
                    (),
                )
                .await
                .unwrap();
        }

        let reopened = HlmDb::open_local(path).await.unwrap();
        let count = reopened
            .scalar_i64("SELECT COUNT(*) FROM audit_log", vec![])
            .await
            .unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn migrations_are_idempotent() {
        let db = test_db().await;
        db.run_migrations().await.unwrap();
    }

    #[tokio::test]
    async fn audit_log_rejects_update_and_delete() {
        let db = test_db().await;
        db.conn()
            .execute(
                "INSERT INTO audit_log (id, user_id, action, table_name, record_id, created_at)
                 VALUES ('aud-1', 'usr-1', 'INSERT', 'clients', 'cli-1', '2024-01-01T00:00:00+00:00')",
                (),
            )
            .await
            .unwrap();

        let update = db
            .conn()
            .execute("UPDATE audit_log SET action = 'DELETE' WHERE id = 'aud-1'", ())
            .await;
        assert!(update.is_err());

        let delete = db
            .conn()
            .execute("DELETE FROM audit_log WHERE id = 'aud-1'", ())
            .await;
        assert!(delete.is_err());
    }

    #[tokio::test]
    async fn attendance_unique_per_user_and_day() {
        let db = test_db().await;
        let insert = "INSERT INTO attendance (id, user_id, date, created_at, updated_at)
                      VALUES (?1, 'usr-1', '2024-01-01', '2024-01-01T09:00:00+00:00', '2024-01-01T09:00:00+00:00')";
        db.conn().execute(insert, ["att-1"]).await.unwrap();
        assert!(db.conn().execute(insert, ["att-2"]).await.is_err());
    }
}
