//! Audit log repository.
//!
//! Insert-only writer plus a filtered reader. There is no update or delete
//! path for `audit_log`, and the schema triggers reject both.

use chrono::Utc;

use hlm_core::access::can_read_audit;
use hlm_core::entities::AuditEntry;
use hlm_core::enums::{AuditAction, GovernedTable};
use hlm_core::identity::Actor;
use hlm_core::ids::PREFIX_AUDIT;

use crate::error::DatabaseError;
use crate::helpers::{get_opt_string, parse_datetime, parse_enum, parse_optional_json};
use crate::service::HlmService;

const SELECT_COLS: &str =
    "id, user_id, action, table_name, record_id, old_values, new_values, created_at";

/// Filter criteria for audit queries. All set fields must match.
#[derive(Debug, Default, Clone)]
pub struct AuditFilter {
    pub table: Option<GovernedTable>,
    pub record_id: Option<String>,
    pub user_id: Option<String>,
    pub action: Option<AuditAction>,
    pub limit: Option<u32>,
}

fn row_to_entry(row: &libsql::Row) -> Result<AuditEntry, DatabaseError> {
    Ok(AuditEntry {
        id: row.get(0)?,
        user_id: row.get(1)?,
        action: parse_enum(&row.get::<String>(2)?)?,
        table_name: parse_enum(&row.get::<String>(3)?)?,
        record_id: get_opt_string(row, 4)?,
        old_values: parse_optional_json(get_opt_string(row, 5)?.as_deref())?,
        new_values: parse_optional_json(get_opt_string(row, 6)?.as_deref())?,
        created_at: parse_datetime(&row.get::<String>(7)?)?,
    })
}

impl HlmService {
    /// Append one immutable audit entry.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the INSERT fails.
    pub async fn record_audit(
        &self,
        actor: &Actor,
        action: AuditAction,
        table: GovernedTable,
        record_id: Option<&str>,
        old_values: Option<serde_json::Value>,
        new_values: Option<serde_json::Value>,
    ) -> Result<AuditEntry, DatabaseError> {
        let entry = AuditEntry {
            id: self.db().generate_id(PREFIX_AUDIT).await?,
            user_id: actor.user_id.clone(),
            action,
            table_name: table,
            record_id: record_id.map(String::from),
            old_values,
            new_values,
            created_at: Utc::now(),
        };

        self.db()
            .conn()
            .execute(
                &format!("INSERT INTO audit_log ({SELECT_COLS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)"),
                libsql::params![
                    entry.id.as_str(),
                    entry.user_id.as_str(),
                    entry.action.as_str(),
                    entry.table_name.as_str(),
                    entry.record_id.as_deref(),
                    entry.old_values.as_ref().map(ToString::to_string),
                    entry.new_values.as_ref().map(ToString::to_string),
                    entry.created_at.to_rfc3339()
                ],
            )
            .await?;
        Ok(entry)
    }

    /// Query audit entries, newest first. Admin-or-above only.
    ///
    /// # Errors
    ///
    /// `Unauthorized` for non-admin actors, or `DatabaseError` if the query fails.
    pub async fn query_audit(
        &self,
        actor: &Actor,
        filter: &AuditFilter,
    ) -> Result<Vec<AuditEntry>, DatabaseError> {
        if !can_read_audit(actor.role) {
            tracing::warn!(user_id = %actor.user_id, role = %actor.role, "audit read refused");
            return Err(DatabaseError::Unauthorized {
                role: actor.role.to_string(),
                action: "read audit_log".into(),
            });
        }
        self.audit_entries(filter).await
    }

    /// Unchecked reader shared by `query_audit` and tests.
    pub(crate) async fn audit_entries(
        &self,
        filter: &AuditFilter,
    ) -> Result<Vec<AuditEntry>, DatabaseError> {
        let mut conditions = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();

        if let Some(table) = filter.table {
            params.push(libsql::Value::Text(table.as_str().to_string()));
            conditions.push(format!("table_name = ?{}", params.len()));
        }
        if let Some(ref record_id) = filter.record_id {
            params.push(libsql::Value::Text(record_id.clone()));
            conditions.push(format!("record_id = ?{}", params.len()));
        }
        if let Some(ref user_id) = filter.user_id {
            params.push(libsql::Value::Text(user_id.clone()));
            conditions.push(format!("user_id = ?{}", params.len()));
        }
        if let Some(action) = filter.action {
            params.push(libsql::Value::Text(action.as_str().to_string()));
            conditions.push(format!("action = ?{}", params.len()));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let limit = filter.limit.unwrap_or(100);
        let sql = format!(
            "SELECT {SELECT_COLS} FROM audit_log {where_clause}
             ORDER BY created_at DESC, rowid DESC LIMIT {limit}"
        );

        let mut rows = self
            .db()
            .conn()
            .query(&sql, libsql::params_from_iter(params))
            .await?;
        let mut entries = Vec::new();
        while let Some(row) = rows.next().await? {
            entries.push(row_to_entry(&row)?);
        }
        Ok(entries)
    }
}
