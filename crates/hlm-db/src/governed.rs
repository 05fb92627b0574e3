//! Generic governed repository.
//!
//! One implementation of insert / patch / delete / fetch / list for every
//! governed table. Each mutation runs the same protocol:
//!
//! 1. Check the actor against [`can_mutate`] for the table and operation
//! 2. Execute the SQL
//! 3. Append one audit entry with the prior and new row snapshots
//!
//! Step 3 is attempted only after step 2 succeeded. If it fails, the caller
//! gets [`DatabaseError::AuditGap`] even though the row is committed.

use chrono::Utc;
use libsql::Value;
use serde::Serialize;

use hlm_core::access::{Operation, can_mutate};
use hlm_core::entities::AuditEntry;
use hlm_core::enums::{AuditAction, GovernedTable};
use hlm_core::identity::Actor;

use crate::error::DatabaseError;
use crate::helpers::timestamp;
use crate::service::HlmService;

/// A row type stored in a governed table.
pub trait GovernedRecord: Serialize + Sized {
    const TABLE: GovernedTable;
    const ID_PREFIX: &'static str;
    /// Comma-separated column list, `id` first, matching `from_row` and `to_values`.
    const COLUMNS: &'static str;
    const ORDER_BY: &'static str;
    /// Whether the table carries an `updated_at` column.
    const TOUCHES_UPDATED_AT: bool = true;

    fn id(&self) -> &str;

    /// Decode a row selected with [`Self::COLUMNS`].
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if a column is missing or malformed.
    fn from_row(row: &libsql::Row) -> Result<Self, DatabaseError>;

    /// Encode every column in [`Self::COLUMNS`] order.
    fn to_values(&self) -> Vec<Value>;
}

/// A partial update: only the listed columns are written.
pub trait RecordPatch: Serialize {
    fn assignments(&self) -> Vec<(&'static str, Value)>;
}

/// Collects `column = value` assignments from optional patch fields.
#[derive(Default)]
pub struct Assignments(Vec<(&'static str, Value)>);

impl Assignments {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `column` when the patch field is present.
    #[must_use]
    pub fn set(mut self, column: &'static str, value: Option<Value>) -> Self {
        if let Some(value) = value {
            self.0.push((column, value));
        }
        self
    }

    #[must_use]
    pub fn build(self) -> Vec<(&'static str, Value)> {
        self.0
    }
}

/// [`GovernedRecord::COLUMNS`] qualified with a table alias, for joins.
pub(crate) fn qualified_columns<R: GovernedRecord>(alias: &str) -> String {
    R::COLUMNS
        .split(',')
        .map(|c| format!("{alias}.{}", c.trim()))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Mutation guard shared by every write path.
///
/// # Errors
///
/// Returns `DatabaseError::Unauthorized` when the actor's role is not allowed.
pub fn ensure_can_mutate(
    actor: &Actor,
    table: GovernedTable,
    op: Operation,
) -> Result<(), DatabaseError> {
    if can_mutate(actor.role, table, op) {
        return Ok(());
    }
    tracing::warn!(
        user_id = %actor.user_id,
        role = %actor.role,
        %table,
        operation = %op,
        "mutation refused"
    );
    Err(DatabaseError::Unauthorized {
        role: actor.role.to_string(),
        action: format!("{op} {table}"),
    })
}

fn snapshot<T: Serialize>(value: &T) -> Result<serde_json::Value, DatabaseError> {
    Ok(serde_json::to_value(value)?)
}

impl HlmService {
    /// Audit after a committed data write, converting a failure into `AuditGap`.
    pub(crate) async fn audit_after_write(
        &self,
        actor: &Actor,
        action: AuditAction,
        table: GovernedTable,
        record_id: &str,
        old_values: Option<serde_json::Value>,
        new_values: Option<serde_json::Value>,
    ) -> Result<AuditEntry, DatabaseError> {
        match self
            .record_audit(actor, action, table, Some(record_id), old_values, new_values)
            .await
        {
            Ok(entry) => Ok(entry),
            Err(source) => {
                tracing::error!(
                    %table,
                    record_id,
                    %action,
                    error = %source,
                    "audit write failed after committed mutation"
                );
                Err(DatabaseError::AuditGap {
                    table: table.as_str().to_string(),
                    record_id: record_id.to_string(),
                    source: Box::new(source),
                })
            }
        }
    }

    /// Insert a new row and audit it as `INSERT`.
    ///
    /// # Errors
    ///
    /// `Unauthorized` when the guard fails, `LibSql` when the insert fails,
    /// `AuditGap` when the audit write fails afterwards.
    pub async fn insert_governed<R: GovernedRecord>(
        &self,
        actor: &Actor,
        record: &R,
    ) -> Result<(), DatabaseError> {
        ensure_can_mutate(actor, R::TABLE, Operation::Create)?;
        self.insert_and_audit(actor, record).await
    }

    /// Insert and audit without the role guard. Used by self-service sign-up,
    /// where the new user creates their own profile and role rows.
    pub(crate) async fn insert_and_audit<R: GovernedRecord>(
        &self,
        actor: &Actor,
        record: &R,
    ) -> Result<(), DatabaseError> {
        let values = record.to_values();
        let placeholders = (1..=values.len())
            .map(|i| format!("?{i}"))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({placeholders})",
            R::TABLE,
            R::COLUMNS
        );
        self.db()
            .conn()
            .execute(&sql, libsql::params_from_iter(values))
            .await?;
        tracing::info!(table = %R::TABLE, id = record.id(), user_id = %actor.user_id, "row inserted");

        self.audit_after_write(
            actor,
            AuditAction::Insert,
            R::TABLE,
            record.id(),
            None,
            Some(snapshot(record)?),
        )
        .await?;
        Ok(())
    }

    /// Apply a partial update and audit it as `UPDATE` with full before/after rows.
    ///
    /// An empty patch writes nothing and produces no audit entry.
    ///
    /// # Errors
    ///
    /// `Unauthorized`, `NotFound`, `LibSql`, or `AuditGap`.
    pub async fn patch_governed<R: GovernedRecord, P: RecordPatch>(
        &self,
        actor: &Actor,
        id: &str,
        patch: &P,
    ) -> Result<R, DatabaseError> {
        ensure_can_mutate(actor, R::TABLE, Operation::Update)?;

        let before: R = self.fetch_governed(id).await?;
        let mut assignments = patch.assignments();
        if assignments.is_empty() {
            return Ok(before);
        }
        if R::TOUCHES_UPDATED_AT {
            assignments.push(("updated_at", timestamp(Utc::now())));
        }

        let mut sets = Vec::with_capacity(assignments.len());
        let mut params = Vec::with_capacity(assignments.len() + 1);
        for (column, value) in assignments {
            params.push(value);
            sets.push(format!("{column} = ?{}", params.len()));
        }
        params.push(Value::Text(id.to_string()));
        let sql = format!(
            "UPDATE {} SET {} WHERE id = ?{}",
            R::TABLE,
            sets.join(", "),
            params.len()
        );
        let changed = self
            .db()
            .conn()
            .execute(&sql, libsql::params_from_iter(params))
            .await?;
        if changed == 0 {
            return Err(DatabaseError::not_found(R::TABLE.as_str(), id));
        }
        tracing::info!(table = %R::TABLE, id, user_id = %actor.user_id, "row updated");

        let after: R = self.fetch_governed(id).await?;
        self.audit_after_write(
            actor,
            AuditAction::Update,
            R::TABLE,
            id,
            Some(snapshot(&before)?),
            Some(snapshot(&after)?),
        )
        .await?;
        Ok(after)
    }

    /// Delete a row and audit it as `DELETE` with the prior row.
    ///
    /// # Errors
    ///
    /// `Unauthorized`, `NotFound`, `LibSql` (e.g. still referenced), or `AuditGap`.
    pub async fn delete_governed<R: GovernedRecord>(
        &self,
        actor: &Actor,
        id: &str,
    ) -> Result<R, DatabaseError> {
        ensure_can_mutate(actor, R::TABLE, Operation::Delete)?;

        let before: R = self.fetch_governed(id).await?;
        let changed = self
            .db()
            .conn()
            .execute(&format!("DELETE FROM {} WHERE id = ?1", R::TABLE), [id])
            .await?;
        if changed == 0 {
            return Err(DatabaseError::not_found(R::TABLE.as_str(), id));
        }
        tracing::info!(table = %R::TABLE, id, user_id = %actor.user_id, "row deleted");

        self.audit_after_write(
            actor,
            AuditAction::Delete,
            R::TABLE,
            id,
            Some(snapshot(&before)?),
            None,
        )
        .await?;
        Ok(before)
    }

    /// # Errors
    ///
    /// `NotFound` when no row has this id.
    pub async fn fetch_governed<R: GovernedRecord>(&self, id: &str) -> Result<R, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {} FROM {} WHERE id = ?1", R::COLUMNS, R::TABLE),
                [id],
            )
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| DatabaseError::not_found(R::TABLE.as_str(), id))?;
        R::from_row(&row)
    }

    /// List rows matching every `column = value` pair, in the table's order.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_governed<R: GovernedRecord>(
        &self,
        filters: Vec<(&'static str, Value)>,
        limit: u32,
    ) -> Result<Vec<R>, DatabaseError> {
        let mut conditions = Vec::with_capacity(filters.len());
        let mut params = Vec::with_capacity(filters.len());
        for (column, value) in filters {
            params.push(value);
            conditions.push(format!("{column} = ?{}", params.len()));
        }
        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };
        let sql = format!(
            "SELECT {} FROM {} {where_clause} ORDER BY {} LIMIT {limit}",
            R::COLUMNS,
            R::TABLE,
            R::ORDER_BY
        );

        let mut rows = self
            .db()
            .conn()
            .query(&sql, libsql::params_from_iter(params))
            .await?;
        let mut records = Vec::new();
        while let Some(row) = rows.next().await? {
            records.push(R::from_row(&row)?);
        }
        Ok(records)
    }
}
