//! Task repository: CRUD plus the approval workflow.
//!
//! `approval_status` changes in two places only. [`HlmService::advance_approval`]
//! moves one step forward and audits as `APPROVE`. [`HlmService::update_task`]
//! accepts any value as a full record correction. Both require
//! admin-or-above, checked here at the write path.

use chrono::Utc;
use libsql::Value;
use serde::Serialize;

use hlm_core::access::Operation;
use hlm_core::entities::{NewTask, Task};
use hlm_core::enums::{ApprovalStatus, AuditAction, GovernedTable, ProductionStatus};
use hlm_core::identity::Actor;
use hlm_core::ids::PREFIX_TASK;

use crate::error::DatabaseError;
use crate::governed::{GovernedRecord, ensure_can_mutate, qualified_columns};
use crate::helpers::{
    get_opt_string, opt_date, opt_text, parse_datetime, parse_enum, parse_optional_date, text,
    timestamp,
};
use crate::service::HlmService;
use crate::updates::task::TaskUpdate;

impl GovernedRecord for Task {
    const TABLE: GovernedTable = GovernedTable::Tasks;
    const ID_PREFIX: &'static str = PREFIX_TASK;
    const COLUMNS: &'static str = "id, project_id, title, description, brief, caption, script, \
         pillar, emotional_angle, medium, reference_url, asset_url, assigned_pl, \
         assigned_copywriter, assigned_editor, assigned_videographer, start_date, due_date, \
         done_date, status, approval_status, created_by, created_at, updated_at";
    const ORDER_BY: &'static str = "created_at DESC, rowid DESC";

    fn id(&self) -> &str {
        &self.id
    }

    fn from_row(row: &libsql::Row) -> Result<Self, DatabaseError> {
        Ok(Self {
            id: row.get(0)?,
            project_id: row.get(1)?,
            title: row.get(2)?,
            description: get_opt_string(row, 3)?,
            brief: get_opt_string(row, 4)?,
            caption: get_opt_string(row, 5)?,
            script: get_opt_string(row, 6)?,
            pillar: get_opt_string(row, 7)?,
            emotional_angle: get_opt_string(row, 8)?,
            medium: get_opt_string(row, 9)?
                .map(|m| parse_enum(&m))
                .transpose()?,
            reference_url: get_opt_string(row, 10)?,
            asset_url: get_opt_string(row, 11)?,
            assigned_pl: get_opt_string(row, 12)?,
            assigned_copywriter: get_opt_string(row, 13)?,
            assigned_editor: get_opt_string(row, 14)?,
            assigned_videographer: get_opt_string(row, 15)?,
            start_date: parse_optional_date(get_opt_string(row, 16)?.as_deref())?,
            due_date: parse_optional_date(get_opt_string(row, 17)?.as_deref())?,
            done_date: parse_optional_date(get_opt_string(row, 18)?.as_deref())?,
            status: parse_enum(&row.get::<String>(19)?)?,
            approval_status: parse_enum(&row.get::<String>(20)?)?,
            created_by: get_opt_string(row, 21)?,
            created_at: parse_datetime(&row.get::<String>(22)?)?,
            updated_at: parse_datetime(&row.get::<String>(23)?)?,
        })
    }

    fn to_values(&self) -> Vec<Value> {
        vec![
            text(self.id.as_str()),
            text(self.project_id.as_str()),
            text(self.title.as_str()),
            opt_text(self.description.as_deref()),
            opt_text(self.brief.as_deref()),
            opt_text(self.caption.as_deref()),
            opt_text(self.script.as_deref()),
            opt_text(self.pillar.as_deref()),
            opt_text(self.emotional_angle.as_deref()),
            opt_text(self.medium.map(|m| m.as_str())),
            opt_text(self.reference_url.as_deref()),
            opt_text(self.asset_url.as_deref()),
            opt_text(self.assigned_pl.as_deref()),
            opt_text(self.assigned_copywriter.as_deref()),
            opt_text(self.assigned_editor.as_deref()),
            opt_text(self.assigned_videographer.as_deref()),
            opt_date(self.start_date),
            opt_date(self.due_date),
            opt_date(self.done_date),
            text(self.status.as_str()),
            text(self.approval_status.as_str()),
            opt_text(self.created_by.as_deref()),
            timestamp(self.created_at),
            timestamp(self.updated_at),
        ]
    }
}

/// Filter criteria for task listings. All set fields must match.
#[derive(Debug, Default, Clone)]
pub struct TaskFilter {
    pub project_id: Option<String>,
    pub approval_status: Option<ApprovalStatus>,
    pub status: Option<ProductionStatus>,
    /// Matches any of the four assignee columns.
    pub assignee: Option<String>,
    pub limit: Option<u32>,
}

/// A task row joined with its project's display name.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TaskListing {
    #[serde(flatten)]
    pub task: Task,
    pub project_name: Option<String>,
}

impl HlmService {
    /// Create a task in `draft` production and approval state.
    ///
    /// # Errors
    ///
    /// `Validation`, `NotFound` for an unknown project, `Unauthorized`, or
    /// `AuditGap`.
    pub async fn create_task(&self, actor: &Actor, input: NewTask) -> Result<Task, DatabaseError> {
        input.validate()?;
        self.get_project(&input.project_id).await?;

        let now = Utc::now();
        let task = Task {
            id: self.db().generate_id(Task::ID_PREFIX).await?,
            project_id: input.project_id,
            title: input.title.trim().to_string(),
            description: input.description,
            brief: input.brief,
            caption: input.caption,
            script: input.script,
            pillar: input.pillar,
            emotional_angle: input.emotional_angle,
            medium: input.medium,
            reference_url: input.reference_url,
            asset_url: input.asset_url,
            assigned_pl: input.assigned_pl,
            assigned_copywriter: input.assigned_copywriter,
            assigned_editor: input.assigned_editor,
            assigned_videographer: input.assigned_videographer,
            start_date: input.start_date,
            due_date: input.due_date,
            done_date: None,
            status: ProductionStatus::Draft,
            approval_status: ApprovalStatus::Draft,
            created_by: Some(actor.user_id.clone()),
            created_at: now,
            updated_at: now,
        };
        self.insert_governed(actor, &task).await?;
        Ok(task)
    }

    /// # Errors
    ///
    /// `NotFound` when no task has this id.
    pub async fn get_task(&self, id: &str) -> Result<Task, DatabaseError> {
        self.fetch_governed(id).await
    }

    /// Tasks with their project names, newest first.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_tasks(&self, filter: &TaskFilter) -> Result<Vec<TaskListing>, DatabaseError> {
        let mut conditions = Vec::new();
        let mut params: Vec<Value> = Vec::new();

        if let Some(ref project_id) = filter.project_id {
            params.push(text(project_id.as_str()));
            conditions.push(format!("t.project_id = ?{}", params.len()));
        }
        if let Some(approval) = filter.approval_status {
            params.push(text(approval.as_str()));
            conditions.push(format!("t.approval_status = ?{}", params.len()));
        }
        if let Some(status) = filter.status {
            params.push(text(status.as_str()));
            conditions.push(format!("t.status = ?{}", params.len()));
        }
        if let Some(ref assignee) = filter.assignee {
            params.push(text(assignee.as_str()));
            let idx = params.len();
            conditions.push(format!(
                "(t.assigned_pl = ?{idx} OR t.assigned_copywriter = ?{idx} \
                 OR t.assigned_editor = ?{idx} OR t.assigned_videographer = ?{idx})"
            ));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };
        let limit = filter.limit.unwrap_or(100);
        let sql = format!(
            "SELECT {}, p.name FROM tasks t
             LEFT JOIN projects p ON p.id = t.project_id
             {where_clause}
             ORDER BY t.created_at DESC, t.rowid DESC LIMIT {limit}",
            qualified_columns::<Task>("t")
        );

        let mut rows = self
            .db()
            .conn()
            .query(&sql, libsql::params_from_iter(params))
            .await?;
        let mut listings = Vec::new();
        while let Some(row) = rows.next().await? {
            listings.push(TaskListing {
                task: Task::from_row(&row)?,
                project_name: get_opt_string(&row, 24)?,
            });
        }
        Ok(listings)
    }

    /// Generic task edit.
    ///
    /// Any change to `approval_status` is re-validated here and requires
    /// admin-or-above, whatever the caller's UI allowed. Leaving it unchanged
    /// (or equal to the stored value) only needs task update rights.
    ///
    /// # Errors
    ///
    /// `Unauthorized`, `Validation`, `NotFound`, or `AuditGap`.
    pub async fn update_task(
        &self,
        actor: &Actor,
        id: &str,
        update: TaskUpdate,
    ) -> Result<Task, DatabaseError> {
        if update.title.as_deref().is_some_and(|s| s.trim().is_empty()) {
            return Err(DatabaseError::Validation("title cannot be blank".into()));
        }
        let mut update = update;
        let current = self.get_task(id).await?;
        match update.approval_status {
            // Never rewrite the stored value: an advance may land between the
            // read above and the write below.
            Some(next) if next == current.approval_status => update.approval_status = None,
            Some(_) => ensure_can_mutate(actor, GovernedTable::Tasks, Operation::Approve)?,
            None => {}
        }
        if let Some(ref project_id) = update.project_id {
            self.get_project(project_id).await?;
        }
        self.patch_governed(actor, id, &update).await
    }

    /// # Errors
    ///
    /// `Unauthorized`, `NotFound`, or `AuditGap`.
    pub async fn delete_task(&self, actor: &Actor, id: &str) -> Result<Task, DatabaseError> {
        self.delete_governed(actor, id).await
    }

    /// Move a task's approval one step forward.
    ///
    /// Rejects unrecognized and terminal states with `InvalidTransition`,
    /// leaving the row untouched. On success writes one `APPROVE` audit entry
    /// `{approval_status: old} -> {approval_status: new}`.
    ///
    /// # Errors
    ///
    /// `Unauthorized` below admin, `NotFound`, `InvalidTransition`,
    /// `InvalidState` if the row changed concurrently, or `AuditGap`.
    pub async fn advance_approval(&self, actor: &Actor, id: &str) -> Result<Task, DatabaseError> {
        ensure_can_mutate(actor, GovernedTable::Tasks, Operation::Approve)?;

        let mut rows = self
            .db()
            .conn()
            .query("SELECT approval_status FROM tasks WHERE id = ?1", [id])
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| DatabaseError::not_found(GovernedTable::Tasks.as_str(), id))?;
        let raw: String = row.get(0)?;

        let current: ApprovalStatus =
            raw.parse().map_err(|_| DatabaseError::InvalidTransition {
                id: id.to_string(),
                from: raw.clone(),
                reason: "not a recognized approval state".into(),
            })?;
        let next = current
            .advance()
            .map_err(|_| DatabaseError::InvalidTransition {
                id: id.to_string(),
                from: raw.clone(),
                reason: "already published".into(),
            })?;

        let changed = self
            .db()
            .conn()
            .execute(
                "UPDATE tasks SET approval_status = ?1, updated_at = ?2
                 WHERE id = ?3 AND approval_status = ?4",
                libsql::params![next.as_str(), Utc::now().to_rfc3339(), id, current.as_str()],
            )
            .await?;
        if changed == 0 {
            return Err(DatabaseError::InvalidState(format!(
                "task {id} approval changed concurrently"
            )));
        }
        tracing::info!(task_id = id, from = %current, to = %next, user_id = %actor.user_id, "approval advanced");

        self.audit_after_write(
            actor,
            AuditAction::Approve,
            GovernedTable::Tasks,
            id,
            Some(serde_json::json!({ "approval_status": current.as_str() })),
            Some(serde_json::json!({ "approval_status": next.as_str() })),
        )
        .await?;

        self.get_task(id).await
    }
}
