//! Project repository.

use chrono::Utc;
use libsql::Value;

use hlm_core::entities::{NewProject, Project, validate_progress};
use hlm_core::enums::{GovernedTable, ProjectStatus};
use hlm_core::identity::Actor;
use hlm_core::ids::PREFIX_PROJECT;

use crate::error::DatabaseError;
use crate::governed::GovernedRecord;
use crate::helpers::{
    get_opt_string, opt_date, opt_text, parse_datetime, parse_enum, parse_optional_date, text,
    timestamp,
};
use crate::service::HlmService;
use crate::updates::project::ProjectUpdate;

impl GovernedRecord for Project {
    const TABLE: GovernedTable = GovernedTable::Projects;
    const ID_PREFIX: &'static str = PREFIX_PROJECT;
    const COLUMNS: &'static str = "id, project_id, name, client_id, service_category, service_type, \
         package, project_lead, editor, start_date, end_date, progress, status, notes, \
         created_by, created_at, updated_at";
    const ORDER_BY: &'static str = "created_at DESC, rowid DESC";

    fn id(&self) -> &str {
        &self.id
    }

    fn from_row(row: &libsql::Row) -> Result<Self, DatabaseError> {
        Ok(Self {
            id: row.get(0)?,
            project_id: row.get(1)?,
            name: row.get(2)?,
            client_id: get_opt_string(row, 3)?,
            service_category: get_opt_string(row, 4)?,
            service_type: get_opt_string(row, 5)?,
            package: get_opt_string(row, 6)?,
            project_lead: get_opt_string(row, 7)?,
            editor: get_opt_string(row, 8)?,
            start_date: parse_optional_date(get_opt_string(row, 9)?.as_deref())?,
            end_date: parse_optional_date(get_opt_string(row, 10)?.as_deref())?,
            progress: row.get(11)?,
            status: parse_enum(&row.get::<String>(12)?)?,
            notes: get_opt_string(row, 13)?,
            created_by: get_opt_string(row, 14)?,
            created_at: parse_datetime(&row.get::<String>(15)?)?,
            updated_at: parse_datetime(&row.get::<String>(16)?)?,
        })
    }

    fn to_values(&self) -> Vec<Value> {
        vec![
            text(self.id.as_str()),
            text(self.project_id.as_str()),
            text(self.name.as_str()),
            opt_text(self.client_id.as_deref()),
            opt_text(self.service_category.as_deref()),
            opt_text(self.service_type.as_deref()),
            opt_text(self.package.as_deref()),
            opt_text(self.project_lead.as_deref()),
            opt_text(self.editor.as_deref()),
            opt_date(self.start_date),
            opt_date(self.end_date),
            Value::Integer(self.progress),
            text(self.status.as_str()),
            opt_text(self.notes.as_deref()),
            opt_text(self.created_by.as_deref()),
            timestamp(self.created_at),
            timestamp(self.updated_at),
        ]
    }
}

impl HlmService {
    /// # Errors
    ///
    /// `Validation`, `NotFound` for an unknown client, `Unauthorized`, or a
    /// persistence error.
    pub async fn create_project(
        &self,
        actor: &Actor,
        input: NewProject,
    ) -> Result<Project, DatabaseError> {
        input.validate()?;
        if let Some(ref client_id) = input.client_id {
            self.get_client(client_id).await?;
        }
        let now = Utc::now();
        let project = Project {
            id: self.db().generate_id(Project::ID_PREFIX).await?,
            project_id: input.project_id.trim().to_string(),
            name: input.name.trim().to_string(),
            client_id: input.client_id,
            service_category: input.service_category,
            service_type: input.service_type,
            package: input.package,
            project_lead: input.project_lead,
            editor: input.editor,
            start_date: input.start_date,
            end_date: input.end_date,
            progress: input.progress,
            status: input.status,
            notes: input.notes,
            created_by: Some(actor.user_id.clone()),
            created_at: now,
            updated_at: now,
        };
        self.insert_governed(actor, &project).await?;
        Ok(project)
    }

    /// # Errors
    ///
    /// `NotFound` when no project has this id.
    pub async fn get_project(&self, id: &str) -> Result<Project, DatabaseError> {
        self.fetch_governed(id).await
    }

    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_projects(
        &self,
        client_id: Option<&str>,
        status: Option<ProjectStatus>,
        limit: u32,
    ) -> Result<Vec<Project>, DatabaseError> {
        let mut filters = Vec::new();
        if let Some(client_id) = client_id {
            filters.push(("client_id", text(client_id)));
        }
        if let Some(status) = status {
            filters.push(("status", text(status.as_str())));
        }
        self.list_governed(filters, limit).await
    }

    /// # Errors
    ///
    /// `Validation` for blank fields or out-of-range progress, `Unauthorized`,
    /// `NotFound`, or `AuditGap`.
    pub async fn update_project(
        &self,
        actor: &Actor,
        id: &str,
        update: ProjectUpdate,
    ) -> Result<Project, DatabaseError> {
        if update.project_id.as_deref().is_some_and(|s| s.trim().is_empty())
            || update.name.as_deref().is_some_and(|s| s.trim().is_empty())
        {
            return Err(DatabaseError::Validation(
                "project_id and name cannot be blank".into(),
            ));
        }
        if let Some(progress) = update.progress {
            validate_progress(progress)?;
        }
        self.patch_governed(actor, id, &update).await
    }

    /// # Errors
    ///
    /// `Unauthorized`, `NotFound`, a persistence error while tasks or finance
    /// rows still reference the project, or `AuditGap`.
    pub async fn delete_project(&self, actor: &Actor, id: &str) -> Result<Project, DatabaseError> {
        self.delete_governed(actor, id).await
    }
}
