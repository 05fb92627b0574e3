use chrono::{DateTime, NaiveDate, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::require;
use crate::enums::{ApprovalStatus, ProductionStatus, TaskMedium};
use crate::errors::CoreError;

/// A content deliverable inside a project.
///
/// Carries two independent states: `status` (production, free-moving) and
/// `approval_status` (governance, forward-only, admin-or-above to change).
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Task {
    pub id: String,
    pub project_id: String,
    pub title: String,
    pub description: Option<String>,
    pub brief: Option<String>,
    pub caption: Option<String>,
    pub script: Option<String>,
    pub pillar: Option<String>,
    pub emotional_angle: Option<String>,
    pub medium: Option<TaskMedium>,
    pub reference_url: Option<String>,
    pub asset_url: Option<String>,
    pub assigned_pl: Option<String>,
    pub assigned_copywriter: Option<String>,
    pub assigned_editor: Option<String>,
    pub assigned_videographer: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub done_date: Option<NaiveDate>,
    pub status: ProductionStatus,
    pub approval_status: ApprovalStatus,
    pub created_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a task. New tasks always start in `draft` for both
/// production and approval, so neither state is accepted here.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct NewTask {
    pub project_id: String,
    pub title: String,
    pub description: Option<String>,
    pub brief: Option<String>,
    pub caption: Option<String>,
    pub script: Option<String>,
    pub pillar: Option<String>,
    pub emotional_angle: Option<String>,
    pub medium: Option<TaskMedium>,
    pub reference_url: Option<String>,
    pub asset_url: Option<String>,
    pub assigned_pl: Option<String>,
    pub assigned_copywriter: Option<String>,
    pub assigned_editor: Option<String>,
    pub assigned_videographer: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
}

impl NewTask {
    /// # Errors
    ///
    /// Returns `CoreError::Validation` for a blank title or project reference.
    pub fn validate(&self) -> Result<(), CoreError> {
        require("project_id", &self.project_id)?;
        require("title", &self.title)?;
        Ok(())
    }
}
