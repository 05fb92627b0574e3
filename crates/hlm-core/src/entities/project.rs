use chrono::{DateTime, NaiveDate, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::require;
use crate::enums::ProjectStatus;
use crate::errors::CoreError;

/// A client engagement that groups content tasks.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Project {
    pub id: String,
    /// Business code, e.g. `PRJ-2024-001`.
    pub project_id: String,
    pub name: String,
    /// Row id of the owning client, if any.
    pub client_id: Option<String>,
    pub service_category: Option<String>,
    pub service_type: Option<String>,
    pub package: Option<String>,
    pub project_lead: Option<String>,
    pub editor: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    /// Completion percentage, 0..=100.
    pub progress: i64,
    pub status: ProjectStatus,
    pub notes: Option<String>,
    pub created_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct NewProject {
    pub project_id: String,
    pub name: String,
    pub client_id: Option<String>,
    pub service_category: Option<String>,
    pub service_type: Option<String>,
    pub package: Option<String>,
    pub project_lead: Option<String>,
    pub editor: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub progress: i64,
    #[serde(default)]
    pub status: ProjectStatus,
    pub notes: Option<String>,
}

impl NewProject {
    /// # Errors
    ///
    /// Returns `CoreError::Validation` for a blank code or name, a progress
    /// outside 0..=100, or an end date before the start date.
    pub fn validate(&self) -> Result<(), CoreError> {
        require("project_id", &self.project_id)?;
        require("name", &self.name)?;
        validate_progress(self.progress)?;
        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            if end < start {
                return Err(CoreError::Validation(
                    "end_date must not be before start_date".into(),
                ));
            }
        }
        Ok(())
    }
}

/// # Errors
///
/// Returns `CoreError::Validation` when `progress` is outside 0..=100.
pub fn validate_progress(progress: i64) -> Result<(), CoreError> {
    if !(0..=100).contains(&progress) {
        return Err(CoreError::Validation(format!(
            "progress must be between 0 and 100, got {progress}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> NewProject {
        NewProject {
            project_id: "PRJ-001".into(),
            name: "Launch campaign".into(),
            ..NewProject::default()
        }
    }

    #[test]
    fn progress_bounds() {
        let mut p = input();
        p.progress = 101;
        assert!(p.validate().is_err());
        p.progress = 100;
        assert!(p.validate().is_ok());
    }

    #[test]
    fn end_before_start_rejected() {
        let mut p = input();
        p.start_date = NaiveDate::from_ymd_opt(2024, 3, 1);
        p.end_date = NaiveDate::from_ymd_opt(2024, 2, 1);
        assert!(p.validate().is_err());
    }
}
