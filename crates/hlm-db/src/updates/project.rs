//! Project update builder.

use chrono::NaiveDate;
use libsql::Value;
use serde::Serialize;

use hlm_core::enums::ProjectStatus;

use crate::governed::{Assignments, RecordPatch};
use crate::helpers::{opt_date, opt_text, text};

#[derive(Debug, Clone, Default, Serialize)]
pub struct ProjectUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_category: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_type: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_lead: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub editor: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<Option<NaiveDate>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<Option<NaiveDate>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ProjectStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<Option<String>>,
}

fn nullable(v: Option<&Option<String>>) -> Option<Value> {
    v.map(|v| opt_text(v.as_deref()))
}

impl RecordPatch for ProjectUpdate {
    fn assignments(&self) -> Vec<(&'static str, Value)> {
        Assignments::new()
            .set("project_id", self.project_id.clone().map(text))
            .set("name", self.name.clone().map(text))
            .set("client_id", nullable(self.client_id.as_ref()))
            .set("service_category", nullable(self.service_category.as_ref()))
            .set("service_type", nullable(self.service_type.as_ref()))
            .set("package", nullable(self.package.as_ref()))
            .set("project_lead", nullable(self.project_lead.as_ref()))
            .set("editor", nullable(self.editor.as_ref()))
            .set("start_date", self.start_date.map(opt_date))
            .set("end_date", self.end_date.map(opt_date))
            .set("progress", self.progress.map(Value::Integer))
            .set("status", self.status.map(|s| text(s.as_str())))
            .set("notes", nullable(self.notes.as_ref()))
            .build()
    }
}

pub struct ProjectUpdateBuilder(ProjectUpdate);

impl ProjectUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(ProjectUpdate::default())
    }

    #[must_use]
    pub fn project_id(mut self, project_id: impl Into<String>) -> Self {
        self.0.project_id = Some(project_id.into());
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.0.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn client_id(mut self, client_id: Option<String>) -> Self {
        self.0.client_id = Some(client_id);
        self
    }

    #[must_use]
    pub fn service_category(mut self, service_category: Option<String>) -> Self {
        self.0.service_category = Some(service_category);
        self
    }

    #[must_use]
    pub fn service_type(mut self, service_type: Option<String>) -> Self {
        self.0.service_type = Some(service_type);
        self
    }

    #[must_use]
    pub fn package(mut self, package: Option<String>) -> Self {
        self.0.package = Some(package);
        self
    }

    #[must_use]
    pub fn project_lead(mut self, project_lead: Option<String>) -> Self {
        self.0.project_lead = Some(project_lead);
        self
    }

    #[must_use]
    pub fn editor(mut self, editor: Option<String>) -> Self {
        self.0.editor = Some(editor);
        self
    }

    #[must_use]
    pub fn start_date(mut self, start_date: Option<NaiveDate>) -> Self {
        self.0.start_date = Some(start_date);
        self
    }

    #[must_use]
    pub fn end_date(mut self, end_date: Option<NaiveDate>) -> Self {
        self.0.end_date = Some(end_date);
        self
    }

    #[must_use]
    pub fn progress(mut self, progress: i64) -> Self {
        self.0.progress = Some(progress);
        self
    }

    #[must_use]
    pub fn status(mut self, status: ProjectStatus) -> Self {
        self.0.status = Some(status);
        self
    }

    #[must_use]
    pub fn notes(mut self, notes: Option<String>) -> Self {
        self.0.notes = Some(notes);
        self
    }

    #[must_use]
    pub fn build(self) -> ProjectUpdate {
        self.0
    }
}

impl Default for ProjectUpdateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
