//! Task update builder.
//!
//! `approval_status` is accepted here for full record corrections; the write
//! path re-checks the actor before applying a change to it.

use chrono::NaiveDate;
use libsql::Value;
use serde::Serialize;

use hlm_core::enums::{ApprovalStatus, ProductionStatus, TaskMedium};

use crate::governed::{Assignments, RecordPatch};
use crate::helpers::{opt_date, opt_text, text};

#[derive(Debug, Clone, Default, Serialize)]
pub struct TaskUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brief: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub script: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pillar: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emotional_angle: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medium: Option<Option<TaskMedium>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_url: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset_url: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_pl: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_copywriter: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_editor: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_videographer: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<Option<NaiveDate>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<Option<NaiveDate>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub done_date: Option<Option<NaiveDate>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ProductionStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approval_status: Option<ApprovalStatus>,
}

fn nullable(v: Option<&Option<String>>) -> Option<Value> {
    v.map(|v| opt_text(v.as_deref()))
}

impl RecordPatch for TaskUpdate {
    fn assignments(&self) -> Vec<(&'static str, Value)> {
        Assignments::new()
            .set("project_id", self.project_id.clone().map(text))
            .set("title", self.title.clone().map(text))
            .set("description", nullable(self.description.as_ref()))
            .set("brief", nullable(self.brief.as_ref()))
            .set("caption", nullable(self.caption.as_ref()))
            .set("script", nullable(self.script.as_ref()))
            .set("pillar", nullable(self.pillar.as_ref()))
            .set("emotional_angle", nullable(self.emotional_angle.as_ref()))
            .set(
                "medium",
                self.medium.map(|m| opt_text(m.map(TaskMedium::as_str))),
            )
            .set("reference_url", nullable(self.reference_url.as_ref()))
            .set("asset_url", nullable(self.asset_url.as_ref()))
            .set("assigned_pl", nullable(self.assigned_pl.as_ref()))
            .set("assigned_copywriter", nullable(self.assigned_copywriter.as_ref()))
            .set("assigned_editor", nullable(self.assigned_editor.as_ref()))
            .set(
                "assigned_videographer",
                nullable(self.assigned_videographer.as_ref()),
            )
            .set("start_date", self.start_date.map(opt_date))
            .set("due_date", self.due_date.map(opt_date))
            .set("done_date", self.done_date.map(opt_date))
            .set("status", self.status.map(|s| text(s.as_str())))
            .set("approval_status", self.approval_status.map(|s| text(s.as_str())))
            .build()
    }
}

pub struct TaskUpdateBuilder(TaskUpdate);

impl TaskUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(TaskUpdate::default())
    }

    #[must_use]
    pub fn project_id(mut self, project_id: impl Into<String>) -> Self {
        self.0.project_id = Some(project_id.into());
        self
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.0.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: Option<String>) -> Self {
        self.0.description = Some(description);
        self
    }

    #[must_use]
    pub fn brief(mut self, brief: Option<String>) -> Self {
        self.0.brief = Some(brief);
        self
    }

    #[must_use]
    pub fn caption(mut self, caption: Option<String>) -> Self {
        self.0.caption = Some(caption);
        self
    }

    #[must_use]
    pub fn script(mut self, script: Option<String>) -> Self {
        self.0.script = Some(script);
        self
    }

    #[must_use]
    pub fn pillar(mut self, pillar: Option<String>) -> Self {
        self.0.pillar = Some(pillar);
        self
    }

    #[must_use]
    pub fn emotional_angle(mut self, emotional_angle: Option<String>) -> Self {
        self.0.emotional_angle = Some(emotional_angle);
        self
    }

    #[must_use]
    pub fn medium(mut self, medium: Option<TaskMedium>) -> Self {
        self.0.medium = Some(medium);
        self
    }

    #[must_use]
    pub fn reference_url(mut self, reference_url: Option<String>) -> Self {
        self.0.reference_url = Some(reference_url);
        self
    }

    #[must_use]
    pub fn asset_url(mut self, asset_url: Option<String>) -> Self {
        self.0.asset_url = Some(asset_url);
        self
    }

    #[must_use]
    pub fn assigned_pl(mut self, user_id: Option<String>) -> Self {
        self.0.assigned_pl = Some(user_id);
        self
    }

    #[must_use]
    pub fn assigned_copywriter(mut self, user_id: Option<String>) -> Self {
        self.0.assigned_copywriter = Some(user_id);
        self
    }

    #[must_use]
    pub fn assigned_editor(mut self, user_id: Option<String>) -> Self {
        self.0.assigned_editor = Some(user_id);
        self
    }

    #[must_use]
    pub fn assigned_videographer(mut self, user_id: Option<String>) -> Self {
        self.0.assigned_videographer = Some(user_id);
        self
    }

    #[must_use]
    pub fn start_date(mut self, start_date: Option<NaiveDate>) -> Self {
        self.0.start_date = Some(start_date);
        self
    }

    #[must_use]
    pub fn due_date(mut self, due_date: Option<NaiveDate>) -> Self {
        self.0.due_date = Some(due_date);
        self
    }

    #[must_use]
    pub fn done_date(mut self, done_date: Option<NaiveDate>) -> Self {
        self.0.done_date = Some(done_date);
        self
    }

    #[must_use]
    pub fn status(mut self, status: ProductionStatus) -> Self {
        self.0.status = Some(status);
        self
    }

    #[must_use]
    pub fn approval_status(mut self, approval_status: ApprovalStatus) -> Self {
        self.0.approval_status = Some(approval_status);
        self
    }

    #[must_use]
    pub fn build(self) -> TaskUpdate {
        self.0
    }
}

impl Default for TaskUpdateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
