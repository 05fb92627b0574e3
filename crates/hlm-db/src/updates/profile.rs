//! Team profile update builder.

use chrono::NaiveDate;
use libsql::Value;
use serde::Serialize;

use hlm_core::enums::RecordStatus;

use crate::governed::{Assignments, RecordPatch};
use crate::helpers::{opt_date, opt_text, text};

#[derive(Debug, Clone, Default, Serialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub join_date: Option<Option<NaiveDate>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<RecordStatus>,
}

impl RecordPatch for ProfileUpdate {
    fn assignments(&self) -> Vec<(&'static str, Value)> {
        Assignments::new()
            .set("full_name", self.full_name.clone().map(text))
            .set(
                "employee_id",
                self.employee_id.as_ref().map(|v| opt_text(v.as_deref())),
            )
            .set(
                "department",
                self.department.as_ref().map(|v| opt_text(v.as_deref())),
            )
            .set("phone", self.phone.as_ref().map(|v| opt_text(v.as_deref())))
            .set("join_date", self.join_date.map(opt_date))
            .set("status", self.status.map(|s| text(s.as_str())))
            .build()
    }
}

pub struct ProfileUpdateBuilder(ProfileUpdate);

impl ProfileUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(ProfileUpdate::default())
    }

    #[must_use]
    pub fn full_name(mut self, full_name: impl Into<String>) -> Self {
        self.0.full_name = Some(full_name.into());
        self
    }

    #[must_use]
    pub fn employee_id(mut self, employee_id: Option<String>) -> Self {
        self.0.employee_id = Some(employee_id);
        self
    }

    #[must_use]
    pub fn department(mut self, department: Option<String>) -> Self {
        self.0.department = Some(department);
        self
    }

    #[must_use]
    pub fn phone(mut self, phone: Option<String>) -> Self {
        self.0.phone = Some(phone);
        self
    }

    #[must_use]
    pub fn join_date(mut self, join_date: Option<NaiveDate>) -> Self {
        self.0.join_date = Some(join_date);
        self
    }

    #[must_use]
    pub fn status(mut self, status: RecordStatus) -> Self {
        self.0.status = Some(status);
        self
    }

    #[must_use]
    pub fn build(self) -> ProfileUpdate {
        self.0
    }
}

impl Default for ProfileUpdateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
