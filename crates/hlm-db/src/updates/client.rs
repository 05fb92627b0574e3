//! Client update builder.

use chrono::NaiveDate;
use libsql::Value;
use serde::Serialize;

use hlm_core::enums::ClientStatus;

use crate::governed::{Assignments, RecordPatch};
use crate::helpers::{opt_date, opt_int, opt_text, text};

#[derive(Debug, Clone, Default, Serialize)]
pub struct ClientUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pic_name: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_category: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_idr: Option<Option<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<Option<NaiveDate>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ClientStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<Option<String>>,
}

impl RecordPatch for ClientUpdate {
    fn assignments(&self) -> Vec<(&'static str, Value)> {
        Assignments::new()
            .set("client_id", self.client_id.clone().map(text))
            .set("brand_name", self.brand_name.clone().map(text))
            .set("pic_name", self.pic_name.as_ref().map(|v| opt_text(v.as_deref())))
            .set(
                "service_category",
                self.service_category.as_ref().map(|v| opt_text(v.as_deref())),
            )
            .set("package", self.package.as_ref().map(|v| opt_text(v.as_deref())))
            .set("value_idr", self.value_idr.map(opt_int))
            .set("start_date", self.start_date.map(opt_date))
            .set("status", self.status.map(|s| text(s.as_str())))
            .set("notes", self.notes.as_ref().map(|v| opt_text(v.as_deref())))
            .build()
    }
}

pub struct ClientUpdateBuilder(ClientUpdate);

impl ClientUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(ClientUpdate::default())
    }

    #[must_use]
    pub fn client_id(mut self, client_id: impl Into<String>) -> Self {
        self.0.client_id = Some(client_id.into());
        self
    }

    #[must_use]
    pub fn brand_name(mut self, brand_name: impl Into<String>) -> Self {
        self.0.brand_name = Some(brand_name.into());
        self
    }

    #[must_use]
    pub fn pic_name(mut self, pic_name: Option<String>) -> Self {
        self.0.pic_name = Some(pic_name);
        self
    }

    #[must_use]
    pub fn service_category(mut self, service_category: Option<String>) -> Self {
        self.0.service_category = Some(service_category);
        self
    }

    #[must_use]
    pub fn package(mut self, package: Option<String>) -> Self {
        self.0.package = Some(package);
        self
    }

    #[must_use]
    pub fn value_idr(mut self, value_idr: Option<i64>) -> Self {
        self.0.value_idr = Some(value_idr);
        self
    }

    #[must_use]
    pub fn start_date(mut self, start_date: Option<NaiveDate>) -> Self {
        self.0.start_date = Some(start_date);
        self
    }

    #[must_use]
    pub fn status(mut self, status: ClientStatus) -> Self {
        self.0.status = Some(status);
        self
    }

    #[must_use]
    pub fn notes(mut self, notes: Option<String>) -> Self {
        self.0.notes = Some(notes);
        self
    }

    #[must_use]
    pub fn build(self) -> ClientUpdate {
        self.0
    }
}

impl Default for ClientUpdateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
