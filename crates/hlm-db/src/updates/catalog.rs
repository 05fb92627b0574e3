//! Service catalog update builder.

use libsql::Value;
use serde::Serialize;

use hlm_core::enums::{RecordStatus, ServiceTier};

use crate::governed::{Assignments, RecordPatch};
use crate::helpers::{opt_int, opt_text, text};

#[derive(Debug, Clone, Default, Serialize)]
pub struct ServiceOfferingUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tier: Option<ServiceTier>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Option<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hpp: Option<Option<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub features: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<RecordStatus>,
}

impl RecordPatch for ServiceOfferingUpdate {
    fn assignments(&self) -> Vec<(&'static str, Value)> {
        Assignments::new()
            .set("name", self.name.clone().map(text))
            .set("category", self.category.clone().map(text))
            .set("tier", self.tier.map(|t| text(t.as_str())))
            .set("price", self.price.map(opt_int))
            .set("hpp", self.hpp.map(opt_int))
            .set(
                "description",
                self.description.as_ref().map(|v| opt_text(v.as_deref())),
            )
            .set(
                "features",
                self.features
                    .as_ref()
                    .map(|f| text(serde_json::Value::from(f.clone()).to_string())),
            )
            .set("status", self.status.map(|s| text(s.as_str())))
            .build()
    }
}

pub struct ServiceOfferingUpdateBuilder(ServiceOfferingUpdate);

impl ServiceOfferingUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(ServiceOfferingUpdate::default())
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.0.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.0.category = Some(category.into());
        self
    }

    #[must_use]
    pub fn tier(mut self, tier: ServiceTier) -> Self {
        self.0.tier = Some(tier);
        self
    }

    #[must_use]
    pub fn price(mut self, price: Option<i64>) -> Self {
        self.0.price = Some(price);
        self
    }

    #[must_use]
    pub fn hpp(mut self, hpp: Option<i64>) -> Self {
        self.0.hpp = Some(hpp);
        self
    }

    #[must_use]
    pub fn description(mut self, description: Option<String>) -> Self {
        self.0.description = Some(description);
        self
    }

    #[must_use]
    pub fn features(mut self, features: Vec<String>) -> Self {
        self.0.features = Some(features);
        self
    }

    #[must_use]
    pub fn status(mut self, status: RecordStatus) -> Self {
        self.0.status = Some(status);
        self
    }

    #[must_use]
    pub fn build(self) -> ServiceOfferingUpdate {
        self.0
    }
}

impl Default for ServiceOfferingUpdateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
