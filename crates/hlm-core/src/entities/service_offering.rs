use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::require;
use crate::enums::{RecordStatus, ServiceTier};
use crate::errors::CoreError;

/// An entry in the agency's service catalog (table `services`).
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ServiceOffering {
    pub id: String,
    pub name: String,
    pub category: String,
    pub tier: ServiceTier,
    /// Selling price in whole rupiah.
    pub price: Option<i64>,
    /// Cost of goods sold in whole rupiah.
    pub hpp: Option<i64>,
    pub description: Option<String>,
    pub features: Vec<String>,
    pub status: RecordStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ServiceOffering {
    /// Price minus cost, when both are known.
    #[must_use]
    pub fn margin(&self) -> Option<i64> {
        Some(self.price? - self.hpp?)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct NewServiceOffering {
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub tier: ServiceTier,
    pub price: Option<i64>,
    pub hpp: Option<i64>,
    pub description: Option<String>,
    #[serde(default)]
    pub features: Vec<String>,
}

impl NewServiceOffering {
    /// # Errors
    ///
    /// Returns `CoreError::Validation` for a blank name or category, or a
    /// negative amount.
    pub fn validate(&self) -> Result<(), CoreError> {
        require("name", &self.name)?;
        require("category", &self.category)?;
        if self.price.is_some_and(|v| v < 0) || self.hpp.is_some_and(|v| v < 0) {
            return Err(CoreError::Validation("amounts must not be negative".into()));
        }
        Ok(())
    }
}
