use chrono::{DateTime, NaiveDate, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::require;
use crate::enums::ClientStatus;
use crate::errors::CoreError;

/// A client brand in the sales pipeline.
///
/// `client_id` is the agency's own business code (e.g. `CLT-001`), distinct
/// from the row identifier `id`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Client {
    pub id: String,
    pub client_id: String,
    pub brand_name: String,
    pub pic_name: Option<String>,
    pub service_category: Option<String>,
    pub package: Option<String>,
    /// Contract value in whole rupiah.
    pub value_idr: Option<i64>,
    pub start_date: Option<NaiveDate>,
    pub status: ClientStatus,
    pub notes: Option<String>,
    pub created_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a client.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct NewClient {
    pub client_id: String,
    pub brand_name: String,
    pub pic_name: Option<String>,
    pub service_category: Option<String>,
    pub package: Option<String>,
    pub value_idr: Option<i64>,
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub status: ClientStatus,
    pub notes: Option<String>,
}

impl NewClient {
    /// # Errors
    ///
    /// Returns `CoreError::Validation` when `client_id` or `brand_name` is blank,
    /// or when `value_idr` is negative.
    pub fn validate(&self) -> Result<(), CoreError> {
        require("client_id", &self.client_id)?;
        require("brand_name", &self.brand_name)?;
        if self.value_idr.is_some_and(|v| v < 0) {
            return Err(CoreError::Validation("value_idr must not be negative".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_brand_name_rejected() {
        let input = NewClient {
            client_id: "CLT-001".into(),
            brand_name: "  ".into(),
            ..NewClient::default()
        };
        let err = input.validate().unwrap_err();
        assert!(err.to_string().contains("brand_name"));
    }

    #[test]
    fn minimal_client_is_valid() {
        let input = NewClient {
            client_id: "CLT-001".into(),
            brand_name: "Acme".into(),
            ..NewClient::default()
        };
        assert!(input.validate().is_ok());
        assert_eq!(input.status, ClientStatus::Lead);
    }
}
