//! Service catalog repository.
//!
//! `features` is stored as a JSON array in a TEXT column.

use chrono::Utc;
use libsql::Value;

use hlm_core::entities::{NewServiceOffering, ServiceOffering};
use hlm_core::enums::{GovernedTable, RecordStatus};
use hlm_core::identity::Actor;
use hlm_core::ids::PREFIX_SERVICE;

use crate::error::DatabaseError;
use crate::governed::GovernedRecord;
use crate::helpers::{
    get_opt_i64, get_opt_string, opt_int, opt_text, parse_datetime, parse_enum, text, timestamp,
};
use crate::service::HlmService;
use crate::updates::catalog::ServiceOfferingUpdate;

impl GovernedRecord for ServiceOffering {
    const TABLE: GovernedTable = GovernedTable::Services;
    const ID_PREFIX: &'static str = PREFIX_SERVICE;
    const COLUMNS: &'static str = "id, name, category, tier, price, hpp, description, features, \
         status, created_at, updated_at";
    const ORDER_BY: &'static str = "category ASC, name ASC";

    fn id(&self) -> &str {
        &self.id
    }

    fn from_row(row: &libsql::Row) -> Result<Self, DatabaseError> {
        let features = match get_opt_string(row, 7)? {
            Some(raw) => serde_json::from_str(&raw)
                .map_err(|e| DatabaseError::Query(format!("Invalid features JSON: {e}")))?,
            None => Vec::new(),
        };
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            category: row.get(2)?,
            tier: parse_enum(&row.get::<String>(3)?)?,
            price: get_opt_i64(row, 4)?,
            hpp: get_opt_i64(row, 5)?,
            description: get_opt_string(row, 6)?,
            features,
            status: parse_enum(&row.get::<String>(8)?)?,
            created_at: parse_datetime(&row.get::<String>(9)?)?,
            updated_at: parse_datetime(&row.get::<String>(10)?)?,
        })
    }

    fn to_values(&self) -> Vec<Value> {
        vec![
            text(self.id.as_str()),
            text(self.name.as_str()),
            text(self.category.as_str()),
            text(self.tier.as_str()),
            opt_int(self.price),
            opt_int(self.hpp),
            opt_text(self.description.as_deref()),
            text(serde_json::Value::from(self.features.clone()).to_string()),
            text(self.status.as_str()),
            timestamp(self.created_at),
            timestamp(self.updated_at),
        ]
    }
}

impl HlmService {
    /// # Errors
    ///
    /// `Validation`, `Unauthorized`, or `AuditGap`.
    pub async fn create_service_offering(
        &self,
        actor: &Actor,
        input: NewServiceOffering,
    ) -> Result<ServiceOffering, DatabaseError> {
        input.validate()?;
        let now = Utc::now();
        let offering = ServiceOffering {
            id: self.db().generate_id(ServiceOffering::ID_PREFIX).await?,
            name: input.name.trim().to_string(),
            category: input.category.trim().to_string(),
            tier: input.tier,
            price: input.price,
            hpp: input.hpp,
            description: input.description,
            features: input.features,
            status: RecordStatus::Active,
            created_at: now,
            updated_at: now,
        };
        self.insert_governed(actor, &offering).await?;
        Ok(offering)
    }

    /// # Errors
    ///
    /// `NotFound` when no offering has this id.
    pub async fn get_service_offering(&self, id: &str) -> Result<ServiceOffering, DatabaseError> {
        self.fetch_governed(id).await
    }

    /// Catalog entries grouped by category, optionally restricted to one status.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_service_offerings(
        &self,
        status: Option<RecordStatus>,
        limit: u32,
    ) -> Result<Vec<ServiceOffering>, DatabaseError> {
        let filters = status
            .map(|s| vec![("status", text(s.as_str()))])
            .unwrap_or_default();
        self.list_governed(filters, limit).await
    }

    /// # Errors
    ///
    /// `Validation`, `Unauthorized`, `NotFound`, or `AuditGap`.
    pub async fn update_service_offering(
        &self,
        actor: &Actor,
        id: &str,
        update: ServiceOfferingUpdate,
    ) -> Result<ServiceOffering, DatabaseError> {
        if update.name.as_deref().is_some_and(|s| s.trim().is_empty())
            || update.category.as_deref().is_some_and(|s| s.trim().is_empty())
        {
            return Err(DatabaseError::Validation(
                "name and category cannot be blank".into(),
            ));
        }
        let negative = |v: Option<Option<i64>>| v.flatten().is_some_and(|n| n < 0);
        if negative(update.price) || negative(update.hpp) {
            return Err(DatabaseError::Validation(
                "amounts must not be negative".into(),
            ));
        }
        self.patch_governed(actor, id, &update).await
    }

    /// # Errors
    ///
    /// `Unauthorized`, `NotFound`, or `AuditGap`.
    pub async fn delete_service_offering(
        &self,
        actor: &Actor,
        id: &str,
    ) -> Result<ServiceOffering, DatabaseError> {
        self.delete_governed(actor, id).await
    }
}
