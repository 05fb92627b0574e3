//! Client repository: CRUD through the governed layer.

use chrono::Utc;
use libsql::Value;

use hlm_core::entities::{Client, NewClient};
use hlm_core::enums::{ClientStatus, GovernedTable};
use hlm_core::identity::Actor;
use hlm_core::ids::PREFIX_CLIENT;

use crate::error::DatabaseError;
use crate::governed::GovernedRecord;
use crate::helpers::{
    get_opt_i64, get_opt_string, opt_date, opt_int, opt_text, parse_datetime,
    parse_optional_date, parse_enum, text, timestamp,
};
use crate::service::HlmService;
use crate::updates::client::ClientUpdate;

impl GovernedRecord for Client {
    const TABLE: GovernedTable = GovernedTable::Clients;
    const ID_PREFIX: &'static str = PREFIX_CLIENT;
    const COLUMNS: &'static str = "id, client_id, brand_name, pic_name, service_category, package, \
         value_idr, start_date, status, notes, created_by, created_at, updated_at";
    const ORDER_BY: &'static str = "created_at DESC, rowid DESC";

    fn id(&self) -> &str {
        &self.id
    }

    fn from_row(row: &libsql::Row) -> Result<Self, DatabaseError> {
        Ok(Self {
            id: row.get(0)?,
            client_id: row.get(1)?,
            brand_name: row.get(2)?,
            pic_name: get_opt_string(row, 3)?,
            service_category: get_opt_string(row, 4)?,
            package: get_opt_string(row, 5)?,
            value_idr: get_opt_i64(row, 6)?,
            start_date: parse_optional_date(get_opt_string(row, 7)?.as_deref())?,
            status: parse_enum(&row.get::<String>(8)?)?,
            notes: get_opt_string(row, 9)?,
            created_by: get_opt_string(row, 10)?,
            created_at: parse_datetime(&row.get::<String>(11)?)?,
            updated_at: parse_datetime(&row.get::<String>(12)?)?,
        })
    }

    fn to_values(&self) -> Vec<Value> {
        vec![
            text(self.id.as_str()),
            text(self.client_id.as_str()),
            text(self.brand_name.as_str()),
            opt_text(self.pic_name.as_deref()),
            opt_text(self.service_category.as_deref()),
            opt_text(self.package.as_deref()),
            opt_int(self.value_idr),
            opt_date(self.start_date),
            text(self.status.as_str()),
            opt_text(self.notes.as_deref()),
            opt_text(self.created_by.as_deref()),
            timestamp(self.created_at),
            timestamp(self.updated_at),
        ]
    }
}

impl HlmService {
    /// # Errors
    ///
    /// `Validation` for missing fields, `Unauthorized`, or a persistence error
    /// (e.g. duplicate `client_id`).
    pub async fn create_client(
        &self,
        actor: &Actor,
        input: NewClient,
    ) -> Result<Client, DatabaseError> {
        input.validate()?;
        let now = Utc::now();
        let client = Client {
            id: self.db().generate_id(Client::ID_PREFIX).await?,
            client_id: input.client_id.trim().to_string(),
            brand_name: input.brand_name.trim().to_string(),
            pic_name: input.pic_name,
            service_category: input.service_category,
            package: input.package,
            value_idr: input.value_idr,
            start_date: input.start_date,
            status: input.status,
            notes: input.notes,
            created_by: Some(actor.user_id.clone()),
            created_at: now,
            updated_at: now,
        };
        self.insert_governed(actor, &client).await?;
        Ok(client)
    }

    /// # Errors
    ///
    /// `NotFound` when no client has this id.
    pub async fn get_client(&self, id: &str) -> Result<Client, DatabaseError> {
        self.fetch_governed(id).await
    }

    /// Clients, newest first, optionally restricted to one status.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_clients(
        &self,
        status: Option<ClientStatus>,
        limit: u32,
    ) -> Result<Vec<Client>, DatabaseError> {
        let filters = status
            .map(|s| vec![("status", text(s.as_str()))])
            .unwrap_or_default();
        self.list_governed(filters, limit).await
    }

    /// # Errors
    ///
    /// `Validation` for blank required fields, `Unauthorized`, `NotFound`, or
    /// `AuditGap`.
    pub async fn update_client(
        &self,
        actor: &Actor,
        id: &str,
        update: ClientUpdate,
    ) -> Result<Client, DatabaseError> {
        if update.client_id.as_deref().is_some_and(|s| s.trim().is_empty())
            || update.brand_name.as_deref().is_some_and(|s| s.trim().is_empty())
        {
            return Err(DatabaseError::Validation(
                "client_id and brand_name cannot be blank".into(),
            ));
        }
        self.patch_governed(actor, id, &update).await
    }

    /// # Errors
    ///
    /// `Unauthorized`, `NotFound`, a persistence error when projects still
    /// reference the client, or `AuditGap`.
    pub async fn delete_client(&self, actor: &Actor, id: &str) -> Result<Client, DatabaseError> {
        self.delete_governed(actor, id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repos::audit::AuditFilter;
    use crate::test_support::helpers::{admin, employee, seed_client, test_service};
    use crate::updates::client::ClientUpdateBuilder;
    use hlm_core::enums::AuditAction;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn create_client_roundtrip() {
        let svc = test_service().await;
        let client = svc
            .create_client(
                &employee(),
                NewClient {
                    client_id: "CLT-001".into(),
                    brand_name: "Acme".into(),
                    value_idr: Some(25_000_000),
                    ..NewClient::default()
                },
            )
            .await
            .unwrap();

        assert!(client.id.starts_with("cli-"));
        assert_eq!(client.status, ClientStatus::Lead);
        assert_eq!(client.created_by.as_deref(), Some(employee().user_id.as_str()));

        let fetched = svc.get_client(&client.id).await.unwrap();
        assert_eq!(fetched, client);
    }

    #[tokio::test]
    async fn invalid_input_writes_nothing() {
        let svc = test_service().await;
        let err = svc
            .create_client(
                &admin(),
                NewClient {
                    client_id: "CLT-009".into(),
                    ..NewClient::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DatabaseError::Validation(_)));
        assert!(svc.list_clients(None, 10).await.unwrap().is_empty());
        assert!(svc.audit_entries(&AuditFilter::default()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn list_filters_by_status() {
        let svc = test_service().await;
        let a = seed_client(&svc, "CLT-001").await;
        seed_client(&svc, "CLT-002").await;
        svc.update_client(
            &admin(),
            &a.id,
            ClientUpdateBuilder::new().status(ClientStatus::Active).build(),
        )
        .await
        .unwrap();

        let active = svc.list_clients(Some(ClientStatus::Active), 10).await.unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, a.id);
        assert_eq!(svc.list_clients(None, 10).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn empty_update_is_not_audited() {
        let svc = test_service().await;
        let client = seed_client(&svc, "CLT-001").await;
        let same = svc
            .update_client(&admin(), &client.id, ClientUpdate::default())
            .await
            .unwrap();
        assert_eq!(same, client);

        let updates = svc
            .audit_entries(&AuditFilter {
                action: Some(AuditAction::Update),
                ..AuditFilter::default()
            })
            .await
            .unwrap();
        assert!(updates.is_empty());
    }

    #[tokio::test]
    async fn blank_brand_name_update_rejected() {
        let svc = test_service().await;
        let client = seed_client(&svc, "CLT-001").await;
        let err = svc
            .update_client(
                &admin(),
                &client.id,
                ClientUpdateBuilder::new().brand_name(" ").build(),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DatabaseError::Validation(_)));
    }

    #[tokio::test]
    async fn delete_missing_client_is_not_found() {
        let svc = test_service().await;
        let err = svc.delete_client(&admin(), "cli-missing").await.unwrap_err();
        assert!(matches!(err, DatabaseError::NotFound { .. }));
    }
}
