//! Finance transaction repository. Admin-or-above only.

use chrono::{NaiveDate, Utc};
use libsql::Value;

use hlm_core::entities::{FinanceTransaction, NewTransaction};
use hlm_core::enums::GovernedTable;
use hlm_core::identity::Actor;
use hlm_core::ids::PREFIX_TRANSACTION;

use crate::error::DatabaseError;
use crate::governed::GovernedRecord;
use crate::helpers::{
    date_text, get_opt_string, opt_text, parse_date, parse_datetime, text, timestamp,
};
use crate::service::HlmService;
use crate::updates::finance::TransactionUpdate;

impl GovernedRecord for FinanceTransaction {
    const TABLE: GovernedTable = GovernedTable::FinanceTransactions;
    const ID_PREFIX: &'static str = PREFIX_TRANSACTION;
    const COLUMNS: &'static str = "id, transaction_no, transaction_date, category, description, \
         income, expense, client_id, project_id, created_by, created_at, updated_at";
    const ORDER_BY: &'static str = "transaction_date DESC, rowid DESC";

    fn id(&self) -> &str {
        &self.id
    }

    fn from_row(row: &libsql::Row) -> Result<Self, DatabaseError> {
        Ok(Self {
            id: row.get(0)?,
            transaction_no: row.get(1)?,
            transaction_date: parse_date(&row.get::<String>(2)?)?,
            category: row.get(3)?,
            description: get_opt_string(row, 4)?,
            income: row.get(5)?,
            expense: row.get(6)?,
            client_id: get_opt_string(row, 7)?,
            project_id: get_opt_string(row, 8)?,
            created_by: get_opt_string(row, 9)?,
            created_at: parse_datetime(&row.get::<String>(10)?)?,
            updated_at: parse_datetime(&row.get::<String>(11)?)?,
        })
    }

    fn to_values(&self) -> Vec<Value> {
        vec![
            text(self.id.as_str()),
            text(self.transaction_no.as_str()),
            text(date_text(self.transaction_date)),
            text(self.category.as_str()),
            opt_text(self.description.as_deref()),
            Value::Integer(self.income),
            Value::Integer(self.expense),
            opt_text(self.client_id.as_deref()),
            opt_text(self.project_id.as_deref()),
            opt_text(self.created_by.as_deref()),
            timestamp(self.created_at),
            timestamp(self.updated_at),
        ]
    }
}

/// Inclusive date range and category filter for transaction listings.
#[derive(Debug, Default, Clone)]
pub struct TransactionFilter {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub category: Option<String>,
    pub limit: Option<u32>,
}

impl TransactionFilter {
    /// `WHERE` clause and its parameters, shared with the finance summary.
    pub(crate) fn where_clause(&self) -> (String, Vec<Value>) {
        let mut conditions = Vec::new();
        let mut params = Vec::new();
        if let Some(from) = self.from {
            params.push(text(date_text(from)));
            conditions.push(format!("transaction_date >= ?{}", params.len()));
        }
        if let Some(to) = self.to {
            params.push(text(date_text(to)));
            conditions.push(format!("transaction_date <= ?{}", params.len()));
        }
        if let Some(ref category) = self.category {
            params.push(text(category.as_str()));
            conditions.push(format!("category = ?{}", params.len()));
        }
        if conditions.is_empty() {
            (String::new(), params)
        } else {
            (format!("WHERE {}", conditions.join(" AND ")), params)
        }
    }
}

impl HlmService {
    /// # Errors
    ///
    /// `Validation`, `NotFound` for an unknown client or project reference,
    /// `Unauthorized`, a persistence error for a duplicate number, or `AuditGap`.
    pub async fn create_transaction(
        &self,
        actor: &Actor,
        input: NewTransaction,
    ) -> Result<FinanceTransaction, DatabaseError> {
        input.validate()?;
        if let Some(ref client_id) = input.client_id {
            self.get_client(client_id).await?;
        }
        if let Some(ref project_id) = input.project_id {
            self.get_project(project_id).await?;
        }

        let now = Utc::now();
        let transaction = FinanceTransaction {
            id: self.db().generate_id(FinanceTransaction::ID_PREFIX).await?,
            transaction_no: input.transaction_no.trim().to_string(),
            transaction_date: input.transaction_date,
            category: input.category.trim().to_string(),
            description: input.description,
            income: input.income,
            expense: input.expense,
            client_id: input.client_id,
            project_id: input.project_id,
            created_by: Some(actor.user_id.clone()),
            created_at: now,
            updated_at: now,
        };
        self.insert_governed(actor, &transaction).await?;
        Ok(transaction)
    }

    /// # Errors
    ///
    /// `NotFound` when no transaction has this id.
    pub async fn get_transaction(&self, id: &str) -> Result<FinanceTransaction, DatabaseError> {
        self.fetch_governed(id).await
    }

    /// Transactions, most recent date first.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_transactions(
        &self,
        filter: &TransactionFilter,
    ) -> Result<Vec<FinanceTransaction>, DatabaseError> {
        let (where_clause, params) = filter.where_clause();
        let sql = format!(
            "SELECT {} FROM finance_transactions {where_clause} ORDER BY {} LIMIT {}",
            FinanceTransaction::COLUMNS,
            FinanceTransaction::ORDER_BY,
            filter.limit.unwrap_or(100)
        );
        let mut rows = self
            .db()
            .conn()
            .query(&sql, libsql::params_from_iter(params))
            .await?;
        let mut transactions = Vec::new();
        while let Some(row) = rows.next().await? {
            transactions.push(FinanceTransaction::from_row(&row)?);
        }
        Ok(transactions)
    }

    /// # Errors
    ///
    /// `Validation` when the result would carry a negative amount or no
    /// amount at all, `Unauthorized`, `NotFound`, or `AuditGap`.
    pub async fn update_transaction(
        &self,
        actor: &Actor,
        id: &str,
        update: TransactionUpdate,
    ) -> Result<FinanceTransaction, DatabaseError> {
        if update
            .transaction_no
            .as_deref()
            .is_some_and(|s| s.trim().is_empty())
            || update.category.as_deref().is_some_and(|s| s.trim().is_empty())
        {
            return Err(DatabaseError::Validation(
                "transaction_no and category cannot be blank".into(),
            ));
        }
        if update.income.is_some() || update.expense.is_some() {
            let current = self.get_transaction(id).await?;
            let income = update.income.unwrap_or(current.income);
            let expense = update.expense.unwrap_or(current.expense);
            if income < 0 || expense < 0 {
                return Err(DatabaseError::Validation(
                    "amounts must not be negative".into(),
                ));
            }
            if income == 0 && expense == 0 {
                return Err(DatabaseError::Validation(
                    "either income or expense is required".into(),
                ));
            }
        }
        self.patch_governed(actor, id, &update).await
    }

    /// # Errors
    ///
    /// `Unauthorized`, `NotFound`, or `AuditGap`.
    pub async fn delete_transaction(
        &self,
        actor: &Actor,
        id: &str,
    ) -> Result<FinanceTransaction, DatabaseError> {
        self.delete_governed(actor, id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repos::audit::AuditFilter;
    use crate::test_support::helpers::{admin, day, employee, seed_client, test_service};
    use crate::updates::finance::TransactionUpdateBuilder;
    use hlm_core::enums::AuditAction;
    use pretty_assertions::assert_eq;

    fn income(no: &str, date: NaiveDate, amount: i64) -> NewTransaction {
        NewTransaction {
            transaction_no: no.into(),
            transaction_date: date,
            category: "retainer".into(),
            description: None,
            income: amount,
            expense: 0,
            client_id: None,
            project_id: None,
        }
    }

    #[tokio::test]
    async fn admin_records_transaction_with_audit() {
        let svc = test_service().await;
        let client = seed_client(&svc, "CLT-001").await;
        let mut input = income("TRX-001", day(2024, 3, 1), 10_000_000);
        input.client_id = Some(client.id.clone());

        let created = svc.create_transaction(&admin(), input).await.unwrap();
        assert_eq!(created.net(), 10_000_000);

        let entries = svc
            .audit_entries(&AuditFilter {
                table: Some(GovernedTable::FinanceTransactions),
                ..AuditFilter::default()
            })
            .await
            .unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].action, AuditAction::Insert);
    }

    #[tokio::test]
    async fn employee_cannot_record() {
        let svc = test_service().await;
        let err = svc
            .create_transaction(&employee(), income("TRX-001", day(2024, 3, 1), 1))
            .await
            .unwrap_err();
        assert!(matches!(err, DatabaseError::Unauthorized { .. }));
    }

    #[tokio::test]
    async fn unknown_client_reference_is_not_found() {
        let svc = test_service().await;
        let mut input = income("TRX-001", day(2024, 3, 1), 1);
        input.client_id = Some("cli-missing".into());
        let err = svc.create_transaction(&admin(), input).await.unwrap_err();
        assert!(matches!(err, DatabaseError::NotFound { .. }));
    }

    #[tokio::test]
    async fn date_range_is_inclusive() {
        let svc = test_service().await;
        for (no, d) in [("A", 1), ("B", 15), ("C", 31)] {
            svc.create_transaction(&admin(), income(no, day(2024, 1, d), 100))
                .await
                .unwrap();
        }
        let listed = svc
            .list_transactions(&TransactionFilter {
                from: Some(day(2024, 1, 15)),
                to: Some(day(2024, 1, 31)),
                ..TransactionFilter::default()
            })
            .await
            .unwrap();
        let numbers: Vec<_> = listed.iter().map(|t| t.transaction_no.as_str()).collect();
        assert_eq!(numbers, vec!["C", "B"]);
    }

    #[tokio::test]
    async fn zeroing_both_amounts_rejected() {
        let svc = test_service().await;
        let created = svc
            .create_transaction(&admin(), income("TRX-001", day(2024, 3, 1), 500))
            .await
            .unwrap();
        let err = svc
            .update_transaction(
                &admin(),
                &created.id,
                TransactionUpdateBuilder::new().income(0).build(),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DatabaseError::Validation(_)));

        let moved = svc
            .update_transaction(
                &admin(),
                &created.id,
                TransactionUpdateBuilder::new().income(0).expense(200).build(),
            )
            .await
            .unwrap();
        assert_eq!(moved.net(), -200);
    }
}
