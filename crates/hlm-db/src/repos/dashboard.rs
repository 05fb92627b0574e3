//! Read-only rollups for the dashboard and finance screens.

use chrono::NaiveDate;

use hlm_core::enums::ApprovalStatus;
use hlm_core::responses::{
    CategoryTotal, DashboardSummary, FinanceSummary, MonthlyAmount, StatusCount,
};

use crate::error::DatabaseError;
use crate::helpers::{date_text, text};
use crate::repos::finance::TransactionFilter;
use crate::service::HlmService;

impl HlmService {
    async fn status_counts(&self, sql: &str) -> Result<Vec<StatusCount>, DatabaseError> {
        let mut rows = self.db().conn().query(sql, ()).await?;
        let mut counts = Vec::new();
        while let Some(row) = rows.next().await? {
            counts.push(StatusCount {
                status: row.get(0)?,
                count: row.get(1)?,
            });
        }
        Ok(counts)
    }

    async fn monthly_income(&self) -> Result<Vec<MonthlyAmount>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT substr(transaction_date, 1, 7) AS month, SUM(income)
                 FROM finance_transactions
                 GROUP BY month HAVING SUM(income) > 0
                 ORDER BY month ASC",
                (),
            )
            .await?;
        let mut months = Vec::new();
        while let Some(row) = rows.next().await? {
            months.push(MonthlyAmount {
                month: row.get(0)?,
                amount: row.get(1)?,
            });
        }
        Ok(months)
    }

    /// Cross-entity totals as of `today` (UTC calendar day).
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if any aggregate query fails.
    pub async fn dashboard_summary(
        &self,
        today: NaiveDate,
    ) -> Result<DashboardSummary, DatabaseError> {
        let db = self.db();
        let total_income = db
            .scalar_i64("SELECT SUM(income) FROM finance_transactions", Vec::new())
            .await?;
        let total_expense = db
            .scalar_i64("SELECT SUM(expense) FROM finance_transactions", Vec::new())
            .await?;
        let active_projects = db
            .scalar_i64(
                "SELECT COUNT(*) FROM projects WHERE status != 'completed'",
                Vec::new(),
            )
            .await?;
        let active_clients = db
            .scalar_i64(
                "SELECT COUNT(*) FROM clients WHERE status = 'active'",
                Vec::new(),
            )
            .await?;
        let present_today = db
            .scalar_i64(
                "SELECT COUNT(*) FROM attendance
                 WHERE date = ?1 AND status IN ('present', 'wfh')",
                vec![text(date_text(today))],
            )
            .await?;
        let total_content = db
            .scalar_i64("SELECT COUNT(*) FROM tasks", Vec::new())
            .await?;

        let projects_by_status = self
            .status_counts(
                "SELECT status, COUNT(*) FROM projects GROUP BY status ORDER BY status",
            )
            .await?;
        let mut tasks_by_approval = self
            .status_counts(
                "SELECT approval_status, COUNT(*) FROM tasks
                 GROUP BY approval_status ORDER BY approval_status",
            )
            .await?;
        // Workflow order; unrecognized values sort last.
        tasks_by_approval.sort_by_key(|c| {
            c.status
                .parse::<ApprovalStatus>()
                .map_or(usize::MAX, ApprovalStatus::position)
        });

        Ok(DashboardSummary {
            total_income,
            total_expense,
            net_profit: total_income - total_expense,
            active_projects,
            active_clients,
            present_today,
            total_content,
            monthly_income: self.monthly_income().await?,
            projects_by_status,
            tasks_by_approval,
        })
    }

    /// Totals for the transactions matching `filter`, with a per-category split.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn finance_summary(
        &self,
        filter: &TransactionFilter,
    ) -> Result<FinanceSummary, DatabaseError> {
        let (where_clause, params) = filter.where_clause();
        let sql = format!(
            "SELECT category, SUM(income), SUM(expense), COUNT(*)
             FROM finance_transactions {where_clause}
             GROUP BY category ORDER BY category"
        );
        let mut rows = self
            .db()
            .conn()
            .query(&sql, libsql::params_from_iter(params))
            .await?;

        let mut summary = FinanceSummary {
            total_income: 0,
            total_expense: 0,
            net: 0,
            transactions: 0,
            by_category: Vec::new(),
        };
        while let Some(row) = rows.next().await? {
            let total = CategoryTotal {
                category: row.get(0)?,
                income: row.get(1)?,
                expense: row.get(2)?,
            };
            summary.total_income += total.income;
            summary.total_expense += total.expense;
            summary.transactions += row.get::<i64>(3)?;
            summary.by_category.push(total);
        }
        summary.net = summary.total_income - summary.total_expense;
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::{admin, day, seed_project, seed_task, test_service};
    use hlm_core::entities::NewTransaction;
    use pretty_assertions::assert_eq;

    fn transaction(
        no: &str,
        date: NaiveDate,
        category: &str,
        income: i64,
        expense: i64,
    ) -> NewTransaction {
        NewTransaction {
            transaction_no: no.into(),
            transaction_date: date,
            category: category.into(),
            description: None,
            income,
            expense,
            client_id: None,
            project_id: None,
        }
    }

    #[tokio::test]
    async fn empty_database_is_all_zero() {
        let svc = test_service().await;
        let summary = svc.dashboard_summary(day(2024, 1, 1)).await.unwrap();
        assert_eq!(summary.total_income, 0);
        assert_eq!(summary.net_profit, 0);
        assert!(summary.monthly_income.is_empty());
        assert!(summary.tasks_by_approval.is_empty());
    }

    #[tokio::test]
    async fn totals_match_inserted_rows() {
        let svc = test_service().await;
        for t in [
            transaction("T1", day(2024, 1, 5), "retainer", 10_000_000, 0),
            transaction("T2", day(2024, 1, 20), "production", 0, 2_500_000),
            transaction("T3", day(2024, 2, 3), "retainer", 7_000_000, 0),
        ] {
            svc.create_transaction(&admin(), t).await.unwrap();
        }

        let summary = svc.dashboard_summary(day(2024, 2, 3)).await.unwrap();
        assert_eq!(summary.total_income, 17_000_000);
        assert_eq!(summary.total_expense, 2_500_000);
        assert_eq!(summary.net_profit, 14_500_000);
        assert_eq!(
            summary.monthly_income,
            vec![
                MonthlyAmount {
                    month: "2024-01".into(),
                    amount: 10_000_000
                },
                MonthlyAmount {
                    month: "2024-02".into(),
                    amount: 7_000_000
                },
            ]
        );

        let january = svc
            .finance_summary(&TransactionFilter {
                from: Some(day(2024, 1, 1)),
                to: Some(day(2024, 1, 31)),
                ..TransactionFilter::default()
            })
            .await
            .unwrap();
        assert_eq!(january.transactions, 2);
        assert_eq!(january.net, 7_500_000);
        assert_eq!(january.by_category.len(), 2);
        assert_eq!(january.by_category[0].category, "production");
    }

    #[tokio::test]
    async fn approval_counts_follow_workflow_order() {
        let svc = test_service().await;
        let project = seed_project(&svc, "PRJ-001").await;
        let a = seed_task(&svc, &project, "A").await;
        seed_task(&svc, &project, "B").await;
        svc.advance_approval(&admin(), &a.id).await.unwrap();

        let summary = svc.dashboard_summary(day(2024, 1, 1)).await.unwrap();
        assert_eq!(summary.total_content, 2);
        assert_eq!(summary.active_projects, 1);
        let statuses: Vec<_> = summary
            .tasks_by_approval
            .iter()
            .map(|c| (c.status.as_str(), c.count))
            .collect();
        assert_eq!(statuses, vec![("draft", 1), ("pl review", 1)]);
    }
}
