//! Aggregate response types returned by dashboard and finance summaries.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Income total for one calendar month.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct MonthlyAmount {
    /// `YYYY-MM`.
    pub month: String,
    pub amount: i64,
}

/// Row count for one status value.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct StatusCount {
    pub status: String,
    pub count: i64,
}

/// Read-only cross-entity rollup for the dashboard screen.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct DashboardSummary {
    pub total_income: i64,
    pub total_expense: i64,
    pub net_profit: i64,
    pub active_projects: i64,
    pub active_clients: i64,
    pub present_today: i64,
    pub total_content: i64,
    pub monthly_income: Vec<MonthlyAmount>,
    pub projects_by_status: Vec<StatusCount>,
    pub tasks_by_approval: Vec<StatusCount>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct CategoryTotal {
    pub category: String,
    pub income: i64,
    pub expense: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct FinanceSummary {
    pub total_income: i64,
    pub total_expense: i64,
    pub net: i64,
    pub transactions: i64,
    pub by_category: Vec<CategoryTotal>,
}
