//! Finance transaction update builder.

use chrono::NaiveDate;
use libsql::Value;
use serde::Serialize;

use crate::governed::{Assignments, RecordPatch};
use crate::helpers::{date_text, opt_text, text};

#[derive(Debug, Clone, Default, Serialize)]
pub struct TransactionUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_no: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub income: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expense: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<Option<String>>,
}

impl RecordPatch for TransactionUpdate {
    fn assignments(&self) -> Vec<(&'static str, Value)> {
        Assignments::new()
            .set("transaction_no", self.transaction_no.clone().map(text))
            .set(
                "transaction_date",
                self.transaction_date.map(|d| text(date_text(d))),
            )
            .set("category", self.category.clone().map(text))
            .set(
                "description",
                self.description.as_ref().map(|v| opt_text(v.as_deref())),
            )
            .set("income", self.income.map(Value::Integer))
            .set("expense", self.expense.map(Value::Integer))
            .set(
                "client_id",
                self.client_id.as_ref().map(|v| opt_text(v.as_deref())),
            )
            .set(
                "project_id",
                self.project_id.as_ref().map(|v| opt_text(v.as_deref())),
            )
            .build()
    }
}

pub struct TransactionUpdateBuilder(TransactionUpdate);

impl TransactionUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(TransactionUpdate::default())
    }

    #[must_use]
    pub fn transaction_no(mut self, transaction_no: impl Into<String>) -> Self {
        self.0.transaction_no = Some(transaction_no.into());
        self
    }

    #[must_use]
    pub fn transaction_date(mut self, date: NaiveDate) -> Self {
        self.0.transaction_date = Some(date);
        self
    }

    #[must_use]
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.0.category = Some(category.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: Option<String>) -> Self {
        self.0.description = Some(description);
        self
    }

    #[must_use]
    pub fn income(mut self, income: i64) -> Self {
        self.0.income = Some(income);
        self
    }

    #[must_use]
    pub fn expense(mut self, expense: i64) -> Self {
        self.0.expense = Some(expense);
        self
    }

    #[must_use]
    pub fn client_id(mut self, client_id: Option<String>) -> Self {
        self.0.client_id = Some(client_id);
        self
    }

    #[must_use]
    pub fn project_id(mut self, project_id: Option<String>) -> Self {
        self.0.project_id = Some(project_id);
        self
    }

    #[must_use]
    pub fn build(self) -> TransactionUpdate {
        self.0
    }
}

impl Default for TransactionUpdateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
