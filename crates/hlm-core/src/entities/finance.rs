use chrono::{DateTime, NaiveDate, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::require;
use crate::errors::CoreError;

/// A ledger row. Amounts are whole rupiah; a row usually has either income
/// or expense set, the other left at zero.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct FinanceTransaction {
    pub id: String,
    pub transaction_no: String,
    pub transaction_date: NaiveDate,
    pub category: String,
    pub description: Option<String>,
    pub income: i64,
    pub expense: i64,
    pub client_id: Option<String>,
    pub project_id: Option<String>,
    pub created_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl FinanceTransaction {
    #[must_use]
    pub const fn net(&self) -> i64 {
        self.income - self.expense
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct NewTransaction {
    pub transaction_no: String,
    pub transaction_date: NaiveDate,
    pub category: String,
    pub description: Option<String>,
    #[serde(default)]
    pub income: i64,
    #[serde(default)]
    pub expense: i64,
    pub client_id: Option<String>,
    pub project_id: Option<String>,
}

impl NewTransaction {
    /// # Errors
    ///
    /// Returns `CoreError::Validation` for a blank number or category, a
    /// negative amount, or a row with neither income nor expense.
    pub fn validate(&self) -> Result<(), CoreError> {
        require("transaction_no", &self.transaction_no)?;
        require("category", &self.category)?;
        if self.income < 0 || self.expense < 0 {
            return Err(CoreError::Validation("amounts must not be negative".into()));
        }
        if self.income == 0 && self.expense == 0 {
            return Err(CoreError::Validation(
                "either income or expense is required".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_amounts_rejected() {
        let input = NewTransaction {
            transaction_no: "TRX-1".into(),
            transaction_date: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
            category: "retainer".into(),
            description: None,
            income: 0,
            expense: 0,
            client_id: None,
            project_id: None,
        };
        assert!(input.validate().is_err());
    }
}
