use chrono::{DateTime, NaiveDate, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{RecordStatus, Role};

/// Personal data of a team member. The role lives in [`UserRole`].
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Profile {
    pub id: String,
    pub user_id: String,
    pub full_name: String,
    pub employee_id: Option<String>,
    pub department: Option<String>,
    pub phone: Option<String>,
    pub join_date: Option<NaiveDate>,
    pub status: RecordStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The single role row of a user.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct UserRole {
    pub id: String,
    pub user_id: String,
    pub role: Role,
}

/// A profile joined with its role, as shown in the team listing.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TeamMember {
    #[serde(flatten)]
    pub profile: Profile,
    pub role: Role,
}
