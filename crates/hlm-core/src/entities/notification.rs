use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::require;
use crate::enums::NotificationKind;
use crate::errors::CoreError;

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Notification {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub message: Option<String>,
    pub link: Option<String>,
    pub kind: NotificationKind,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct NewNotification {
    pub user_id: String,
    pub title: String,
    pub message: Option<String>,
    pub link: Option<String>,
    #[serde(default)]
    pub kind: NotificationKind,
}

impl NewNotification {
    /// # Errors
    ///
    /// Returns `CoreError::Validation` for a blank recipient or title.
    pub fn validate(&self) -> Result<(), CoreError> {
        require("user_id", &self.user_id)?;
        require("title", &self.title)?;
        Ok(())
    }
}
