//! Entity structs for the HLM domain.
//!
//! Each entity maps to a table in the libSQL database (`hlm-db` migrations).
//! All structs derive `Serialize`, `Deserialize`, and `JsonSchema`.
//! Creation inputs (`New*`) carry a `validate()` that rejects missing required
//! fields before any write is attempted.

mod attendance;
mod audit;
mod client;
mod finance;
mod notification;
mod profile;
mod project;
mod service_offering;
mod session;
mod task;

pub use attendance::AttendanceRecord;
pub use audit::AuditEntry;
pub use client::{Client, NewClient};
pub use finance::{FinanceTransaction, NewTransaction};
pub use notification::{NewNotification, Notification};
pub use profile::{Profile, TeamMember, UserRole};
pub use project::{NewProject, Project, validate_progress};
pub use service_offering::{NewServiceOffering, ServiceOffering};
pub use session::AuthSession;
pub use task::{NewTask, Task};

use crate::errors::CoreError;

/// Reject a blank required text field.
pub(crate) fn require(field: &str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{field} is required")));
    }
    Ok(())
}
