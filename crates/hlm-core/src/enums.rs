//! Roles, status enums, governed tables, and audit actions for HLM.
//!
//! Enums use `snake_case` serialization unless their stored form says otherwise
//! (`ApprovalStatus` keeps the spaced step names, `AuditAction` is upper case).
//! Every enum exposes `as_str()` returning the exact string stored in SQL.

use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

// ---------------------------------------------------------------------------
// Role
// ---------------------------------------------------------------------------

/// Role held by an identity. A user has exactly one role at a time.
///
/// `SuperAdmin` passes every access check (see `access::has_access`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    SuperAdmin,
    Admin,
    Employee,
}

impl Role {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SuperAdmin => "super_admin",
            Self::Admin => "admin",
            Self::Employee => "employee",
        }
    }

    #[must_use]
    pub const fn is_admin_or_above(self) -> bool {
        matches!(self, Self::SuperAdmin | Self::Admin)
    }

    #[must_use]
    pub const fn is_super_admin(self) -> bool {
        matches!(self, Self::SuperAdmin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ApprovalStatus
// ---------------------------------------------------------------------------

/// Governance state of a task. Strictly linear, forward only.
///
/// ```text
/// draft → pl review → ad review → pm review → client review → final → published
/// ```
///
/// `published` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum ApprovalStatus {
    #[serde(rename = "draft")]
    Draft,
    #[serde(rename = "pl review")]
    PlReview,
    #[serde(rename = "ad review")]
    AdReview,
    #[serde(rename = "pm review")]
    PmReview,
    #[serde(rename = "client review")]
    ClientReview,
    #[serde(rename = "final")]
    Final,
    #[serde(rename = "published")]
    Published,
}

impl ApprovalStatus {
    /// The fixed step order. Index 0 is the initial state.
    pub const SEQUENCE: [Self; 7] = [
        Self::Draft,
        Self::PlReview,
        Self::AdReview,
        Self::PmReview,
        Self::ClientReview,
        Self::Final,
        Self::Published,
    ];

    /// Index of this state in [`Self::SEQUENCE`].
    #[must_use]
    pub const fn position(self) -> usize {
        match self {
            Self::Draft => 0,
            Self::PlReview => 1,
            Self::AdReview => 2,
            Self::PmReview => 3,
            Self::ClientReview => 4,
            Self::Final => 5,
            Self::Published => 6,
        }
    }

    /// The adjacent next state, or `None` at the terminal state.
    #[must_use]
    pub fn next(self) -> Option<Self> {
        Self::SEQUENCE.get(self.position() + 1).copied()
    }

    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Published)
    }

    /// Valid next states from the current state (at most one).
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::Draft => &[Self::PlReview],
            Self::PlReview => &[Self::AdReview],
            Self::AdReview => &[Self::PmReview],
            Self::PmReview => &[Self::ClientReview],
            Self::ClientReview => &[Self::Final],
            Self::Final => &[Self::Published],
            Self::Published => &[],
        }
    }

    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    /// Compute the next workflow step.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidTransition` when already `published`.
    pub fn advance(self) -> Result<Self, CoreError> {
        self.next().ok_or_else(|| CoreError::InvalidTransition {
            entity_type: "task".into(),
            id: String::new(),
            from: self.as_str().into(),
            reason: "approval workflow is already published".into(),
        })
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::PlReview => "pl review",
            Self::AdReview => "ad review",
            Self::PmReview => "pm review",
            Self::ClientReview => "client review",
            Self::Final => "final",
            Self::Published => "published",
        }
    }
}

impl FromStr for ApprovalStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::SEQUENCE
            .into_iter()
            .find(|step| step.as_str() == s)
            .ok_or_else(|| CoreError::Validation(format!("unknown approval status '{s}'")))
    }
}

impl fmt::Display for ApprovalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ProductionStatus
// ---------------------------------------------------------------------------

/// Production state of a task. Free to move in any direction; only the
/// approval state is governed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ProductionStatus {
    Draft,
    InProgress,
    Review,
    Revision,
    Done,
}

impl ProductionStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::InProgress => "in_progress",
            Self::Review => "review",
            Self::Revision => "revision",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for ProductionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ClientStatus
// ---------------------------------------------------------------------------

/// Sales pipeline status of a client.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ClientStatus {
    #[default]
    Lead,
    Proposal,
    Active,
    Completed,
    Lost,
}

impl ClientStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lead => "lead",
            Self::Proposal => "proposal",
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Lost => "lost",
        }
    }
}

impl fmt::Display for ClientStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ProjectStatus
// ---------------------------------------------------------------------------

/// Delivery status of a project.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    #[default]
    Briefing,
    Planning,
    InProduction,
    Review,
    Revision,
    Delivered,
    Completed,
}

impl ProjectStatus {
    /// All states, in pipeline order (used for dashboard groupings).
    pub const ALL: [Self; 7] = [
        Self::Briefing,
        Self::Planning,
        Self::InProduction,
        Self::Review,
        Self::Revision,
        Self::Delivered,
        Self::Completed,
    ];

    /// Whether the project still counts as active work.
    #[must_use]
    pub const fn is_active(self) -> bool {
        !matches!(self, Self::Completed)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Briefing => "briefing",
            Self::Planning => "planning",
            Self::InProduction => "in_production",
            Self::Review => "review",
            Self::Revision => "revision",
            Self::Delivered => "delivered",
            Self::Completed => "completed",
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// TaskMedium
// ---------------------------------------------------------------------------

/// Output format of a content task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum TaskMedium {
    Post,
    Reels,
    Story,
    Carousel,
    Video,
}

impl TaskMedium {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Post => "post",
            Self::Reels => "reels",
            Self::Story => "story",
            Self::Carousel => "carousel",
            Self::Video => "video",
        }
    }
}

impl fmt::Display for TaskMedium {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ServiceTier
// ---------------------------------------------------------------------------

/// Pricing tier of a catalog service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ServiceTier {
    #[default]
    Essentials,
    Signature,
    Prime,
}

impl ServiceTier {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Essentials => "essentials",
            Self::Signature => "signature",
            Self::Prime => "prime",
        }
    }
}

impl fmt::Display for ServiceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// RecordStatus
// ---------------------------------------------------------------------------

/// Active flag shared by services and team profiles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum RecordStatus {
    #[default]
    Active,
    Inactive,
}

impl RecordStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }
}

impl fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// AttendanceStatus
// ---------------------------------------------------------------------------

/// Daily attendance classification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    #[default]
    Present,
    Wfh,
    Sick,
    Leave,
    Excused,
    Absent,
}

impl AttendanceStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Present => "present",
            Self::Wfh => "wfh",
            Self::Sick => "sick",
            Self::Leave => "leave",
            Self::Excused => "excused",
            Self::Absent => "absent",
        }
    }
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// NotificationKind
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    #[default]
    Info,
    Approval,
    Reminder,
    System,
}

impl NotificationKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Approval => "approval",
            Self::Reminder => "reminder",
            Self::System => "system",
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// AuditAction
// ---------------------------------------------------------------------------

/// Kind of mutation recorded in the audit log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditAction {
    Insert,
    Update,
    Delete,
    Approve,
}

impl AuditAction {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Insert => "INSERT",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
            Self::Approve => "APPROVE",
        }
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// GovernedTable
// ---------------------------------------------------------------------------

/// Tables whose every mutation produces exactly one audit entry.
///
/// The serialized form is the SQL table name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum GovernedTable {
    Clients,
    Projects,
    Tasks,
    Services,
    Profiles,
    UserRoles,
    FinanceTransactions,
}

impl GovernedTable {
    pub const ALL: [Self; 7] = [
        Self::Clients,
        Self::Projects,
        Self::Tasks,
        Self::Services,
        Self::Profiles,
        Self::UserRoles,
        Self::FinanceTransactions,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Clients => "clients",
            Self::Projects => "projects",
            Self::Tasks => "tasks",
            Self::Services => "services",
            Self::Profiles => "profiles",
            Self::UserRoles => "user_roles",
            Self::FinanceTransactions => "finance_transactions",
        }
    }
}

impl fmt::Display for GovernedTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    macro_rules! test_serde_roundtrip {
        ($name:ident, $ty:ty, $variant:expr, $expected_str:expr) => {
            #[test]
            fn $name() {
                let val = $variant;
                let json = serde_json::to_string(&val).unwrap();
                assert_eq!(json, format!("\"{}\"", $expected_str));
                let recovered: $ty = serde_json::from_str(&json).unwrap();
                assert_eq!(recovered, val);
            }
        };
    }

    test_serde_roundtrip!(role_super_admin, Role, Role::SuperAdmin, "super_admin");
    test_serde_roundtrip!(
        approval_client_review,
        ApprovalStatus,
        ApprovalStatus::ClientReview,
        "client review"
    );
    test_serde_roundtrip!(
        approval_pl_review,
        ApprovalStatus,
        ApprovalStatus::PlReview,
        "pl review"
    );
    test_serde_roundtrip!(
        production_in_progress,
        ProductionStatus,
        ProductionStatus::InProgress,
        "in_progress"
    );
    test_serde_roundtrip!(
        project_in_production,
        ProjectStatus,
        ProjectStatus::InProduction,
        "in_production"
    );
    test_serde_roundtrip!(audit_approve, AuditAction, AuditAction::Approve, "APPROVE");
    test_serde_roundtrip!(
        table_user_roles,
        GovernedTable,
        GovernedTable::UserRoles,
        "user_roles"
    );
    test_serde_roundtrip!(
        table_finance,
        GovernedTable,
        GovernedTable::FinanceTransactions,
        "finance_transactions"
    );

    // --- Approval state machine ---

    #[test]
    fn approval_advances_through_sequence() {
        let mut state = ApprovalStatus::Draft;
        for k in 1..ApprovalStatus::SEQUENCE.len() {
            state = state.advance().unwrap();
            assert_eq!(state, ApprovalStatus::SEQUENCE[k]);
        }
        assert!(state.is_terminal());
    }

    #[test]
    fn approval_terminal_rejects_advance() {
        let err = ApprovalStatus::Published.advance().unwrap_err();
        assert!(matches!(err, CoreError::InvalidTransition { .. }));
    }

    #[test]
    fn approval_only_adjacent_transitions() {
        assert!(ApprovalStatus::Draft.can_transition_to(ApprovalStatus::PlReview));
        assert!(!ApprovalStatus::Draft.can_transition_to(ApprovalStatus::AdReview));
        assert!(!ApprovalStatus::Final.can_transition_to(ApprovalStatus::Draft));
        assert!(ApprovalStatus::Published.allowed_next_states().is_empty());
    }

    #[test]
    fn approval_positions_match_sequence() {
        for (idx, step) in ApprovalStatus::SEQUENCE.iter().enumerate() {
            assert_eq!(step.position(), idx);
        }
    }

    #[test]
    fn approval_from_str() {
        assert_eq!(
            "pm review".parse::<ApprovalStatus>().unwrap(),
            ApprovalStatus::PmReview
        );
        assert!("approved".parse::<ApprovalStatus>().is_err());
        assert!("pm_review".parse::<ApprovalStatus>().is_err());
    }

    #[test]
    fn role_privilege_flags() {
        assert!(Role::SuperAdmin.is_admin_or_above());
        assert!(Role::Admin.is_admin_or_above());
        assert!(!Role::Employee.is_admin_or_above());
        assert!(Role::SuperAdmin.is_super_admin());
        assert!(!Role::Admin.is_super_admin());
    }

    #[test]
    fn project_activity() {
        assert!(ProjectStatus::Briefing.is_active());
        assert!(ProjectStatus::Delivered.is_active());
        assert!(!ProjectStatus::Completed.is_active());
    }

    #[test]
    fn display_matches_as_str() {
        assert_eq!(format!("{}", Role::Employee), "employee");
        assert_eq!(format!("{}", ApprovalStatus::AdReview), "ad review");
        assert_eq!(format!("{}", ProductionStatus::Revision), "revision");
        assert_eq!(format!("{}", ClientStatus::Lost), "lost");
        assert_eq!(format!("{}", TaskMedium::Carousel), "carousel");
        assert_eq!(format!("{}", ServiceTier::Prime), "prime");
        assert_eq!(format!("{}", RecordStatus::Inactive), "inactive");
        assert_eq!(format!("{}", AttendanceStatus::Wfh), "wfh");
        assert_eq!(format!("{}", NotificationKind::Approval), "approval");
        assert_eq!(format!("{}", AuditAction::Delete), "DELETE");
        assert_eq!(format!("{}", GovernedTable::Services), "services");
    }
}
