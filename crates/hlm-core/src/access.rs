//! Role-gated access policy.
//!
//! [`has_access`] is the single authorization predicate. Route guards
//! ([`authorize_route`]) and mutation guards ([`can_mutate`]) both go through
//! it, so the `super_admin` override lives in exactly one place.

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{GovernedTable, Role};
use crate::identity::Actor;

/// True when `role` is listed in `allowed`, or when `role` is `super_admin`.
///
/// An empty `allowed` set therefore means "super admin only".
#[must_use]
pub fn has_access(role: Role, allowed: &[Role]) -> bool {
    role.is_super_admin() || allowed.contains(&role)
}

// ---------------------------------------------------------------------------
// Routes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum Route {
    Dashboard,
    Clients,
    Projects,
    Tasks,
    Finance,
    Team,
    Services,
    Attendance,
    AuditLog,
    Notifications,
    Settings,
}

const EVERYONE: &[Role] = &[Role::Admin, Role::Employee];

impl Route {
    /// Navigation order.
    pub const ALL: [Self; 11] = [
        Self::Dashboard,
        Self::Clients,
        Self::Projects,
        Self::Tasks,
        Self::Finance,
        Self::Team,
        Self::Services,
        Self::Attendance,
        Self::AuditLog,
        Self::Notifications,
        Self::Settings,
    ];

    /// The landing route unauthorized navigation falls back to.
    pub const DEFAULT: Self = Self::Dashboard;

    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Dashboard => "/",
            Self::Clients => "/clients",
            Self::Projects => "/projects",
            Self::Tasks => "/tasks",
            Self::Finance => "/finance",
            Self::Team => "/team",
            Self::Services => "/services",
            Self::Attendance => "/attendance",
            Self::AuditLog => "/audit-log",
            Self::Notifications => "/notifications",
            Self::Settings => "/settings",
        }
    }

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Clients => "Clients",
            Self::Projects => "Projects",
            Self::Tasks => "Tasks",
            Self::Finance => "Finance",
            Self::Team => "Team",
            Self::Services => "Services",
            Self::Attendance => "Attendance",
            Self::AuditLog => "Audit Log",
            Self::Notifications => "Notifications",
            Self::Settings => "Settings",
        }
    }

    /// Roles allowed to open this route (besides `super_admin`).
    #[must_use]
    pub const fn allowed_roles(self) -> &'static [Role] {
        match self {
            Self::Dashboard
            | Self::Clients
            | Self::Attendance
            | Self::Notifications
            | Self::Settings => EVERYONE,
            Self::Projects => &[Role::Employee],
            Self::Tasks => &[Role::Employee, Role::Admin],
            Self::Finance | Self::AuditLog => &[Role::Admin],
            Self::Team | Self::Services => &[],
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Outcome of a route guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum RouteDecision {
    Allow,
    /// No session: send the caller to sign in.
    SignIn,
    /// Signed in but not permitted: fall back to the given route.
    Redirect(Route),
}

/// Evaluate access to `route` for the current session, if any.
#[must_use]
pub fn authorize_route(actor: Option<&Actor>, route: Route) -> RouteDecision {
    match actor {
        None => RouteDecision::SignIn,
        Some(actor) if has_access(actor.role, route.allowed_roles()) => RouteDecision::Allow,
        Some(_) => RouteDecision::Redirect(Route::DEFAULT),
    }
}

/// Routes visible in the navigation for `role`.
#[must_use]
pub fn navigation(role: Role) -> Vec<Route> {
    Route::ALL
        .into_iter()
        .filter(|route| has_access(role, route.allowed_roles()))
        .collect()
}

// ---------------------------------------------------------------------------
// Mutations
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Create,
    Update,
    Delete,
    Approve,
}

impl Operation {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::Approve => "approve",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Roles allowed to perform `op` on `table` (besides `super_admin`).
#[must_use]
pub const fn mutation_roles(table: GovernedTable, op: Operation) -> &'static [Role] {
    match (table, op) {
        (GovernedTable::Clients, _) => EVERYONE,
        (GovernedTable::Projects, _) => &[Role::Employee],
        (GovernedTable::Tasks, Operation::Approve) | (GovernedTable::FinanceTransactions, _) => {
            &[Role::Admin]
        }
        (GovernedTable::Tasks, _) => &[Role::Employee, Role::Admin],
        (GovernedTable::Services | GovernedTable::Profiles | GovernedTable::UserRoles, _) => &[],
    }
}

#[must_use]
pub fn can_mutate(role: Role, table: GovernedTable, op: Operation) -> bool {
    has_access(role, mutation_roles(table, op))
}

/// Audit log reads are open to admins and above.
#[must_use]
pub fn can_read_audit(role: Role) -> bool {
    has_access(role, Route::AuditLog.allowed_roles())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(&[])]
    #[case(&[Role::Admin])]
    #[case(&[Role::Employee])]
    #[case(&[Role::Admin, Role::Employee])]
    fn super_admin_passes_every_set(#[case] allowed: &[Role]) {
        assert!(has_access(Role::SuperAdmin, allowed));
    }

    #[rstest]
    #[case(Role::Admin, &[Role::Employee], false)]
    #[case(Role::Admin, &[Role::Admin], true)]
    #[case(Role::Employee, &[], false)]
    #[case(Role::Employee, &[Role::Admin, Role::Employee], true)]
    fn membership_decides_for_other_roles(
        #[case] role: Role,
        #[case] allowed: &[Role],
        #[case] expected: bool,
    ) {
        assert_eq!(has_access(role, allowed), expected);
    }

    #[test]
    fn anonymous_is_sent_to_sign_in() {
        assert_eq!(authorize_route(None, Route::Clients), RouteDecision::SignIn);
    }

    #[test]
    fn employee_redirected_from_finance() {
        let actor = Actor::new("usr-1", Role::Employee);
        assert_eq!(
            authorize_route(Some(&actor), Route::Finance),
            RouteDecision::Redirect(Route::Dashboard)
        );
        assert_eq!(
            authorize_route(Some(&actor), Route::Tasks),
            RouteDecision::Allow
        );
    }

    #[test]
    fn navigation_per_role() {
        assert_eq!(navigation(Role::SuperAdmin).len(), Route::ALL.len());
        let employee = navigation(Role::Employee);
        assert!(employee.contains(&Route::Projects));
        assert!(!employee.contains(&Route::AuditLog));
        let admin = navigation(Role::Admin);
        assert!(admin.contains(&Route::Finance));
        assert!(!admin.contains(&Route::Team));
    }

    #[rstest]
    #[case(Role::Employee, Operation::Update, true)]
    #[case(Role::Employee, Operation::Approve, false)]
    #[case(Role::Admin, Operation::Approve, true)]
    #[case(Role::SuperAdmin, Operation::Approve, true)]
    fn task_policy(#[case] role: Role, #[case] op: Operation, #[case] expected: bool) {
        assert_eq!(can_mutate(role, GovernedTable::Tasks, op), expected);
    }

    #[test]
    fn role_changes_are_super_admin_only() {
        assert!(!can_mutate(Role::Admin, GovernedTable::UserRoles, Operation::Update));
        assert!(can_mutate(
            Role::SuperAdmin,
            GovernedTable::UserRoles,
            Operation::Update
        ));
    }

    #[test]
    fn audit_reads_admin_or_above() {
        assert!(can_read_audit(Role::Admin));
        assert!(can_read_audit(Role::SuperAdmin));
        assert!(!can_read_audit(Role::Employee));
    }
}
