use clap::{Args, Subcommand};

use crate::cli::subcommands::{
    AttendanceCommands, AuthCommands, ClientCommands, FinanceCommands, NotificationCommands,
    ProjectCommands, ServiceCommands, TaskCommands, TeamCommands,
};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Sign-up, sign-in and session management.
    Auth {
        #[command(subcommand)]
        action: AuthCommands,
    },
    /// Totals across finance, projects, tasks and attendance.
    Dashboard,
    /// Screens available to the signed-in role.
    Nav,
    /// Clients.
    Client {
        #[command(subcommand)]
        action: ClientCommands,
    },
    /// Projects.
    Project {
        #[command(subcommand)]
        action: ProjectCommands,
    },
    /// Content tasks and their approval workflow.
    Task {
        #[command(subcommand)]
        action: TaskCommands,
    },
    /// Service catalog.
    Service {
        #[command(subcommand)]
        action: ServiceCommands,
    },
    /// Team members and roles.
    Team {
        #[command(subcommand)]
        action: TeamCommands,
    },
    /// Finance transactions.
    Finance {
        #[command(subcommand)]
        action: FinanceCommands,
    },
    /// Daily check-in and check-out.
    Attendance {
        #[command(subcommand)]
        action: AttendanceCommands,
    },
    /// View the audit trail.
    Audit(AuditArgs),
    /// Notifications.
    Notification {
        #[command(subcommand)]
        action: NotificationCommands,
    },
}

/// Arguments for `hlm audit`.
#[derive(Clone, Debug, Args)]
pub struct AuditArgs {
    /// Governed table (clients, projects, tasks, services, profiles, user_roles,
    /// finance_transactions).
    #[arg(long)]
    pub table: Option<String>,
    /// Record identifier.
    #[arg(long)]
    pub record: Option<String>,
    /// Acting user identifier.
    #[arg(long)]
    pub user: Option<String>,
    /// INSERT, UPDATE, DELETE or APPROVE.
    #[arg(long)]
    pub action: Option<String>,
    #[arg(long)]
    pub limit: Option<u32>,
}
