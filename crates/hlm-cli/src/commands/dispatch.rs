use hlm_core::access::Route;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::{AppContext, GuardOutcome, guard};

/// The screen a command belongs to, for the route guard.
pub fn route_for(command: &Commands) -> Route {
    match command {
        Commands::Dashboard | Commands::Nav | Commands::Auth { .. } => Route::Dashboard,
        Commands::Client { .. } => Route::Clients,
        Commands::Project { .. } => Route::Projects,
        Commands::Task { .. } => Route::Tasks,
        Commands::Service { .. } => Route::Services,
        Commands::Team { .. } => Route::Team,
        Commands::Finance { .. } => Route::Finance,
        Commands::Attendance { .. } => Route::Attendance,
        Commands::Audit(_) => Route::AuditLog,
        Commands::Notification { .. } => Route::Notifications,
    }
}

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(
    command: Commands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let route = route_for(&command);
    match guard(ctx.actor.as_ref(), route)? {
        GuardOutcome::Proceed => {}
        GuardOutcome::FallBack(Route::Dashboard) => {
            return commands::dashboard::handle(ctx, flags).await;
        }
        GuardOutcome::FallBack(other) => {
            anyhow::bail!("{} is not available for this role", other.title());
        }
    }

    match command {
        Commands::Dashboard => commands::dashboard::handle(ctx, flags).await,
        Commands::Nav => commands::nav::handle(ctx, flags).await,
        Commands::Client { action } => commands::client::handle(&action, ctx, flags).await,
        Commands::Project { action } => commands::project::handle(&action, ctx, flags).await,
        Commands::Task { action } => commands::task::handle(&action, ctx, flags).await,
        Commands::Service { action } => commands::service::handle(&action, ctx, flags).await,
        Commands::Team { action } => commands::team::handle(&action, ctx, flags).await,
        Commands::Finance { action } => commands::finance::handle(&action, ctx, flags).await,
        Commands::Attendance { action } => {
            commands::attendance::handle(&action, ctx, flags).await
        }
        Commands::Audit(args) => commands::audit::handle(&args, ctx, flags).await,
        Commands::Notification { action } => {
            commands::notification::handle(&action, ctx, flags).await
        }
        Commands::Auth { .. } => unreachable!("auth is pre-dispatched in main"),
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use hlm_core::access::Route;

    use super::route_for;
    use crate::cli::Cli;

    fn route_of(args: &[&str]) -> Route {
        let cli = Cli::try_parse_from(args).expect("cli should parse");
        route_for(&cli.command)
    }

    #[test]
    fn commands_map_to_their_screens() {
        assert_eq!(route_of(&["hlm", "task", "list"]), Route::Tasks);
        assert_eq!(route_of(&["hlm", "finance", "summary"]), Route::Finance);
        assert_eq!(route_of(&["hlm", "audit", "--table", "tasks"]), Route::AuditLog);
        assert_eq!(route_of(&["hlm", "team", "set-role", "usr-1", "admin"]), Route::Team);
    }

    #[test]
    fn navigation_listing_is_open_to_everyone() {
        assert_eq!(route_of(&["hlm", "nav"]), Route::Dashboard);
    }
}
