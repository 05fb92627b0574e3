mod password;
mod sign_in;
mod sign_out;
mod sign_up;
mod whoami;

use anyhow::Context;
use chrono::Utc;
use hlm_core::identity::Actor;
use hlm_db::HlmService;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::AuthCommands;

/// Handle `hlm auth <subcommand>`.
///
/// Runs before the application context exists, so it takes the service directly.
pub async fn handle(
    action: &AuthCommands,
    service: &HlmService,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        AuthCommands::SignUp {
            email,
            password,
            name,
        } => sign_up::handle(email, password, name, service, flags).await,
        AuthCommands::SignIn { email, password } => {
            sign_in::handle(email, password, service, flags).await
        }
        AuthCommands::SignOut => sign_out::handle(service, flags).await,
        AuthCommands::Password { current, new } => {
            password::handle(current, new, service, flags).await
        }
        AuthCommands::Whoami => whoami::handle(service, flags).await,
    }
}

/// Resolve the stored session into an actor, or fail with a sign-in hint.
async fn current_actor(service: &HlmService) -> anyhow::Result<Actor> {
    let token = hlm_auth::resolve_token()
        .ok_or_else(|| anyhow::anyhow!("not signed in, run `hlm auth sign-in`"))?;
    service
        .resolve_session(&token, Utc::now())
        .await
        .context("stored session is not valid")
}
