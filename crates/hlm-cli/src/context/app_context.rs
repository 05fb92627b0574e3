use anyhow::Context;
use chrono::Utc;
use hlm_config::HlmConfig;
use hlm_core::identity::Actor;
use hlm_db::{DatabaseError, HlmService};

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub service: HlmService,
    pub config: HlmConfig,
    /// The signed-in user, resolved from the stored session token.
    pub actor: Option<Actor>,
}

impl AppContext {
    /// Resolve the stored session (if any) against the database.
    ///
    /// A missing or expired session is not an error here; the route guard
    /// decides what an anonymous caller may do.
    pub async fn init(service: HlmService, config: HlmConfig) -> anyhow::Result<Self> {
        let actor = match hlm_auth::resolve_token() {
            None => {
                tracing::debug!("no session token found; running anonymous");
                None
            }
            Some(token) => match service.resolve_session(&token, Utc::now()).await {
                Ok(actor) => {
                    tracing::debug!(user_id = %actor.user_id, role = %actor.role, "session resolved");
                    Some(actor)
                }
                Err(DatabaseError::NotAuthenticated) => {
                    tracing::warn!("stored session is expired or unknown; sign in again");
                    None
                }
                Err(error) => {
                    return Err(error).context("failed to resolve the stored session");
                }
            },
        };

        Ok(Self {
            service,
            config,
            actor,
        })
    }

    /// The signed-in actor, or a sign-in hint.
    pub fn actor(&self) -> anyhow::Result<&Actor> {
        self.actor
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("not signed in, run `hlm auth sign-in`"))
    }

    /// Local list limit, then the global `--limit`, then the configured default.
    #[must_use]
    pub fn limit(&self, local: Option<u32>, global: Option<u32>) -> u32 {
        crate::commands::shared::limit::effective_limit(
            local,
            global,
            self.config.general.default_limit,
        )
    }
}
