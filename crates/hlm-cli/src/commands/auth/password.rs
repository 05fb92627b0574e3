use hlm_db::HlmService;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::output::output;

#[derive(Serialize)]
struct PasswordResponse {
    user_id: String,
    changed: bool,
}

pub async fn handle(
    current: &str,
    new: &str,
    service: &HlmService,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let actor = super::current_actor(service).await?;
    service.change_password(&actor, current, new).await?;
    output(
        &PasswordResponse {
            user_id: actor.user_id,
            changed: true,
        },
        flags.format,
    )
}
