use hlm_db::HlmService;

use crate::cli::GlobalFlags;
use crate::output::output;

pub async fn handle(service: &HlmService, flags: &GlobalFlags) -> anyhow::Result<()> {
    let actor = super::current_actor(service).await?;
    let member = service.get_member(&actor.user_id).await?;
    output(&member, flags.format)
}
