use hlm_db::HlmService;

use crate::cli::GlobalFlags;
use crate::output::output;

pub async fn handle(
    email: &str,
    password: &str,
    name: &str,
    service: &HlmService,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let member = service.sign_up(email, password, name).await?;
    tracing::info!(user_id = %member.profile.user_id, role = %member.role, "account created");
    output(&member, flags.format)
}
