use hlm_db::HlmService;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::output::output;

#[derive(Serialize)]
struct SignOutResponse {
    session_ended: bool,
    cleared: bool,
}

pub async fn handle(service: &HlmService, flags: &GlobalFlags) -> anyhow::Result<()> {
    let session_ended = match hlm_auth::resolve_token() {
        Some(token) => service.sign_out(&token).await?,
        None => false,
    };
    hlm_auth::logout()?;
    output(
        &SignOutResponse {
            session_ended,
            cleared: true,
        },
        flags.format,
    )
}
