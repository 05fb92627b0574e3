use chrono::Utc;
use hlm_db::HlmService;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::output::output;

#[derive(Serialize)]
struct SignInResponse {
    user_id: String,
    email: String,
    role: String,
    expires_at: String,
    token_source: Option<&'static str>,
}

pub async fn handle(
    email: &str,
    password: &str,
    service: &HlmService,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let session = service.sign_in(email, password, Utc::now()).await?;
    hlm_auth::token_store::store(&session.token)?;

    output(
        &SignInResponse {
            user_id: session.user_id,
            email: session.email,
            role: session.role.as_str().to_string(),
            expires_at: session.expires_at.to_rfc3339(),
            token_source: hlm_auth::token_store::detect_token_source(),
        },
        flags.format,
    )
}
