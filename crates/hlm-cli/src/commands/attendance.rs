use chrono::Utc;
use hlm_core::entities::AttendanceRecord;
use hlm_core::enums::AttendanceStatus;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::AttendanceCommands;
use crate::commands::shared::parse::parse_enum;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct CheckInResponse {
    #[serde(flatten)]
    record: AttendanceRecord,
    /// False when today's record already existed.
    created: bool,
}

/// Handle `hlm attendance`.
pub async fn handle(
    action: &AttendanceCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        AttendanceCommands::CheckIn { status, notes } => {
            let actor = ctx.actor()?;
            let status = parse_enum::<AttendanceStatus>(status, "status")?;
            let (record, created) = ctx
                .service
                .check_in(actor, Utc::now(), status, notes.clone())
                .await?;
            output(&CheckInResponse { record, created }, flags.format)
        }
        AttendanceCommands::CheckOut => {
            let actor = ctx.actor()?;
            output(&ctx.service.check_out(actor, Utc::now()).await?, flags.format)
        }
        AttendanceCommands::Today => {
            let records = ctx
                .service
                .today_attendance(Utc::now().date_naive())
                .await?;
            output(&records, flags.format)
        }
        AttendanceCommands::List { user, limit } => {
            let records = ctx
                .service
                .list_attendance(user.as_deref(), ctx.limit(*limit, flags.limit))
                .await?;
            output(&records, flags.format)
        }
    }
}
