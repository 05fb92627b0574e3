use hlm_core::enums::{RecordStatus, Role};
use hlm_db::updates::profile::ProfileUpdateBuilder;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::TeamCommands;
use crate::commands::shared::parse::{parse_enum, parse_optional_date};
use crate::context::AppContext;
use crate::output::output;

/// Handle `hlm team`.
pub async fn handle(
    action: &TeamCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        TeamCommands::List => {
            let members = ctx.service.list_team(ctx.limit(None, flags.limit)).await?;
            output(&members, flags.format)
        }
        TeamCommands::Get { user_id } => {
            output(&ctx.service.get_member(user_id).await?, flags.format)
        }
        TeamCommands::Update {
            user_id,
            name,
            employee_id,
            department,
            phone,
            join_date,
            status,
        } => {
            let actor = ctx.actor()?;
            let mut builder = ProfileUpdateBuilder::new();
            if let Some(name) = name {
                builder = builder.full_name(name);
            }
            if let Some(employee_id) = employee_id {
                builder = builder.employee_id(Some(employee_id.clone()));
            }
            if let Some(department) = department {
                builder = builder.department(Some(department.clone()));
            }
            if let Some(phone) = phone {
                builder = builder.phone(Some(phone.clone()));
            }
            if let Some(join_date) = parse_optional_date(join_date.as_deref(), "join-date")? {
                builder = builder.join_date(Some(join_date));
            }
            if let Some(status) = status {
                builder = builder.status(parse_enum::<RecordStatus>(status, "status")?);
            }
            let member = ctx
                .service
                .update_profile(actor, user_id, builder.build())
                .await?;
            output(&member, flags.format)
        }
        TeamCommands::SetRole { user_id, role } => {
            let actor = ctx.actor()?;
            let role = parse_enum::<Role>(role, "role")?;
            let member = ctx.service.set_role(actor, user_id, role).await?;
            output(&member, flags.format)
        }
    }
}
