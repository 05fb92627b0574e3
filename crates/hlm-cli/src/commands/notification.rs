use hlm_core::entities::NewNotification;
use hlm_core::enums::NotificationKind;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::NotificationCommands;
use crate::commands::shared::parse::parse_optional_enum;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct MarkedRead {
    updated: u64,
}

/// Handle `hlm notification`.
pub async fn handle(
    action: &NotificationCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let actor = ctx.actor()?;
    match action {
        NotificationCommands::List { unread, limit } => {
            let notifications = ctx
                .service
                .list_notifications(actor, *unread, ctx.limit(*limit, flags.limit))
                .await?;
            output(&notifications, flags.format)
        }
        NotificationCommands::Read { id } => {
            ctx.service.mark_notification_read(actor, id).await?;
            output(&MarkedRead { updated: 1 }, flags.format)
        }
        NotificationCommands::ReadAll => {
            let updated = ctx.service.mark_all_notifications_read(actor).await?;
            output(&MarkedRead { updated }, flags.format)
        }
        NotificationCommands::Send {
            user_id,
            title,
            message,
            link,
            kind,
        } => {
            let input = NewNotification {
                user_id: user_id.clone(),
                title: title.clone(),
                message: message.clone(),
                link: link.clone(),
                kind: parse_optional_enum::<NotificationKind>(kind.as_deref(), "kind")?
                    .unwrap_or_default(),
            };
            output(&ctx.service.notify(actor, input).await?, flags.format)
        }
    }
}
