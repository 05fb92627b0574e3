use hlm_core::entities::NewTask;
use hlm_core::enums::{ProductionStatus, TaskMedium};
use hlm_db::repos::task::TaskFilter;
use hlm_db::updates::task::TaskUpdateBuilder;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::TaskCommands;
use crate::commands::shared::parse::{
    parse_approval, parse_enum, parse_optional_date, parse_optional_enum,
};
use crate::context::AppContext;
use crate::output::output;

/// Handle `hlm task`.
pub async fn handle(
    action: &TaskCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        TaskCommands::Create {
            project,
            title,
            description,
            brief,
            pillar,
            medium,
            pl,
            copywriter,
            editor,
            videographer,
            start,
            due,
        } => {
            let actor = ctx.actor()?;
            let input = NewTask {
                project_id: project.clone(),
                title: title.clone(),
                description: description.clone(),
                brief: brief.clone(),
                pillar: pillar.clone(),
                medium: parse_optional_enum::<TaskMedium>(medium.as_deref(), "medium")?,
                assigned_pl: pl.clone(),
                assigned_copywriter: copywriter.clone(),
                assigned_editor: editor.clone(),
                assigned_videographer: videographer.clone(),
                start_date: parse_optional_date(start.as_deref(), "start")?,
                due_date: parse_optional_date(due.as_deref(), "due")?,
                ..NewTask::default()
            };
            let task = ctx.service.create_task(actor, input).await?;
            output(&task, flags.format)
        }
        TaskCommands::Update {
            id,
            title,
            description,
            caption,
            script,
            medium,
            asset,
            editor,
            due,
            done,
            status,
            approval,
        } => {
            let actor = ctx.actor()?;
            let mut builder = TaskUpdateBuilder::new();
            if let Some(title) = title {
                builder = builder.title(title);
            }
            if let Some(description) = description {
                builder = builder.description(Some(description.clone()));
            }
            if let Some(caption) = caption {
                builder = builder.caption(Some(caption.clone()));
            }
            if let Some(script) = script {
                builder = builder.script(Some(script.clone()));
            }
            if let Some(medium) = medium {
                builder = builder.medium(Some(parse_enum::<TaskMedium>(medium, "medium")?));
            }
            if let Some(asset) = asset {
                builder = builder.asset_url(Some(asset.clone()));
            }
            if let Some(editor) = editor {
                builder = builder.assigned_editor(Some(editor.clone()));
            }
            if let Some(due) = parse_optional_date(due.as_deref(), "due")? {
                builder = builder.due_date(Some(due));
            }
            if let Some(done) = parse_optional_date(done.as_deref(), "done")? {
                builder = builder.done_date(Some(done));
            }
            if let Some(status) = status {
                builder = builder.status(parse_enum::<ProductionStatus>(status, "status")?);
            }
            if let Some(approval) = approval {
                builder = builder.approval_status(parse_approval(approval)?);
            }
            let task = ctx.service.update_task(actor, id, builder.build()).await?;
            output(&task, flags.format)
        }
        TaskCommands::List {
            project,
            approval,
            status,
            assignee,
            limit,
        } => {
            let filter = TaskFilter {
                project_id: project.clone(),
                approval_status: approval.as_deref().map(parse_approval).transpose()?,
                status: parse_optional_enum(status.as_deref(), "status")?,
                assignee: assignee.clone(),
                limit: Some(ctx.limit(*limit, flags.limit)),
            };
            let tasks = ctx.service.list_tasks(&filter).await?;
            output(&tasks, flags.format)
        }
        TaskCommands::Get { id } => output(&ctx.service.get_task(id).await?, flags.format),
        TaskCommands::Delete { id } => {
            let actor = ctx.actor()?;
            let task = ctx.service.delete_task(actor, id).await?;
            output(&task, flags.format)
        }
        TaskCommands::Advance { id } => {
            let actor = ctx.actor()?;
            let task = ctx.service.advance_approval(actor, id).await?;
            tracing::info!(task = %task.id, approval = %task.approval_status, "approval advanced");
            output(&task, flags.format)
        }
    }
}
