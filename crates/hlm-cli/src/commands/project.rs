use hlm_core::entities::NewProject;
use hlm_core::enums::ProjectStatus;
use hlm_db::updates::project::ProjectUpdateBuilder;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ProjectCommands;
use crate::commands::shared::parse::{parse_enum, parse_optional_date, parse_optional_enum};
use crate::context::AppContext;
use crate::output::output;

/// Handle `hlm project`.
pub async fn handle(
    action: &ProjectCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        ProjectCommands::Create {
            code,
            name,
            client,
            category,
            service_type,
            package,
            lead,
            editor,
            start,
            end,
            status,
            notes,
        } => {
            let actor = ctx.actor()?;
            let input = NewProject {
                project_id: code.clone(),
                name: name.clone(),
                client_id: client.clone(),
                service_category: category.clone(),
                service_type: service_type.clone(),
                package: package.clone(),
                project_lead: lead.clone(),
                editor: editor.clone(),
                start_date: parse_optional_date(start.as_deref(), "start")?,
                end_date: parse_optional_date(end.as_deref(), "end")?,
                progress: 0,
                status: parse_optional_enum(status.as_deref(), "status")?.unwrap_or_default(),
                notes: notes.clone(),
            };
            let project = ctx.service.create_project(actor, input).await?;
            output(&project, flags.format)
        }
        ProjectCommands::Update {
            id,
            name,
            client,
            lead,
            editor,
            start,
            end,
            progress,
            status,
            notes,
        } => {
            let actor = ctx.actor()?;
            let mut builder = ProjectUpdateBuilder::new();
            if let Some(name) = name {
                builder = builder.name(name);
            }
            if let Some(client) = client {
                builder = builder.client_id(Some(client.clone()));
            }
            if let Some(lead) = lead {
                builder = builder.project_lead(Some(lead.clone()));
            }
            if let Some(editor) = editor {
                builder = builder.editor(Some(editor.clone()));
            }
            if let Some(start) = parse_optional_date(start.as_deref(), "start")? {
                builder = builder.start_date(Some(start));
            }
            if let Some(end) = parse_optional_date(end.as_deref(), "end")? {
                builder = builder.end_date(Some(end));
            }
            if let Some(progress) = progress {
                builder = builder.progress(*progress);
            }
            if let Some(status) = status {
                builder = builder.status(parse_enum::<ProjectStatus>(status, "status")?);
            }
            if let Some(notes) = notes {
                builder = builder.notes(Some(notes.clone()));
            }
            let project = ctx.service.update_project(actor, id, builder.build()).await?;
            output(&project, flags.format)
        }
        ProjectCommands::List {
            client,
            status,
            limit,
        } => {
            let status = parse_optional_enum::<ProjectStatus>(status.as_deref(), "status")?;
            let projects = ctx
                .service
                .list_projects(client.as_deref(), status, ctx.limit(*limit, flags.limit))
                .await?;
            output(&projects, flags.format)
        }
        ProjectCommands::Get { id } => output(&ctx.service.get_project(id).await?, flags.format),
        ProjectCommands::Delete { id } => {
            let actor = ctx.actor()?;
            let project = ctx.service.delete_project(actor, id).await?;
            output(&project, flags.format)
        }
    }
}
