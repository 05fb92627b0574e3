use hlm_core::entities::NewClient;
use hlm_core::enums::ClientStatus;
use hlm_db::updates::client::ClientUpdateBuilder;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ClientCommands;
use crate::commands::shared::parse::{parse_enum, parse_optional_date, parse_optional_enum};
use crate::context::AppContext;
use crate::output::output;

/// Handle `hlm client`.
pub async fn handle(
    action: &ClientCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        ClientCommands::Create {
            code,
            brand,
            pic,
            category,
            package,
            value,
            start,
            status,
            notes,
        } => {
            let actor = ctx.actor()?;
            let input = NewClient {
                client_id: code.clone(),
                brand_name: brand.clone(),
                pic_name: pic.clone(),
                service_category: category.clone(),
                package: package.clone(),
                value_idr: *value,
                start_date: parse_optional_date(start.as_deref(), "start")?,
                status: parse_optional_enum(status.as_deref(), "status")?.unwrap_or_default(),
                notes: notes.clone(),
            };
            let client = ctx.service.create_client(actor, input).await?;
            output(&client, flags.format)
        }
        ClientCommands::Update {
            id,
            code,
            brand,
            pic,
            category,
            package,
            value,
            start,
            status,
            notes,
        } => {
            let actor = ctx.actor()?;
            let mut builder = ClientUpdateBuilder::new();
            if let Some(code) = code {
                builder = builder.client_id(code);
            }
            if let Some(brand) = brand {
                builder = builder.brand_name(brand);
            }
            if let Some(pic) = pic {
                builder = builder.pic_name(Some(pic.clone()));
            }
            if let Some(category) = category {
                builder = builder.service_category(Some(category.clone()));
            }
            if let Some(package) = package {
                builder = builder.package(Some(package.clone()));
            }
            if let Some(value) = value {
                builder = builder.value_idr(Some(*value));
            }
            if let Some(start) = parse_optional_date(start.as_deref(), "start")? {
                builder = builder.start_date(Some(start));
            }
            if let Some(status) = status {
                builder = builder.status(parse_enum::<ClientStatus>(status, "status")?);
            }
            if let Some(notes) = notes {
                builder = builder.notes(Some(notes.clone()));
            }
            let client = ctx.service.update_client(actor, id, builder.build()).await?;
            output(&client, flags.format)
        }
        ClientCommands::List { status, limit } => {
            let status = parse_optional_enum::<ClientStatus>(status.as_deref(), "status")?;
            let clients = ctx
                .service
                .list_clients(status, ctx.limit(*limit, flags.limit))
                .await?;
            output(&clients, flags.format)
        }
        ClientCommands::Get { id } => output(&ctx.service.get_client(id).await?, flags.format),
        ClientCommands::Delete { id } => {
            let actor = ctx.actor()?;
            let client = ctx.service.delete_client(actor, id).await?;
            output(&client, flags.format)
        }
    }
}
