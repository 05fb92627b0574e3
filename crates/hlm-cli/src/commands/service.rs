use hlm_core::entities::NewServiceOffering;
use hlm_core::enums::{RecordStatus, ServiceTier};
use hlm_db::updates::catalog::ServiceOfferingUpdateBuilder;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ServiceCommands;
use crate::commands::shared::parse::{parse_enum, parse_optional_enum};
use crate::context::AppContext;
use crate::output::output;

/// Handle `hlm service`.
pub async fn handle(
    action: &ServiceCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        ServiceCommands::Create {
            name,
            category,
            tier,
            price,
            hpp,
            description,
            features,
        } => {
            let actor = ctx.actor()?;
            let input = NewServiceOffering {
                name: name.clone(),
                category: category.clone(),
                tier: parse_optional_enum::<ServiceTier>(tier.as_deref(), "tier")?
                    .unwrap_or_default(),
                price: *price,
                hpp: *hpp,
                description: description.clone(),
                features: features.clone(),
            };
            let offering = ctx.service.create_service_offering(actor, input).await?;
            output(&offering, flags.format)
        }
        ServiceCommands::Update {
            id,
            name,
            category,
            tier,
            price,
            hpp,
            description,
            features,
            status,
        } => {
            let actor = ctx.actor()?;
            let mut builder = ServiceOfferingUpdateBuilder::new();
            if let Some(name) = name {
                builder = builder.name(name);
            }
            if let Some(category) = category {
                builder = builder.category(category);
            }
            if let Some(tier) = tier {
                builder = builder.tier(parse_enum::<ServiceTier>(tier, "tier")?);
            }
            if let Some(price) = price {
                builder = builder.price(Some(*price));
            }
            if let Some(hpp) = hpp {
                builder = builder.hpp(Some(*hpp));
            }
            if let Some(description) = description {
                builder = builder.description(Some(description.clone()));
            }
            if !features.is_empty() {
                builder = builder.features(features.clone());
            }
            if let Some(status) = status {
                builder = builder.status(parse_enum::<RecordStatus>(status, "status")?);
            }
            let offering = ctx
                .service
                .update_service_offering(actor, id, builder.build())
                .await?;
            output(&offering, flags.format)
        }
        ServiceCommands::List { status, limit } => {
            let status = parse_optional_enum::<RecordStatus>(status.as_deref(), "status")?;
            let offerings = ctx
                .service
                .list_service_offerings(status, ctx.limit(*limit, flags.limit))
                .await?;
            output(&offerings, flags.format)
        }
        ServiceCommands::Get { id } => {
            output(&ctx.service.get_service_offering(id).await?, flags.format)
        }
        ServiceCommands::Delete { id } => {
            let actor = ctx.actor()?;
            let offering = ctx.service.delete_service_offering(actor, id).await?;
            output(&offering, flags.format)
        }
    }
}
