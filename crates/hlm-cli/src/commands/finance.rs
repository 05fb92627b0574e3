use hlm_core::entities::NewTransaction;
use hlm_db::repos::finance::TransactionFilter;
use hlm_db::updates::finance::TransactionUpdateBuilder;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::FinanceCommands;
use crate::commands::shared::parse::{parse_date, parse_optional_date};
use crate::context::AppContext;
use crate::output::output;

/// Handle `hlm finance`.
pub async fn handle(
    action: &FinanceCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        FinanceCommands::Create {
            number,
            date,
            category,
            income,
            expense,
            description,
            client,
            project,
        } => {
            let actor = ctx.actor()?;
            let input = NewTransaction {
                transaction_no: number.clone(),
                transaction_date: parse_date(date, "date")?,
                category: category.clone(),
                description: description.clone(),
                income: *income,
                expense: *expense,
                client_id: client.clone(),
                project_id: project.clone(),
            };
            let transaction = ctx.service.create_transaction(actor, input).await?;
            output(&transaction, flags.format)
        }
        FinanceCommands::Update {
            id,
            date,
            category,
            income,
            expense,
            description,
        } => {
            let actor = ctx.actor()?;
            let mut builder = TransactionUpdateBuilder::new();
            if let Some(date) = parse_optional_date(date.as_deref(), "date")? {
                builder = builder.transaction_date(date);
            }
            if let Some(category) = category {
                builder = builder.category(category);
            }
            if let Some(income) = income {
                builder = builder.income(*income);
            }
            if let Some(expense) = expense {
                builder = builder.expense(*expense);
            }
            if let Some(description) = description {
                builder = builder.description(Some(description.clone()));
            }
            let transaction = ctx
                .service
                .update_transaction(actor, id, builder.build())
                .await?;
            output(&transaction, flags.format)
        }
        FinanceCommands::List {
            from,
            to,
            category,
            limit,
        } => {
            let filter = TransactionFilter {
                from: parse_optional_date(from.as_deref(), "from")?,
                to: parse_optional_date(to.as_deref(), "to")?,
                category: category.clone(),
                limit: Some(ctx.limit(*limit, flags.limit)),
            };
            output(&ctx.service.list_transactions(&filter).await?, flags.format)
        }
        FinanceCommands::Get { id } => {
            output(&ctx.service.get_transaction(id).await?, flags.format)
        }
        FinanceCommands::Delete { id } => {
            let actor = ctx.actor()?;
            let transaction = ctx.service.delete_transaction(actor, id).await?;
            output(&transaction, flags.format)
        }
        FinanceCommands::Summary { from, to } => {
            let filter = TransactionFilter {
                from: parse_optional_date(from.as_deref(), "from")?,
                to: parse_optional_date(to.as_deref(), "to")?,
                ..TransactionFilter::default()
            };
            output(&ctx.service.finance_summary(&filter).await?, flags.format)
        }
    }
}
