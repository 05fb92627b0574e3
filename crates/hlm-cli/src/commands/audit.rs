use hlm_core::enums::{AuditAction, GovernedTable};
use hlm_db::repos::audit::AuditFilter;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::AuditArgs;
use crate::commands::shared::limit::effective_limit;
use crate::commands::shared::parse::parse_enum;
use crate::context::AppContext;
use crate::output::output;

fn build_filter(
    args: &AuditArgs,
    global_limit: Option<u32>,
    fallback: u32,
) -> anyhow::Result<AuditFilter> {
    Ok(AuditFilter {
        table: args
            .table
            .as_deref()
            .map(|raw| parse_enum::<GovernedTable>(raw, "table"))
            .transpose()?,
        record_id: args.record.clone(),
        user_id: args.user.clone(),
        action: args
            .action
            .as_deref()
            .map(|raw| parse_enum::<AuditAction>(&raw.to_ascii_uppercase(), "action"))
            .transpose()?,
        limit: Some(effective_limit(args.limit, global_limit, fallback)),
    })
}

/// Handle `hlm audit`.
pub async fn handle(
    args: &AuditArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let actor = ctx.actor()?;
    let filter = build_filter(args, flags.limit, ctx.config.general.audit_limit)?;
    let entries = ctx.service.query_audit(actor, &filter).await?;
    output(&entries, flags.format)
}
