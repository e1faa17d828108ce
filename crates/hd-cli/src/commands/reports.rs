//! Export, analytics and AI assistance commands.

use anyhow::Context;
use hd_core::export::ExportFormat;
use hd_core::ids::TicketId;
use hd_core::ticket::TicketFilter;
use serde_json::json;

use super::CommandContext;
use crate::output;

pub async fn export(
    ctx: &CommandContext,
    format: ExportFormat,
    filter: TicketFilter,
) -> anyhow::Result<()> {
    let path = ctx
        .use_cases
        .export_tickets()
        .execute(format, &filter)
        .await
        .context("Export failed")?;

    if ctx.json {
        return output::print_json(&json!({ "path": path }));
    }
    println!("Saved {}", path.display());
    Ok(())
}

pub async fn analytics(ctx: &CommandContext, days: Option<u32>) -> anyhow::Result<()> {
    let snapshot = ctx
        .use_cases
        .analytics()
        .execute(days)
        .await
        .context("Failed to load analytics")?;

    if ctx.json {
        return output::print_json(&snapshot);
    }
    output::print_analytics(&snapshot);
    Ok(())
}

pub async fn analyze(ctx: &CommandContext, id: TicketId) -> anyhow::Result<()> {
    let result = ctx
        .use_cases
        .assist_ticket()
        .analyze(id)
        .await
        .with_context(|| format!("Failed to analyze ticket #{id}"))?;

    if ctx.json {
        return output::print_json(&result);
    }
    println!(
        "{} ({:.0}% confidence, {} {})",
        result.predicted_category,
        result.confidence * 100.0,
        result.provider,
        result.model_version
    );
    Ok(())
}

pub async fn suggest(ctx: &CommandContext, id: TicketId) -> anyhow::Result<()> {
    let result = ctx
        .use_cases
        .assist_ticket()
        .suggest_reply(id)
        .await
        .with_context(|| format!("Failed to draft a reply for ticket #{id}"))?;

    if ctx.json {
        return output::print_json(&result);
    }
    println!("{}", result.suggested_reply);
    Ok(())
}

pub async fn auto_analyze(ctx: &CommandContext, id: TicketId) -> anyhow::Result<()> {
    let result = ctx
        .use_cases
        .assist_ticket()
        .ai_analyze(id)
        .await
        .with_context(|| format!("AI analysis of ticket #{id} failed"))?;

    if ctx.json {
        return output::print_json(&result);
    }
    println!("category: {}", result.ai_category);
    println!();
    println!("{}", result.ai_reply);
    Ok(())
}

pub async fn send_reply(ctx: &CommandContext, id: TicketId, text: &str) -> anyhow::Result<()> {
    ctx.use_cases
        .assist_ticket()
        .send_reply(id, text)
        .await
        .with_context(|| format!("Failed to send reply to ticket #{id}"))?;
    println!("Reply sent to ticket #{id}.");
    Ok(())
}
