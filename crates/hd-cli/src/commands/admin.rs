//! Admin session and ticket management commands.

use std::path::PathBuf;

use anyhow::Context;
use hd_core::ids::TicketId;
use hd_core::ticket::{TicketFilter, TicketPatch};
use serde_json::json;
use tracing::warn;

use super::client::read_uploads;
use super::CommandContext;
use crate::cli::UpdateArgs;
use crate::output;

pub async fn login(ctx: &CommandContext, code: &str) -> anyhow::Result<()> {
    ctx.use_cases
        .admin_session()
        .login(code)
        .await
        .context("Admin login failed")?;
    println!("Logged in as admin.");
    Ok(())
}

pub async fn logout(ctx: &CommandContext) -> anyhow::Result<()> {
    ctx.use_cases.admin_session().logout().await;
    println!("Logged out.");
    Ok(())
}

pub async fn status(ctx: &CommandContext) -> anyhow::Result<()> {
    let is_admin = ctx.use_cases.admin_session().check().await;
    if ctx.json {
        return output::print_json(&json!({ "admin": is_admin }));
    }
    println!("{}", if is_admin { "admin" } else { "not logged in" });
    Ok(())
}

pub async fn list(
    ctx: &CommandContext,
    filter: TicketFilter,
    limit: u32,
    offset: u32,
) -> anyhow::Result<()> {
    let listing = ctx.use_cases.list_tickets();
    let page = listing
        .execute(filter, limit, offset)
        .await
        .context("Failed to list tickets")?;

    if ctx.json {
        return output::print_json(&page);
    }
    let categories = listing.categories().await.unwrap_or_else(|err| {
        warn!(error = %err, "loading categories failed");
        Vec::new()
    });
    output::print_ticket_table(&page.items, &categories);
    if let Some(total) = page.total {
        println!("({} of {total})", page.items.len());
    }
    Ok(())
}

pub async fn update(ctx: &CommandContext, args: UpdateArgs) -> anyhow::Result<()> {
    let patch = TicketPatch {
        status: args.status,
        priority: args.priority,
        category_id: args.category,
        subject: args.subject,
        body: args.body,
    };
    let ticket = ctx
        .use_cases
        .manage_tickets()
        .update(args.id, patch)
        .await
        .with_context(|| format!("Failed to update ticket #{}", args.id))?;

    if ctx.json {
        return output::print_json(&ticket);
    }
    println!("{}", output::ticket_line(&ticket));
    Ok(())
}

pub async fn delete(ctx: &CommandContext, id: TicketId) -> anyhow::Result<()> {
    ctx.use_cases
        .manage_tickets()
        .delete(id)
        .await
        .with_context(|| format!("Failed to delete ticket #{id}"))?;
    println!("Deleted ticket #{id}.");
    Ok(())
}

pub async fn attach(ctx: &CommandContext, id: TicketId, files: Vec<PathBuf>) -> anyhow::Result<()> {
    let uploads = read_uploads(&files).await?;
    let stored = ctx
        .use_cases
        .manage_tickets()
        .upload(id, uploads)
        .await
        .with_context(|| format!("Failed to upload attachments to ticket #{id}"))?;

    if ctx.json {
        return output::print_json(&stored);
    }
    println!("Uploaded {} file(s) to ticket #{id}.", stored.len());
    Ok(())
}

pub async fn sync(ctx: &CommandContext) -> anyhow::Result<()> {
    let report = match ctx.use_cases.sync_inbox().execute().await {
        Ok(report) => report,
        Err(err) if err.is_not_configured() => {
            println!("Inbox sync is not configured on the server.");
            return Ok(());
        }
        Err(err) => return Err(err).context("Inbox sync failed"),
    };

    if ctx.json {
        return output::print_json(&report);
    }
    println!(
        "Processed {}, imported {}, skipped {}.",
        report.processed, report.inserted, report.skipped
    );
    Ok(())
}

pub async fn seed_demo(ctx: &CommandContext) -> anyhow::Result<()> {
    let message = ctx
        .use_cases
        .manage_tickets()
        .seed_demo()
        .await
        .context("Failed to seed demo data")?;
    println!("{message}");
    Ok(())
}

pub async fn health(ctx: &CommandContext) -> anyhow::Result<()> {
    let status = ctx
        .use_cases
        .health()
        .execute()
        .await
        .with_context(|| format!("Server {} is unreachable", ctx.config.server.base_url))?;
    if ctx.json {
        return output::print_json(&json!({ "status": status }));
    }
    println!("{}: {status}", ctx.config.server.base_url);
    Ok(())
}
