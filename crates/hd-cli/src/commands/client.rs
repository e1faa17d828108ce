//! Anonymous client commands: everything scoped by the client token.

use std::path::{Path, PathBuf};

use anyhow::Context;
use hd_app::Viewer;
use hd_core::attachment::AttachmentUpload;
use hd_core::client_identity::TokenOrigin;
use hd_core::ids::TicketId;
use hd_core::ticket::{TicketDraft, TicketFilter, TicketIntake};
use serde_json::json;

use super::CommandContext;
use crate::cli::SubmitArgs;
use crate::output;

pub fn token(ctx: &CommandContext) -> anyhow::Result<()> {
    let resolved = ctx.use_cases.client_identity().resolve();
    if ctx.json {
        return output::print_json(&json!({
            "client_token": resolved.token.as_scope(),
            "origin": format!("{:?}", resolved.origin),
        }));
    }

    match resolved.origin {
        TokenOrigin::Unavailable => println!("No persistent storage; client token unavailable."),
        TokenOrigin::Ephemeral => {
            println!("{}", resolved.token);
            eprintln!("warning: token could not be persisted and will change next run");
        }
        _ => println!("{}", resolved.token),
    }
    Ok(())
}

pub async fn submit(ctx: &CommandContext, args: SubmitArgs) -> anyhow::Result<()> {
    let attachments = read_uploads(&args.attachments).await?;

    let draft = TicketDraft {
        sender_email: args.email,
        sender_name: args.name,
        subject: args.subject,
        body: args.body,
        priority: args.priority,
        category_id: args.category,
        source: Some("manual".to_string()),
        client_token: None,
        intake: TicketIntake {
            full_name: args.full_name,
            phone: args.phone,
            organization: args.organization,
            device_info: args.device,
        },
    };

    let ticket = ctx
        .use_cases
        .submit_ticket()
        .execute(draft, attachments)
        .await
        .context("Failed to submit ticket")?;

    if ctx.json {
        return output::print_json(&ticket);
    }
    println!("Created ticket #{}", ticket.id);
    Ok(())
}

pub async fn mine(ctx: &CommandContext, filter: TicketFilter) -> anyhow::Result<()> {
    let tickets = ctx
        .use_cases
        .list_my_tickets()
        .execute(filter)
        .await
        .context("Failed to load your tickets")?;

    if ctx.json {
        return output::print_json(&tickets);
    }
    output::print_tickets(&tickets);
    Ok(())
}

pub async fn show(ctx: &CommandContext, id: TicketId, admin: bool) -> anyhow::Result<()> {
    let viewer = if admin { Viewer::Admin } else { Viewer::Client };
    let detail = ctx
        .use_cases
        .ticket_detail()
        .execute(id, viewer)
        .await
        .with_context(|| format!("Failed to load ticket #{id}"))?;

    if ctx.json {
        return output::print_json(&json!({
            "ticket": detail.ticket,
            "attachments": detail.attachments,
        }));
    }
    output::print_ticket(&detail.ticket, &detail.attachments);
    Ok(())
}

pub(crate) async fn read_upload(path: &Path) -> anyhow::Result<AttachmentUpload> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read attachment: {}", path.display()))?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "attachment".to_string());

    Ok(AttachmentUpload {
        mime_type: mime_type_for(path).to_string(),
        file_name,
        bytes,
    })
}

pub(crate) async fn read_uploads(paths: &[PathBuf]) -> anyhow::Result<Vec<AttachmentUpload>> {
    let mut uploads = Vec::with_capacity(paths.len());
    for path in paths {
        uploads.push(read_upload(path).await?);
    }
    Ok(uploads)
}

/// Content type sent with an upload. Unknown extensions are sent as
/// `application/octet-stream` and left to the server to sniff.
fn mime_type_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("pdf") => "application/pdf",
        Some("txt" | "log") => "text/plain",
        Some("csv") => "text/csv",
        Some("zip") => "application/zip",
        _ => "application/octet-stream",
    }
}
