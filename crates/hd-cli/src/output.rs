//! Terminal rendering of command results.

use hd_app::BoardSnapshot;
use hd_core::analytics::{AnalyticsSnapshot, Share};
use hd_core::attachment::TicketAttachment;
use hd_core::category::{category_name, Category};
use hd_core::ticket::Ticket;
use serde::Serialize;

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn ticket_line(ticket: &Ticket) -> String {
    let answered = if ticket.is_answered() { " (answered)" } else { "" };
    format!(
        "#{:<6} {:<12} {:<8} {}  <{}>{}",
        ticket.id,
        ticket.status,
        ticket.priority,
        ticket.subject,
        ticket.sender_email,
        answered
    )
}

pub fn print_tickets(tickets: &[Ticket]) {
    if tickets.is_empty() {
        println!("No tickets.");
        return;
    }
    for ticket in tickets {
        println!("{}", ticket_line(ticket));
    }
}

/// Admin listing: each line carries the category name.
pub fn print_ticket_table(tickets: &[Ticket], categories: &[Category]) {
    if tickets.is_empty() {
        println!("No tickets.");
        return;
    }
    for ticket in tickets {
        println!(
            "{}  [{}]",
            ticket_line(ticket),
            category_name(categories, ticket.category_id)
        );
    }
}

pub fn print_ticket(ticket: &Ticket, attachments: &[TicketAttachment]) {
    println!("{}", ticket_line(ticket));
    if let Some(created) = &ticket.created_at {
        println!("created:  {created}");
    }
    if let Some(category) = ticket.request_category.as_ref().or(ticket.ai_category.as_ref()) {
        println!("category: {category}");
    }
    if let Some(summary) = &ticket.issue_summary {
        println!("summary:  {summary}");
    }
    println!();
    println!("{}", ticket.body);

    if let Some(reply) = ticket.sent_reply.as_ref().or(ticket.ai_reply.as_ref()) {
        println!();
        println!("reply:");
        println!("{reply}");
    }

    if !attachments.is_empty() {
        println!();
        println!("attachments:");
        for attachment in attachments {
            match attachment.size_bytes {
                Some(size) => println!("  {} ({size} bytes)", attachment.filename),
                None => println!("  {}", attachment.filename),
            }
        }
    }
}

/// One block per board change in `watch`.
pub fn print_board(snapshot: &BoardSnapshot) {
    let total = snapshot
        .total
        .map(|t| format!(" of {t}"))
        .unwrap_or_default();
    println!(
        "--- revision {}: {} ticket(s){}{}",
        snapshot.revision,
        snapshot.tickets.len(),
        total,
        if snapshot.loading { " (loading)" } else { "" }
    );
    if let Some(error) = &snapshot.error {
        println!("error: {error}");
    }
    if let Some(notice) = &snapshot.notice {
        println!("{notice}");
    }
    print_tickets(&snapshot.tickets);
}

fn print_shares(title: &str, shares: &[Share]) {
    println!("{title}:");
    for share in shares {
        println!("  {:<32} {:>6} {:>6.1}%", share.label, share.count, share.percentage);
    }
}

pub fn print_analytics(snapshot: &AnalyticsSnapshot) {
    let summary = &snapshot.summary;
    println!("tickets:           {}", summary.total_tickets);
    println!("completed:         {}", summary.completed);
    println!("not completed:     {}", summary.not_completed);
    println!("operator required: {}", summary.operator_required);
    println!("today / week:      {} / {}", summary.today_tickets, summary.week_tickets);
    if let Some(hours) = summary.avg_response_hours {
        println!("avg response:      {hours:.1} h");
    }

    print_shares("by category", &snapshot.by_category);
    print_shares("by sentiment", &snapshot.by_sentiment);
    print_shares("by source", &snapshot.by_source);
    print_shares("by device type", &snapshot.by_device_type);

    println!("timeline:");
    for point in &snapshot.timeline {
        println!("  {} {:>6}", point.date, point.count);
    }

    let operator = &snapshot.operator;
    println!(
        "operator: {} of {} ({:.1}%)",
        operator.requires_operator, operator.total_tickets, operator.percentage
    );
    for reason in &operator.by_reason {
        println!("  {:<32} {:>6}", reason.reason, reason.count);
    }
}
