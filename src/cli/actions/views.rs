//! Plain-text views. Data goes to stdout; notices and failures go to stderr.

use crate::features::{
    admin::AdminStats,
    events::{Event, Exhibition},
    tickets::Ticket,
    users::{Role, User},
    verification::VerificationResult,
};
use std::fmt::Write as _;

pub fn notice(message: &str) {
    eprintln!("{message}");
}

pub fn failure(message: &str) {
    eprintln!("error: {message}");
}

pub fn already_signed_in(user: Option<&User>) {
    let who = user.map_or("an existing account", |u| u.email.as_str());
    notice(&format!(
        "Already signed in as {who}. Run `ticketdesk logout` to switch accounts."
    ));
}

pub fn access_denied(required: &[Role]) {
    let roles = required
        .iter()
        .map(|role| role.as_str())
        .collect::<Vec<_>>()
        .join(" or ");
    failure(&format!("Access denied. This view requires the {roles} role."));
}

fn field(out: &mut String, label: &str, value: Option<&str>) {
    if let Some(value) = value.filter(|v| !v.trim().is_empty()) {
        let _ = writeln!(out, "  {label:<12} {value}");
    }
}

pub fn user(user: &User) {
    let mut out = format!("{}\n", user.display_name());
    field(&mut out, "id", Some(user.id.as_str()));
    field(&mut out, "email", Some(user.email.as_str()));
    field(&mut out, "role", Some(user.role.as_str()));
    field(&mut out, "status", Some(user.status.to_string().as_str()));
    print!("{out}");
}

pub fn users(users: &[User]) {
    if users.is_empty() {
        println!("No users.");
        return;
    }
    for user in users {
        println!(
            "{:<10} {:<28} {:<6} {}",
            user.id.as_str(),
            user.email,
            user.role.as_str(),
            user.display_name()
        );
    }
}

pub fn event(event: &Event) {
    let mut out = format!("{}\n", event.title);
    field(&mut out, "id", Some(event.id.as_str()));
    field(&mut out, "date", event.date.as_deref());
    field(&mut out, "location", event.location.as_deref());
    field(&mut out, "about", event.description.as_deref());
    print!("{out}");
}

pub fn exhibitions(items: &[Exhibition]) {
    if items.is_empty() {
        println!("No exhibitions published.");
        return;
    }
    for item in items {
        let dates = match (&item.start_date, &item.end_date) {
            (Some(start), Some(end)) => format!("{start} - {end}"),
            (Some(start), None) => start.clone(),
            _ => String::new(),
        };
        println!("{:<10} {:<32} {}", item.id.as_str(), item.title, dates);
    }
}

pub fn exhibition(item: &Exhibition) {
    let mut out = format!("{}\n", item.title);
    field(&mut out, "id", Some(item.id.as_str()));
    field(&mut out, "starts", item.start_date.as_deref());
    field(&mut out, "ends", item.end_date.as_deref());
    field(&mut out, "location", item.location.as_deref());
    field(&mut out, "price", item.price.map(|p| format!("{p:.2}")).as_deref());
    field(&mut out, "about", item.description.as_deref());
    print!("{out}");
}

fn ticket_lines(out: &mut String, ticket: &Ticket) {
    field(out, "ticket", Some(ticket.ticket_number.as_str()));
    field(out, "id", Some(ticket.id.as_str()));
    field(out, "status", Some(ticket.status.to_string().as_str()));
    if let Some(event) = &ticket.event {
        field(out, "event", Some(event.title().unwrap_or(event.id().as_str())));
    }
    field(out, "purchased", ticket.purchase_date.as_deref());
    field(out, "price", ticket.price.map(|p| format!("{p:.2}")).as_deref());
}

pub fn ticket(ticket: &Ticket) {
    let mut out = String::new();
    ticket_lines(&mut out, ticket);
    if let Some(attendee) = &ticket.attendee {
        field(&mut out, "attendee", attendee.name.as_deref());
        field(&mut out, "email", attendee.email.as_deref());
    }
    print!("{out}");
}

pub fn verification(result: &VerificationResult) {
    let mut out = String::new();
    match result {
        VerificationResult::Success { message, details } => {
            let _ = writeln!(out, "VALID  {message}");
            if let Some(ticket) = &details.ticket {
                ticket_lines(&mut out, ticket);
            }
            if let Some(attendee) = &details.attendee {
                field(&mut out, "attendee", attendee.name.as_deref());
                field(&mut out, "email", attendee.email.as_deref());
                field(&mut out, "phone", attendee.phone.as_deref());
            }
            match details.can_be_used {
                Some(true) => field(&mut out, "entry", Some("allowed")),
                Some(false) => field(&mut out, "entry", Some("not allowed")),
                None => {}
            }
            field(&mut out, "note", details.status_message.as_deref());
        }
        VerificationResult::Error { message } => {
            let _ = writeln!(out, "INVALID  {message}");
        }
    }
    print!("{out}");
}

pub fn stats(stats: &AdminStats) {
    let count = |value: Option<u64>| value.map(|v| v.to_string());
    let mut out = String::new();
    field(&mut out, "users", count(stats.total_users).as_deref());
    field(&mut out, "events", count(stats.total_events).as_deref());
    field(&mut out, "tickets", count(stats.total_tickets).as_deref());
    field(&mut out, "sold", count(stats.tickets_sold).as_deref());
    field(&mut out, "revenue", stats.revenue.map(|r| format!("{r:.2}")).as_deref());
    if out.is_empty() {
        out.push_str("No statistics reported.\n");
    }
    print!("{out}");
}
