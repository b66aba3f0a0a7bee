//! Session browsing CLI commands: list sessions, show a transcript.

use anyhow::Result;
use chrono::{DateTime, Utc};
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;

use confab_types::chat::ChatRole;
use confab_types::memory::TranscriptEntry;

use crate::state::AppState;

/// Maximum characters of a transcript entry shown in styled output,
/// matching the original session card view.
const DISPLAY_TEXT_LIMIT: usize = 200;

/// List past sessions for an actor.
///
/// # Examples
///
/// ```bash
/// confab sessions
/// confab sessions alice --json
/// ```
pub async fn list_sessions(state: &AppState, actor: &str, json: bool) -> Result<()> {
    let sessions = match state.memory.list_sessions(actor).await {
        Ok(sessions) => sessions,
        Err(e) => {
            // Surface the error and fall back to an empty listing.
            eprintln!(
                "  {} Error getting sessions: {e}",
                style("✗").red().bold()
            );
            Vec::new()
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&sessions)?);
        return Ok(());
    }

    if sessions.is_empty() {
        println!();
        println!("  {}", empty_sessions_hint(actor));
        println!();
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("Session").fg(Color::White),
        Cell::new("ID").fg(Color::White),
        Cell::new("Created").fg(Color::White),
        Cell::new("Updated").fg(Color::White),
    ]);

    for (index, session) in sessions.iter().enumerate() {
        table.add_row(vec![
            Cell::new(format!("Session {}", index + 1)).fg(Color::Cyan),
            Cell::new(format!("{}...", session.short_id())).fg(Color::White),
            Cell::new(format_time(session.created)).fg(Color::DarkGrey),
            Cell::new(format_time(session.updated)).fg(Color::DarkGrey),
        ]);
    }

    println!();
    println!("  Conversations for '{}'", style(actor).cyan().bold());
    println!();
    println!("{table}");
    println!();
    println!(
        "  {} session{}",
        style(sessions.len()).bold(),
        if sessions.len() == 1 { "" } else { "s" }
    );
    println!();

    Ok(())
}

/// Show the recorded transcript of one session.
pub async fn show_transcript(
    state: &AppState,
    actor: &str,
    session_id: &str,
    json: bool,
) -> Result<()> {
    let entries = match state.memory.transcript(actor, session_id).await {
        Ok(entries) => entries,
        Err(e) => {
            eprintln!(
                "  {} Error getting messages: {e}",
                style("✗").red().bold()
            );
            Vec::new()
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    println!();
    println!(
        "  Messages from session {}",
        style(session_id).cyan().bold()
    );
    println!();

    if entries.is_empty() {
        println!("  {}", style("No messages found").dim());
        println!();
        return Ok(());
    }

    for (index, entry) in entries.iter().enumerate() {
        println!("  {}", render_entry(index, entry));
    }
    println!();

    Ok(())
}

/// The affordance shown when an actor has no recorded conversations.
pub fn empty_sessions_hint(actor: &str) -> String {
    format!(
        "No conversations yet. Start one with: {}",
        style(format!("confab chat {actor}")).yellow()
    )
}

fn format_time(time: Option<DateTime<Utc>>) -> String {
    match time {
        Some(t) => t.format("%Y-%m-%d %H:%M").to_string(),
        None => "Unknown".to_string(),
    }
}

fn render_entry(index: usize, entry: &TranscriptEntry) -> String {
    match entry {
        TranscriptEntry::Message { role, text } => {
            let label = match role {
                ChatRole::User => style("User:").green().bold(),
                ChatRole::Assistant => style("Assistant:").blue().bold(),
            };
            format!("{label} {}", truncate(text))
        }
        TranscriptEntry::Unparsed { reason } => format!(
            "{}",
            style(format!("{}. [Parse error: {reason}]", index + 1)).dim()
        ),
    }
}

fn truncate(text: &str) -> String {
    if text.chars().count() > DISPLAY_TEXT_LIMIT {
        let cut: String = text.chars().take(DISPLAY_TEXT_LIMIT).collect();
        format!("{cut}...")
    } else {
        text.to_string()
    }
}
