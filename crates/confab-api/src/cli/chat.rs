//! Interactive terminal chat command.
//!
//! Reads lines from stdin, dispatches each through the same shim the HTTP
//! endpoint uses, and prints the reply with a timestamp caption. The
//! conversation history lives only in this process; the remote memory
//! store keeps the durable record.

use std::io::Write as _;

use anyhow::Result;
use console::style;
use tokio::io::{AsyncBufReadExt, BufReader};
use uuid::Uuid;

use confab_core::runtime::DispatchPayload;
use confab_types::chat::{ChatMessage, ChatRole};

use crate::state::AppState;

/// Run the chat command.
///
/// With `--message` a single exchange is performed and the process exits;
/// otherwise an interactive loop runs until `/quit` or EOF.
pub async fn chat(
    state: &AppState,
    actor: &str,
    session: Option<String>,
    message: Option<String>,
    json: bool,
) -> Result<()> {
    let session_id = session.unwrap_or_else(|| Uuid::new_v4().to_string());

    if let Some(message) = message {
        let reply = send(state, actor, &session_id, &message).await;
        if json {
            println!(
                "{}",
                serde_json::to_string_pretty(&serde_json::json!({
                    "actor_id": actor,
                    "session_id": session_id,
                    "reply": reply,
                }))?
            );
        } else {
            println!("{}", reply.content);
        }
        return Ok(());
    }

    println!();
    println!(
        "  {} Chatting as '{}' in session {}",
        style("💬").bold(),
        style(actor).cyan(),
        style(&session_id).dim()
    );
    println!("  {}", style("Type /quit to exit").dim());
    println!();

    let mut transcript: Vec<ChatMessage> = Vec::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("  {} ", style("you>").green().bold());
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line == "/quit" || line == "/exit" {
            break;
        }

        transcript.push(ChatMessage::now(ChatRole::User, line));

        let reply = send(state, actor, &session_id, line).await;
        if json {
            println!("{}", serde_json::to_string(&reply)?);
        } else {
            println!("  {} {}", style("agent>").blue().bold(), reply.content);
            println!(
                "  {}",
                style(format!("{}", reply.timestamp.format("%H:%M:%S"))).dim()
            );
        }
        transcript.push(reply);
    }

    println!();
    println!(
        "  {} message{} this session. Resume with: {}",
        style(transcript.len()).bold(),
        if transcript.len() == 1 { "" } else { "s" },
        style(format!("confab chat {actor} --session {session_id}")).yellow()
    );
    println!();

    Ok(())
}

async fn send(state: &AppState, actor: &str, session_id: &str, message: &str) -> ChatMessage {
    let payload = DispatchPayload {
        prompt: Some(message.to_string()),
        actor_id: Some(actor.to_string()),
        session_id: Some(session_id.to_string()),
        ..Default::default()
    };

    let reply = state.dispatcher.dispatch_text(&payload).await;
    ChatMessage::now(ChatRole::Assistant, reply)
}
