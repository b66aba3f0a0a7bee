//! Settings and diagnostics dashboard command.

use anyhow::Result;
use console::style;

use confab_core::diagnostics::{probe_memory, probe_runtime};

use crate::state::AppState;

/// Display the configuration snapshot, per-variable environment check, and
/// (with `probe`) the connectivity smoke tests.
pub async fn status(state: &AppState, probe: bool, json: bool) -> Result<()> {
    let environment = state.settings.check();

    let probes = if probe {
        let runtime = probe_runtime(&*state.runtime, state.settings.qualifier()).await;
        let memory = probe_memory(state.memory.store()).await;
        Some((runtime, memory))
    } else {
        None
    };

    if json {
        let mut body = serde_json::json!({
            "version": env!("CARGO_PKG_VERSION"),
            "data_dir": state.data_dir.display().to_string(),
            "settings": state.settings.snapshot(),
            "environment": environment,
        });
        if let Some((runtime, memory)) = &probes {
            body["probes"] = serde_json::json!({
                "runtime": probe_json(runtime),
                "memory": probe_json(memory),
            });
        }
        println!("{}", serde_json::to_string_pretty(&body)?);
        return Ok(());
    }

    let check_mark = |ok: bool| {
        if ok {
            format!("{}", style("✓").green())
        } else {
            format!("{}", style("✗").red())
        }
    };

    println!();
    println!(
        "  {} Confab v{}",
        style("⚡").bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!();

    println!("  {}", style("── Runtime ──").dim());
    println!(
        "  Region:    {}",
        style(state.settings.region()).bold()
    );
    println!(
        "  Qualifier: {}",
        style(state.settings.qualifier()).bold()
    );
    match &state.settings.agent_runtime_arn {
        Some(arn) => println!("  Agent:     {}", style(arn).dim()),
        None => println!("  Agent:     {}", style("(not configured)").red()),
    }
    println!();

    println!("  {}", style("── Environment ──").dim());
    for entry in &environment {
        println!("  {} {}", check_mark(entry.set), entry.name);
    }
    println!();

    if let Some((runtime, memory)) = &probes {
        println!("  {}", style("── Connectivity ──").dim());
        match runtime {
            Ok(()) => println!("  {} AgentCore Runtime connection successful", check_mark(true)),
            Err(e) => println!(
                "  {} AgentCore Runtime connection failed: {}",
                check_mark(false),
                style(e).dim()
            ),
        }
        match memory {
            Ok(()) => println!("  {} Memory access successful", check_mark(true)),
            Err(e) => println!(
                "  {} Memory access failed: {}",
                check_mark(false),
                style(e).dim()
            ),
        }
        println!();
    }

    println!("  {}", style("── System ──").dim());
    println!(
        "  Data dir: {}",
        style(state.data_dir.display()).dim()
    );
    println!(
        "  Handles:  {}",
        style(state.dispatcher.registry().len()).dim()
    );
    println!();

    Ok(())
}

fn probe_json(outcome: &Result<(), confab_types::error::RuntimeError>) -> serde_json::Value {
    match outcome {
        Ok(()) => serde_json::json!({ "ok": true }),
        Err(e) => serde_json::json!({ "ok": false, "error": e.to_string() }),
    }
}
