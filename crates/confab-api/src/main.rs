//! Confab CLI and REST API entry point.
//!
//! Binary name: `confab`
//!
//! Parses CLI arguments, loads settings, wires the AgentCore client into
//! the dispatch and memory services, then dispatches to the appropriate
//! command handler or starts the REST API server.

mod cli;
mod http;
mod state;

use clap::Parser;

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let serve_otel = matches!(cli.command, Commands::Serve { otel: true, .. });

    // The server installs the full subscriber (optionally with OTel export);
    // one-shot commands get a plain fmt subscriber driven by verbosity.
    if let Commands::Serve { .. } = cli.command {
        confab_observe::tracing_setup::init_server_tracing(serve_otel)
            .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;
    } else {
        confab_observe::tracing_setup::init_cli_tracing(cli.verbose, cli.quiet);
    }

    let state = AppState::init().await?;

    match cli.command {
        Commands::Serve { port, host, .. } => {
            let addr = format!("{host}:{port}");
            let listener = tokio::net::TcpListener::bind(&addr).await?;

            println!(
                "  {} Confab listening on {}",
                console::style("⚡").bold(),
                console::style(format!("http://{addr}")).cyan()
            );
            println!("  {}", console::style("Press Ctrl+C to stop").dim());

            let router = http::router::build_router(state);

            axum::serve(listener, router)
                .with_graceful_shutdown(shutdown_signal())
                .await?;

            if serve_otel {
                confab_observe::tracing_setup::shutdown_tracing();
            }
            println!("\n  Server stopped.");
        }

        Commands::Chat {
            actor,
            session,
            message,
        } => {
            cli::chat::chat(&state, &actor, session, message, cli.json).await?;
        }

        Commands::Sessions { actor } => {
            cli::session::list_sessions(&state, &actor, cli.json).await?;
        }

        Commands::Transcript { actor, session } => {
            cli::session::show_transcript(&state, &actor, &session, cli.json).await?;
        }

        Commands::Status { probe } => {
            cli::status::status(&state, probe, cli.json).await?;
        }
    }

    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
