//! CLI command definitions and dispatch for the `confab` binary.
//!
//! Uses clap derive macros for argument parsing. Commands mirror the web
//! pages: `chat`, `sessions`, `transcript`, `status`, plus `serve` for the
//! HTTP API and static UI.

pub mod chat;
pub mod session;
pub mod status;

use clap::{Parser, Subcommand};

/// Chat console for a hosted conversational-agent runtime.
#[derive(Parser)]
#[command(name = "confab", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP API and static web UI.
    Serve {
        /// Port to listen on.
        #[arg(long, default_value_t = 8787)]
        port: u16,

        /// Host to bind.
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Export spans via OpenTelemetry (stdout exporter).
        #[arg(long)]
        otel: bool,
    },

    /// Chat with the hosted agent from the terminal.
    Chat {
        /// Actor the conversation belongs to.
        #[arg(default_value = confab_types::chat::DEFAULT_ACTOR_ID)]
        actor: String,

        /// Continue an existing session instead of starting a new one.
        #[arg(long)]
        session: Option<String>,

        /// Send a single message and exit instead of entering the loop.
        #[arg(long)]
        message: Option<String>,
    },

    /// List recorded sessions for an actor.
    Sessions {
        /// Actor whose sessions to list.
        #[arg(default_value = confab_types::chat::DEFAULT_ACTOR_ID)]
        actor: String,
    },

    /// Show the recorded transcript of one session.
    Transcript {
        /// Actor the session belongs to.
        actor: String,

        /// Session id to display.
        session: String,
    },

    /// Show configuration, environment checks, and connectivity.
    Status {
        /// Also run the runtime and memory smoke tests.
        #[arg(long)]
        probe: bool,
    },
}
