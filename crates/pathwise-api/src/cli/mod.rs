//! CLI command definitions and dispatch for the `pathwise` binary.
//!
//! Uses clap derive macros for argument parsing. The CLI follows a
//! noun-verb pattern for session management (`pathwise sessions list`)
//! plus top-level `chat` and `serve` commands.

pub mod chat;
pub mod session;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Career-guidance chat sessions with an AI counselor.
#[derive(Parser)]
#[command(name = "pathwise", version, about, long_about = None)]
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

    /// User identifier that owns the sessions.
    #[arg(long, global = true, env = "PATHWISE_USER", default_value = "local")]
    pub user: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start an interactive chat session.
    Chat {
        /// Resume a previous session by ID.
        #[arg(long)]
        resume: Option<String>,
    },

    /// Manage chat sessions.
    Sessions {
        #[command(subcommand)]
        action: SessionCommand,
    },

    /// Start the REST API server.
    Serve {
        /// Port to listen on.
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Host to bind to.
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum SessionCommand {
    /// List sessions, most recently active first.
    #[command(alias = "ls")]
    List {
        /// Page number (1-based).
        #[arg(long, default_value = "1")]
        page: u32,

        /// Sessions per page.
        #[arg(long, default_value = "20")]
        page_size: u32,
    },

    /// Rename a session.
    Rename {
        /// Session ID.
        id: String,

        /// New title.
        title: String,
    },

    /// Delete a session and its messages.
    #[command(alias = "rm")]
    Delete {
        /// Session ID.
        id: String,

        /// Skip confirmation prompt.
        #[arg(long)]
        force: bool,
    },
}
