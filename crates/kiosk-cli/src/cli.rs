//! Command-line interface definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// kiosk - serve the embedded web app from the command line.
#[derive(Debug, Parser)]
#[command(name = "kiosk", version, about = "Embedded static web server for the bundled single-page app")]
pub struct Cli {
    /// Enable debug-level logging
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Only show errors
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Serve the embedded bundle until interrupted
    Serve(ServeArgs),

    /// List the embedded bundle's entries
    Assets,
}

/// Arguments for the serve command.
#[derive(Debug, Args)]
pub struct ServeArgs {
    /// TCP port to bind (0 lets the OS pick an ephemeral port)
    #[arg(short, long)]
    pub port: Option<u16>,

    /// How long to wait for in-flight requests on shutdown, in milliseconds
    #[arg(long)]
    pub drain_timeout_ms: Option<u64>,

    /// Path to a kiosk.json config file (defaults to ./kiosk.json when present)
    #[arg(long)]
    pub config: Option<PathBuf>,
}
