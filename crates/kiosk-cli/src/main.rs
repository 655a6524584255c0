//! Entry point for the `kiosk` binary.

use anyhow::Result;
use clap::Parser;
use kiosk_cli::{cli, commands, logger};

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();
    logger::init_logger(args.verbose, args.quiet, args.no_color);

    match args.command {
        cli::Command::Serve(serve_args) => commands::serve_execute(serve_args).await,
        cli::Command::Assets => commands::assets_execute(),
    }
}
