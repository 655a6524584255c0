//! Standalone serve mode.
//!
//! Loads the embedded bundle, registers the component, starts the web
//! server on the configured port, and runs until Ctrl+C. Shutdown
//! drains in-flight requests up to the configured deadline on every
//! exit path.

use std::sync::Arc;

use anyhow::{Context, Result};
use kiosk_assets::{AssetBundle, AssetResolver, EmbeddedBundle};
use kiosk_server::{ComponentDescriptor, ComponentRegistry, WebServer};
use tokio::signal;
use tracing::debug;

use crate::cli::ServeArgs;
use crate::config::KioskConfig;
use crate::ui;

/// Identity this binary advertises when it registers itself.
fn component_descriptor() -> ComponentDescriptor {
    ComponentDescriptor::new("mattmacf98", "web-app", "sanding-history")
}

/// Execute the serve command.
pub async fn execute(args: ServeArgs) -> Result<()> {
    let config = KioskConfig::load(args.config.as_deref())?.merge_args(&args);
    debug!(?config, "resolved configuration");

    let bundle = EmbeddedBundle::load().context("embedded asset bundle failed to load")?;
    ui::info(&format!("Loaded asset bundle ({} entries)", bundle.len()));

    let resolver =
        Arc::new(AssetResolver::new(Arc::new(bundle)).context("asset bundle is not servable")?);

    // Standalone mode plays host: the registry a managing runtime would
    // own is constructed here and populated before the server starts.
    let registry = ComponentRegistry::new();
    registry.register(component_descriptor())?;

    let server = WebServer::new(resolver);
    let addr = server
        .start(config.port)
        .await
        .context("failed to start web server")?;

    ui::success(&format!("Serving at http://{addr}"));
    ui::info("Press Ctrl+C to stop");

    signal::ctrl_c()
        .await
        .context("failed to listen for shutdown signal")?;

    ui::info("Shutting down...");
    server.close(config.drain_timeout()).await?;
    ui::success("Server stopped");
    Ok(())
}
