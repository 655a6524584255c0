//! Bundle inspection: list the embedded bundle's entries.

use anyhow::{Context, Result};
use kiosk_assets::{AssetBundle, EmbeddedBundle};

/// Execute the assets command.
///
/// Loading performs the same validation the server does at startup, so
/// this doubles as a bundle sanity check.
pub fn execute() -> Result<()> {
    let bundle = EmbeddedBundle::load().context("embedded asset bundle failed to load")?;

    println!("{:<40} {:>10}  {}", "PATH", "SIZE", "CONTENT-TYPE");
    for path in bundle.paths() {
        if let Some(asset) = bundle.get(&path) {
            println!("{:<40} {:>10}  {}", path, asset.data.len(), asset.content_type);
        }
    }
    println!("\n{} entries", bundle.len());
    Ok(())
}
