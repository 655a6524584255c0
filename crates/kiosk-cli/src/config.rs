//! Runtime configuration for the standalone server.
//!
//! Sources, lowest to highest precedence: built-in defaults, an
//! optional `kiosk.json` in the working directory (or the file passed
//! via `--config`), then CLI flags.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use serde::Deserialize;

use crate::cli::ServeArgs;

/// Config file discovered in the working directory when present.
pub const CONFIG_FILE: &str = "kiosk.json";

/// Default TCP port for standalone serving.
pub const DEFAULT_PORT: u16 = 8888;

/// Default drain deadline on shutdown.
pub const DEFAULT_DRAIN_TIMEOUT_MS: u64 = 5_000;

/// Resolved server configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KioskConfig {
    /// TCP port to bind; 0 delegates to the OS.
    pub port: u16,

    /// Shutdown drain deadline in milliseconds.
    pub drain_timeout_ms: u64,
}

impl Default for KioskConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            drain_timeout_ms: DEFAULT_DRAIN_TIMEOUT_MS,
        }
    }
}

impl KioskConfig {
    /// Load configuration from a file.
    ///
    /// With no explicit path, `kiosk.json` is used when it exists and
    /// defaults apply otherwise. An explicit path must exist and parse.
    pub fn load(explicit: Option<&Path>) -> anyhow::Result<Self> {
        let path = match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => {
                let discovered = PathBuf::from(CONFIG_FILE);
                discovered.exists().then_some(discovered)
            }
        };

        let Some(path) = path else {
            return Ok(Self::default());
        };

        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read config file '{}'", path.display()))?;
        let config = serde_json::from_str(&contents)
            .with_context(|| format!("invalid JSON in config file '{}'", path.display()))?;
        Ok(config)
    }

    /// Apply CLI flag overrides.
    pub fn merge_args(mut self, args: &ServeArgs) -> Self {
        if let Some(port) = args.port {
            self.port = port;
        }
        if let Some(drain_timeout_ms) = args.drain_timeout_ms {
            self.drain_timeout_ms = drain_timeout_ms;
        }
        self
    }

    /// Drain deadline as a [`Duration`].
    pub fn drain_timeout(&self) -> Duration {
        Duration::from_millis(self.drain_timeout_ms)
    }
}
