//! Logging setup for the kiosk CLI.
//!
//! Structured logging via the `tracing` ecosystem with three verbosity
//! tiers. `RUST_LOG` overrides the default filter when neither flag is
//! set.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the global tracing subscriber.
///
/// Call once, early in `main`, before anything logs.
///
/// # Verbosity
///
/// 1. `--verbose`: debug level for kiosk crates (including per-request
///    `tower_http` traces)
/// 2. `--quiet`: errors only
/// 3. `RUST_LOG` environment variable: custom filter
/// 4. default: info level for kiosk crates
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    let filter = if verbose {
        EnvFilter::new("kiosk_assets=debug,kiosk_server=debug,kiosk_cli=debug,tower_http=debug")
    } else if quiet {
        EnvFilter::new("kiosk_assets=error,kiosk_server=error,kiosk_cli=error")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("kiosk_assets=info,kiosk_server=info,kiosk_cli=info"))
    };

    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color)
        .compact();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    // The subscriber is global and can only be installed once per
    // process, so these only cover filter construction.

    #[test]
    fn verbose_filter_parses() {
        let _ = EnvFilter::new(
            "kiosk_assets=debug,kiosk_server=debug,kiosk_cli=debug,tower_http=debug",
        );
    }

    #[test]
    fn quiet_filter_parses() {
        let _ = EnvFilter::new("kiosk_assets=error,kiosk_server=error,kiosk_cli=error");
    }
}
