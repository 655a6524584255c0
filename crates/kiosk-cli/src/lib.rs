//! kiosk CLI - standalone runner for the embedded web app server.
//!
//! The binary wraps `kiosk-server` for use outside a managing host
//! runtime: it loads the embedded bundle, registers the component,
//! serves until interrupted, and drains on shutdown.
//!
//! Modules:
//!
//! - [`cli`] - clap argument definitions
//! - [`commands`] - command implementations (`serve`, `assets`)
//! - [`config`] - defaults, `kiosk.json`, and flag overrides
//! - [`logger`] - tracing subscriber setup
//! - [`ui`] - status messages for the terminal

pub mod cli;
pub mod commands;
pub mod config;
pub mod logger;
pub mod ui;

pub use config::KioskConfig;
