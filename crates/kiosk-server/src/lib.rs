//! Lifecycle-managed HTTP server for the kiosk embedded web app.
//!
//! The pieces a host process needs to run the bundled single-page app
//! as one of its managed sub-units:
//!
//! - [`router`] - axum routes that resolve every `GET` through the
//!   asset bundle, with SPA fallback
//! - [`WebServer`] - start/close lifecycle around those routes, with a
//!   deadline-bounded drain on shutdown
//! - [`ComponentRegistry`] - explicit bootstrap-time registration of
//!   the component's identity with the host
//!
//! Request handling is a pure read path: no locks are taken around the
//! asset bundle, and concurrent requests never affect each other.

pub mod error;
pub mod registry;
pub mod router;
pub mod server;

pub use error::{RegistryError, ServerError};
pub use registry::{ComponentDescriptor, ComponentRegistry};
pub use router::router;
pub use server::{ServerState, WebServer};
