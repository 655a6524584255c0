//! Error types for the server lifecycle and component registry.

use std::net::SocketAddr;

use thiserror::Error;

/// Errors surfaced by [`WebServer`](crate::WebServer) lifecycle calls.
///
/// Bind and lifecycle failures propagate to the caller with no internal
/// retry; retry policy belongs to the host, which knows whether a port
/// conflict is transient.
#[derive(Debug, Error)]
pub enum ServerError {
    /// The listening socket could not be bound.
    #[error("failed to bind {addr}: {source}\n\nHint: the port may already be in use; choose another, or pass 0 to let the OS pick")]
    Bind {
        /// Address the bind was attempted on.
        addr: SocketAddr,
        /// Underlying socket error.
        #[source]
        source: std::io::Error,
    },

    /// `start` was called on a server that is not idle.
    #[error("web server already started\n\nHint: start is only valid from the idle state; construct a new server to serve again")]
    AlreadyStarted,
}

/// Errors from [`ComponentRegistry`](crate::ComponentRegistry).
#[derive(Debug, Error)]
pub enum RegistryError {
    /// A descriptor with the same identity triplet is already present.
    #[error("component '{0}' is already registered")]
    Duplicate(String),
}
