//! Error types for bundle loading and validation.

use thiserror::Error;

/// Errors raised while loading or validating an asset bundle.
///
/// A bundle that fails to load must never be served: the web server
/// refuses to start without a structurally valid bundle.
#[derive(Debug, Error)]
pub enum BundleError {
    /// The bundle source contained no files at all.
    #[error("asset bundle is empty\n\nHint: build the frontend (web/dist) before compiling the module")]
    Empty,

    /// The bundle has no root document to serve for `/` and SPA fallback.
    #[error("asset bundle is missing its root document '{0}'\n\nHint: the frontend build must emit an index.html at the bundle root")]
    MissingRoot(String),
}
