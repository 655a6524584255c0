//! Asset bundle and resolver for the kiosk embedded web server.
//!
//! This crate owns the pure, network-free half of the system: the
//! immutable [`AssetBundle`] loaded once at process start, and the
//! [`AssetResolver`] that maps request paths onto it with
//! single-page-application fallback semantics.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use kiosk_assets::{AssetResolver, EmbeddedBundle};
//!
//! let bundle = EmbeddedBundle::load().expect("frontend build present");
//! let resolver = AssetResolver::new(Arc::new(bundle)).expect("root document present");
//!
//! // Client-side routes resolve to the application shell.
//! let asset = resolver.resolve("/history/42");
//! assert_eq!(asset.content_type, "text/html; charset=utf-8");
//! ```

pub mod bundle;
pub mod error;
pub mod resolver;

pub use bundle::{
    Asset, AssetBundle, EmbeddedBundle, MemoryBundle, MemoryBundleBuilder, ROOT_DOCUMENT,
    content_type_for,
};
pub use error::BundleError;
pub use resolver::AssetResolver;
