//! Request-path resolution with single-page-application semantics.
//!
//! The resolver maps any inbound request path to bundle content. It is
//! total: paths that match no bundle entry resolve to the root document
//! so the client-side router can take over (routes like `/history/42`
//! exist only in the browser, not in the bundle).

use std::sync::Arc;

use crate::bundle::{Asset, AssetBundle};
use crate::error::BundleError;

/// Resolves request paths against an [`AssetBundle`].
///
/// Construction validates that the bundle's root document exists, which
/// is what makes [`resolve`](AssetResolver::resolve) total.
pub struct AssetResolver {
    bundle: Arc<dyn AssetBundle>,
}

impl std::fmt::Debug for AssetResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssetResolver")
            .field("entries", &self.bundle.len())
            .finish()
    }
}

impl AssetResolver {
    /// Wrap a bundle.
    ///
    /// # Errors
    ///
    /// Returns [`BundleError::MissingRoot`] when the bundle has no root
    /// document to fall back to.
    pub fn new(bundle: Arc<dyn AssetBundle>) -> Result<Self, BundleError> {
        if bundle.get(bundle.root_path()).is_none() {
            return Err(BundleError::MissingRoot(bundle.root_path().to_string()));
        }
        Ok(Self { bundle })
    }

    /// Resolve a raw request path to an asset.
    ///
    /// Never fails: unmatched paths resolve to the root document.
    pub fn resolve(&self, raw_path: &str) -> &Asset {
        self.lookup(raw_path).unwrap_or_else(|| self.root())
    }

    /// The bundle's root document.
    pub fn root(&self) -> &Asset {
        self.bundle
            .get(self.bundle.root_path())
            .expect("root document presence is checked at construction")
    }

    /// Read access to the underlying bundle.
    pub fn bundle(&self) -> &dyn AssetBundle {
        self.bundle.as_ref()
    }

    fn lookup(&self, raw_path: &str) -> Option<&Asset> {
        let (path, wants_index) = normalize(raw_path);
        if path == "/" {
            return self.bundle.get(self.bundle.root_path());
        }
        if wants_index {
            // Directory-like request: only that directory's index
            // document can satisfy it.
            return self.bundle.get(&format!("{path}/index.html"));
        }
        self.bundle.get(&path)
    }
}

/// Normalize a raw request path.
///
/// Strips the query string and fragment, collapses `.` and empty
/// segments, and resolves `..` clamped at the logical root so traversal
/// sequences can never address anything outside the bundle's key space.
///
/// Returns the normalized `/`-rooted path and whether the request was
/// directory-like (empty path or trailing slash).
fn normalize(raw: &str) -> (String, bool) {
    let path = raw.split(['?', '#']).next().unwrap_or("");
    let wants_index = path.is_empty() || path.ends_with('/');

    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                // Clamp at root: excess `..` segments are dropped.
                segments.pop();
            }
            other => segments.push(other),
        }
    }

    if segments.is_empty() {
        return ("/".to_string(), true);
    }
    (format!("/{}", segments.join("/")), wants_index)
}
