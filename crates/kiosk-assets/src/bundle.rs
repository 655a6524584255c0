//! Immutable asset bundles.
//!
//! An [`AssetBundle`] is a read-only mapping from `/`-rooted request
//! paths to static content. Bundles are built once, before the server
//! starts, and never mutated afterwards, so concurrent request handlers
//! can read them without locking.
//!
//! Two implementations are provided:
//!
//! - [`EmbeddedBundle`] - backed by the pre-built frontend compiled into
//!   the binary with `rust-embed`
//! - [`MemoryBundle`] - backed by an in-memory map, for tests and hosts
//!   that package assets some other way

use std::borrow::Cow;
use std::collections::HashMap;

use rust_embed::RustEmbed;
use tracing::debug;

use crate::error::BundleError;

/// Path of the bundle's root document, served for `/` and as the SPA
/// fallback for unmatched routes.
pub const ROOT_DOCUMENT: &str = "/index.html";

/// A single bundle entry: content bytes plus the content type inferred
/// from its file extension at bundle build time.
#[derive(Debug, Clone)]
pub struct Asset {
    /// File content. Borrowed from the binary for embedded release
    /// builds, owned otherwise.
    pub data: Cow<'static, [u8]>,
    /// MIME type, fixed when the entry is created.
    pub content_type: &'static str,
}

/// Read-only mapping from request path to static content.
///
/// Implementations must be safe for unlimited concurrent readers.
pub trait AssetBundle: Send + Sync {
    /// Look up an asset by its `/`-rooted path.
    fn get(&self, path: &str) -> Option<&Asset>;

    /// Path of the root document. Guaranteed present in any bundle that
    /// passed validation.
    fn root_path(&self) -> &str {
        ROOT_DOCUMENT
    }

    /// Number of entries in the bundle.
    fn len(&self) -> usize;

    /// Whether the bundle has no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All entry paths, sorted.
    fn paths(&self) -> Vec<String>;
}

/// Infer a content type from a path's file extension.
///
/// Called once per entry when a bundle is built; request handling never
/// recomputes types.
pub fn content_type_for(path: &str) -> &'static str {
    let extension = std::path::Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("");

    match extension {
        "html" => "text/html; charset=utf-8",
        "js" | "mjs" => "application/javascript",
        "css" => "text/css",
        "json" | "map" => "application/json",
        "wasm" => "application/wasm",
        "svg" => "image/svg+xml",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "ico" => "image/x-icon",
        "woff" => "font/woff",
        "woff2" => "font/woff2",
        "ttf" => "font/ttf",
        "txt" => "text/plain; charset=utf-8",
        _ => "application/octet-stream",
    }
}

fn validate(files: &HashMap<String, Asset>) -> Result<(), BundleError> {
    if files.is_empty() {
        return Err(BundleError::Empty);
    }
    if !files.contains_key(ROOT_DOCUMENT) {
        return Err(BundleError::MissingRoot(ROOT_DOCUMENT.to_string()));
    }
    Ok(())
}

fn sorted_paths(files: &HashMap<String, Asset>) -> Vec<String> {
    let mut paths: Vec<String> = files.keys().cloned().collect();
    paths.sort();
    paths
}

#[derive(RustEmbed)]
#[folder = "web/dist/"]
struct DistAssets;

/// Bundle backed by the frontend build compiled into the binary.
///
/// `load` materializes the embedded folder into a map so content types
/// are computed exactly once, then validates the structure. Loading is
/// cheap (the bytes stay borrowed from the binary in release builds)
/// and performed at process start.
pub struct EmbeddedBundle {
    files: HashMap<String, Asset>,
}

impl EmbeddedBundle {
    /// Load and validate the embedded frontend bundle.
    ///
    /// # Errors
    ///
    /// Returns [`BundleError::Empty`] when the embed folder had no files
    /// and [`BundleError::MissingRoot`] when no root document exists.
    pub fn load() -> Result<Self, BundleError> {
        let mut files = HashMap::new();
        for name in DistAssets::iter() {
            let Some(file) = DistAssets::get(&name) else {
                continue;
            };
            let path = format!("/{name}");
            let content_type = content_type_for(&path);
            files.insert(
                path,
                Asset {
                    data: file.data,
                    content_type,
                },
            );
        }

        validate(&files)?;
        debug!(entries = files.len(), "loaded embedded asset bundle");
        Ok(Self { files })
    }
}

impl AssetBundle for EmbeddedBundle {
    fn get(&self, path: &str) -> Option<&Asset> {
        self.files.get(path)
    }

    fn len(&self) -> usize {
        self.files.len()
    }

    fn paths(&self) -> Vec<String> {
        sorted_paths(&self.files)
    }
}

/// Bundle backed by an in-memory map.
///
/// Built with [`MemoryBundle::builder`]; validation happens in
/// [`MemoryBundleBuilder::build`] so a constructed bundle carries the
/// same guarantees as an embedded one.
#[derive(Debug)]
pub struct MemoryBundle {
    files: HashMap<String, Asset>,
}

impl MemoryBundle {
    /// Start building an in-memory bundle.
    pub fn builder() -> MemoryBundleBuilder {
        MemoryBundleBuilder {
            files: HashMap::new(),
        }
    }
}

impl AssetBundle for MemoryBundle {
    fn get(&self, path: &str) -> Option<&Asset> {
        self.files.get(path)
    }

    fn len(&self) -> usize {
        self.files.len()
    }

    fn paths(&self) -> Vec<String> {
        sorted_paths(&self.files)
    }
}

/// Builder for [`MemoryBundle`].
pub struct MemoryBundleBuilder {
    files: HashMap<String, Asset>,
}

impl MemoryBundleBuilder {
    /// Insert an entry, inferring its content type from the path.
    ///
    /// Paths are stored `/`-rooted; a missing leading slash is added.
    pub fn insert(self, path: &str, data: impl Into<Vec<u8>>) -> Self {
        let content_type = content_type_for(path);
        self.insert_with_type(path, data, content_type)
    }

    /// Insert an entry with an explicit content type.
    pub fn insert_with_type(
        mut self,
        path: &str,
        data: impl Into<Vec<u8>>,
        content_type: &'static str,
    ) -> Self {
        let path = if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{path}")
        };
        self.files.insert(
            path,
            Asset {
                data: Cow::Owned(data.into()),
                content_type,
            },
        );
        self
    }

    /// Validate and finish the bundle.
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`EmbeddedBundle::load`].
    pub fn build(self) -> Result<MemoryBundle, BundleError> {
        validate(&self.files)?;
        Ok(MemoryBundle { files: self.files })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_type_table_covers_common_extensions() {
        assert_eq!(content_type_for("/index.html"), "text/html; charset=utf-8");
        assert_eq!(content_type_for("/assets/app.js"), "application/javascript");
        assert_eq!(content_type_for("/assets/app.mjs"), "application/javascript");
        assert_eq!(content_type_for("/assets/app.css"), "text/css");
        assert_eq!(content_type_for("/favicon.svg"), "image/svg+xml");
        assert_eq!(content_type_for("/data.json"), "application/json");
    }

    #[test]
    fn content_type_unknown_extension_is_octet_stream() {
        assert_eq!(content_type_for("/archive.tar.zst"), "application/octet-stream");
        assert_eq!(content_type_for("/no-extension"), "application/octet-stream");
    }

    #[test]
    fn memory_bundle_requires_root_document() {
        let err = MemoryBundle::builder()
            .insert("/app.js", "console.log(1)")
            .build()
            .unwrap_err();
        assert!(matches!(err, BundleError::MissingRoot(_)));
    }

    #[test]
    fn memory_bundle_rejects_empty() {
        let err = MemoryBundle::builder().build().unwrap_err();
        assert!(matches!(err, BundleError::Empty));
    }

    #[test]
    fn memory_bundle_normalizes_keys_to_rooted_paths() {
        let bundle = MemoryBundle::builder()
            .insert("index.html", "<html>shell</html>")
            .insert("app.js", "console.log(1)")
            .build()
            .unwrap();

        assert!(bundle.get("/index.html").is_some());
        assert!(bundle.get("/app.js").is_some());
        assert_eq!(bundle.len(), 2);
        assert_eq!(bundle.paths(), vec!["/app.js", "/index.html"]);
    }

    #[test]
    fn memory_bundle_explicit_type_wins() {
        let bundle = MemoryBundle::builder()
            .insert("/index.html", "<html></html>")
            .insert_with_type("/download", b"bytes".to_vec(), "application/octet-stream")
            .build()
            .unwrap();

        assert_eq!(
            bundle.get("/download").unwrap().content_type,
            "application/octet-stream"
        );
    }

    #[test]
    fn embedded_bundle_loads_dist() {
        let bundle = EmbeddedBundle::load().unwrap();

        let root = bundle.get(ROOT_DOCUMENT).unwrap();
        assert_eq!(root.content_type, "text/html; charset=utf-8");
        assert!(!root.data.is_empty());

        let js = bundle.get("/assets/app.js").unwrap();
        assert_eq!(js.content_type, "application/javascript");
    }
}
