//! HTTP routing for the asset server.
//!
//! A single fallback handler resolves every `GET` through the
//! [`AssetResolver`]. Resolution is total, so the handler always answers
//! `200 OK` for `GET`; other methods get `405 Method Not Allowed`.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{Method, StatusCode, Uri, header},
    response::Response,
};
use kiosk_assets::AssetResolver;
use tower_http::trace::TraceLayer;

/// Build the router serving the resolver-backed asset tree.
///
/// Exposed so a host embedding the lifecycle can layer its own
/// middleware around the asset routes.
pub fn router(resolver: Arc<AssetResolver>) -> axum::Router {
    axum::Router::new()
        .fallback(serve_asset)
        .layer(TraceLayer::new_for_http())
        .with_state(resolver)
}

/// Resolve a request path to bundle content.
async fn serve_asset(
    State(resolver): State<Arc<AssetResolver>>,
    method: Method,
    uri: Uri,
) -> Response {
    if method != Method::GET {
        return Response::builder()
            .status(StatusCode::METHOD_NOT_ALLOWED)
            .header(header::ALLOW, "GET")
            .header(header::CONTENT_TYPE, "text/plain")
            .body(Body::from("only GET is supported"))
            .unwrap();
    }

    let asset = resolver.resolve(uri.path());
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, asset.content_type)
        .header(header::CONTENT_LENGTH, asset.data.len())
        .body(Body::from(asset.data.to_vec()))
        .unwrap()
}
